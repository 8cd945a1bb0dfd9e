// ABOUTME: Proctoring setup gate: rules consent, device permissions, screen share

use super::{PermissionStatus, StepGate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProctoringStep {
    Consent,
    Devices,
    ScreenShare,
}

impl ProctoringStep {
    pub fn all() -> &'static [ProctoringStep] {
        &[Self::Consent, Self::Devices, Self::ScreenShare]
    }

    pub fn from_number(number: usize) -> Option<Self> {
        Self::all().get(number.checked_sub(1)?).copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Consent => "Rules & Consent",
            Self::Devices => "Camera & Microphone",
            Self::ScreenShare => "Screen Share",
        }
    }
}

/// Flags collected while a candidate prepares a proctored session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProctoringSetup {
    pub accepted_rules: bool,
    pub accepted_recording: bool,
    pub camera: PermissionStatus,
    pub microphone: PermissionStatus,
    pub screen_share: PermissionStatus,
}

impl ProctoringSetup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consent_given(&self) -> bool {
        self.accepted_rules && self.accepted_recording
    }

    pub fn devices_ready(&self) -> bool {
        self.camera.is_granted() && self.microphone.is_granted()
    }
}

impl StepGate for ProctoringSetup {
    fn total_steps(&self) -> usize {
        ProctoringStep::all().len()
    }

    fn can_advance(&self, step: usize) -> bool {
        match ProctoringStep::from_number(step) {
            Some(ProctoringStep::Consent) => self.consent_given(),
            Some(ProctoringStep::Devices) => self.devices_ready(),
            Some(ProctoringStep::ScreenShare) => self.screen_share.is_granted(),
            None => true,
        }
    }

    fn step_title(&self, step: usize) -> &'static str {
        ProctoringStep::from_number(step).map_or("", |s| s.title())
    }
}
