// ABOUTME: Pre-assessment system check gate (camera, microphone, screen share, network)

use tracing::info;

use super::{PermissionStatus, StepGate};

/// Checks in the order a candidate runs them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemCheckStep {
    Camera,
    Microphone,
    ScreenShare,
    Network,
}

impl SystemCheckStep {
    pub fn all() -> &'static [SystemCheckStep] {
        &[Self::Camera, Self::Microphone, Self::ScreenShare, Self::Network]
    }

    pub fn from_number(number: usize) -> Option<Self> {
        Self::all().get(number.checked_sub(1)?).copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Camera => "Camera",
            Self::Microphone => "Microphone",
            Self::ScreenShare => "Screen Share",
            Self::Network => "Network",
        }
    }

    /// Look up a check by its command-line name, case-insensitively
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.slug().eq_ignore_ascii_case(slug.trim()))
    }

    /// Command-line name
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Microphone => "microphone",
            Self::ScreenShare => "screen",
            Self::Network => "network",
        }
    }
}

/// Recorded results of the system check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemCheck {
    pub camera: PermissionStatus,
    pub microphone: PermissionStatus,
    pub screen_share: PermissionStatus,
    pub network: PermissionStatus,
}

impl SystemCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, check: SystemCheckStep) -> &PermissionStatus {
        match check {
            SystemCheckStep::Camera => &self.camera,
            SystemCheckStep::Microphone => &self.microphone,
            SystemCheckStep::ScreenShare => &self.screen_share,
            SystemCheckStep::Network => &self.network,
        }
    }

    /// Record the outcome of an external check. Re-recording is how a retry lands.
    pub fn record(&mut self, check: SystemCheckStep, status: PermissionStatus) {
        info!("System check '{}' recorded as {}", check.slug(), status);
        let slot = match check {
            SystemCheckStep::Camera => &mut self.camera,
            SystemCheckStep::Microphone => &mut self.microphone,
            SystemCheckStep::ScreenShare => &mut self.screen_share,
            SystemCheckStep::Network => &mut self.network,
        };
        *slot = status;
    }

    pub fn all_passed(&self) -> bool {
        SystemCheckStep::all()
            .iter()
            .all(|c| self.status(*c).is_granted())
    }
}

impl StepGate for SystemCheck {
    fn total_steps(&self) -> usize {
        SystemCheckStep::all().len()
    }

    fn can_advance(&self, step: usize) -> bool {
        SystemCheckStep::from_number(step).map_or(true, |c| self.status(c).is_granted())
    }

    fn step_title(&self, step: usize) -> &'static str {
        SystemCheckStep::from_number(step).map_or("", |c| c.title())
    }
}
