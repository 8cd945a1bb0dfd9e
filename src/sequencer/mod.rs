// ABOUTME: Ordinal step sequencer with per-step gates and progress reporting
//
// The sequencer performs no I/O. Gates read flags that other code records
// (permission prompts, consent checkboxes, draft validation).

pub mod proctoring;
pub mod system_check;

use std::fmt;

pub use proctoring::{ProctoringSetup, ProctoringStep};
pub use system_check::{SystemCheck, SystemCheckStep};

/// Decides whether a sequencer may move past a step
pub trait StepGate {
    /// Number of steps, at least 1
    fn total_steps(&self) -> usize;

    /// Whether step `step` (1-indexed) is satisfied
    fn can_advance(&self, step: usize) -> bool;

    /// Display title of step `step`
    fn step_title(&self, step: usize) -> &'static str;
}

/// Outcome of an external permission or capability request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    #[default]
    Pending,
    Granted,
    /// Denied, with the reason reported by the device layer
    Denied(String),
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    pub fn denial_reason(&self) -> Option<&str> {
        match self {
            Self::Denied(reason) => Some(reason.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for PermissionStatus {
    fn from(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::Denied("denied".to_string())
        }
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Granted => f.write_str("granted"),
            Self::Denied(reason) if reason.is_empty() => f.write_str("denied"),
            Self::Denied(reason) => write!(f, "denied ({reason})"),
        }
    }
}

/// Step counter over `1..=gate.total_steps()`
#[derive(Debug, Clone)]
pub struct StepSequencer<G: StepGate> {
    current: usize,
    gate: G,
}

impl<G: StepGate> StepSequencer<G> {
    pub fn new(gate: G) -> Self {
        Self { current: 1, gate }
    }

    /// Current step, 1-indexed
    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn total_steps(&self) -> usize {
        self.gate.total_steps().max(1)
    }

    /// `current / total * 100`, unrounded
    pub fn progress(&self) -> f64 {
        (self.current as f64 / self.total_steps() as f64) * 100.0
    }

    pub fn current_title(&self) -> &'static str {
        self.gate.step_title(self.current)
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_final(&self) -> bool {
        self.current == self.total_steps()
    }

    /// Whether the current step's gate holds
    pub fn current_step_satisfied(&self) -> bool {
        self.gate.can_advance(self.current)
    }

    /// Whether [`Self::advance`] would move forward
    pub fn can_advance(&self) -> bool {
        !self.is_final() && self.current_step_satisfied()
    }

    /// Final step reached and satisfied
    pub fn is_complete(&self) -> bool {
        self.is_final() && self.current_step_satisfied()
    }

    /// Move forward one step if the current gate holds
    pub fn advance(&mut self) -> bool {
        if self.can_advance() {
            self.current += 1;
            return true;
        }
        false
    }

    /// Move back one step
    pub fn go_back(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to `step`. Backwards always succeeds; forwards only if every gate on the way holds.
    pub fn jump_to(&mut self, step: usize) -> bool {
        if step == 0 || step > self.total_steps() {
            return false;
        }
        if step > self.current && !(self.current..step).all(|s| self.gate.can_advance(s)) {
            return false;
        }
        self.current = step;
        true
    }

    /// Back to the first step, keeping recorded gate state
    pub fn reset(&mut self) {
        self.current = 1;
    }

    pub fn gate(&self) -> &G {
        &self.gate
    }

    /// Mutable access for recording external results
    pub fn gate_mut(&mut self) -> &mut G {
        &mut self.gate
    }

    pub fn into_gate(self) -> G {
        self.gate
    }
}
