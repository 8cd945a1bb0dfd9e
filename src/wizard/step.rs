// ABOUTME: Linear steps of the assessment creation wizard

/// Steps in the assessment creation wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    JobRole,
    Skills,
    Experience,
    Topics,
    Candidates,
}

impl WizardStep {
    /// Get all steps in order
    pub fn all() -> &'static [WizardStep] {
        &[
            Self::JobRole,
            Self::Skills,
            Self::Experience,
            Self::Topics,
            Self::Candidates,
        ]
    }

    /// Get the step number (1-indexed)
    pub fn number(&self) -> usize {
        match self {
            Self::JobRole => 1,
            Self::Skills => 2,
            Self::Experience => 3,
            Self::Topics => 4,
            Self::Candidates => 5,
        }
    }

    /// Step for a 1-indexed number
    pub fn from_number(number: usize) -> Option<Self> {
        Self::all().get(number.checked_sub(1)?).copied()
    }

    /// Get the total number of steps
    pub fn total() -> usize {
        5
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::JobRole => "Job Role",
            Self::Skills => "Skills",
            Self::Experience => "Experience",
            Self::Topics => "Topics",
            Self::Candidates => "Candidates",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::JobRole => "Which role is this assessment for?",
            Self::Skills => "Pick at least two skills to assess",
            Self::Experience => "Expected years of experience",
            Self::Topics => "Choose topics and question types",
            Self::Candidates => "Who should take the assessment?",
        }
    }

    /// Hint shown while the step is not yet satisfied
    pub fn requirement(&self) -> &'static str {
        match self {
            Self::JobRole => "Job role needs at least 3 characters",
            Self::Skills => "Add at least 2 skills",
            Self::Experience => "Minimum must be 0 or more and below the maximum",
            Self::Topics => "Enable at least one question type on a topic",
            Self::Candidates => "Add at least one candidate",
        }
    }

    /// Get the next step, if any
    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// Get the previous step, if any
    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_navigation() {
        let step = WizardStep::JobRole;
        assert_eq!(step.next(), Some(WizardStep::Skills));
        assert_eq!(step.previous(), None);

        let step = WizardStep::Candidates;
        assert_eq!(step.next(), None);
        assert_eq!(step.previous(), Some(WizardStep::Topics));
    }

    #[test]
    fn test_step_numbers() {
        assert_eq!(WizardStep::JobRole.number(), 1);
        assert_eq!(WizardStep::Candidates.number(), 5);
        assert_eq!(WizardStep::total(), WizardStep::all().len());
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(3), Some(WizardStep::Experience));
        assert_eq!(WizardStep::from_number(6), None);
    }
}
