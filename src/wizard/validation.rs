// ABOUTME: Per-step completion predicates for the assessment wizard

use super::form::AssessmentForm;
use super::step::WizardStep;
use crate::models::AssessmentDraft;
use crate::sequencer::StepGate;
use crate::storage::KeyValueStore;

/// Minimum job role length, in characters
pub const MIN_JOB_ROLE_LEN: usize = 3;

/// Minimum number of skills
pub const MIN_SKILLS: usize = 2;

impl AssessmentDraft {
    /// Is step `step` (1-indexed) complete?
    ///
    /// Steps without a rule (0, or past the last step) count as complete.
    pub fn validate_step(&self, step: usize) -> bool {
        match WizardStep::from_number(step) {
            Some(WizardStep::JobRole) => self.job_role.chars().count() >= MIN_JOB_ROLE_LEN,
            Some(WizardStep::Skills) => self.skills.len() >= MIN_SKILLS,
            Some(WizardStep::Experience) => self.experience_range.is_valid(),
            Some(WizardStep::Topics) => self.topics.iter().any(|t| t.has_enabled_type()),
            Some(WizardStep::Candidates) => !self.candidates.is_empty(),
            None => true,
        }
    }

    /// First step whose predicate fails
    pub fn first_incomplete_step(&self) -> Option<WizardStep> {
        WizardStep::all()
            .iter()
            .copied()
            .find(|step| !self.validate_step(step.number()))
    }
}

impl StepGate for AssessmentDraft {
    fn total_steps(&self) -> usize {
        WizardStep::total()
    }

    fn can_advance(&self, step: usize) -> bool {
        self.validate_step(step)
    }

    fn step_title(&self, step: usize) -> &'static str {
        WizardStep::from_number(step).map_or("", |s| s.title())
    }
}

/// The form gates a sequencer directly, so navigation owns the draft it checks
impl<S: KeyValueStore> StepGate for AssessmentForm<S> {
    fn total_steps(&self) -> usize {
        self.draft().total_steps()
    }

    fn can_advance(&self, step: usize) -> bool {
        self.validate_step(step)
    }

    fn step_title(&self, step: usize) -> &'static str {
        self.draft().step_title(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, ExperienceRange, Topic, TopicQuestionKind};

    fn draft_with_role(role: &str) -> AssessmentDraft {
        AssessmentDraft {
            job_role: role.to_string(),
            ..AssessmentDraft::default()
        }
    }

    #[test]
    fn test_job_role_length() {
        assert!(!draft_with_role("").validate_step(1));
        assert!(!draft_with_role("ab").validate_step(1));
        assert!(draft_with_role("abc").validate_step(1));
        // Counted in characters, not bytes
        assert!(!draft_with_role("éé").validate_step(1));
        // Not trimmed
        assert!(draft_with_role("   ").validate_step(1));
    }

    #[test]
    fn test_skills_count() {
        let mut draft = AssessmentDraft::default();
        draft.skills = vec!["Rust".into()];
        assert!(!draft.validate_step(2));
        draft.skills.push("Go".into());
        assert!(draft.validate_step(2));
    }

    #[test]
    fn test_experience_range() {
        let mut draft = AssessmentDraft::default();
        assert!(draft.validate_step(3));

        draft.experience_range = ExperienceRange::new(5, 3);
        assert!(!draft.validate_step(3));

        draft.experience_range = ExperienceRange::new(0, 1);
        assert!(draft.validate_step(3));

        draft.experience_range = ExperienceRange::new(-1, 4);
        assert!(!draft.validate_step(3));

        draft.experience_range = ExperienceRange::new(4, 4);
        assert!(!draft.validate_step(3));
    }

    #[test]
    fn test_topics_need_enabled_type() {
        let mut draft = AssessmentDraft::default();
        assert!(!draft.validate_step(4));

        draft.topics = vec![Topic::new("Rust")];
        assert!(!draft.validate_step(4));

        draft.topics.push(Topic::new("SQL").with_type(TopicQuestionKind::Mcq, 0));
        assert!(draft.validate_step(4));
    }

    #[test]
    fn test_candidates_required() {
        let mut draft = AssessmentDraft::default();
        assert!(!draft.validate_step(5));
        draft.candidates.push(Candidate::new("Ada", "ada@example.com"));
        assert!(draft.validate_step(5));
    }

    #[test]
    fn test_out_of_range_steps_are_open() {
        let draft = AssessmentDraft::default();
        assert!(draft.validate_step(0));
        assert!(draft.validate_step(6));
        assert!(draft.validate_step(usize::MAX));
    }

    #[test]
    fn test_first_incomplete_step() {
        let mut draft = draft_with_role("SRE");
        assert_eq!(draft.first_incomplete_step(), Some(WizardStep::Skills));

        draft.skills = vec!["Linux".into(), "Terraform".into()];
        draft.topics = vec![Topic::new("Linux").with_type(TopicQuestionKind::Coding, 1)];
        draft.candidates = vec![Candidate::new("Linus", "linus@example.com")];
        assert_eq!(draft.first_incomplete_step(), None);
    }
}
