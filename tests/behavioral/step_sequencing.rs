// ABOUTME: Behavioral tests for gated step navigation over the wizard and the pre-assessment gates

use super::fixtures::{complete_draft, TestStore};
use assessment_wizard::models::AssessmentDraft;
use assessment_wizard::sequencer::{
    PermissionStatus, ProctoringSetup, StepGate, StepSequencer, SystemCheck, SystemCheckStep,
};
use assessment_wizard::wizard::{DraftUpdate, WizardStep};

#[test]
fn test_wizard_cannot_skip_an_incomplete_step() {
    let mut seq = StepSequencer::new(AssessmentDraft::default());

    assert!(!seq.advance());
    assert!(!seq.jump_to(5));
    assert_eq!(seq.current_step(), 1);
    assert_eq!(seq.current_title(), WizardStep::JobRole.title());
}

#[test]
fn test_complete_draft_walks_to_the_end() {
    let mut seq = StepSequencer::new(complete_draft());
    let mut visited = vec![seq.current_step()];
    while seq.advance() {
        visited.push(seq.current_step());
    }

    assert_eq!(visited, vec![1, 2, 3, 4, 5]);
    assert!(seq.is_final());
    assert!(seq.is_complete());
    assert!((seq.progress() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_form_gates_navigation_as_it_is_edited() {
    let ts = TestStore::new();
    let mut seq = StepSequencer::new(ts.form());

    assert!(!seq.advance());
    seq.gate_mut()
        .update_field(DraftUpdate::JobRole("Data Scientist".into()))
        .unwrap();
    assert!(seq.advance());
    assert_eq!(seq.current_step(), 2);

    // The edit went through to storage while the sequencer held the form
    assert_eq!(ts.form().draft().job_role, "Data Scientist");
}

#[test]
fn test_going_back_is_never_gated() {
    let mut seq = StepSequencer::new(complete_draft());
    assert!(seq.jump_to(4));
    *seq.gate_mut() = AssessmentDraft::default();

    assert!(seq.go_back());
    assert!(seq.jump_to(1));
    assert!(!seq.go_back());
}

#[test]
fn test_progress_is_unrounded() {
    let mut setup = ProctoringSetup::new();
    setup.accepted_rules = true;
    setup.accepted_recording = true;
    let mut seq = StepSequencer::new(setup);

    assert!(seq.advance());
    assert_eq!(seq.current_step(), 2);
    assert!((seq.progress() - 200.0 / 3.0).abs() < 1e-9);
    assert!(seq.progress() > 66.66 && seq.progress() < 66.67);
}

#[test]
fn test_system_check_retry_after_denial() {
    let mut seq = StepSequencer::new(SystemCheck::new());
    assert_eq!(seq.total_steps(), 4);

    seq.gate_mut().record(
        SystemCheckStep::Camera,
        PermissionStatus::Denied("NotAllowedError".into()),
    );
    assert!(!seq.advance());

    seq.gate_mut()
        .record(SystemCheckStep::Camera, PermissionStatus::Granted);
    assert!(seq.advance());
    assert_eq!(seq.gate().step_title(seq.current_step()), "Microphone");
}
