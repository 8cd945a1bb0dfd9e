// ABOUTME: Behavioral tests for write-through draft persistence and legacy migration
// Every update must be visible to a fresh load; broken files must never be fatal

use super::fixtures::{complete_draft, TestStore, DRAFT_KEY};
use assessment_wizard::models::{AssessmentDraft, Difficulty, ExperienceRange, TopicQuestionKind};
use assessment_wizard::storage::KeyValueStore;
use assessment_wizard::wizard::{DraftLoadError, DraftUpdate, CURRENT_SCHEMA_VERSION};
use pretty_assertions::assert_eq;

#[test]
fn test_update_is_visible_to_fresh_load() {
    let ts = TestStore::new();
    let mut form = ts.form();

    form.update_field(DraftUpdate::JobRole("Site Reliability Engineer".into()))
        .unwrap();
    form.update_field(DraftUpdate::ExperienceRange(ExperienceRange::new(4, 8)))
        .unwrap();

    let reloaded = ts.form();
    assert_eq!(reloaded.draft().job_role, "Site Reliability Engineer");
    assert_eq!(reloaded.draft().experience_range, ExperienceRange::new(4, 8));
    assert!(reloaded.load_error().is_none());
}

#[test]
fn test_every_field_round_trips() {
    let ts = TestStore::new();
    let draft = complete_draft();
    let mut form = ts.form();

    form.update_field(DraftUpdate::JobRole(draft.job_role.clone())).unwrap();
    form.update_field(DraftUpdate::Skills(draft.skills.clone())).unwrap();
    form.update_field(DraftUpdate::ExperienceRange(draft.experience_range.clone()))
        .unwrap();
    form.update_field(DraftUpdate::Topics(draft.topics.clone())).unwrap();
    form.update_field(DraftUpdate::Candidates(draft.candidates.clone()))
        .unwrap();

    assert_eq!(ts.form().draft(), &draft);
}

#[test]
fn test_persisted_file_carries_schema_version() {
    let ts = TestStore::new();
    ts.form().save_draft().unwrap();

    let raw: serde_json::Value = serde_json::from_str(&ts.read_raw().unwrap()).unwrap();
    assert_eq!(raw["schemaVersion"], serde_json::json!(CURRENT_SCHEMA_VERSION));
    assert_eq!(raw["difficulty"], "medium");
}

#[test]
fn test_reset_then_load_yields_defaults() {
    let ts = TestStore::new();
    let mut form = ts.form();
    form.update_field(DraftUpdate::JobRole("Chef".into())).unwrap();
    assert!(ts.read_raw().is_some());

    form.reset_form().unwrap();

    assert!(ts.read_raw().is_none());
    assert!(!ts.store().contains(DRAFT_KEY).unwrap());
    assert_eq!(ts.form().draft(), &AssessmentDraft::default());
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let ts = TestStore::new();
    ts.write_raw("{ this is not json");

    let form = ts.form();

    assert_eq!(form.draft(), &AssessmentDraft::default());
    assert!(matches!(form.load_error(), Some(DraftLoadError::Malformed(_))));
}

#[test]
fn test_future_schema_is_rejected_but_not_fatal() {
    let ts = TestStore::new();
    ts.write_raw(r#"{"schemaVersion": 99, "jobRole": "From the future"}"#);

    let form = ts.form();

    assert_eq!(form.draft().job_role, "");
    assert!(matches!(
        form.load_error(),
        Some(DraftLoadError::UnsupportedVersion { found: 99, .. })
    ));
}

#[test]
fn test_legacy_draft_fills_missing_nested_fields() {
    let ts = TestStore::new();
    // No schemaVersion, partial experienceRange, topic missing most question types
    ts.write_raw(
        r#"{
            "jobRole": "QA Lead",
            "skills": ["Selenium", "Cypress"],
            "experienceRange": {"min": 6},
            "topics": [{"id": "t1", "name": "Automation", "questionTypes": {"coding": {"enabled": true, "count": 2}}}],
            "difficulty": "hard"
        }"#,
    );

    let form = ts.form();
    let draft = form.draft();

    assert!(form.load_error().is_none());
    assert_eq!(draft.job_role, "QA Lead");
    assert_eq!(draft.experience_range.min, 6);
    assert_eq!(draft.experience_range.max, ExperienceRange::default().max);
    assert_eq!(draft.difficulty, Difficulty::Hard);

    let types = &draft.topics[0].question_types;
    assert!(types.get(TopicQuestionKind::Coding).enabled);
    assert_eq!(types.get(TopicQuestionKind::Coding).count, 2);
    assert!(!types.get(TopicQuestionKind::Mcq).enabled);
}

#[test]
fn test_mistyped_field_falls_back_alone() {
    let ts = TestStore::new();
    ts.write_raw(r#"{"schemaVersion": 1, "jobRole": "Designer", "skills": "Figma"}"#);

    let form = ts.form();

    assert!(form.load_error().is_none());
    assert_eq!(form.draft().job_role, "Designer");
    assert!(form.draft().skills.is_empty());
}

#[test]
fn test_first_write_after_legacy_load_upgrades_file() {
    let ts = TestStore::new();
    ts.write_raw(r#"{"jobRole": "Analyst"}"#);

    let mut form = ts.form();
    form.update_field(DraftUpdate::Skills(vec!["SQL".into()])).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&ts.read_raw().unwrap()).unwrap();
    assert_eq!(raw["schemaVersion"], serde_json::json!(CURRENT_SCHEMA_VERSION));
    assert_eq!(raw["jobRole"], "Analyst");
    assert_eq!(raw["skills"], serde_json::json!(["SQL"]));
}
