// ABOUTME: Schema-versioned decoding of persisted drafts
//
// Persisted drafts written before versioning carry no `schemaVersion` and are
// treated as version 0. Both versions decode by merging each known top-level
// field over the defaults; nested objects pick up serde defaults for anything
// missing, so a partial `topics[].questionTypes` no longer loses its shape.

use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::update::{DraftField, DraftUpdate};
use crate::models::AssessmentDraft;
use crate::storage::StorageError;

/// Schema version written with every persisted draft
pub const CURRENT_SCHEMA_VERSION: u64 = 1;

/// JSON key carrying the schema version
pub const SCHEMA_VERSION_KEY: &str = "schemaVersion";

/// Reasons a persisted draft could not be loaded
#[derive(Error, Debug)]
pub enum DraftLoadError {
    #[error("Failed to read persisted draft: {0}")]
    Storage(#[from] StorageError),

    #[error("Persisted draft is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Persisted draft must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("Persisted draft has an invalid schema version: {0}")]
    InvalidVersion(String),

    #[error("Persisted draft uses schema version {found}, newer than supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u64 },
}

/// What the migration had to do to produce a draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Schema version found in the persisted document
    pub from_version: u64,
    /// Fields absent (or null) in the document, filled from defaults
    pub defaulted_fields: Vec<DraftField>,
    /// Fields present but mistyped, replaced by defaults
    pub rejected_fields: Vec<DraftField>,
    /// Top-level keys the current schema does not know
    pub unknown_fields: Vec<String>,
}

impl MigrationReport {
    /// True when every known field was taken from the document as-is
    pub fn is_clean(&self) -> bool {
        self.defaulted_fields.is_empty() && self.rejected_fields.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode a persisted JSON document into a draft
pub fn migrate(value: Value) -> Result<AssessmentDraft, DraftLoadError> {
    migrate_with_report(value).map(|(draft, _)| draft)
}

/// Decode a persisted JSON document, also reporting what had to be defaulted
pub fn migrate_with_report(value: Value) -> Result<(AssessmentDraft, MigrationReport), DraftLoadError> {
    let mut object = match value {
        Value::Object(map) => map,
        other => return Err(DraftLoadError::NotAnObject(json_type_name(&other))),
    };

    let from_version = match object.remove(SCHEMA_VERSION_KEY) {
        None => 0,
        Some(v) => v
            .as_u64()
            .ok_or_else(|| DraftLoadError::InvalidVersion(v.to_string()))?,
    };

    if from_version > CURRENT_SCHEMA_VERSION {
        return Err(DraftLoadError::UnsupportedVersion {
            found: from_version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }

    let mut draft = AssessmentDraft::default();
    let mut report = MigrationReport {
        from_version,
        ..MigrationReport::default()
    };

    for field in DraftField::all() {
        match object.remove(field.as_str()) {
            None | Some(Value::Null) => report.defaulted_fields.push(*field),
            Some(value) => match DraftUpdate::from_json(*field, value) {
                Ok(update) => update.apply(&mut draft),
                Err(e) => {
                    warn!("Discarding persisted draft field: {}", e);
                    report.rejected_fields.push(*field);
                }
            },
        }
    }

    report.unknown_fields = object.keys().cloned().collect();
    report.unknown_fields.sort();

    if !report.is_clean() || !report.unknown_fields.is_empty() {
        debug!(
            "Migrated draft from schema v{}: defaulted={:?} rejected={:?} unknown={:?}",
            report.from_version, report.defaulted_fields, report.rejected_fields, report.unknown_fields
        );
    }

    Ok((draft, report))
}

/// Parse the raw persisted string and migrate it
pub fn parse_persisted(raw: &str) -> Result<AssessmentDraft, DraftLoadError> {
    let value: Value = serde_json::from_str(raw).map_err(DraftLoadError::Malformed)?;
    migrate(value)
}

/// Serialise a draft in the current persisted layout
pub fn encode(draft: &AssessmentDraft) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(draft)?;
    if let Value::Object(map) = &mut value {
        map.insert(SCHEMA_VERSION_KEY.to_string(), json!(CURRENT_SCHEMA_VERSION));
    }
    serde_json::to_string(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceLabel, Topic, TopicQuestionKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_then_parse_is_identity() {
        let draft = AssessmentDraft {
            job_role: "Platform Engineer".to_string(),
            skills: vec!["Rust".into(), "Kubernetes".into()],
            topics: vec![Topic::new("Networking").with_type(TopicQuestionKind::Coding, 3)],
            ..AssessmentDraft::default()
        };

        let raw = encode(&draft).unwrap();
        assert!(raw.contains("\"schemaVersion\":1"));
        assert_eq!(parse_persisted(&raw).unwrap(), draft);
    }

    #[test]
    fn test_legacy_draft_missing_fields_take_defaults() {
        let (draft, report) =
            migrate_with_report(json!({ "jobRole": "QA Lead", "skills": ["Selenium"] })).unwrap();

        assert_eq!(draft.job_role, "QA Lead");
        assert_eq!(draft.skills, vec!["Selenium".to_string()]);
        assert_eq!(draft.experience_range.label, ExperienceLabel::MidLevel);
        assert_eq!(report.from_version, 0);
        assert!(report.defaulted_fields.contains(&DraftField::ExperienceRange));
        assert!(report.rejected_fields.is_empty());
    }

    #[test]
    fn test_partial_nested_question_types_are_filled() {
        let draft = migrate(json!({
            "topics": [{ "id": "t1", "name": "Go", "questionTypes": { "mcq": { "enabled": true } } }]
        }))
        .unwrap();

        let topic = &draft.topics[0];
        assert!(topic.question_types.mcq.enabled);
        assert_eq!(topic.question_types.mcq.count, 0);
        assert!(!topic.question_types.pseudo_code.enabled);
    }

    #[test]
    fn test_partial_experience_range_keeps_present_bounds() {
        let draft = migrate(json!({ "experienceRange": { "min": 1 } })).unwrap();
        assert_eq!(draft.experience_range.min, 1);
        assert_eq!(draft.experience_range.max, 5);
    }

    #[test]
    fn test_mistyped_field_falls_back_individually() {
        let (draft, report) =
            migrate_with_report(json!({ "jobRole": 42, "skills": ["a", "b"] })).unwrap();

        assert_eq!(draft.job_role, "");
        assert_eq!(draft.skills.len(), 2);
        assert_eq!(report.rejected_fields, vec![DraftField::JobRole]);
    }

    #[test]
    fn test_unknown_fields_reported() {
        let (_, report) =
            migrate_with_report(json!({ "schemaVersion": 1, "legacyFlag": true })).unwrap();
        assert_eq!(report.unknown_fields, vec!["legacyFlag".to_string()]);
        assert_eq!(report.from_version, 1);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(migrate(json!([1, 2])), Err(DraftLoadError::NotAnObject("an array"))));
    }

    #[test]
    fn test_rejects_future_schema_version() {
        let err = migrate(json!({ "schemaVersion": 7 })).unwrap_err();
        assert!(matches!(
            err,
            DraftLoadError::UnsupportedVersion { found: 7, supported: 1 }
        ));
    }

    #[test]
    fn test_rejects_non_integer_schema_version() {
        assert!(matches!(
            migrate(json!({ "schemaVersion": "one" })),
            Err(DraftLoadError::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_persisted("{not json"), Err(DraftLoadError::Malformed(_))));
    }
}
