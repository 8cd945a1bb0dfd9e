// ABOUTME: Typed single-field updates applied to an assessment draft
// DraftField names match the persisted JSON keys

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::models::{AssessmentDraft, Candidate, Difficulty, ExperienceRange, QuestionKind, Topic};

/// Errors from parsing a field update out of JSON
#[derive(Error, Debug)]
pub enum FieldError {
    #[error("Unknown draft field '{0}'")]
    UnknownField(String),

    #[error("Invalid value for '{field}': {source}")]
    InvalidValue {
        field: DraftField,
        #[source]
        source: serde_json::Error,
    },
}

/// Names of the top-level draft fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    JobRole,
    Skills,
    ExperienceRange,
    Topics,
    Candidates,
    TotalQuestions,
    EstimatedDuration,
    Difficulty,
    QuestionTypes,
}

impl DraftField {
    pub fn all() -> &'static [DraftField] {
        &[
            Self::JobRole,
            Self::Skills,
            Self::ExperienceRange,
            Self::Topics,
            Self::Candidates,
            Self::TotalQuestions,
            Self::EstimatedDuration,
            Self::Difficulty,
            Self::QuestionTypes,
        ]
    }

    /// JSON key of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JobRole => "jobRole",
            Self::Skills => "skills",
            Self::ExperienceRange => "experienceRange",
            Self::Topics => "topics",
            Self::Candidates => "candidates",
            Self::TotalQuestions => "totalQuestions",
            Self::EstimatedDuration => "estimatedDuration",
            Self::Difficulty => "difficulty",
            Self::QuestionTypes => "questionTypes",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|f| f.as_str() == s)
            .copied()
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

/// Replacement value for exactly one draft field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftUpdate {
    JobRole(String),
    Skills(Vec<String>),
    ExperienceRange(ExperienceRange),
    Topics(Vec<Topic>),
    Candidates(Vec<Candidate>),
    TotalQuestions(u32),
    EstimatedDuration(u32),
    Difficulty(Difficulty),
    QuestionTypes(BTreeSet<QuestionKind>),
}

fn parse<T: DeserializeOwned>(field: DraftField, value: Value) -> Result<T, FieldError> {
    serde_json::from_value(value).map_err(|source| FieldError::InvalidValue { field, source })
}

impl DraftUpdate {
    /// Field this update replaces
    pub fn field(&self) -> DraftField {
        match self {
            Self::JobRole(_) => DraftField::JobRole,
            Self::Skills(_) => DraftField::Skills,
            Self::ExperienceRange(_) => DraftField::ExperienceRange,
            Self::Topics(_) => DraftField::Topics,
            Self::Candidates(_) => DraftField::Candidates,
            Self::TotalQuestions(_) => DraftField::TotalQuestions,
            Self::EstimatedDuration(_) => DraftField::EstimatedDuration,
            Self::Difficulty(_) => DraftField::Difficulty,
            Self::QuestionTypes(_) => DraftField::QuestionTypes,
        }
    }

    /// Build an update from a JSON value for `field`
    pub fn from_json(field: DraftField, value: Value) -> Result<Self, FieldError> {
        Ok(match field {
            DraftField::JobRole => Self::JobRole(parse(field, value)?),
            DraftField::Skills => Self::Skills(parse(field, value)?),
            DraftField::ExperienceRange => Self::ExperienceRange(parse(field, value)?),
            DraftField::Topics => Self::Topics(parse(field, value)?),
            DraftField::Candidates => Self::Candidates(parse(field, value)?),
            DraftField::TotalQuestions => Self::TotalQuestions(parse(field, value)?),
            DraftField::EstimatedDuration => Self::EstimatedDuration(parse(field, value)?),
            DraftField::Difficulty => Self::Difficulty(parse(field, value)?),
            DraftField::QuestionTypes => Self::QuestionTypes(parse(field, value)?),
        })
    }

    /// Build an update from a JSON key name and a JSON value
    pub fn from_named_json(name: &str, value: Value) -> Result<Self, FieldError> {
        Self::from_json(name.parse()?, value)
    }

    /// Replace the field on `draft`, leaving every other field untouched
    pub fn apply(self, draft: &mut AssessmentDraft) {
        match self {
            Self::JobRole(v) => draft.job_role = v,
            Self::Skills(v) => draft.skills = v,
            Self::ExperienceRange(v) => draft.experience_range = v,
            Self::Topics(v) => draft.topics = v,
            Self::Candidates(v) => draft.candidates = v,
            Self::TotalQuestions(v) => draft.total_questions = v,
            Self::EstimatedDuration(v) => draft.estimated_duration = v,
            Self::Difficulty(v) => draft.difficulty = v,
            Self::QuestionTypes(v) => draft.question_types = v,
        }
    }
}
