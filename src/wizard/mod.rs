// ABOUTME: Assessment draft wizard: draft holder, field updates, migration, and step rules

pub mod form;
pub mod migration;
pub mod step;
pub mod update;
pub mod validation;

pub use form::{AssessmentForm, SaveError, SaveReceipt, DEFAULT_DRAFT_KEY};
pub use migration::{DraftLoadError, MigrationReport, CURRENT_SCHEMA_VERSION};
pub use step::WizardStep;
pub use update::{DraftField, DraftUpdate, FieldError};
