// ABOUTME: Assessment draft holder with write-through persistence
// Every field update serialises and stores the whole draft; loads degrade to defaults

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::migration::{self, DraftLoadError};
use super::step::WizardStep;
use super::update::DraftUpdate;
use crate::models::AssessmentDraft;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key used when none is configured
pub const DEFAULT_DRAFT_KEY: &str = "assessmentDraft";

/// Errors from persisting the draft
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Failed to encode draft: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of an explicit save, used to drive the confirmation toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub key: String,
    pub saved_at: DateTime<Utc>,
    pub bytes: usize,
}

/// The in-progress draft and the store mirroring it
#[derive(Debug)]
pub struct AssessmentForm<S: KeyValueStore> {
    store: S,
    key: String,
    draft: AssessmentDraft,
    load_error: Option<DraftLoadError>,
    last_saved_at: Option<DateTime<Utc>>,
}

impl<S: KeyValueStore> AssessmentForm<S> {
    /// Hydrate from `store`, falling back to the default draft.
    ///
    /// A persisted copy that cannot be read or decoded is not an error here:
    /// the form starts from defaults and the cause is kept in [`Self::load_error`].
    pub fn load(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let (draft, load_error) = match Self::try_load(&store, &key) {
            Ok(Some(draft)) => {
                info!("Restored assessment draft from key '{}'", key);
                (draft, None)
            }
            Ok(None) => {
                debug!("No persisted draft under '{}', starting from defaults", key);
                (AssessmentDraft::default(), None)
            }
            Err(e) => {
                warn!("Ignoring persisted draft under '{}': {}", key, e);
                (AssessmentDraft::default(), Some(e))
            }
        };

        Self {
            store,
            key,
            draft,
            load_error,
            last_saved_at: None,
        }
    }

    /// Strict load: `Ok(None)` when nothing is persisted, `Err` when the copy is unusable
    pub fn try_load(store: &S, key: &str) -> Result<Option<AssessmentDraft>, DraftLoadError> {
        match store.get(key)? {
            Some(raw) => migration::parse_persisted(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// Discard in-memory state and hydrate again from the store
    pub fn reload(&mut self) {
        let (draft, load_error) = match Self::try_load(&self.store, &self.key) {
            Ok(found) => (found.unwrap_or_default(), None),
            Err(e) => {
                warn!("Ignoring persisted draft under '{}': {}", self.key, e);
                (AssessmentDraft::default(), Some(e))
            }
        };
        self.draft = draft;
        self.load_error = load_error;
    }

    pub fn draft(&self) -> &AssessmentDraft {
        &self.draft
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Why the last load fell back to defaults, if it did
    pub fn load_error(&self) -> Option<&DraftLoadError> {
        self.load_error.as_ref()
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    /// Replace one field and persist the whole draft.
    ///
    /// The in-memory change stands even when the write fails; the error is
    /// returned so the caller can surface it.
    pub fn update_field(&mut self, update: DraftUpdate) -> Result<(), SaveError> {
        let field = update.field();
        update.apply(&mut self.draft);
        debug!("Updated draft field '{}'", field);
        self.persist().map(|_| ())
    }

    /// Is step `step` (1-indexed) complete? Unknown steps count as complete.
    pub fn validate_step(&self, step: usize) -> bool {
        self.draft.validate_step(step)
    }

    pub fn first_incomplete_step(&self) -> Option<WizardStep> {
        self.draft.first_incomplete_step()
    }

    pub fn is_complete(&self) -> bool {
        self.first_incomplete_step().is_none()
    }

    /// Explicit "save draft" action
    pub fn save_draft(&mut self) -> Result<SaveReceipt, SaveError> {
        let receipt = self.persist()?;
        info!("Draft saved under '{}' ({} bytes)", receipt.key, receipt.bytes);
        Ok(receipt)
    }

    /// Restore defaults and erase the persisted copy. Callers confirm first.
    pub fn reset_form(&mut self) -> Result<(), SaveError> {
        self.draft = AssessmentDraft::default();
        self.load_error = None;
        self.last_saved_at = None;
        self.store.remove(&self.key)?;
        info!("Draft under '{}' reset to defaults", self.key);
        Ok(())
    }

    /// Write the derived question count and duration into the draft
    pub fn sync_derived_totals(&mut self) -> Result<(), SaveError> {
        let total = self.draft.derived_question_count();
        let duration = self.draft.derived_duration_minutes();
        self.update_field(DraftUpdate::TotalQuestions(total))?;
        self.update_field(DraftUpdate::EstimatedDuration(duration))
    }

    fn persist(&mut self) -> Result<SaveReceipt, SaveError> {
        let encoded = migration::encode(&self.draft)?;
        self.store.set(&self.key, &encoded)?;

        let saved_at = Utc::now();
        self.last_saved_at = Some(saved_at);
        Ok(SaveReceipt {
            key: self.key.clone(),
            saved_at,
            bytes: encoded.len(),
        })
    }
}
