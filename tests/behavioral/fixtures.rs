// ABOUTME: Shared test fixtures for behavioral tests
//
// Provides:
// - TestStore: FileStore rooted in a temporary directory
// - complete_draft(): a draft that satisfies every wizard step

use assessment_wizard::models::{AssessmentDraft, Candidate, ExperienceRange, Topic, TopicQuestionKind};
use assessment_wizard::storage::FileStore;
use assessment_wizard::wizard::AssessmentForm;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DRAFT_KEY: &str = "assessmentDraft";

/// File-backed store in a throwaway directory
pub struct TestStore {
    pub dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(self.root())
    }

    /// Form as a fresh process would load it
    pub fn form(&self) -> AssessmentForm<FileStore> {
        AssessmentForm::load(self.store(), DRAFT_KEY)
    }

    pub fn draft_path(&self) -> PathBuf {
        self.root().join(format!("{DRAFT_KEY}.json"))
    }

    /// Write raw bytes where the draft lives
    pub fn write_raw(&self, contents: &str) {
        std::fs::write(self.draft_path(), contents).expect("write raw draft");
    }

    pub fn read_raw(&self) -> Option<String> {
        std::fs::read_to_string(self.draft_path()).ok()
    }
}

pub fn complete_draft() -> AssessmentDraft {
    AssessmentDraft {
        job_role: "Backend Engineer".to_string(),
        skills: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        experience_range: ExperienceRange::new(2, 6),
        topics: vec![
            Topic::new("Concurrency")
                .with_type(TopicQuestionKind::Mcq, 5)
                .with_type(TopicQuestionKind::Coding, 1),
        ],
        candidates: vec![Candidate::new("Grace Hopper", "grace@example.com")],
        ..AssessmentDraft::default()
    }
}
