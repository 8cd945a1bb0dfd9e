// ABOUTME: Core data models for assessment drafts, topics, and candidates

pub mod draft;

pub use draft::{
    AssessmentDraft, Candidate, Difficulty, ExperienceLabel, ExperienceRange, QuestionKind,
    QuestionTypeConfig, QuestionTypes, Topic, TopicQuestionKind,
};
