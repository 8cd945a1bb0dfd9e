// ABOUTME: Assessment draft data model persisted by the creation wizard
// Every nested struct carries serde defaults so partially persisted objects still load

use std::collections::BTreeSet;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@<>]+@[^\s@<>]+\.[^\s@<>]+$").unwrap();
    static ref NAMED_EMAIL_RE: Regex = Regex::new(r"^(.+?)\s*<([^<>]+)>$").unwrap();
}

/// Minutes budgeted per question when deriving the assessment duration
const MCQ_MINUTES: u32 = 2;
const CODING_MINUTES: u32 = 15;
const SUBJECTIVE_MINUTES: u32 = 5;
const PSEUDO_CODE_MINUTES: u32 = 10;

/// The in-progress, unsubmitted assessment-creation form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDraft {
    /// Role being hired for (free text)
    pub job_role: String,
    /// Skills the assessment should cover
    pub skills: Vec<String>,
    /// Expected years of experience
    pub experience_range: ExperienceRange,
    /// Topics with per-type question configuration
    pub topics: Vec<Topic>,
    /// Invited candidates
    pub candidates: Vec<Candidate>,
    pub total_questions: u32,
    /// Estimated duration in minutes
    pub estimated_duration: u32,
    pub difficulty: Difficulty,
    pub question_types: BTreeSet<QuestionKind>,
}

impl Default for AssessmentDraft {
    fn default() -> Self {
        Self {
            job_role: String::new(),
            skills: Vec::new(),
            experience_range: ExperienceRange::default(),
            topics: Vec::new(),
            candidates: Vec::new(),
            total_questions: 0,
            estimated_duration: 0,
            difficulty: Difficulty::default(),
            question_types: BTreeSet::new(),
        }
    }
}

impl AssessmentDraft {
    /// Sum of question counts over every enabled question type of every topic
    pub fn derived_question_count(&self) -> u32 {
        self.topics
            .iter()
            .flat_map(|t| t.question_types.enabled())
            .map(|(_, cfg)| cfg.count)
            .sum()
    }

    /// Weighted duration estimate in minutes for the enabled questions
    pub fn derived_duration_minutes(&self) -> u32 {
        self.topics
            .iter()
            .flat_map(|t| t.question_types.enabled())
            .map(|(kind, cfg)| kind.minutes_per_question() * cfg.count)
            .sum()
    }
}

/// Experience bracket in years
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceRange {
    pub min: i32,
    pub max: i32,
    pub label: ExperienceLabel,
}

impl Default for ExperienceRange {
    fn default() -> Self {
        Self {
            min: 3,
            max: 5,
            label: ExperienceLabel::MidLevel,
        }
    }
}

impl ExperienceRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            label: ExperienceLabel::for_years(min),
        }
    }

    /// `min >= 0` and `max > min`
    pub fn is_valid(&self) -> bool {
        self.min >= 0 && self.max > self.min
    }
}

impl fmt::Display for ExperienceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} years ({})", self.min, self.max, self.label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExperienceLabel {
    #[serde(rename = "Entry-Level")]
    EntryLevel,
    #[serde(rename = "Junior")]
    Junior,
    #[default]
    #[serde(rename = "Mid-Level")]
    MidLevel,
    #[serde(rename = "Senior")]
    Senior,
    #[serde(rename = "Lead")]
    Lead,
}

impl ExperienceLabel {
    /// Suggested label for a minimum number of years
    pub fn for_years(min: i32) -> Self {
        match min {
            i32::MIN..=0 => Self::EntryLevel,
            1..=2 => Self::Junior,
            3..=5 => Self::MidLevel,
            6..=9 => Self::Senior,
            _ => Self::Lead,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EntryLevel => "Entry-Level",
            Self::Junior => "Junior",
            Self::MidLevel => "Mid-Level",
            Self::Senior => "Senior",
            Self::Lead => "Lead",
        }
    }
}

impl fmt::Display for ExperienceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A topic and the question types generated for it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub question_types: QuestionTypes,
}

impl Topic {
    /// New topic with a fresh id and every question type disabled
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            question_types: QuestionTypes::default(),
        }
    }

    /// Enable `kind` with `count` questions
    pub fn with_type(mut self, kind: TopicQuestionKind, count: u32) -> Self {
        *self.question_types.get_mut(kind) = QuestionTypeConfig {
            enabled: true,
            count,
        };
        self
    }

    pub fn has_enabled_type(&self) -> bool {
        self.question_types.enabled().next().is_some()
    }
}

/// Per-type question configuration of a topic
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuestionTypes {
    pub mcq: QuestionTypeConfig,
    pub coding: QuestionTypeConfig,
    pub subjective: QuestionTypeConfig,
    pub pseudo_code: QuestionTypeConfig,
}

impl QuestionTypes {
    pub fn get(&self, kind: TopicQuestionKind) -> &QuestionTypeConfig {
        match kind {
            TopicQuestionKind::Mcq => &self.mcq,
            TopicQuestionKind::Coding => &self.coding,
            TopicQuestionKind::Subjective => &self.subjective,
            TopicQuestionKind::PseudoCode => &self.pseudo_code,
        }
    }

    pub fn get_mut(&mut self, kind: TopicQuestionKind) -> &mut QuestionTypeConfig {
        match kind {
            TopicQuestionKind::Mcq => &mut self.mcq,
            TopicQuestionKind::Coding => &mut self.coding,
            TopicQuestionKind::Subjective => &mut self.subjective,
            TopicQuestionKind::PseudoCode => &mut self.pseudo_code,
        }
    }

    /// Enabled question types in display order
    pub fn enabled(&self) -> impl Iterator<Item = (TopicQuestionKind, &QuestionTypeConfig)> {
        TopicQuestionKind::all()
            .iter()
            .map(move |kind| (*kind, self.get(*kind)))
            .filter(|(_, cfg)| cfg.enabled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionTypeConfig {
    pub enabled: bool,
    pub count: u32,
}

/// Question types configurable per topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicQuestionKind {
    Mcq,
    Coding,
    Subjective,
    PseudoCode,
}

impl TopicQuestionKind {
    pub fn all() -> &'static [TopicQuestionKind] {
        &[Self::Mcq, Self::Coding, Self::Subjective, Self::PseudoCode]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mcq => "MCQ",
            Self::Coding => "Coding",
            Self::Subjective => "Subjective",
            Self::PseudoCode => "Pseudo-code",
        }
    }

    pub fn minutes_per_question(&self) -> u32 {
        match self {
            Self::Mcq => MCQ_MINUTES,
            Self::Coding => CODING_MINUTES,
            Self::Subjective => SUBJECTIVE_MINUTES,
            Self::PseudoCode => PSEUDO_CODE_MINUTES,
        }
    }
}

/// A candidate invited to take the assessment
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Parse `Name <email>` or a bare e-mail address.
    ///
    /// A bare address uses its local part as the display name.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();

        if let Some(caps) = NAMED_EMAIL_RE.captures(trimmed) {
            let name = caps[1].trim();
            let email = caps[2].trim();
            if !name.is_empty() && EMAIL_RE.is_match(email) {
                return Some(Self::new(name, email));
            }
            return None;
        }

        if EMAIL_RE.is_match(trimmed) {
            let local = trimmed.split('@').next().unwrap_or(trimmed);
            return Some(Self::new(local, trimmed));
        }

        None
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Mixed,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[Self::Easy, Self::Medium, Self::Hard, Self::Mixed]
    }

    /// Next difficulty in cycle order
    pub fn cycle(&self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Mixed,
            Self::Mixed => Self::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Mixed => "mixed",
        };
        f.write_str(s)
    }
}

/// Assessment-wide question types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Mcq,
    Coding,
    Subjective,
}
