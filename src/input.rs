use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_QUESTIONS: u32 = 5;
pub const MAX_QUESTIONS: u32 = 20;

/// Question difficulty, sent to the backend in lowercase
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

/// A validated quiz request; serializes to the `/mcq` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizRequest {
    pub link: String,
    pub num: u32,
    pub diff: Difficulty,
}

/// Focusable controls on the start screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedField {
    #[default]
    Count,
    Difficulty,
    Start,
}

impl FocusedField {
    pub fn next(self) -> Self {
        match self {
            FocusedField::Count => FocusedField::Difficulty,
            FocusedField::Difficulty => FocusedField::Start,
            FocusedField::Start => FocusedField::Count,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FocusedField::Count => FocusedField::Start,
            FocusedField::Difficulty => FocusedField::Count,
            FocusedField::Start => FocusedField::Difficulty,
        }
    }
}

/// Raw text of the link and question count fields plus the difficulty choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputForm {
    pub link: String,
    pub count: String,
    pub difficulty: Difficulty,
    pub focus: FocusedField,
}

impl Default for InputForm {
    fn default() -> Self {
        Self::new(MIN_QUESTIONS, Difficulty::default())
    }
}

impl InputForm {
    pub fn new(count: u32, difficulty: Difficulty) -> Self {
        Self {
            link: String::new(),
            count: count.to_string(),
            difficulty,
            focus: FocusedField::default(),
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn push_link_char(&mut self, c: char) {
        if !c.is_control() {
            self.link.push(c);
        }
    }

    pub fn pop_link_char(&mut self) {
        self.link.pop();
    }

    pub fn clear_link(&mut self) {
        self.link.clear();
    }

    /// Only digits make it into the count field, and at most two of them
    pub fn push_count_digit(&mut self, c: char) {
        if c.is_ascii_digit() && self.count.len() < 2 {
            self.count.push(c);
        }
    }

    pub fn pop_count_digit(&mut self) {
        self.count.pop();
    }

    pub fn increment_count(&mut self) {
        let next = self
            .count
            .parse::<u32>()
            .map_or(MIN_QUESTIONS, |n| n.saturating_add(1));
        self.count = next.clamp(MIN_QUESTIONS, MAX_QUESTIONS).to_string();
    }

    pub fn decrement_count(&mut self) {
        let next = self
            .count
            .parse::<u32>()
            .map_or(MIN_QUESTIONS, |n| n.saturating_sub(1));
        self.count = next.clamp(MIN_QUESTIONS, MAX_QUESTIONS).to_string();
    }

    pub fn next_difficulty(&mut self) {
        self.difficulty = self.difficulty.next();
    }

    pub fn previous_difficulty(&mut self) {
        self.difficulty = self.difficulty.previous();
    }

    /// The trimmed link, or `EmptyLink`
    pub fn collect_link(&self) -> Result<String, ValidationError> {
        let link = self.link.trim();
        if link.is_empty() {
            return Err(ValidationError::EmptyLink);
        }
        Ok(link.to_string())
    }

    /// Validates the form into a request for `/mcq`
    pub fn collect_quiz_request(&self) -> Result<QuizRequest, ValidationError> {
        let link = self.collect_link()?;
        let num = self
            .count
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| (MIN_QUESTIONS..=MAX_QUESTIONS).contains(n))
            .ok_or(ValidationError::QuestionCount {
                min: MIN_QUESTIONS,
                max: MAX_QUESTIONS,
            })?;

        Ok(QuizRequest {
            link,
            num,
            diff: self.difficulty,
        })
    }
}
