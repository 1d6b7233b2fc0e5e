use serde::{Deserialize, Serialize};

/// A multiple-choice question as served by `/mcq`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(rename = "answer")]
    pub correct_answer: String,
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
        }
    }

    pub fn option(&self, idx: usize) -> Option<&str> {
        self.options.get(idx).map(String::as_str)
    }

    pub fn is_correct(&self, option: &str) -> bool {
        option == self.correct_answer
    }

    /// Whether the correct answer is one of the options
    pub fn is_answerable(&self) -> bool {
        self.options.iter().any(|o| self.is_correct(o))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_names() {
        let q: Question = serde_json::from_str(
            r#"{"question": "Capital of France?", "options": ["Paris", "Rome"], "answer": "Paris"}"#,
        )
        .unwrap();
        assert_eq!(q, Question::new("Capital of France?", ["Paris", "Rome"], "Paris"));
        assert!(q.is_answerable());
        assert_eq!(q.option(1), Some("Rome"));
        assert_eq!(q.option(2), None);
    }

    #[test]
    fn answer_outside_options_is_not_answerable() {
        let q = Question::new("?", ["a", "b"], "c");
        assert!(!q.is_answerable());
        assert!(!q.is_correct("a"));
    }
}
