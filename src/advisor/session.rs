use super::catalog::LoadError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Explicit per-session answer state: question id to chosen option id.
///
/// Callers own the set and pass it to every evaluation; the engine itself
/// keeps no session state. At most one option per question, questions may be
/// left unanswered, and `clear` resets the session on restart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    choices: HashMap<String, String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a choice, replacing any earlier selection for the question.
    pub fn select(&mut self, question_id: impl Into<String>, option_id: impl Into<String>) {
        self.choices.insert(question_id.into(), option_id.into());
    }

    pub fn chosen(&self, question_id: &str) -> Option<&str> {
        self.choices.get(question_id).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.choices.clear();
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        serde_json::from_reader(reader).map_err(LoadError::Json)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reselecting_overwrites_previous_choice() {
        let mut answers = AnswerSet::new();
        answers.select("q1", "a");
        answers.select("q1", "b");
        assert_eq!(answers.chosen("q1"), Some("b"));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn clear_resets_the_session() {
        let mut answers = AnswerSet::new();
        answers.select("q1", "a");
        answers.clear();
        assert!(answers.is_empty());
        assert_eq!(answers.chosen("q1"), None);
    }

    #[test]
    fn parses_from_json_object() {
        let answers =
            AnswerSet::from_reader(&br#"{"q1": "a", "q2": "c"}"#[..]).expect("answers parse");
        assert_eq!(answers.chosen("q1"), Some("a"));
        assert_eq!(answers.chosen("q2"), Some("c"));
        assert_eq!(answers.chosen("q3"), None);
    }
}
