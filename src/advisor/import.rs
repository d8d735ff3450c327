use super::session::AnswerSet;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum AnswerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for AnswerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerImportError::Io(err) => write!(f, "failed to read answer export: {}", err),
            AnswerImportError::Csv(err) => write!(f, "invalid answer CSV data: {}", err),
        }
    }
}

impl std::error::Error for AnswerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnswerImportError::Io(err) => Some(err),
            AnswerImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for AnswerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AnswerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    #[serde(rename = "Question ID")]
    question_id: String,
    #[serde(rename = "Option ID", default, deserialize_with = "empty_string_as_none")]
    option_id: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Builds an [`AnswerSet`] from a `Question ID,Option ID` CSV export.
///
/// Rows with a blank option cell are treated as unanswered and skipped. The
/// importer only parses; unknown question or option ids in the result are
/// left to the scoring engine's skip-silently policy.
pub struct CsvAnswerImporter;

impl CsvAnswerImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<AnswerSet, AnswerImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<AnswerSet, AnswerImportError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut answers = AnswerSet::new();

        for row in csv_reader.deserialize::<AnswerRow>() {
            let row = row?;
            let question_id = row.question_id.trim();
            if question_id.is_empty() {
                continue;
            }
            if let Some(option_id) = row.option_id {
                answers.select(question_id, option_id.trim());
            }
        }

        Ok(answers)
    }
}
