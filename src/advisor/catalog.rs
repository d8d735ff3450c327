use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Candidate recommendations. The set is closed: outcomes are defined here,
/// never created at runtime, and `ordered()` is the canonical order used for
/// display and for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Windows,
    Linux,
    Macos,
    Android,
}

impl Outcome {
    pub const fn ordered() -> [Self; 4] {
        [Self::Windows, Self::Linux, Self::Macos, Self::Android]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::Macos => "macOS",
            Self::Android => "Android",
        }
    }
}

/// One selectable answer. A missing impact weight for an outcome counts as 0;
/// that default is part of the contract, not an accident of the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub impact: HashMap<Outcome, i32>,
}

impl AnswerOption {
    pub fn impact_on(&self, outcome: Outcome) -> i32 {
        self.impact.get(&outcome).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

/// Ordered questionnaire. Loaded once per session and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        serde_json::from_reader(reader).map_err(LoadError::Json)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Built-in reference questionnaire, available when no catalog file is
    /// provided.
    pub fn standard() -> Self {
        fn option(id: &str, text: &str, impact: &[(Outcome, i32)]) -> AnswerOption {
            AnswerOption {
                id: id.to_string(),
                text: text.to_string(),
                impact: impact.iter().copied().collect(),
            }
        }

        fn question(id: &str, text: &str, options: Vec<AnswerOption>) -> Question {
            Question {
                id: id.to_string(),
                text: text.to_string(),
                options,
            }
        }

        use Outcome::{Android, Linux, Macos, Windows};

        Self::new(vec![
            question(
                "primary_use",
                "What will you use the machine for most of the time?",
                vec![
                    option("gaming", "Gaming and entertainment", &[(Windows, 3), (Android, 1)]),
                    option("development", "Software development", &[(Linux, 3), (Macos, 2)]),
                    option("creative", "Design and media production", &[(Macos, 3), (Windows, 1)]),
                    option("mobile", "Messaging and apps on the go", &[(Android, 3)]),
                ],
            ),
            question(
                "customization",
                "How much control do you want over the system internals?",
                vec![
                    option("full", "Full control, I want to tune everything", &[(Linux, 3)]),
                    option("some", "Some tweaking is fine", &[(Windows, 1), (Android, 1)]),
                    option("none", "It should just work out of the box", &[(Macos, 2), (Windows, 1)]),
                ],
            ),
            question(
                "budget",
                "What is your hardware budget?",
                vec![
                    option("tight", "As low as possible", &[(Linux, 2), (Android, 2)]),
                    option("mid", "Mid-range", &[(Windows, 2)]),
                    option("premium", "Premium hardware is fine", &[(Macos, 3)]),
                ],
            ),
            question(
                "ecosystem",
                "Which device ecosystem do you already live in?",
                vec![
                    option("apple", "iPhone, iPad, AirPods", &[(Macos, 3)]),
                    option("google", "Android phone and Google services", &[(Android, 2), (Linux, 1)]),
                    option("microsoft", "Office and Windows at work", &[(Windows, 2)]),
                    option("independent", "No strong ties", &[(Linux, 1)]),
                ],
            ),
            question(
                "security",
                "How do you prioritize security and privacy?",
                vec![
                    option("maximum", "I want maximum control over my data", &[(Linux, 3)]),
                    option("managed", "Vendor-curated, managed security", &[(Macos, 2)]),
                    option("standard", "Standard protection is enough", &[(Windows, 1), (Android, 1)]),
                ],
            ),
            question(
                "experience",
                "How experienced are you with computers?",
                vec![
                    option("beginner", "I prefer familiar and simple", &[(Windows, 2), (Android, 1)]),
                    option("intermediate", "Comfortable, but no deep dives", &[(Windows, 1), (Macos, 1)]),
                    option("advanced", "I am at home in a terminal", &[(Linux, 2)]),
                ],
            ),
        ])
    }
}

/// Failure to materialize advisor data (catalog, knowledge base, or a JSON
/// answer set). Loading is fatal by design: the engine never runs against
/// half-loaded data.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "failed to read advisor data: {}", err),
            LoadError::Json(err) => write!(f, "invalid advisor data: {}", err),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
