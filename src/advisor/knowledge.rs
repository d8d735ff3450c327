use super::catalog::{LoadError, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Descriptive attributes for one outcome, used only as display text in the
/// comparative table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeEntry {
    pub architecture: String,
    pub security: String,
    pub use_cases: String,
}

/// Per-outcome reference material. Entries are mandatory for every outcome
/// rendered in the comparison; conclusion paragraphs are optional cosmetic
/// text and default to empty when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    entries: HashMap<Outcome, KnowledgeEntry>,
    #[serde(default)]
    conclusions: HashMap<Outcome, String>,
}

impl KnowledgeBase {
    pub fn new(
        entries: HashMap<Outcome, KnowledgeEntry>,
        conclusions: HashMap<Outcome, String>,
    ) -> Self {
        Self {
            entries,
            conclusions,
        }
    }

    pub fn entry(&self, outcome: Outcome) -> Option<&KnowledgeEntry> {
        self.entries.get(&outcome)
    }

    pub fn conclusion(&self, outcome: Outcome) -> Option<&str> {
        self.conclusions.get(&outcome).map(String::as_str)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        serde_json::from_reader(reader).map_err(LoadError::Json)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Built-in reference material for the four candidate systems.
    pub fn standard() -> Self {
        fn entry(architecture: &str, security: &str, use_cases: &str) -> KnowledgeEntry {
            KnowledgeEntry {
                architecture: architecture.to_string(),
                security: security.to_string(),
                use_cases: use_cases.to_string(),
            }
        }

        let entries = HashMap::from([
            (
                Outcome::Windows,
                entry(
                    "Hybrid NT kernel with broad driver and peripheral support",
                    "Account controls, Defender and SmartScreen; largest malware target surface",
                    "Gaming, office productivity and commercial desktop software",
                ),
            ),
            (
                Outcome::Linux,
                entry(
                    "Monolithic open-source kernel, modular and fully customizable",
                    "Strict permission model with SELinux/AppArmor hardening and transparent patching",
                    "Development, servers and resource-constrained hardware",
                ),
            ),
            (
                Outcome::Macos,
                entry(
                    "Darwin/XNU hybrid kernel tightly integrated with Apple hardware",
                    "Gatekeeper, notarization and sandboxing curated by Apple",
                    "Creative work, productivity and the Apple ecosystem",
                ),
            ),
            (
                Outcome::Android,
                entry(
                    "Linux-based kernel tuned for mobile devices with the ART runtime on top",
                    "Per-app sandboxing, Play Protect and granular runtime permissions",
                    "Mobile-first usage, messaging and Google service integration",
                ),
            ),
        ]);

        let conclusions = HashMap::from([
            (
                Outcome::Windows,
                "Windows stands out for its broad compatibility and support for commercial \
                 software and games, balancing performance and ease of use."
                    .to_string(),
            ),
            (
                Outcome::Linux,
                "Linux excels through freedom of customization, security and efficiency, \
                 making it ideal for developers and servers."
                    .to_string(),
            ),
            (
                Outcome::Macos,
                "macOS offers stability, security and seamless integration with the Apple \
                 ecosystem, ideal for productivity and design."
                    .to_string(),
            ),
            (
                Outcome::Android,
                "Android prioritizes mobility, flexibility and integration with Google \
                 services, a perfect fit for mobile-first use."
                    .to_string(),
            ),
        ]);

        Self::new(entries, conclusions)
    }
}
