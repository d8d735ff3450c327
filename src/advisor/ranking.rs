use super::scoring::{ScoreEntry, ScoreTotals};
use super::EvaluationError;
use serde::Serialize;

/// Qualitative strength of a recommendation, derived from the score gap
/// between the winner and the runner-up. Thresholds are a deliberate policy
/// choice, not statistically derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Outcomes ordered by descending score. Equal scores keep canonical outcome
/// order, so a tie always resolves to the same winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ranking {
    entries: Vec<ScoreEntry>,
}

impl Ranking {
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn winner(&self) -> ScoreEntry {
        self.entries[0]
    }

    pub fn runner_up(&self) -> ScoreEntry {
        self.entries[1]
    }

    /// Winner score minus runner-up score; 0 on a tie.
    pub fn margin(&self) -> i32 {
        self.winner().score - self.runner_up().score
    }

    pub fn confidence(&self) -> Confidence {
        match self.margin() {
            margin if margin >= 3 => Confidence::High,
            margin if margin >= 1 => Confidence::Medium,
            _ => Confidence::Low,
        }
    }
}

/// Orders all outcomes by total score. A ranking needs a winner and a
/// runner-up, so fewer than two configured outcomes is a hard error.
pub fn rank(totals: &ScoreTotals) -> Result<Ranking, EvaluationError> {
    let mut entries = totals.entries();
    if entries.len() < 2 {
        return Err(EvaluationError::InsufficientOutcomes {
            found: entries.len(),
        });
    }

    // Stable sort on a canonically ordered list: ties keep canonical order.
    entries.sort_by(|left, right| right.score.cmp(&left.score));

    Ok(Ranking { entries })
}
