//! Recommendation engine: scoring, ranking, confidence and justification.
//!
//! The engine is a pure pipeline over explicit inputs. Callers load a
//! [`Catalog`] and [`KnowledgeBase`] once, collect an [`AnswerSet`] however
//! they like, and call [`evaluate`]; nothing in here holds session state,
//! blocks, or touches the outside world.

pub mod catalog;
pub mod import;
pub mod justification;
pub mod knowledge;
pub mod ranking;
pub mod scoring;
pub mod session;

pub use catalog::{AnswerOption, Catalog, LoadError, Outcome, Question};
pub use import::{AnswerImportError, CsvAnswerImporter};
pub use justification::{build_justification, ComparisonRow, JustificationDocument, Reason};
pub use knowledge::{KnowledgeBase, KnowledgeEntry};
pub use ranking::{rank, Confidence, Ranking};
pub use scoring::{compute_scores, ScoreEntry, ScoreTotals};
pub use session::AnswerSet;

use serde::Serialize;
use std::fmt;

/// Failures that make an evaluation meaningless. Recoverable data problems
/// (unanswered questions, unknown option ids, missing impact weights or
/// conclusion text) are absorbed with documented defaults and never reach
/// this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationError {
    InsufficientOutcomes { found: usize },
    MissingKnowledgeEntry { outcome: Outcome },
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationError::InsufficientOutcomes { found } => write!(
                f,
                "ranking requires at least 2 configured outcomes, found {}",
                found
            ),
            EvaluationError::MissingKnowledgeEntry { outcome } => write!(
                f,
                "no knowledge base entry for outcome '{}'",
                outcome.label()
            ),
        }
    }
}

impl std::error::Error for EvaluationError {}

/// Complete result of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub totals: ScoreTotals,
    pub ranking: Ranking,
    pub confidence: Confidence,
    pub justification: JustificationDocument,
}

impl Evaluation {
    pub fn recommendation(&self) -> ScoreEntry {
        self.ranking.winner()
    }
}

/// Runs the full pipeline: scoring, ranking, confidence classification and
/// justification assembly. Deterministic: the same inputs always produce the
/// same result, so a failed evaluation is never worth retrying.
pub fn evaluate(
    catalog: &Catalog,
    knowledge: &KnowledgeBase,
    answers: &AnswerSet,
) -> Result<Evaluation, EvaluationError> {
    let totals = compute_scores(catalog, answers);
    let ranking = rank(&totals)?;
    let confidence = ranking.confidence();
    let justification =
        build_justification(ranking.winner().outcome, &totals, answers, catalog, knowledge)?;

    Ok(Evaluation {
        totals,
        ranking,
        confidence,
        justification,
    })
}
