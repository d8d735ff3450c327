use super::catalog::{Catalog, Outcome};
use super::session::AnswerSet;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;

/// Per-outcome totals, always recomputed in full from an answer set. Outcomes
/// the catalog never touched stay at 0.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScoreTotals {
    totals: HashMap<Outcome, i32>,
}

impl ScoreTotals {
    pub fn from_scores(scores: impl IntoIterator<Item = (Outcome, i32)>) -> Self {
        Self {
            totals: scores.into_iter().collect(),
        }
    }

    pub fn get(&self, outcome: Outcome) -> i32 {
        self.totals.get(&outcome).copied().unwrap_or(0)
    }

    /// Totals in canonical outcome order.
    pub fn entries(&self) -> Vec<ScoreEntry> {
        Outcome::ordered()
            .into_iter()
            .map(|outcome| ScoreEntry {
                outcome,
                outcome_label: outcome.label(),
                score: self.get(outcome),
            })
            .collect()
    }
}

// Serialized in canonical order so identical totals always produce identical
// documents, regardless of map iteration order.
impl Serialize for ScoreTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Outcome::ordered().len()))?;
        for outcome in Outcome::ordered() {
            map.serialize_entry(&outcome, &self.get(outcome))?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreEntry {
    pub outcome: Outcome,
    pub outcome_label: &'static str,
    pub score: i32,
}

/// Aggregates impact weights from the chosen options into per-outcome totals.
///
/// Pure and order-independent: unanswered questions contribute nothing, and an
/// answer naming an option id the question does not have is skipped silently
/// (the documented integrity policy, equivalent to leaving the question
/// unanswered).
pub fn compute_scores(catalog: &Catalog, answers: &AnswerSet) -> ScoreTotals {
    let mut totals: HashMap<Outcome, i32> = Outcome::ordered()
        .into_iter()
        .map(|outcome| (outcome, 0))
        .collect();

    for question in catalog.questions() {
        let Some(chosen) = answers.chosen(&question.id) else {
            continue;
        };
        let Some(option) = question.option(chosen) else {
            tracing::debug!(
                question = %question.id,
                option = chosen,
                "answer references an unknown option, skipping"
            );
            continue;
        };

        for outcome in Outcome::ordered() {
            if let Some(total) = totals.get_mut(&outcome) {
                *total += option.impact_on(outcome);
            }
        }
    }

    ScoreTotals { totals }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::catalog::{AnswerOption, Question};

    fn two_question_catalog() -> Catalog {
        let option = |id: &str, impact: &[(Outcome, i32)]| AnswerOption {
            id: id.to_string(),
            text: format!("option {id}"),
            impact: impact.iter().copied().collect(),
        };

        Catalog::new(vec![
            Question {
                id: "q1".to_string(),
                text: "First question".to_string(),
                options: vec![
                    option("a", &[(Outcome::Windows, 2)]),
                    option("b", &[(Outcome::Linux, 2)]),
                ],
            },
            Question {
                id: "q2".to_string(),
                text: "Second question".to_string(),
                options: vec![
                    option("c", &[(Outcome::Windows, 2)]),
                    option("d", &[(Outcome::Linux, 1)]),
                ],
            },
        ])
    }

    #[test]
    fn sums_impacts_for_chosen_options() {
        let catalog = two_question_catalog();
        let mut answers = AnswerSet::new();
        answers.select("q1", "a");
        answers.select("q2", "c");

        let totals = compute_scores(&catalog, &answers);
        assert_eq!(totals.get(Outcome::Windows), 4);
        assert_eq!(totals.get(Outcome::Linux), 0);
        assert_eq!(totals.get(Outcome::Macos), 0);
        assert_eq!(totals.get(Outcome::Android), 0);
    }

    #[test]
    fn empty_answer_set_yields_all_zero_totals() {
        let totals = compute_scores(&two_question_catalog(), &AnswerSet::new());
        for entry in totals.entries() {
            assert_eq!(entry.score, 0);
        }
    }

    #[test]
    fn unknown_option_id_behaves_as_unanswered() {
        let catalog = two_question_catalog();

        let mut partial = AnswerSet::new();
        partial.select("q2", "d");

        let mut corrupt = partial.clone();
        corrupt.select("q1", "does-not-exist");

        assert_eq!(compute_scores(&catalog, &corrupt), compute_scores(&catalog, &partial));
    }

    #[test]
    fn answer_for_unknown_question_is_ignored() {
        let catalog = two_question_catalog();
        let mut answers = AnswerSet::new();
        answers.select("q99", "a");

        let totals = compute_scores(&catalog, &answers);
        assert_eq!(totals, compute_scores(&catalog, &AnswerSet::new()));
    }

    #[test]
    fn recomputation_is_deterministic() {
        let catalog = two_question_catalog();
        let mut answers = AnswerSet::new();
        answers.select("q1", "b");
        answers.select("q2", "d");

        let first = compute_scores(&catalog, &answers);
        let second = compute_scores(&catalog, &answers);
        assert_eq!(first, second);
        assert_eq!(first.entries(), second.entries());
    }

    #[test]
    fn totals_serialize_in_canonical_order() {
        let totals = ScoreTotals::from_scores([(Outcome::Android, 3), (Outcome::Linux, 1)]);
        let json = serde_json::to_string(&totals).expect("totals serialize");
        assert_eq!(json, r#"{"windows":0,"linux":1,"macos":0,"android":3}"#);
    }
}
