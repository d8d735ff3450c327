use super::catalog::{Catalog, Outcome};
use super::knowledge::KnowledgeBase;
use super::scoring::{ScoreEntry, ScoreTotals};
use super::session::AnswerSet;
use super::EvaluationError;
use serde::Serialize;

/// One entry in the explanation of why the winner came out ahead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reason {
    /// An answered question whose chosen option carried strictly positive
    /// impact toward the winner.
    Favored {
        question: String,
        option: String,
        impact: i32,
    },
    /// Sentinel emitted when no single answer favored the winner: the result
    /// came from the overall balance, and the document must still explain
    /// itself rather than render an empty list.
    Balanced,
}

impl Reason {
    pub fn summary(&self) -> String {
        match self {
            Reason::Favored {
                question,
                option,
                impact,
            } => format!("\"{question}\" -> {option} (impact +{impact})"),
            Reason::Balanced => {
                "no single answer was decisive; the recommendation reflects a balanced analysis"
                    .to_string()
            }
        }
    }
}

/// One row of the comparative table, sourced from the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub outcome: Outcome,
    pub outcome_label: &'static str,
    pub architecture: String,
    pub security: String,
    pub use_cases: String,
}

/// Structured explanation of a recommendation. Plain field values only, no
/// markup: renderers (terminal, JSON API, export) decide presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JustificationDocument {
    pub headline: String,
    pub reasons: Vec<Reason>,
    pub comparison: Vec<ComparisonRow>,
    pub conclusion: String,
    pub scores: Vec<ScoreEntry>,
}

/// Assembles the justification for `winner`.
///
/// Reasons preserve catalog question order and include exactly the answered
/// questions whose chosen option has positive impact toward the winner.
/// Every outcome must have a knowledge base entry; a missing conclusion
/// paragraph degrades to empty text instead.
pub fn build_justification(
    winner: Outcome,
    totals: &ScoreTotals,
    answers: &AnswerSet,
    catalog: &Catalog,
    knowledge: &KnowledgeBase,
) -> Result<JustificationDocument, EvaluationError> {
    let mut reasons = Vec::new();
    for question in catalog.questions() {
        let Some(chosen) = answers.chosen(&question.id) else {
            continue;
        };
        let Some(option) = question.option(chosen) else {
            continue;
        };
        let impact = option.impact_on(winner);
        if impact > 0 {
            reasons.push(Reason::Favored {
                question: question.text.clone(),
                option: option.text.clone(),
                impact,
            });
        }
    }
    if reasons.is_empty() {
        reasons.push(Reason::Balanced);
    }

    let mut comparison = Vec::with_capacity(Outcome::ordered().len());
    for outcome in Outcome::ordered() {
        let entry = knowledge
            .entry(outcome)
            .ok_or(EvaluationError::MissingKnowledgeEntry { outcome })?;
        comparison.push(ComparisonRow {
            outcome,
            outcome_label: outcome.label(),
            architecture: entry.architecture.clone(),
            security: entry.security.clone(),
            use_cases: entry.use_cases.clone(),
        });
    }

    let conclusion = knowledge.conclusion(winner).unwrap_or_default().to_string();
    let headline = format!(
        "{} was identified as the system most compatible with your priorities.",
        winner.label()
    );

    Ok(JustificationDocument {
        headline,
        reasons,
        comparison,
        conclusion,
        scores: totals.entries(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::catalog::{AnswerOption, Question};
    use crate::advisor::scoring::compute_scores;
    use std::collections::HashMap;

    fn catalog() -> Catalog {
        let option = |id: &str, text: &str, impact: &[(Outcome, i32)]| AnswerOption {
            id: id.to_string(),
            text: text.to_string(),
            impact: impact.iter().copied().collect(),
        };

        Catalog::new(vec![
            Question {
                id: "q1".to_string(),
                text: "Primary use?".to_string(),
                options: vec![
                    option("a", "Development", &[(Outcome::Linux, 2)]),
                    option("b", "Gaming", &[(Outcome::Windows, 2)]),
                ],
            },
            Question {
                id: "q2".to_string(),
                text: "Budget?".to_string(),
                options: vec![
                    option("c", "Tight", &[(Outcome::Linux, 1), (Outcome::Android, 1)]),
                    option("d", "Premium", &[(Outcome::Macos, 2)]),
                ],
            },
        ])
    }

    #[test]
    fn reasons_cover_exactly_the_positive_impact_answers() {
        let catalog = catalog();
        let mut answers = AnswerSet::new();
        answers.select("q1", "a");
        answers.select("q2", "c");
        let totals = compute_scores(&catalog, &answers);

        let document = build_justification(
            Outcome::Linux,
            &totals,
            &answers,
            &catalog,
            &KnowledgeBase::standard(),
        )
        .expect("justification builds");

        assert_eq!(
            document.reasons,
            vec![
                Reason::Favored {
                    question: "Primary use?".to_string(),
                    option: "Development".to_string(),
                    impact: 2,
                },
                Reason::Favored {
                    question: "Budget?".to_string(),
                    option: "Tight".to_string(),
                    impact: 1,
                },
            ]
        );
        assert!(document.headline.contains("Linux"));
        assert!(!document.conclusion.is_empty());
    }

    #[test]
    fn no_qualifying_answer_emits_balanced_sentinel() {
        let catalog = catalog();
        let mut answers = AnswerSet::new();
        answers.select("q1", "b");
        let totals = compute_scores(&catalog, &answers);

        let document = build_justification(
            Outcome::Linux,
            &totals,
            &answers,
            &catalog,
            &KnowledgeBase::standard(),
        )
        .expect("justification builds");

        assert_eq!(document.reasons, vec![Reason::Balanced]);
        assert!(!document.reasons.is_empty());
    }

    #[test]
    fn comparison_rows_follow_canonical_order() {
        let catalog = catalog();
        let answers = AnswerSet::new();
        let totals = compute_scores(&catalog, &answers);

        let document = build_justification(
            Outcome::Windows,
            &totals,
            &answers,
            &catalog,
            &KnowledgeBase::standard(),
        )
        .expect("justification builds");

        let order: Vec<Outcome> = document
            .comparison
            .iter()
            .map(|row| row.outcome)
            .collect();
        assert_eq!(order, Outcome::ordered());
        assert_eq!(document.scores.len(), Outcome::ordered().len());
    }

    #[test]
    fn missing_knowledge_entry_is_fatal() {
        let catalog = catalog();
        let answers = AnswerSet::new();
        let totals = compute_scores(&catalog, &answers);
        let sparse = KnowledgeBase::new(HashMap::new(), HashMap::new());

        let err = build_justification(Outcome::Windows, &totals, &answers, &catalog, &sparse)
            .expect_err("missing entry surfaces");
        assert_eq!(
            err,
            EvaluationError::MissingKnowledgeEntry {
                outcome: Outcome::Windows
            }
        );
    }

    #[test]
    fn missing_conclusion_degrades_to_empty_text() {
        let catalog = catalog();
        let answers = AnswerSet::new();
        let totals = compute_scores(&catalog, &answers);

        let mut entries = HashMap::new();
        for outcome in Outcome::ordered() {
            entries.insert(
                outcome,
                KnowledgeBase::standard()
                    .entry(outcome)
                    .expect("standard entry")
                    .clone(),
            );
        }
        let no_conclusions = KnowledgeBase::new(entries, HashMap::new());

        let document = build_justification(
            Outcome::Windows,
            &totals,
            &answers,
            &catalog,
            &no_conclusions,
        )
        .expect("justification builds");
        assert_eq!(document.conclusion, "");
    }
}
