//! Output types: the generated cards plus run statistics and document info.

use crate::error::BackendError;
use serde::{Deserialize, Serialize};

/// A single question/answer study card.
///
/// Invariant (enforced by both synthesizers): the question is longer than
/// 5 chars and the answer longer than 10. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    /// Build a card if the question/answer lengths satisfy the invariant.
    ///
    /// Lengths are counted in chars, not bytes — half the templates are
    /// Cyrillic.
    pub fn checked(question: impl Into<String>, answer: impl Into<String>) -> Option<Self> {
        let question = question.into();
        let answer = answer.into();
        if question.trim().chars().count() > 5 && answer.trim().chars().count() > 10 {
            Some(Self { question, answer })
        } else {
            None
        }
    }
}

/// The result of a card-generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutput {
    /// The generated cards, at most `num_cards` of them, in order.
    pub cards: Vec<Flashcard>,
    /// How the cards were produced.
    pub stats: GenerationStats,
}

/// Statistics describing how a generation run went.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Cards the caller asked for.
    pub requested: usize,
    /// Cards actually produced.
    pub produced: usize,
    /// True when the cards came from the generative backend; false means
    /// the rule-based synthesizer produced them.
    pub model_used: bool,
    /// Why the rule-based path ran, when it did.
    pub fallback: Option<FallbackReason>,
    /// Wall-clock duration of the request.
    pub duration_ms: u64,
}

/// Why generation degraded to the rule-based synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FallbackReason {
    /// No backend was configured; the rule-based path is the only one.
    BackendUnavailable,
    /// The backend was called and failed; the error text is preserved for
    /// diagnostics but was not propagated.
    BackendFailed(String),
}

impl FallbackReason {
    pub(crate) fn failed(err: &BackendError) -> Self {
        FallbackReason::BackendFailed(err.to_string())
    }
}

/// Document metadata recovered from a PDF's info dictionary.
///
/// Fields the document does not declare default to `"Unknown"` rather than
/// `None` so downstream display code never branches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub page_count: usize,
    pub title: String,
    pub author: String,
    pub subject: String,
}

impl DocumentMetadata {
    pub(crate) fn unknown(page_count: usize) -> Self {
        Self {
            page_count,
            title: "Unknown".into(),
            author: "Unknown".into(),
            subject: "Unknown".into(),
        }
    }
}

/// Surface statistics of a text, as reported by
/// [`crate::pipeline::segment::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    pub char_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub avg_word_len: f64,
    pub avg_sentence_len: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_rejects_short_question() {
        assert!(Flashcard::checked("Q?", "a perfectly long answer").is_none());
    }

    #[test]
    fn checked_rejects_short_answer() {
        assert!(Flashcard::checked("A question?", "short").is_none());
    }

    #[test]
    fn checked_accepts_valid_pair() {
        let card = Flashcard::checked("Что такое грав", "Сила притяжения между телами").unwrap();
        assert_eq!(card.question, "Что такое грав");
    }

    #[test]
    fn checked_counts_chars_not_bytes() {
        // 6 Cyrillic chars (12 bytes) question, 11-char answer
        assert!(Flashcard::checked("Вопрос", "Ответ ответ").is_some());
    }

    #[test]
    fn flashcard_serialises_to_plain_json() {
        let card = Flashcard {
            question: "What is Rust?".into(),
            answer: "A systems programming language.".into(),
        };
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"question\""));
        assert!(json.contains("\"answer\""));
    }
}
