//! Top-level entry points: validation, generation, and the model/rules
//! fallback decision.
//!
//! ## Why an explicit outcome enum?
//!
//! "Fall back to rule-based generation" is a core behaviour, not an
//! accident of error handling. [`ModelOutcome`] makes it a visible branch:
//! the model path either produced cards, was never available, or failed
//! with a recorded reason. Whatever the branch, the caller gets a
//! [`GenerationOutput`] — backend trouble never propagates past this
//! module.
//!
//! ## Suspension model
//!
//! A request is processed start-to-finish without internal parallelism;
//! the backend call is the only await point. Every pipeline stage is a
//! pure function over its inputs, so concurrent requests need no
//! coordination beyond sharing the immutable [`GenerationConfig`].

use crate::backend::{parse_qa_pairs, GenerativeBackend};
use crate::config::{Difficulty, GenerationConfig};
use crate::error::{BackendError, Pdf2CardsError};
use crate::output::{FallbackReason, Flashcard, GenerationOutput, GenerationStats};
use crate::pipeline::{extract, normalize, segment};
use crate::{prompts, rules};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Minimum chars of input text for card generation.
const MIN_TEXT_CHARS: usize = 50;
/// Minimum words of input text for card generation.
const MIN_TEXT_WORDS: usize = 10;
/// Minimum sentences of input text for card generation.
const MIN_TEXT_SENTENCES: usize = 2;

/// How a model-backed generation attempt ended.
#[derive(Debug)]
pub enum ModelOutcome {
    /// The backend produced parseable cards.
    Generated(Vec<Flashcard>),
    /// No backend is configured; rule-based is the only path.
    Unavailable,
    /// The backend was called and failed; the rule-based path takes over.
    Failed(BackendError),
}

/// Generate flashcards from cleaned text.
///
/// Never fails for non-empty valid text: when the backend is missing or
/// fails in any way, the deterministic rule-based synthesizer produces the
/// cards. Returns fewer than `config.num_cards` only when the source
/// material is too sparse to support them, and an empty card list only
/// when the text degenerates to zero valid sentences.
pub async fn generate_cards(text: &str, config: &GenerationConfig) -> GenerationOutput {
    let start = Instant::now();
    let outcome = match &config.backend {
        None => ModelOutcome::Unavailable,
        Some(backend) => {
            let prompt = prompts::card_prompt(text, config.num_cards, config.prompt_char_cap);
            attempt_model(backend.as_ref(), &prompt, config).await
        }
    };
    finish(outcome, text, config, start)
}

/// Generate flashcards at a requested difficulty tier.
///
/// Same backend, parser, and fallback as [`generate_cards`] — only the
/// prompt differs. The rule-based fallback has no difficulty notion and
/// ignores the tier.
pub async fn generate_with_difficulty(
    text: &str,
    difficulty: Difficulty,
    config: &GenerationConfig,
) -> GenerationOutput {
    let start = Instant::now();
    let outcome = match &config.backend {
        None => ModelOutcome::Unavailable,
        Some(backend) => {
            let prompt = prompts::difficulty_prompt(
                text,
                config.num_cards,
                difficulty,
                config.prompt_char_cap,
            );
            attempt_model(backend.as_ref(), &prompt, config).await
        }
    };
    finish(outcome, text, config, start)
}

/// Synchronous wrapper around [`generate_cards`].
///
/// Creates a temporary tokio runtime internally.
pub fn generate_cards_sync(
    text: &str,
    config: &GenerationConfig,
) -> Result<GenerationOutput, Pdf2CardsError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2CardsError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(async { Ok(generate_cards(text, config).await) })
}

/// Validate, normalise, and generate cards from raw user text.
pub async fn generate_from_text(
    text: &str,
    config: &GenerationConfig,
) -> Result<GenerationOutput, Pdf2CardsError> {
    validate_for_cards(text)?;
    let processed = normalize::process_text(text)?;
    Ok(generate_cards(&processed, config).await)
}

/// Extract, validate, and generate cards from PDF bytes.
pub async fn generate_from_pdf(
    bytes: &[u8],
    config: &GenerationConfig,
) -> Result<GenerationOutput, Pdf2CardsError> {
    let extracted = extract::parse_pdf(bytes, config)?;
    validate_for_cards(&extracted)?;
    let processed = normalize::process_text(&extracted)?;
    Ok(generate_cards(&processed, config).await)
}

/// Check that a text can support card generation at all.
///
/// Rejects empty, too-short, too-sparse, and single-sentence inputs with
/// distinct errors so the transport layer can report which criterion
/// failed. Runs before any generation work.
pub fn validate_for_cards(text: &str) -> Result<(), Pdf2CardsError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Pdf2CardsError::EmptyInput);
    }
    let len = trimmed.chars().count();
    if len < MIN_TEXT_CHARS {
        return Err(Pdf2CardsError::TextTooShort {
            len,
            min: MIN_TEXT_CHARS,
        });
    }
    let words = trimmed.split_whitespace().count();
    if words < MIN_TEXT_WORDS {
        return Err(Pdf2CardsError::TooFewWords {
            words,
            min: MIN_TEXT_WORDS,
        });
    }
    let sentences = segment::split_sentences(trimmed).len();
    if sentences < MIN_TEXT_SENTENCES {
        return Err(Pdf2CardsError::TooFewSentences {
            sentences,
            min: MIN_TEXT_SENTENCES,
        });
    }
    Ok(())
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Run one backend attempt: call, parse, cap.
///
/// A completion that parses to zero valid pairs counts as a failure —
/// returning an empty card list from a "successful" model path would look
/// like sparse input to the caller, which it is not.
async fn attempt_model(
    backend: &dyn GenerativeBackend,
    prompt: &str,
    config: &GenerationConfig,
) -> ModelOutcome {
    debug!("requesting {} cards from backend '{}'", config.num_cards, backend.name());
    match backend.complete(prompt, &config.sampling).await {
        Ok(completion) => {
            let mut cards = parse_qa_pairs(&completion);
            if cards.is_empty() {
                return ModelOutcome::Failed(BackendError::MalformedResponse);
            }
            cards.truncate(config.num_cards);
            ModelOutcome::Generated(cards)
        }
        Err(err) => ModelOutcome::Failed(err),
    }
}

/// Resolve the outcome into cards plus stats, running the rule-based
/// fallback where needed.
fn finish(
    outcome: ModelOutcome,
    text: &str,
    config: &GenerationConfig,
    start: Instant,
) -> GenerationOutput {
    let (cards, model_used, fallback) = match outcome {
        ModelOutcome::Generated(cards) => (cards, true, None),
        ModelOutcome::Unavailable => {
            debug!("no backend configured, using rule-based synthesis");
            let cards = rules::generate_simple(text, config.num_cards, &config.card_rotation);
            (cards, false, Some(FallbackReason::BackendUnavailable))
        }
        ModelOutcome::Failed(err) => {
            warn!("backend failed ({err}), falling back to rule-based synthesis");
            let cards = rules::generate_simple(text, config.num_cards, &config.card_rotation);
            (cards, false, Some(FallbackReason::failed(&err)))
        }
    };

    let stats = GenerationStats {
        requested: config.num_cards,
        produced: cards.len(),
        model_used,
        fallback,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "generated {}/{} cards ({})",
        stats.produced,
        stats.requested,
        if model_used { "model" } else { "rule-based" }
    );

    GenerationOutput { cards, stats }
}
