//! Error types for the pdf2cards library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Pdf2CardsError`] — **Fatal**: the request cannot proceed at all
//!   (empty or too-short input, unreadable PDF, invalid configuration).
//!   Returned as `Err(Pdf2CardsError)` from the top-level entry points.
//!
//! * [`BackendError`] — **Non-fatal**: the generative text backend failed
//!   (network, quota, malformed response). Never propagated to callers:
//!   [`crate::generate::generate_cards`] absorbs it and falls back to the
//!   rule-based synthesizer, recording the reason in
//!   [`crate::output::GenerationStats`].
//!
//! The separation keeps the public contract simple: a request either fails
//! for a user-actionable reason (fix your input) or produces cards —
//! model-backend trouble is an implementation detail.

use thiserror::Error;

/// All fatal errors returned by the pdf2cards library.
///
/// Backend failures use [`BackendError`] and are absorbed by the rule-based
/// fallback rather than propagated here.
#[derive(Debug, Error)]
pub enum Pdf2CardsError {
    // ── Validation errors ─────────────────────────────────────────────────
    /// Input text was empty or all-whitespace.
    #[error("Text cannot be empty")]
    EmptyInput,

    /// Input text is below the minimum length for card generation.
    #[error("Text is too short: {len} chars (minimum {min})")]
    TextTooShort { len: usize, min: usize },

    /// Input text does not contain enough words to build cards from.
    #[error("Text does not have enough words: {words} (minimum {min})")]
    TooFewWords { words: usize, min: usize },

    /// Input text does not contain enough sentences to build cards from.
    #[error("Text must contain at least {min} sentences, found {sentences}")]
    TooFewSentences { sentences: usize, min: usize },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// The document could not be parsed by either extraction backend.
    #[error("PDF parsing failed: {detail}")]
    PdfParse { detail: String },

    /// Both backends ran but recovered no usable text (likely a scanned or
    /// image-only document).
    #[error("PDF contains no extractable text (may be scanned/image-only)")]
    NoExtractableText,

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal failure of the generative text backend.
///
/// Every variant is recoverable: the caller degrades to the deterministic
/// rule-based synthesizer with the same input. Stored in
/// [`crate::output::FallbackReason`] so callers can see *why* the model path
/// was not used.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// Transport-level failure (connect, TLS, timeout).
    #[error("backend request failed: {0}")]
    Http(String),

    /// The API answered with a non-success status.
    #[error("backend returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The completion arrived but no Q:/A: pairs could be parsed from it.
    #[error("backend response contained no usable Q:/A: pairs")]
    MalformedResponse,

    /// The response body was not the JSON shape the backend documents.
    #[error("backend response could not be decoded: {0}")]
    Decode(String),
}
