//! # pdf2cards
//!
//! Generate question/answer study flashcards from raw text or PDF
//! documents.
//!
//! ## Why this crate?
//!
//! Study material rarely arrives clean. PDFs carry covers, tables of
//! contents, copyright pages, and page-number furniture; extracted text
//! comes back with broken whitespace and stray control characters. This
//! crate pairs a heuristic extraction/cleanup pipeline with two card
//! synthesizers: a generative-backend path for quality and a deterministic
//! rule-based path that needs no model at all — and that silently takes
//! over whenever the backend is missing or fails.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes
//!  │
//!  ├─ 1. Extract    content-start detection, lopdf primary /
//!  │                pdf-extract secondary
//!  ├─ 2. Normalize  control chars, whitespace, URLs, page markers
//!  ├─ 3. Filter     drop noise paragraphs (front matter, headers)
//!  ├─ 4. Synthesize model-backed Q:/A: generation, or rule-based
//!  │                definition / fill-blank cards
//!  └─ 5. Output     ordered cards + generation stats
//! ```
//!
//! Plain-text input enters at step 2.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2cards::{generate_from_text, GenerationConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // No backend configured: deterministic rule-based synthesis
//!     let config = GenerationConfig::default();
//!     let output = generate_from_text("Ваш учебный текст...", &config).await?;
//!     for card in &output.cards {
//!         println!("Q: {}\nA: {}\n", card.question, card.answer);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! With a backend, construct it once at startup and hand it to the config
//! — business logic never reads the environment:
//!
//! ```rust,no_run
//! use pdf2cards::{GeminiBackend, GenerationConfig};
//! use std::sync::Arc;
//!
//! let backend = Arc::new(GeminiBackend::new("api-key"));
//! let config = GenerationConfig::builder()
//!     .backend(backend)
//!     .num_cards(15)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2cards` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! pdf2cards = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod backend;
pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod rules;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use backend::{GeminiBackend, GenerativeBackend, SamplingOptions};
pub use config::{
    CardType, Difficulty, ExtractionThresholds, FilterThresholds, GenerationConfig,
    GenerationConfigBuilder,
};
pub use error::{BackendError, Pdf2CardsError};
pub use generate::{
    generate_cards, generate_cards_sync, generate_from_pdf, generate_from_text,
    generate_with_difficulty, validate_for_cards, ModelOutcome,
};
pub use output::{
    DocumentMetadata, FallbackReason, Flashcard, GenerationOutput, GenerationStats, TextStats,
};
pub use pipeline::extract::{inspect, parse_pdf};
pub use pipeline::keywords::{extract_keywords, key_phrases};
pub use pipeline::noise::{filter_meaningful, is_noise};
pub use pipeline::normalize::{clean_text, process_text};
pub use pipeline::segment::{analyze, split_paragraphs, split_sentences, summarize};
