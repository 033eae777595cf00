//! Pipeline stages for turning source material into card-ready text.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch a PDF backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! PDF bytes ──▶ extract ──▶ normalize ──▶ noise ──▶ segment/keywords
//!               (lopdf/      (cleanup)    (filter)   (card material)
//!                pdf-extract)
//! ```
//!
//! Plain-text input skips the extract stage and enters at normalize.
//!
//! 1. [`extract`]   — content-start detection and dual-backend extraction
//! 2. [`normalize`] — control chars, whitespace, URLs/e-mails/page markers,
//!    punctuation spacing, quote style
//! 3. [`noise`]     — classify and drop non-content paragraphs
//! 4. [`segment`]   — sentence/paragraph splitting and text statistics
//! 5. [`keywords`]  — card-worthy term selection per sentence

pub mod extract;
pub mod keywords;
pub mod noise;
pub mod normalize;
pub mod segment;
