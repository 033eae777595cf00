//! Generative text backend: trait, bundled implementation, response parsing.
//!
//! This module is intentionally thin — all prompt engineering lives in
//! [`crate::prompts`] so it can be changed without touching transport or
//! parsing logic here.
//!
//! ## The seam
//!
//! [`GenerativeBackend`] abstracts "prompt in, completion out" behind an
//! object-safe trait so the synthesizer never knows which vendor (or test
//! double) answers. Backends report failure as [`BackendError`]; callers
//! treat every variant as recoverable and degrade to rule-based synthesis.
//!
//! ## Response format
//!
//! The prompt demands strictly alternating `Q:`/`A:` lines.
//! [`parse_qa_pairs`] scans for those markers case-insensitively across
//! newlines: a question runs from its `Q:` to the next `A:`, an answer
//! from its `A:` to the next `Q:` or end of text. Pairs failing the
//! card-length invariant are dropped.

use crate::error::BackendError;
use crate::output::Flashcard;
use futures::future::BoxFuture;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Sampling parameters passed to the backend on every call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SamplingOptions {
    /// Sampling temperature. Default: 0.7 — creative enough to vary
    /// question phrasing, constrained enough to stay on the source text.
    pub temperature: f32,
    /// Nucleus sampling probability mass. Default: 0.8.
    pub top_p: f32,
    /// Top-k token cutoff. Default: 40.
    pub top_k: u32,
    /// Maximum completion tokens. Default: 2048 — ten Q/A pairs with
    /// 2–4 sentence answers fit comfortably.
    pub max_output_tokens: u32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens: 2048,
        }
    }
}

/// A generative text backend: accepts a prompt and sampling configuration,
/// returns a single text completion.
///
/// Implementations must be `Send + Sync`; the library shares one backend
/// handle across concurrent requests without locking.
pub trait GenerativeBackend: Send + Sync {
    /// Short backend name for logs and `Debug` output.
    fn name(&self) -> &str;

    /// Request a completion for `prompt`.
    ///
    /// Any failure — transport, quota, malformed reply — is a
    /// [`BackendError`]; callers never see a panic or a hung future beyond
    /// the implementation's own timeout.
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        options: &'a SamplingOptions,
    ) -> BoxFuture<'a, Result<String, BackendError>>;
}

// ── Bundled implementation: Gemini REST ──────────────────────────────────

/// Backend for the Google Generative Language REST API.
pub struct GeminiBackend {
    api_key: String,
    model: String,
    timeout_secs: u64,
}

impl GeminiBackend {
    /// Create a backend for the default `gemini-pro` model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, "gemini-pro")
    }

    /// Create a backend for a specific model identifier.
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            timeout_secs: 60,
        }
    }

    /// Override the per-request timeout (seconds).
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GenerativeBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        options: &'a SamplingOptions,
    ) -> BoxFuture<'a, Result<String, BackendError>> {
        Box::pin(async move {
            let url = format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
                self.model, self.api_key
            );
            let body = serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
                "generationConfig": {
                    "temperature": options.temperature,
                    "topP": options.top_p,
                    "topK": options.top_k,
                    "maxOutputTokens": options.max_output_tokens,
                },
            });

            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(self.timeout_secs))
                .build()
                .map_err(|e| BackendError::Http(e.to_string()))?;

            debug!("requesting completion from {}", self.model);
            let response = client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| BackendError::Http(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(BackendError::Api {
                    status: status.as_u16(),
                    body,
                });
            }

            let decoded: GenerateResponse = response
                .json()
                .await
                .map_err(|e| BackendError::Decode(e.to_string()))?;

            let text: String = decoded
                .candidates
                .into_iter()
                .next()
                .map(|c| {
                    c.content
                        .parts
                        .into_iter()
                        .map(|p| p.text)
                        .collect::<Vec<_>>()
                        .join("")
                })
                .unwrap_or_default();

            if text.trim().is_empty() {
                return Err(BackendError::Decode("empty completion".into()));
            }
            Ok(text)
        })
    }
}

// ── Response parsing ─────────────────────────────────────────────────────

static RE_QA_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b[qa]:").unwrap());

#[derive(Clone, Copy, PartialEq)]
enum Marker {
    Question,
    Answer,
}

/// Parse a completion into cards from its `Q:`/`A:` pairs.
///
/// Scanning is case-insensitive and spans newlines. A question runs from
/// its `Q:` marker to the following `A:`; an answer runs from its `A:` to
/// the next `Q:` or the end of text. Pairs with a trimmed question of ≤ 5
/// chars or answer of ≤ 10 chars are dropped.
pub fn parse_qa_pairs(content: &str) -> Vec<Flashcard> {
    let markers: Vec<(usize, usize, Marker)> = RE_QA_MARKER
        .find_iter(content)
        .map(|m| {
            // The match starts on the marker letter itself
            let kind = if content.as_bytes()[m.start()].eq_ignore_ascii_case(&b'q') {
                Marker::Question
            } else {
                Marker::Answer
            };
            (m.start(), m.end(), kind)
        })
        .collect();

    let mut cards = Vec::new();
    let mut i = 0;
    while i < markers.len() {
        if markers[i].2 != Marker::Question {
            i += 1;
            continue;
        }
        // First A: after this Q: ends the question
        let Some(a_index) = (i + 1..markers.len()).find(|&j| markers[j].2 == Marker::Answer)
        else {
            break;
        };
        let question = content[markers[i].1..markers[a_index].0].trim();

        // Next Q: after the A: ends the answer
        let next_q = (a_index + 1..markers.len()).find(|&j| markers[j].2 == Marker::Question);
        let answer_end = next_q.map(|j| markers[j].0).unwrap_or(content.len());
        let answer = content[markers[a_index].1..answer_end].trim();

        if let Some(card) = Flashcard::checked(question, answer) {
            cards.push(card);
        }

        match next_q {
            Some(j) => i = j,
            None => break,
        }
    }
    cards
}
