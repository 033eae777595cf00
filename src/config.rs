//! Configuration types for flashcard generation.
//!
//! All generation behaviour is controlled through [`GenerationConfig`], built
//! via its [`GenerationConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across threads, serialise the scalar parts for
//! logging, and diff two runs to understand why their outputs differ.
//!
//! The empirical constants of the extraction pipeline (paragraph thresholds,
//! page-scan limits, fallback floors) are policy, not protocol — they live
//! here as [`FilterThresholds`] and [`ExtractionThresholds`] rather than as
//! hard-coded numbers inside the pipeline stages.

use crate::backend::{GenerativeBackend, SamplingOptions};
use crate::error::Pdf2CardsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Configuration for a card-generation request.
///
/// Built via [`GenerationConfig::builder()`] or using
/// [`GenerationConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2cards::{CardType, GenerationConfig};
///
/// let config = GenerationConfig::builder()
///     .num_cards(5)
///     .card_rotation(vec![CardType::Definition, CardType::Summary])
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct GenerationConfig {
    /// Maximum number of cards to produce. Default: 10.
    ///
    /// The rule-based path can return fewer when the source material is too
    /// sparse (fewer valid sentences than requested cards); it never returns
    /// more.
    pub num_cards: usize,

    /// Pre-constructed generative text backend. `None` means rule-based
    /// generation only — the deterministic path is always available.
    pub backend: Option<Arc<dyn GenerativeBackend>>,

    /// Sampling parameters passed to the backend on every call.
    /// Defaults: temperature 0.7, top-p 0.8, top-k 40, 2048 output tokens.
    pub sampling: SamplingOptions,

    /// Maximum number of input characters embedded in the prompt. Default: 4000.
    ///
    /// Long documents blow past backend context windows and cost limits; the
    /// opening of a cleaned document carries the densest concept coverage, so
    /// only the first `prompt_char_cap` chars are sent.
    pub prompt_char_cap: usize,

    /// Card-type rotation for the rule-based synthesizer.
    /// Default: `[Definition, FillBlank]`.
    ///
    /// All four types are implemented; `Explanation` and `Summary` join the
    /// rotation only when a caller asks for them here.
    pub card_rotation: Vec<CardType>,

    /// Paragraph-filter thresholds used after PDF extraction.
    pub filter: FilterThresholds,

    /// PDF content-start detection and backend-fallback thresholds.
    pub extraction: ExtractionThresholds,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            num_cards: 10,
            backend: None,
            sampling: SamplingOptions::default(),
            prompt_char_cap: 4000,
            card_rotation: vec![CardType::Definition, CardType::FillBlank],
            filter: FilterThresholds::default(),
            extraction: ExtractionThresholds::default(),
        }
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("num_cards", &self.num_cards)
            .field("backend", &self.backend.as_ref().map(|b| b.name()))
            .field("sampling", &self.sampling)
            .field("prompt_char_cap", &self.prompt_char_cap)
            .field("card_rotation", &self.card_rotation)
            .field("filter", &self.filter)
            .field("extraction", &self.extraction)
            .finish()
    }
}

impl GenerationConfig {
    /// Create a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    pub fn num_cards(mut self, n: usize) -> Self {
        self.config.num_cards = n.max(1);
        self
    }

    pub fn backend(mut self, backend: Arc<dyn GenerativeBackend>) -> Self {
        self.config.backend = Some(backend);
        self
    }

    pub fn sampling(mut self, sampling: SamplingOptions) -> Self {
        self.config.sampling = sampling;
        self
    }

    pub fn prompt_char_cap(mut self, chars: usize) -> Self {
        self.config.prompt_char_cap = chars.max(100);
        self
    }

    pub fn card_rotation(mut self, rotation: Vec<CardType>) -> Self {
        self.config.card_rotation = rotation;
        self
    }

    pub fn filter(mut self, thresholds: FilterThresholds) -> Self {
        self.config.filter = thresholds;
        self
    }

    pub fn extraction(mut self, thresholds: ExtractionThresholds) -> Self {
        self.config.extraction = thresholds;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<GenerationConfig, Pdf2CardsError> {
        let c = &self.config;
        if c.card_rotation.is_empty() {
            return Err(Pdf2CardsError::InvalidConfig(
                "Card rotation must name at least one card type".into(),
            ));
        }
        if !(0.0..=1.0).contains(&c.filter.max_upper_ratio) {
            return Err(Pdf2CardsError::InvalidConfig(format!(
                "Uppercase ratio must be 0.0–1.0, got {}",
                c.filter.max_upper_ratio
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// The kind of question a rule-based card asks.
///
/// Each type has its own eligibility requirement; an ineligible sentence
/// yields no card of that type and is silently skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    /// "Что означает '<keyword>'?" — requires at least one keyword.
    Definition,
    /// First keyword blanked out of the sentence — requires a keyword.
    FillBlank,
    /// Quote the opening words, ask to continue — requires > 10 words.
    Explanation,
    /// Preview the sentence, ask for a retelling — always eligible.
    Summary,
}

/// Difficulty tier for model-backed generation.
///
/// Shapes the prompt only; the rule-based fallback ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// Fact-recall questions.
    Easy,
    /// Concept-understanding questions. (default)
    #[default]
    Medium,
    /// Analysis-and-application questions.
    Hard,
}

impl Difficulty {
    /// Lowercase tier name used inside the prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

// ── Threshold groups ─────────────────────────────────────────────────────

/// Thresholds for the meaningful-paragraph filter.
///
/// The defaults are the empirically tuned values the pipeline ships with;
/// none of them is a protocol constant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FilterThresholds {
    /// Minimum paragraph length in chars. Default: 50.
    pub min_paragraph_chars: usize,
    /// Minimum word count per paragraph. Default: 10.
    pub min_paragraph_words: usize,
    /// Maximum ratio of uppercase chars to total chars. Default: 0.5.
    ///
    /// Paragraphs above this are headers, banners, or shouting front
    /// matter, not body text.
    pub max_upper_ratio: f32,
    /// Minimum char count of the filtered result; below this the caller
    /// falls back to the unfiltered text (filtering over-pruned a short
    /// document). Default: 100.
    pub min_filtered_chars: usize,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            min_paragraph_chars: 50,
            min_paragraph_words: 10,
            max_upper_ratio: 0.5,
            min_filtered_chars: 100,
        }
    }
}

/// Thresholds for PDF content-start detection and backend fallback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExtractionThresholds {
    /// How many leading pages to scan for a section marker. Default: 20.
    pub marker_scan_pages: usize,
    /// Pages to skip when no marker is found, assumed front matter
    /// (covers, TOC, copyright). Capped at the page count. Default: 3.
    pub front_matter_skip: usize,
    /// Minimum non-whitespace chars the primary backend must recover
    /// before the secondary backend is tried. Default: 100.
    pub min_primary_chars: usize,
}

impl Default for ExtractionThresholds {
    fn default() -> Self {
        Self {
            marker_scan_pages: 20,
            front_matter_skip: 3,
            min_primary_chars: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_clamps_num_cards() {
        let config = GenerationConfig::builder().num_cards(0).build().unwrap();
        assert_eq!(config.num_cards, 1);
    }

    #[test]
    fn empty_rotation_rejected() {
        let err = GenerationConfig::builder()
            .card_rotation(vec![])
            .build()
            .unwrap_err();
        assert!(matches!(err, Pdf2CardsError::InvalidConfig(_)));
    }

    #[test]
    fn bad_upper_ratio_rejected() {
        let err = GenerationConfig::builder()
            .filter(FilterThresholds {
                max_upper_ratio: 1.5,
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, Pdf2CardsError::InvalidConfig(_)));
    }

    #[test]
    fn default_rotation_is_definition_fill_blank() {
        let config = GenerationConfig::default();
        assert_eq!(
            config.card_rotation,
            vec![CardType::Definition, CardType::FillBlank]
        );
    }
}
