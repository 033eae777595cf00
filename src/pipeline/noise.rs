//! Noise classification: separating body text from front matter.
//!
//! Books and reports carry pages of copyright notices, tables of contents,
//! page numbers, and attribution lines that make terrible flashcard
//! material. There is no structural signal for "this is not content" in
//! extracted PDF text, so classification is heuristic: a bank of bilingual
//! (Russian/English) patterns matched case-insensitively against each
//! paragraph, plus hard floors on length and word count and a ceiling on
//! the uppercase ratio.
//!
//! The thresholds are empirical policy and come from
//! [`crate::config::FilterThresholds`]; the pattern bank is fixed.

use crate::config::FilterThresholds;
use once_cell::sync::Lazy;
use regex::RegexSet;

/// Patterns that mark a paragraph as non-content.
///
/// Matched against the trimmed paragraph. The digit-only and
/// digits/dashes-only patterns are anchored to the whole paragraph; the
/// rest match anywhere inside it.
static NOISE_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        // rights and publishing front matter
        r"(?i)copyright|©|все права защищены|isbn",
        r"(?i)издательство|publishing|press",
        r"(?i)printed in|напечатано",
        // structural headers
        r"(?i)содержание|table of contents|оглавление",
        r"(?i)глава \d+|chapter \d+",
        r"(?i)часть \d+|part \d+",
        r"(?i)раздел \d+|section \d+",
        // page furniture
        r"^\d+$",
        r"(?i)страница \d+|page \d+",
        // attribution lines
        r"(?i)автор:|author:|составитель",
        r"(?i)редактор:|editor:|под редакцией",
        // digits/whitespace/dashes only (page ranges, TOC leaders)
        r"^[\d\s.\-—–]+$",
    ])
    .unwrap()
});

/// Classify a paragraph as noise (front matter, headers, page furniture).
///
/// A paragraph shorter than 20 chars is always noise — nothing that short
/// supports a question/answer pair.
pub fn is_noise(paragraph: &str) -> bool {
    let trimmed = paragraph.trim();
    if trimmed.chars().count() < 20 {
        return true;
    }
    NOISE_PATTERNS.is_match(trimmed)
}

/// Keep only meaningful paragraphs, rejoined in original order.
///
/// A paragraph survives iff it meets the length floor, is not classified as
/// noise, has enough words, and is not mostly uppercase. Callers must fall
/// back to the unfiltered text when the result drops below
/// [`FilterThresholds::min_filtered_chars`] — a short document can be
/// over-pruned to nothing by these rules.
pub fn filter_meaningful(text: &str, thresholds: &FilterThresholds) -> String {
    let meaningful: Vec<&str> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|para| {
            let char_count = para.chars().count();
            if char_count < thresholds.min_paragraph_chars {
                return false;
            }
            if is_noise(para) {
                return false;
            }
            if para.split_whitespace().count() < thresholds.min_paragraph_words {
                return false;
            }
            let upper = para.chars().filter(|c| c.is_uppercase()).count();
            upper as f32 / char_count as f32 <= thresholds.max_upper_ratio
        })
        .collect();

    meaningful.join("\n\n")
}
