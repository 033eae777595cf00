//! Text normalisation: deterministic cleanup of raw extracted text.
//!
//! ## Why is normalisation necessary?
//!
//! Text recovered from PDFs (and pasted user text) arrives with artefacts
//! that poison sentence segmentation and card synthesis downstream:
//! control characters from broken encodings, runs of spaces from layout
//! reconstruction, URLs and e-mail addresses that make useless card
//! material, per-page "Page N" markers, and typographic guillemets that
//! defeat naive quote handling.
//!
//! This module applies cheap, deterministic regex/string rules in a fixed
//! order — later rules assume earlier cleanup (punctuation spacing is only
//! correct once runs of spaces are collapsed). Each rule is a pure
//! `&str → String` function and independently testable.
//!
//! ## Rule Order
//!
//! 1. Strip control characters; replace tabs with single spaces
//! 2. Collapse space runs, collapse blank-line runs, trim each line
//! 3. Remove URL-like, e-mail-like, and page-marker substrings
//! 4. Re-collapse whitespace (removals can leave double spaces behind —
//!    without this pass `clean_text` would not be a fixed point)
//! 5. Fix punctuation spacing and normalise guillemets to straight quotes
//!
//! `clean_text(clean_text(x)) == clean_text(x)` holds for any input.

use crate::error::Pdf2CardsError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Validate and normalise user-supplied text.
///
/// Fails with [`Pdf2CardsError::EmptyInput`] when the input is empty or
/// all-whitespace — before any other processing.
pub fn process_text(text: &str) -> Result<String, Pdf2CardsError> {
    if text.trim().is_empty() {
        return Err(Pdf2CardsError::EmptyInput);
    }
    Ok(clean_text(text))
}

/// Apply the full normalisation pipeline.
///
/// Unlike [`process_text`] this never fails: the PDF extractor calls it on
/// whatever the backends recovered, and an empty result is handled by the
/// extractor's own fallback thresholds.
pub fn clean_text(text: &str) -> String {
    let s = strip_control_chars(text);
    let s = normalize_whitespace(&s);
    let s = remove_urls(&s);
    let s = remove_emails(&s);
    let s = remove_page_markers(&s);
    let s = normalize_whitespace(&s);
    let s = fix_punctuation_spacing(&s);
    normalize_quotes(&s)
}

// ── Rule 1: Strip control characters ─────────────────────────────────────

static RE_CONTROL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F-\x9F]").unwrap());

fn strip_control_chars(input: &str) -> String {
    let stripped = RE_CONTROL.replace_all(input, "");
    stripped.replace('\t', " ")
}

// ── Rule 2: Whitespace normalisation ─────────────────────────────────────

static RE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());
static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Collapse space runs to one space, blank-line runs to exactly one blank
/// line, trim every line, and trim the whole text.
fn normalize_whitespace(input: &str) -> String {
    let s = RE_SPACES.replace_all(input, " ");
    let s = RE_BLANK_LINES.replace_all(&s, "\n\n");
    let lines: Vec<&str> = s.lines().map(str::trim).collect();
    lines.join("\n").trim().to_string()
}

// ── Rule 3: Remove URLs, e-mails, page markers ───────────────────────────

static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[A-Za-z0-9$\-_@.&+!*(),/%#?=:~]+").unwrap());

fn remove_urls(input: &str) -> String {
    RE_URL.replace_all(input, "").to_string()
}

static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

fn remove_emails(input: &str) -> String {
    RE_EMAIL.replace_all(input, "").to_string()
}

static RE_PAGE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:Страница|Page)\s+\d+").unwrap());

fn remove_page_markers(input: &str) -> String {
    RE_PAGE_MARKER.replace_all(input, "").to_string()
}

// ── Rule 5: Punctuation spacing and quote style ──────────────────────────

static RE_SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.,!?;:])").unwrap());
static RE_PUNCT_NO_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.,!?;:])([А-Яа-яA-Za-z])").unwrap());

fn fix_punctuation_spacing(input: &str) -> String {
    let s = RE_SPACE_BEFORE_PUNCT.replace_all(input, "$1");
    RE_PUNCT_NO_SPACE.replace_all(&s, "$1 $2").to_string()
}

fn normalize_quotes(input: &str) -> String {
    input.replace(['«', '»'], "\"")
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(process_text(""), Err(Pdf2CardsError::EmptyInput)));
        assert!(matches!(
            process_text("   \n\t  "),
            Err(Pdf2CardsError::EmptyInput)
        ));
    }

    #[test]
    fn strips_control_chars_keeps_newlines() {
        let input = "ab\u{0007}cd\u{009C}ef\nok";
        assert_eq!(strip_control_chars(input), "abcdef\nok");
    }

    #[test]
    fn tabs_become_spaces() {
        assert_eq!(strip_control_chars("a\tb"), "a b");
    }

    #[test]
    fn collapses_space_runs() {
        assert_eq!(normalize_whitespace("a     b"), "a b");
    }

    #[test]
    fn collapses_blank_line_runs() {
        assert_eq!(normalize_whitespace("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize_whitespace("a\n   \n  \nb"), "a\n\nb");
    }

    #[test]
    fn trims_each_line() {
        assert_eq!(normalize_whitespace("  a  \n  b  "), "a\nb");
    }

    #[test]
    fn removes_urls() {
        let cleaned = clean_text("see https://example.com/path?q=1 here");
        assert_eq!(cleaned, "see here");
    }

    #[test]
    fn removes_emails() {
        let cleaned = clean_text("write to someone@example.org for info");
        assert_eq!(cleaned, "write to for info");
    }

    #[test]
    fn removes_page_markers_both_languages() {
        assert_eq!(clean_text("before Page 42 after"), "before after");
        assert_eq!(clean_text("до Страница 7 после"), "до после");
        assert_eq!(clean_text("до СТРАНИЦА 7 после"), "до после");
    }

    #[test]
    fn fixes_space_before_punctuation() {
        assert_eq!(clean_text("word , next ."), "word, next.");
    }

    #[test]
    fn inserts_space_after_punctuation() {
        assert_eq!(clean_text("первый.Второй"), "первый. Второй");
        assert_eq!(clean_text("first,second"), "first, second");
    }

    #[test]
    fn normalizes_guillemets() {
        assert_eq!(clean_text("он сказал «привет» тихо"), "он сказал \"привет\" тихо");
    }

    #[test]
    fn clean_text_is_idempotent() {
        let inputs = [
            "Normal sentence with  spacing .And more",
            "a\nPage 4\nPage 5\nb",
            "see https://a.b c\t\td@e.fg  «x»",
            "  \n\nпервый.Второй , третий\n\n\n",
        ];
        for input in inputs {
            let once = clean_text(input);
            assert_eq!(clean_text(&once), once, "not a fixed point for {input:?}");
        }
    }
}
