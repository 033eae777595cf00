//! PDF text extraction with content-start detection and dual backends.
//!
//! PDFs vary widely in embedded front matter (covers, TOCs, copyright
//! pages) and in how reliably different extraction libraries recover text
//! layout. Neither issue is solvable with a single deterministic strategy,
//! so extraction layers heuristics with explicit fallback thresholds:
//!
//! 1. **Content-start detection** — scan the leading pages for a localized
//!    section marker ("introduction", "глава 1", …) and start extraction
//!    there; with no marker, skip an assumed front-matter block.
//! 2. **Dual backends** — [`lopdf`] is primary (page count, metadata,
//!    range-limited extraction); when it recovers almost nothing,
//!    [`pdf_extract`] gets a try. Two independent parsers tolerate
//!    documents that defeat one but not the other.
//! 3. **Noise filtering** — normalise, then keep only meaningful
//!    paragraphs; if filtering over-prunes, return the unfiltered text.
//!
//! `pdf_extract` can panic on malformed input rather than returning an
//! error, so its calls are wrapped in [`std::panic::catch_unwind`].

use crate::config::{ExtractionThresholds, GenerationConfig};
use crate::error::Pdf2CardsError;
use crate::output::DocumentMetadata;
use crate::pipeline::{noise, normalize};
use lopdf::Document;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

/// Localized section markers that signal the start of real content.
const CONTENT_MARKERS: &[&str] = &[
    "введение",
    "introduction",
    "chapter 1",
    "глава 1",
    "part 1",
    "часть 1",
    "раздел 1",
];

/// Extract cleaned, noise-filtered text from PDF bytes.
///
/// # Errors
/// [`Pdf2CardsError::PdfParse`] when the document cannot be opened and the
/// secondary backend recovers nothing either;
/// [`Pdf2CardsError::NoExtractableText`] when both backends run but yield
/// no text (scanned or image-only documents).
pub fn parse_pdf(bytes: &[u8], config: &GenerationConfig) -> Result<String, Pdf2CardsError> {
    let (doc, load_err) = match Document::load_mem(bytes) {
        Ok(doc) => (Some(doc), None),
        Err(e) => {
            warn!("primary backend failed to open document: {e}");
            (None, Some(e.to_string()))
        }
    };

    let (start, total) = doc
        .as_ref()
        .map(|d| detect_content_start(d, &config.extraction))
        .unwrap_or((0, 0));
    debug!("extracting pages {start}..{total}");

    let raw = match &doc {
        Some(d) if start > 0 => extract_page_range(d, start, total),
        _ => {
            let primary = doc.as_ref().map(extract_all_pages).unwrap_or_default();
            if non_whitespace_chars(&primary) < config.extraction.min_primary_chars {
                debug!(
                    "primary backend recovered {} chars, trying secondary",
                    non_whitespace_chars(&primary)
                );
                let secondary = extract_secondary(bytes);
                if non_whitespace_chars(&secondary) > non_whitespace_chars(&primary) {
                    secondary
                } else {
                    primary
                }
            } else {
                primary
            }
        }
    };

    if raw.trim().is_empty() {
        return Err(match load_err {
            Some(detail) => Pdf2CardsError::PdfParse { detail },
            None => Pdf2CardsError::NoExtractableText,
        });
    }

    let cleaned = normalize::clean_text(&raw);
    let meaningful = noise::filter_meaningful(&cleaned, &config.filter);
    info!(
        "extracted {} meaningful chars from {} cleaned",
        meaningful.chars().count(),
        cleaned.chars().count()
    );

    if meaningful.chars().count() < config.filter.min_filtered_chars {
        debug!("filtered text below floor, returning unfiltered text");
        return Ok(cleaned);
    }
    Ok(meaningful)
}

/// Read page count and info-dictionary metadata without extracting content.
pub fn inspect(bytes: &[u8]) -> Result<DocumentMetadata, Pdf2CardsError> {
    let doc = Document::load_mem(bytes).map_err(|e| Pdf2CardsError::PdfParse {
        detail: e.to_string(),
    })?;

    let mut metadata = DocumentMetadata::unknown(doc.get_pages().len());

    if let Some(info) = doc
        .trailer
        .get(b"Info")
        .ok()
        .and_then(|obj| obj.as_reference().ok())
        .and_then(|id| doc.get_dictionary(id).ok())
    {
        if let Some(title) = info_text(info, b"Title") {
            metadata.title = title;
        }
        if let Some(author) = info_text(info, b"Author") {
            metadata.author = author;
        }
        if let Some(subject) = info_text(info, b"Subject") {
            metadata.subject = subject;
        }
    }

    Ok(metadata)
}

fn info_text(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key)
        .ok()
        .and_then(|obj| obj.as_str().ok())
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .filter(|s| !s.trim().is_empty())
}

/// Find the zero-based page index where real content likely starts.
///
/// Scans up to `marker_scan_pages` leading pages for a section marker.
/// With no marker found, assumes up to `front_matter_skip` pages of covers
/// and TOC. Returns `(start_index, total_pages)`.
fn detect_content_start(doc: &Document, thresholds: &ExtractionThresholds) -> (usize, usize) {
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    let total = pages.len();

    for (index, page_num) in pages
        .iter()
        .take(thresholds.marker_scan_pages.min(total))
        .enumerate()
    {
        let text = doc
            .extract_text(&[*page_num])
            .unwrap_or_default()
            .to_lowercase();
        if CONTENT_MARKERS.iter().any(|marker| text.contains(marker)) {
            debug!("content marker found on page {index}");
            return (index, total);
        }
    }

    (thresholds.front_matter_skip.min(total), total)
}

/// Primary-backend extraction of pages `[start, end)` (zero-based indices).
fn extract_page_range(doc: &Document, start: usize, end: usize) -> String {
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    let parts: Vec<String> = pages
        .iter()
        .take(end.min(pages.len()))
        .skip(start)
        .map(|page_num| page_text(doc, *page_num))
        .collect();
    parts.join("\n")
}

/// Primary-backend extraction of the whole document.
fn extract_all_pages(doc: &Document) -> String {
    let parts: Vec<String> = doc
        .get_pages()
        .keys()
        .map(|page_num| page_text(doc, *page_num))
        .collect();
    parts.join("\n")
}

/// Extract one page, isolating per-page failures as empty text.
fn page_text(doc: &Document, page_num: u32) -> String {
    doc.extract_text(&[page_num]).unwrap_or_else(|e| {
        debug!("page {page_num}: extraction failed: {e}");
        String::new()
    })
}

/// Secondary-backend extraction of the whole document.
///
/// Returns an empty string on any failure — the caller compares the yield
/// of both backends and keeps the better one.
fn extract_secondary(bytes: &[u8]) -> String {
    let owned = bytes.to_vec(); // owned copy for the unwind boundary
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(&owned)
    }));
    match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("secondary backend failed: {e}");
            String::new()
        }
        Err(_) => {
            warn!("secondary backend panicked (malformed document)");
            String::new()
        }
    }
}

fn non_whitespace_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_with_parse_error() {
        let config = GenerationConfig::default();
        let err = parse_pdf(b"not a pdf at all", &config).unwrap_err();
        assert!(matches!(err, Pdf2CardsError::PdfParse { .. }));
    }

    #[test]
    fn inspect_rejects_garbage() {
        assert!(matches!(
            inspect(b"%PDF-garbage"),
            Err(Pdf2CardsError::PdfParse { .. })
        ));
    }

    #[test]
    fn non_whitespace_count_ignores_blanks() {
        assert_eq!(non_whitespace_chars(" a\n b\t"), 2);
        assert_eq!(non_whitespace_chars("   "), 0);
    }
}
