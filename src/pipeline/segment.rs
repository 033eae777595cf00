//! Sentence and paragraph segmentation.
//!
//! The atomic unit of rule-based card generation is the sentence: a run of
//! text delimited by `.`, `!`, or `?` (one or more), trimmed. Paragraphs are
//! maximal runs between double line breaks. Both splitters are pure and
//! borrow from the input.
//!
//! Punctuation-boundary splitting is deliberately naive — abbreviations and
//! decimal points produce occasional over-splits, which the downstream
//! 30-char sentence floor absorbs.

use crate::output::TextStats;

/// Split text into trimmed, non-empty sentences on `.`/`!`/`?` runs.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split text into trimmed, non-empty paragraphs on double line breaks.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Surface statistics of a text.
pub fn analyze(text: &str) -> TextStats {
    let words: Vec<&str> = text.split_whitespace().collect();
    let sentences = split_sentences(text);
    let word_count = words.len();
    let sentence_count = sentences.len();

    let avg_word_len = if word_count > 0 {
        words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count as f64
    } else {
        0.0
    };
    let avg_sentence_len = if sentence_count > 0 {
        word_count as f64 / sentence_count as f64
    } else {
        0.0
    };

    TextStats {
        char_count: text.chars().count(),
        word_count,
        sentence_count,
        paragraph_count: text.split("\n\n").count(),
        avg_word_len,
        avg_sentence_len,
    }
}

/// Truncate to at most `cap` chars, always on a char boundary.
pub(crate) fn truncate_chars(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Greedy extractive summary: leading sentences until `max_chars` is reached.
pub fn summarize(text: &str, max_chars: usize) -> String {
    let mut summary = String::new();
    let mut used = 0usize;

    for sentence in split_sentences(text) {
        let len = sentence.chars().count();
        if used + len > max_chars {
            break;
        }
        summary.push_str(sentence);
        summary.push_str(". ");
        used += len;
    }

    summary.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentences_split_on_terminator_runs() {
        let sentences = split_sentences("First one. Second one!? Third one...");
        assert_eq!(sentences, vec!["First one", "Second one", "Third one"]);
    }

    #[test]
    fn sentences_empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("...").is_empty());
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let paragraphs = split_paragraphs("First block.\n\nSecond block.\n\n\n");
        assert_eq!(paragraphs, vec!["First block.", "Second block."]);
    }

    #[test]
    fn analyze_counts_russian_text() {
        let stats = analyze("Это пример. Он короткий.");
        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.word_count, 4);
        assert_eq!(stats.paragraph_count, 1);
        assert!(stats.avg_sentence_len > 1.9 && stats.avg_sentence_len < 2.1);
    }

    #[test]
    fn summarize_stops_at_cap() {
        let text = "Alpha beta gamma. Delta epsilon zeta. Eta theta iota.";
        let summary = summarize(text, 40);
        assert!(summary.starts_with("Alpha beta gamma."));
        assert!(summary.chars().count() <= 44);
        assert!(!summary.contains("Eta"));
    }

    #[test]
    fn summarize_empty_for_oversized_first_sentence() {
        assert_eq!(summarize("One very long sentence here.", 5), "");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("привет", 3), "при");
    }
}
