//! Keyword extraction: picking card-worthy terms out of a sentence.
//!
//! "Capitalised, longer than four characters, not a stopword" is an
//! explicit heuristic proxy for "proper noun or emphasised term" — cheap,
//! deterministic, and bilingual. A sentence yielding zero keywords signals
//! to the synthesizer that it is not eligible for keyword-dependent card
//! types (definition, fill-in-the-blank).

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Bilingual (Russian/English) stopword bank shared by keyword and
/// key-phrase extraction.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "это", "быть", "в", "на", "с", "по", "для", "от", "к", "и", "а", "но", "или", "что",
        "как", "так", "вот", "же", "то", "the", "is", "in", "on", "at", "for", "and", "or",
        "but", "a", "which", "are", "was", "were", "been", "be", "have", "has",
    ])
});

/// Punctuation stripped from the edges of kept tokens.
const EDGE_PUNCT: &[char] = &['.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}'];

/// Maximum keywords reported per sentence.
const MAX_KEYWORDS: usize = 5;

/// Extract up to five candidate key terms from a sentence.
///
/// A whitespace token is kept when it is longer than 4 chars, its
/// lowercased form is not a stopword, and it contains at least one
/// uppercase character. Kept tokens are stripped of leading/trailing
/// punctuation; first-occurrence order is preserved.
pub fn extract_keywords(sentence: &str) -> Vec<String> {
    sentence
        .split_whitespace()
        .filter(|w| {
            w.chars().count() > 4
                && !STOPWORDS.contains(w.to_lowercase().as_str())
                && w.chars().any(char::is_uppercase)
        })
        .map(|w| w.trim_matches(EDGE_PUNCT).to_string())
        .take(MAX_KEYWORDS)
        .collect()
}

static RE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[а-яёА-ЯЁa-zA-Z]{4,}\b").unwrap());

/// Most frequent non-stopword words of a text, most common first.
///
/// Unlike [`extract_keywords`] this is frequency-based and
/// case-insensitive; ties break by first occurrence so the result is
/// deterministic.
pub fn key_phrases(text: &str, top_n: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();

    for (position, m) in RE_WORD.find_iter(&lowered).enumerate() {
        let word = m.as_str();
        if STOPWORDS.contains(word) {
            continue;
        }
        let entry = counts.entry(word).or_insert((0, position));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked
        .into_iter()
        .take(top_n)
        .map(|(word, _)| word.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_capitalised_long_tokens_in_order() {
        let keywords = extract_keywords("Планета Юпитер тяжелее планеты Сатурн");
        assert_eq!(keywords, vec!["Планета", "Юпитер", "Сатурн"]);
    }

    #[test]
    fn drops_short_and_lowercase_tokens() {
        assert!(extract_keywords("слово из пяти букв без заглавных").is_empty());
        assert!(extract_keywords("Мир War Acid").is_empty());
    }

    #[test]
    fn drops_stopwords_even_capitalised() {
        // "Which" is a stopword despite passing length and case checks
        let keywords = extract_keywords("Which Whereabouts");
        assert_eq!(keywords, vec!["Whereabouts"]);
    }

    #[test]
    fn strips_edge_punctuation() {
        let keywords = extract_keywords("Открытие (Резерфорда) изменило физику: Модель!");
        assert_eq!(keywords, vec!["Открытие", "Резерфорда", "Модель"]);
    }

    #[test]
    fn caps_at_five() {
        let sentence = "Alpha1 Bravo2 Charlie3 Delta4 Echo5 Foxtrot6 Golf7";
        assert_eq!(extract_keywords(sentence).len(), 5);
    }

    #[test]
    fn empty_for_keywordless_sentence() {
        assert!(extract_keywords("short words only here").is_empty());
    }

    #[test]
    fn key_phrases_ranked_by_frequency() {
        let text = "Гравитация притягивает тела. Гравитация слабее магнетизма. Магнетизма!";
        let phrases = key_phrases(text, 2);
        assert_eq!(phrases, vec!["гравитация", "магнетизма"]);
    }

    #[test]
    fn key_phrases_skips_stopwords_and_short_words() {
        let phrases = key_phrases("the the the словарь but и словарь", 5);
        assert_eq!(phrases, vec!["словарь"]);
    }
}
