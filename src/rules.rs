//! Rule-based card synthesis: deterministic generation without a model.
//!
//! This is both the no-backend path and the fallback for every backend
//! failure, so it must produce usable cards from sentence segmentation and
//! keyword heuristics alone.
//!
//! ## Algorithm
//!
//! 1. Split the text into sentences; keep those between 30 and 400 chars
//!    that are not bare URLs.
//! 2. Walk up to `2 × num_cards` candidates, rotating through the
//!    configured card types by position parity. A sentence that fails its
//!    type's keyword or length requirement yields no card and is not
//!    retried with another type.
//! 3. Backfill with generic "explain this statement" cards until
//!    `min(num_cards, valid_sentences)` cards exist — sparse keyword
//!    coverage must not starve the output.
//!
//! Output is a pure function of (sentence list, num_cards, rotation); no
//! randomness anywhere.

use crate::config::CardType;
use crate::output::Flashcard;
use crate::pipeline::keywords::extract_keywords;
use crate::pipeline::segment::{split_sentences, truncate_chars};

/// Sentences at or below this length cannot support a card of any type.
const MIN_SENTENCE_CHARS: usize = 30;
/// Sentences at or above this length are run-on extraction artefacts.
const MAX_SENTENCE_CHARS: usize = 400;
/// Backfill answers are clipped to this many chars.
const BACKFILL_ANSWER_CHARS: usize = 200;

/// Question used by backfill cards.
const GENERIC_QUESTION: &str = "О чем говорится в следующем утверждении?";

/// Generate up to `num_cards` cards from `text` using only deterministic
/// heuristics.
///
/// Returns exactly `min(num_cards, valid_sentences)` cards; the result is
/// empty only when the text degenerates to zero valid sentences.
pub fn generate_simple(text: &str, num_cards: usize, rotation: &[CardType]) -> Vec<Flashcard> {
    let valid: Vec<&str> = split_sentences(text)
        .into_iter()
        .filter(|s| {
            let chars = s.chars().count();
            chars > MIN_SENTENCE_CHARS && chars < MAX_SENTENCE_CHARS && !s.starts_with("http")
        })
        .collect();

    let mut cards = Vec::new();
    if !rotation.is_empty() {
        for (i, sentence) in valid.iter().take(num_cards.saturating_mul(2)).enumerate() {
            if cards.len() >= num_cards {
                break;
            }
            let card_type = rotation[i % rotation.len()];
            if let Some(card) = create_card(sentence, card_type) {
                cards.push(card);
            }
        }
    }

    // Sparse keyword coverage must not starve the output: pad with generic
    // cards until as many cards exist as sentences allow.
    while cards.len() < num_cards.min(valid.len()) {
        let answer = truncate_chars(valid[cards.len()], BACKFILL_ANSWER_CHARS);
        cards.push(Flashcard {
            question: GENERIC_QUESTION.to_string(),
            answer: answer.to_string(),
        });
    }

    cards.truncate(num_cards);
    cards
}

/// Build one card of the given type from a sentence.
///
/// Returns `None` when the sentence fails the type's requirement — too
/// short, no keywords, too few words — or when the built pair would break
/// the card-length invariant (a fill-blank answer is the keyword itself,
/// which can be too short to stand as an answer).
pub fn create_card(sentence: &str, card_type: CardType) -> Option<Flashcard> {
    if sentence.chars().count() < MIN_SENTENCE_CHARS {
        return None;
    }

    match card_type {
        CardType::Definition => {
            let keywords = extract_keywords(sentence);
            let first = keywords.first()?;
            Flashcard::checked(format!("Что означает '{first}'?"), sentence)
        }
        CardType::FillBlank => {
            let keywords = extract_keywords(sentence);
            let first = keywords.first()?;
            let blanked = sentence.replacen(first.as_str(), "______", 1);
            Flashcard::checked(format!("Заполни пропуск: {blanked}"), first.clone())
        }
        CardType::Explanation => {
            let words: Vec<&str> = sentence.split_whitespace().collect();
            if words.len() <= 10 {
                return None;
            }
            let opening = words[..6].join(" ");
            Flashcard::checked(format!("Продолжи и объясни: '{opening}...'"), sentence)
        }
        CardType::Summary => {
            if sentence.chars().count() > 100 {
                let preview = truncate_chars(sentence, 70);
                Flashcard::checked(format!("Перескажи своими словами: '{preview}...'"), sentence)
            } else {
                let preview = truncate_chars(sentence, 50);
                Flashcard::checked(format!("Объясни: {preview}..."), sentence)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATION: &[CardType] = &[CardType::Definition, CardType::FillBlank];

    /// Three Russian sentences; the first is under the 30-char floor.
    const SAMPLE: &str = "Это пример простого текста. Он содержит несколько предложений \
                          для тестирования. Каждое предложение достаточно длинное.";

    #[test]
    fn short_sentences_yield_no_card_of_any_type() {
        let short = "Короткое предложение";
        for card_type in [
            CardType::Definition,
            CardType::FillBlank,
            CardType::Explanation,
            CardType::Summary,
        ] {
            assert!(create_card(short, card_type).is_none(), "{card_type:?}");
        }
    }

    #[test]
    fn definition_needs_a_keyword() {
        let no_keywords = "предложение без единой заглавной буквы внутри текста";
        assert!(create_card(no_keywords, CardType::Definition).is_none());

        let with_keyword = "Гравитация притягивает все тела, обладающие массой";
        let card = create_card(with_keyword, CardType::Definition).unwrap();
        assert_eq!(card.question, "Что означает 'Гравитация'?");
        assert_eq!(card.answer, with_keyword);
    }

    #[test]
    fn fill_blank_replaces_first_keyword_occurrence() {
        let sentence = "Электромагнетизм связывает заряды, Электромагнетизм повсюду";
        let card = create_card(sentence, CardType::FillBlank).unwrap();
        assert!(card.question.starts_with("Заполни пропуск: ______"));
        assert!(card.question.contains("Электромагнетизм повсюду"));
        assert_eq!(card.answer, "Электромагнетизм");
    }

    #[test]
    fn fill_blank_with_short_keyword_is_dropped() {
        // Keyword "Модель" is 6 chars — too short to stand as an answer
        let sentence = "Модель описывает наблюдаемое поведение систем точно";
        assert!(create_card(sentence, CardType::FillBlank).is_none());
    }

    #[test]
    fn explanation_requires_more_than_ten_words() {
        // Exactly ten words: not eligible
        let ten_words = "Это ровно десять слов в одном предложении для простой проверки";
        assert!(create_card(ten_words, CardType::Explanation).is_none());

        let eleven = "Это ровно одиннадцать слов в одном предложении для простой проверки теперь";
        let card = create_card(eleven, CardType::Explanation).unwrap();
        assert!(card.question.starts_with("Продолжи и объясни: 'Это ровно одиннадцать слов в одном..."));
    }

    #[test]
    fn summary_preview_depends_on_length() {
        let medium = "Средней длины предложение для проверки превью внутри";
        let card = create_card(medium, CardType::Summary).unwrap();
        assert!(card.question.starts_with("Объясни: "));

        let long = "Очень длинное предложение, которое определенно превышает сто символов, \
                    потому что содержит много дополнительных слов и уточнений";
        let card = create_card(long, CardType::Summary).unwrap();
        assert!(card.question.starts_with("Перескажи своими словами: '"));
        assert!(card.question.ends_with("...'"));
    }

    #[test]
    fn sample_text_yields_exactly_two_cards() {
        let cards = generate_simple(SAMPLE, 2, ROTATION);
        assert_eq!(cards.len(), 2);
        let sentences = [
            "Это пример простого текста",
            "Он содержит несколько предложений для тестирования",
            "Каждое предложение достаточно длинное",
        ];
        for card in &cards {
            assert!(card.question.chars().count() > 5);
            assert!(card.answer.chars().count() > 10);
            assert!(
                sentences.contains(&card.answer.as_str()),
                "answer not verbatim: {}",
                card.answer
            );
        }
    }

    #[test]
    fn never_returns_more_than_requested() {
        let text = "Гравитация притягивает все тела, обладающие массой. \
                    Электричество движет заряженные частицы по проводникам. \
                    Магнетизм отклоняет движущиеся заряды в поле. \
                    Термодинамика описывает превращения тепловой энергии.";
        assert_eq!(generate_simple(text, 2, ROTATION).len(), 2);
        assert!(generate_simple(text, 100, ROTATION).len() <= 4);
    }

    #[test]
    fn returns_min_of_requested_and_valid_sentences() {
        let cards = generate_simple(SAMPLE, 10, ROTATION);
        // Two sentences pass the 30-char floor
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn url_sentences_are_excluded() {
        let text = "https://example-host/very-long-path-without-terminators-that-keeps-going";
        assert!(generate_simple(text, 5, ROTATION).is_empty());
    }

    #[test]
    fn output_is_deterministic() {
        let a = generate_simple(SAMPLE, 5, ROTATION);
        let b = generate_simple(SAMPLE, 5, ROTATION);
        assert_eq!(a, b);
    }

    #[test]
    fn extended_rotation_reaches_all_types() {
        let rotation = [
            CardType::Definition,
            CardType::FillBlank,
            CardType::Explanation,
            CardType::Summary,
        ];
        let text = "Квантовая Механика описывает поведение частиц на малых масштабах весьма точно. \
                    Общая Теория относительности связывает гравитацию с кривизной пространства и времени. \
                    Статистическая Физика выводит законы макромира из хаоса микромира. \
                    Классическая Электродинамика объединяет электричество и магнетизм в одно целое.";
        let cards = generate_simple(text, 4, &rotation);
        assert_eq!(cards.len(), 4);
        assert!(cards.iter().any(|c| c.question.starts_with("Объясни")
            || c.question.starts_with("Перескажи")));
    }
}
