//! Prompts for the generative card backend.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing the requested card mix or the
//!    output format contract requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the built prompt directly
//!    without calling a real backend, making prompt regressions easy to
//!    catch.
//!
//! The strict `Q:`/`A:` line format is load-bearing: the response parser
//! in [`crate::backend`] recognises nothing else, and a model that chats
//! around the format produces zero cards and triggers the rule-based
//! fallback.

use crate::config::Difficulty;
use crate::pipeline::segment::truncate_chars;

/// Build the standard card-generation prompt.
///
/// At most `char_cap` characters of `text` are embedded — document
/// openings carry the densest concept coverage and backends charge by the
/// token.
pub fn card_prompt(text: &str, num_cards: usize, char_cap: usize) -> String {
    let excerpt = truncate_chars(text, char_cap);
    format!(
        r#"Ты эксперт по созданию образовательных флэшкарт.

На основе следующего текста создай {num_cards} флэшкарт для эффективного обучения.
ТЕКСТ:
{excerpt}

ТРЕБОВАНИЯ:
1. Каждая карточка должна иметь четкий ВОПРОС и полный ОТВЕТ
2. Вопросы должны проверять понимание ключевых концепций
3. Используй разные типы вопросов:
   - Определения ("Что такое X?")
   - Объяснения ("Как работает X?")
   - Примеры ("Приведи пример X")
   - Причины ("Почему X происходит?")
4. Ответы должны быть краткими (2-4 предложения) но исчерпывающими
5. Фокусируйся на самой важной информации

ФОРМАТ ОТВЕТА (строго соблюдай):
Q: [вопрос 1]
A: [ответ 1]

Q: [вопрос 2]
A: [ответ 2]

И так далее для всех {num_cards} карточек.
Не добавляй никаких дополнительных комментариев или текста - только вопросы и ответы в указанном формате."#
    )
}

/// Build the difficulty-tiered card-generation prompt.
pub fn difficulty_prompt(
    text: &str,
    num_cards: usize,
    difficulty: Difficulty,
    char_cap: usize,
) -> String {
    let excerpt = truncate_chars(text, char_cap);
    let tier = difficulty.as_str();
    format!(
        r#"Создай {num_cards} флэшкарт уровня сложности "{tier}" из текста:

{excerpt}

Уровни сложности:
- easy: простые вопросы на запоминание фактов
- medium: вопросы на понимание концепций
- hard: вопросы требующие анализа и применения знаний

Формат (строго соблюдай):
Q: [вопрос]
A: [ответ]
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_count_and_text() {
        let prompt = card_prompt("Вода кипит при ста градусах.", 7, 4000);
        assert!(prompt.contains("создай 7 флэшкарт"));
        assert!(prompt.contains("Вода кипит"));
        assert!(prompt.contains("Q: [вопрос 1]"));
    }

    #[test]
    fn prompt_truncates_long_text_on_char_boundary() {
        let text = "ж".repeat(2000) + &"я".repeat(3000);
        let prompt = card_prompt(&text, 10, 4000);
        assert!(prompt.contains(&("ж".repeat(2000) + &"я".repeat(2000))));
        assert!(!prompt.contains(&"я".repeat(2001)));
    }

    #[test]
    fn difficulty_prompt_names_the_tier() {
        let prompt = difficulty_prompt("Текст о планетах и их спутниках.", 3, Difficulty::Hard, 4000);
        assert!(prompt.contains("\"hard\""));
        assert!(prompt.contains("3 флэшкарт"));
    }

}
