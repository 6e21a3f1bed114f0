//! Rows for the List action.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::card::Flashcard;
use crate::config::Settings;

pub const HEADER: [&str; 7] = [
    "ID",
    "Category",
    "Question",
    "Answer(s)",
    "Type",
    "Reviewed",
    "Correct %",
];

/// Cuts `s` to `max` display columns, ending in `...` when anything was cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let budget = max.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

fn answer_cell(card: &Flashcard) -> String {
    match card.correct_answers.as_slice() {
        [] => card.answer.clone(),
        [one] => one.clone(),
        [first, rest @ ..] => format!("{} (+{} more)", first, rest.len()),
    }
}

/// Table rows sorted by id.
pub fn card_rows(cards: &[Flashcard], settings: &Settings) -> Vec<Vec<String>> {
    let mut sorted: Vec<&Flashcard> = cards.iter().collect();
    sorted.sort_by_key(|c| c.id);
    sorted
        .into_iter()
        .map(|c| {
            let kind = if c.is_multiple_choice() {
                "Multiple Choice"
            } else {
                "Text"
            };
            let percent = c
                .correct_percent()
                .map(|p| format!("{p:.0}%"))
                .unwrap_or_else(|| "N/A".into());
            vec![
                c.id.to_string(),
                truncate(&c.category, settings.category_width),
                truncate(&c.question, settings.question_width),
                truncate(&answer_cell(c), settings.answer_width),
                kind.to_string(),
                c.times_reviewed.to_string(),
                percent,
            ]
        })
        .collect()
}
