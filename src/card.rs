//! A single flashcard: question, answers, options and review counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Flashcard {
    pub id: u64,
    pub question: String,
    #[serde(default)]
    pub answer: String,
    // older files may carry `null` here
    #[serde(default, deserialize_with = "null_as_empty")]
    pub correct_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub times_reviewed: u32,
    #[serde(default)]
    pub times_correct: u32,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.into()
}

fn null_as_empty<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(de)?.unwrap_or_default())
}

impl Flashcard {
    pub fn is_multiple_choice(&self) -> bool {
        !self.options.is_empty()
    }

    /// Case-insensitive membership of `given` in the accepted answers.
    pub fn accepts(&self, given: &str) -> bool {
        let given = given.to_lowercase();
        self.correct_answers
            .iter()
            .any(|a| a.to_lowercase() == given)
    }

    /// Accepted answers for display, falling back to the main answer.
    pub fn shown_answers(&self) -> Vec<&str> {
        if self.correct_answers.is_empty() {
            vec![self.answer.as_str()]
        } else {
            self.correct_answers.iter().map(String::as_str).collect()
        }
    }

    /// Records one review/quiz exposure.
    pub fn record(&mut self, correct: bool, at: DateTime<Utc>) {
        self.times_reviewed = self.times_reviewed.saturating_add(1);
        if correct {
            self.times_correct = self.times_correct.saturating_add(1);
        }
        self.last_reviewed = Some(at);
    }

    /// `None` before the first review.
    pub fn correct_percent(&self) -> Option<f64> {
        if self.times_reviewed == 0 {
            return None;
        }
        Some(self.times_correct as f64 / self.times_reviewed as f64 * 100.0)
    }
}

/// User input for a new card, before the store normalises it.
#[derive(Debug, Clone, Default)]
pub struct NewCard {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<String>,
}

impl NewCard {
    pub fn text(question: &str, answer: &str, category: &str) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    pub fn choice(
        question: &str,
        category: &str,
        options: &[&str],
        correct_answers: &[&str],
    ) -> Self {
        Self {
            question: question.into(),
            answer: String::new(),
            category: category.into(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_answers: correct_answers.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(options: &[&str], correct: &[&str]) -> Flashcard {
        Flashcard {
            id: 1,
            question: "Capital of France?".into(),
            answer: "Paris".into(),
            correct_answers: correct.iter().map(|s| s.to_string()).collect(),
            options: options.iter().map(|s| s.to_string()).collect(),
            category: DEFAULT_CATEGORY.into(),
            created_at: Utc::now(),
            last_reviewed: None,
            times_reviewed: 0,
            times_correct: 0,
        }
    }

    #[test]
    fn accepts_ignores_case() {
        let c = card(&["Paris", "London", "Berlin"], &["Paris"]);
        assert!(c.accepts("paris"));
        assert!(c.accepts("PARIS"));
        assert!(!c.accepts("London"));
        assert!(!c.accepts(""));
    }

    #[test]
    fn record_updates_counters() {
        let mut c = card(&[], &["Paris"]);
        let now = Utc::now();
        c.record(true, now);
        c.record(false, now);
        assert_eq!(c.times_reviewed, 2);
        assert_eq!(c.times_correct, 1);
        assert_eq!(c.last_reviewed, Some(now));
        assert_eq!(c.correct_percent(), Some(50.0));
    }

    #[test]
    fn empty_options_are_omitted_from_json() {
        let c = card(&[], &["Paris"]);
        let v = serde_json::to_value(&c).unwrap();
        assert!(v.get("options").is_none());
        assert!(v.get("last_reviewed").is_none());
        assert_eq!(v["correct_answers"][0], "Paris");
    }

    #[test]
    fn decodes_null_answers_and_offsets() {
        let s = r#"{
            "id": 7,
            "question": "2+2?",
            "answer": "4",
            "correct_answers": null,
            "category": "Math",
            "created_at": "2024-03-01T10:00:00.123456+02:00",
            "times_reviewed": 0,
            "times_correct": 0
        }"#;
        let c: Flashcard = serde_json::from_str(s).unwrap();
        assert_eq!(c.id, 7);
        assert!(c.correct_answers.is_empty());
        assert!(!c.is_multiple_choice());
        assert_eq!(c.shown_answers(), vec!["4"]);
        assert_eq!(c.created_at.to_rfc3339(), "2024-03-01T08:00:00.123456+00:00");
    }
}
