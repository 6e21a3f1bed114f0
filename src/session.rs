//! Review and quiz sessions.
//!
//! Both work on a snapshot of the selected cards. Statistics are written back
//! to the store's live records by id, never through the snapshot, and the
//! store is saved once when the pass is over.

use anyhow::Result;
use chrono::Utc;

use crate::card::Flashcard;
use crate::prompt::{Prompter, Tone};
use crate::select::{select, Shuffler};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub correct: usize,
    pub total: usize,
    pub saved: bool,
}

impl Summary {
    pub fn score(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }
}

#[derive(Debug)]
struct Session {
    phase: Phase,
    correct: usize,
    total: usize,
}

impl Session {
    fn new(total: usize) -> Self {
        Self {
            phase: Phase::NotStarted,
            correct: 0,
            total,
        }
    }

    fn begin(&mut self) {
        debug_assert_eq!(self.phase, Phase::NotStarted);
        self.phase = Phase::InProgress;
    }

    fn tally(&mut self, correct: bool) {
        debug_assert_eq!(self.phase, Phase::InProgress);
        if correct {
            self.correct += 1;
        }
    }

    fn complete<P: Prompter + ?Sized>(
        &mut self,
        store: &Store,
        p: &mut P,
        what: &str,
    ) -> Summary {
        self.phase = Phase::Completed;
        let saved = match store.save() {
            Ok(()) => true,
            Err(e) => {
                log::error!("saving {what} results failed: {e}");
                p.error(&format!("Failed to save {what} results: {e}"));
                false
            }
        };
        log::debug!("{what} completed: {}/{}", self.correct, self.total);
        Summary {
            correct: self.correct,
            total: self.total,
            saved,
        }
    }
}

/// Updates the live record for `id`. Returns false, after reporting it, when
/// the card is no longer in the store.
pub fn write_back<P: Prompter + ?Sized>(
    store: &mut Store,
    id: u64,
    correct: bool,
    p: &mut P,
) -> bool {
    match store.find_by_id_mut(id) {
        Some(card) => {
            card.record(correct, Utc::now());
            true
        }
        None => {
            log::error!("card {id} vanished from the store during a session");
            p.error(&format!(
                "Could not find card with ID {id} in main list to update stats."
            ));
            false
        }
    }
}

fn answers_line(card: &Flashcard) -> String {
    match card.shown_answers().as_slice() {
        [one] => format!("The correct answer was: {one}"),
        many => format!("The correct answers were: {}", many.join(", ")),
    }
}

fn reveal<P: Prompter + ?Sized>(card: &Flashcard, p: &mut P) {
    match card.shown_answers().as_slice() {
        [one] => p.say(Tone::Answer, &format!("Answer: {one}")),
        many => {
            p.say(Tone::Answer, "Correct answers:");
            for a in many {
                p.say(Tone::Answer, &format!("- {a}"));
            }
        }
    }
}

/// Self-assessed pass over every card in `category`, in shuffled order.
pub fn review<P: Prompter + ?Sized>(
    store: &mut Store,
    category: &str,
    shuffler: &mut Shuffler,
    p: &mut P,
) -> Result<Option<Summary>> {
    let mut cards = select(store.cards(), category);
    let file = store.path().display().to_string();
    if category.is_empty() {
        p.info(&format!("Reviewing all {} cards from '{file}'.", cards.len()));
    } else {
        p.info(&format!(
            "Reviewing {} cards in category '{category}' from '{file}'.",
            cards.len()
        ));
    }
    if cards.is_empty() {
        p.warning("No cards to review in this selection.");
        return Ok(None);
    }
    shuffler.shuffle_cards(&mut cards);

    let mut session = Session::new(cards.len());
    session.begin();
    // a failed prompt still saves what was already answered
    let pass = review_pass(store, &cards, shuffler, p, &mut session);
    let summary = session.complete(store, p, "review");
    pass?;
    p.info(&format!(
        "Review complete! You got {}/{} correct ({:.1}%).",
        summary.correct,
        summary.total,
        summary.score()
    ));
    Ok(Some(summary))
}

fn review_pass<P: Prompter + ?Sized>(
    store: &mut Store,
    cards: &[Flashcard],
    shuffler: &mut Shuffler,
    p: &mut P,
    session: &mut Session,
) -> Result<()> {
    let total = cards.len();
    for (i, card) in cards.iter().enumerate() {
        p.say(
            Tone::Section,
            &format!("Card {}/{} - Category: {}", i + 1, total, card.category),
        );
        p.say(Tone::Question, &format!("Question: {}", card.question));

        if card.is_multiple_choice() {
            p.say(Tone::Plain, "(Multiple Choice Question)");
            p.pause("Press Enter to see answer options...")?;
            for (j, opt) in shuffler.shuffled_options(&card.options).iter().enumerate() {
                p.say(Tone::Choice, &format!("{}. {}", j + 1, opt));
            }
            p.pause("Press Enter to see the correct answer(s)...")?;
        } else {
            p.pause("Press Enter to see the answer...")?;
        }
        reveal(card, p);

        let got_it = p.confirm("Did you get it right?", true)?;
        write_back(store, card.id, got_it, p);
        session.tally(got_it);
        if got_it {
            p.success("Marked as correct!");
        } else {
            p.warning("Marked as incorrect.");
        }
    }
    Ok(())
}

/// Scored pass over a random sample of `requested` cards from `category`.
pub fn quiz<P: Prompter + ?Sized>(
    store: &mut Store,
    category: &str,
    requested: i64,
    shuffler: &mut Shuffler,
    p: &mut P,
) -> Result<Option<Summary>> {
    let mut pool = select(store.cards(), category);
    let file = store.path().display().to_string();
    if category.is_empty() {
        p.info(&format!(
            "Starting quiz with cards from all categories in '{file}'."
        ));
    } else {
        p.info(&format!(
            "Starting quiz with cards from category '{category}' in '{file}'."
        ));
    }
    if pool.is_empty() {
        p.warning("No cards available for the quiz in this selection.");
        return Ok(None);
    }
    let mut n = requested;
    if n > pool.len() as i64 {
        n = pool.len() as i64;
        p.info(&format!(
            "Reduced quiz size to {n} questions (maximum available)."
        ));
    }
    if n <= 0 {
        p.warning("Number of questions must be positive.");
        return Ok(None);
    }
    let n = n as usize;
    shuffler.shuffle_cards(&mut pool);
    pool.truncate(n);

    p.say(Tone::Header, &format!("QUIZ MODE: {n} questions from {file}"));
    let mut session = Session::new(n);
    session.begin();
    let pass = quiz_pass(store, &pool, shuffler, p, &mut session);
    let summary = session.complete(store, p, "quiz");
    pass?;
    p.info(&format!(
        "Quiz complete! You scored {}/{} ({:.1}%).",
        summary.correct,
        summary.total,
        summary.score()
    ));
    Ok(Some(summary))
}

fn quiz_pass<P: Prompter + ?Sized>(
    store: &mut Store,
    cards: &[Flashcard],
    shuffler: &mut Shuffler,
    p: &mut P,
    session: &mut Session,
) -> Result<()> {
    let n = cards.len();
    for (i, card) in cards.iter().enumerate() {
        p.say(Tone::Section, &format!("Question {}/{}", i + 1, n));
        p.say(Tone::Question, &card.question);

        let given = if card.is_multiple_choice() {
            let labels: Vec<String> = shuffler
                .shuffled_options(&card.options)
                .iter()
                .enumerate()
                .map(|(j, opt)| format!("{}. {}", j + 1, opt))
                .collect();
            let picked = p.select_one("Select your answer", &labels)?;
            match picked.split_once(". ") {
                Some((_, text)) => text.to_string(),
                None => picked,
            }
        } else {
            p.text_input("Your answer", None)?.trim().to_string()
        };

        let correct = card.accepts(&given);
        write_back(store, card.id, correct, p);
        session.tally(correct);
        if correct {
            p.success("Correct!");
        } else {
            p.error(&format!("Incorrect. {}", answers_line(card)));
        }
    }
    Ok(())
}
