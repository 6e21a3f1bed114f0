//! The interactive menu loop.

use anyhow::Result;

use crate::card::NewCard;
use crate::config::Settings;
use crate::prompt::{Prompter, Tone};
use crate::select::{select, Shuffler};
use crate::session;
use crate::store::{LoadOutcome, Store, StoreError};
use crate::table;

const ALL_CATEGORIES: &str = "[All Categories]";

const MENU: [&str; 6] = [
    "1. Add new flashcard",
    "2. Review flashcards",
    "3. Quiz mode",
    "4. List flashcards",
    "5. Delete a flashcard",
    "6. Exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Add,
    Review,
    Quiz,
    List,
    Delete,
    Exit,
}

impl Action {
    fn from_choice(choice: &str) -> Option<Self> {
        let key = choice.split('.').next().unwrap_or_default().trim();
        Some(match key {
            "1" => Self::Add,
            "2" => Self::Review,
            "3" => Self::Quiz,
            "4" => Self::List,
            "5" => Self::Delete,
            "6" => Self::Exit,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct App<P: Prompter> {
    pub store: Store,
    pub prompter: P,
    shuffler: Shuffler,
    settings: Settings,
}

impl<P: Prompter> App<P> {
    pub fn new(store: Store, prompter: P, shuffler: Shuffler, settings: Settings) -> Self {
        Self {
            store,
            prompter,
            shuffler,
            settings,
        }
    }

    /// Loads the store and tells the user what was found. Never fatal.
    pub fn load(&mut self) {
        let file = self.store.path().display().to_string();
        match self.store.load() {
            Ok(LoadOutcome::Missing) => self.prompter.warning(&format!(
                "Flashcard file '{file}' not found. Starting with an empty set."
            )),
            Ok(LoadOutcome::Empty) => self.prompter.warning(&format!(
                "Flashcard file '{file}' is empty. Starting with an empty set."
            )),
            Ok(LoadOutcome::Loaded(n)) => self
                .prompter
                .info(&format!("Loaded {n} flashcards from '{file}'.")),
            Err(e @ StoreError::Json { .. }) => {
                log::error!("{e}");
                self.prompter
                    .error(&format!("Error decoding flashcard JSON: {e}"));
                self.prompter
                    .warning("Could not load existing cards. Starting with an empty set.");
            }
            Err(e) => {
                log::error!("{e}");
                self.prompter
                    .error(&format!("Error reading flashcard file: {e}"));
            }
        }
    }

    pub fn run(&mut self) -> Result<()> {
        while self.step()? == Flow::Continue {}
        Ok(())
    }

    /// One pass through the menu.
    pub fn step(&mut self) -> Result<Flow> {
        let header = format!("=== FLASHCARDS ('{}') ===", self.store.path().display());
        self.prompter.say(Tone::Header, &header);
        let options: Vec<String> = MENU.iter().map(|s| s.to_string()).collect();
        let choice = self.prompter.select_one("Select an action", &options)?;
        if choice.is_empty() {
            self.prompter.warning("No action selected.");
            return Ok(Flow::Continue);
        }
        let Some(action) = Action::from_choice(&choice) else {
            self.prompter.warning("Invalid selection.");
            return Ok(Flow::Continue);
        };
        log::debug!("menu action {action:?}");

        match action {
            Action::Add => self.add()?,
            Action::Review => {
                if self.store.is_empty() {
                    self.prompter
                        .warning("No cards to review yet. Add some first!");
                } else {
                    let category = self.pick_category("Select category to review")?;
                    session::review(
                        &mut self.store,
                        &category,
                        &mut self.shuffler,
                        &mut self.prompter,
                    )?;
                }
            }
            Action::Quiz => {
                if self.store.is_empty() {
                    self.prompter
                        .warning("No cards for a quiz yet. Add some first!");
                } else {
                    let category = self.pick_category("Select category for quiz")?;
                    let count = self.quiz_count()?;
                    session::quiz(
                        &mut self.store,
                        &category,
                        count,
                        &mut self.shuffler,
                        &mut self.prompter,
                    )?;
                }
            }
            Action::List => {
                if self.store.is_empty() {
                    self.prompter.warning("No cards to list yet.");
                } else {
                    let category = self.pick_category("Select category to list")?;
                    self.list(&category);
                }
            }
            Action::Delete => self.delete()?,
            Action::Exit => {
                self.prompter.info("Goodbye!");
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    /// `""` stands for every category.
    fn pick_category(&mut self, prompt: &str) -> Result<String> {
        let mut options = vec![ALL_CATEGORIES.to_string()];
        options.extend(self.store.categories());
        let picked = self.prompter.select_one(prompt, &options)?;
        if picked.is_empty() {
            self.prompter.warning("No category selected.");
            return Ok(String::new());
        }
        if picked == ALL_CATEGORIES {
            return Ok(String::new());
        }
        Ok(picked)
    }

    fn quiz_count(&mut self) -> Result<i64> {
        let fallback = self.settings.quiz_size;
        let raw = self
            .prompter
            .text_input("Number of questions", Some(&fallback.to_string()))?;
        match raw.trim().parse::<i64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => {
                self.prompter.warning(&format!(
                    "Invalid number of questions, defaulting to {fallback}."
                ));
                Ok(fallback as i64)
            }
        }
    }

    fn add(&mut self) -> Result<()> {
        let p = &mut self.prompter;
        let question = p.text_input("Enter question", None)?;
        let answer = p.text_input("Enter the 'main' answer (used if not multiple choice)", None)?;
        let category = p.text_input("Enter category (leave blank for 'General')", None)?;
        let multiple = p.confirm("Make this a multiple choice question?", false)?;

        let mut options = Vec::new();
        let mut correct_answers = Vec::new();
        if multiple {
            p.info("Enter options (type 'done' when finished, need at least 2):");
            loop {
                let text = p.text_input(&format!("Option {}", options.len() + 1), None)?;
                if text.trim().eq_ignore_ascii_case("done") {
                    if options.len() < 2 {
                        p.warning("Need at least 2 options for multiple choice. Please add more.");
                        continue;
                    }
                    break;
                }
                if text.trim().is_empty() {
                    p.warning("Option cannot be empty. Please enter text or type 'done'.");
                    continue;
                }
                if p.confirm(&format!("Is '{text}' a correct answer?"), false)? {
                    correct_answers.push(text.clone());
                }
                options.push(text);
            }
        }

        let new = NewCard {
            question,
            answer,
            category,
            options,
            correct_answers,
        };
        match self.store.add(new) {
            Ok(added) => {
                if let Some(first) = &added.defaulted_to {
                    self.prompter.warning(&format!(
                        "No correct answer specified for multiple choice. Defaulting to first option: '{first}'"
                    ));
                }
                self.prompter.success(&format!(
                    "Added new card (ID: {}) to '{}': {}",
                    added.card.id,
                    self.store.path().display(),
                    added.card.question
                ));
            }
            Err(e) => {
                log::error!("{e}");
                self.prompter
                    .error(&format!("Card kept for this session but not saved: {e}"));
            }
        }
        Ok(())
    }

    fn list(&mut self, category: &str) {
        let cards = select(self.store.cards(), category);
        if cards.is_empty() {
            let file = self.store.path().display();
            if category.is_empty() {
                self.prompter
                    .warning(&format!("No flashcards available in '{file}'."));
            } else {
                self.prompter.warning(&format!(
                    "No cards found in category '{category}' in '{file}'."
                ));
            }
            return;
        }
        let rows = table::card_rows(&cards, &self.settings);
        self.prompter.table(&table::HEADER, &rows);
    }

    fn delete(&mut self) -> Result<()> {
        if self.store.is_empty() {
            self.prompter.warning("No cards to delete.");
            return Ok(());
        }
        self.prompter.info("Current cards:");
        self.list("");

        let raw = self.prompter.text_input("Enter ID of card to delete", None)?;
        let Ok(id) = raw.trim().parse::<u64>() else {
            self.prompter.error("Invalid ID entered.");
            return Ok(());
        };
        let file = self.store.path().display().to_string();
        match self.store.delete(id) {
            Ok(Some(card)) => self.prompter.success(&format!(
                "Deleted card (ID: {id}) from '{file}': {}",
                card.question
            )),
            Ok(None) => self
                .prompter
                .error(&format!("Card with ID {id} not found in '{file}'.")),
            Err(e) => {
                log::error!("{e}");
                self.prompter
                    .error(&format!("Card removed for this session but not saved: {e}"));
            }
        }
        Ok(())
    }
}
