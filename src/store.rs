//! JSON-backed record store.
//!
//! The whole collection lives in memory and is flushed to disk after every
//! mutation. Ids come from a monotonic counter that is never decremented, so a
//! deleted card's id is not handed out again.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::card::{Flashcard, NewCard, DEFAULT_CATEGORY};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid flashcard JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// What `load` found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Missing,
    Empty,
    Loaded(usize),
}

/// Result of `add`: the stored card, plus the option picked on the caller's
/// behalf when a multiple-choice card arrived without a correct answer.
#[derive(Debug, Clone)]
pub struct Added {
    pub card: Flashcard,
    pub defaulted_to: Option<String>,
}

#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    cards: Vec<Flashcard>,
    max_id: u64,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cards: Vec::new(),
            max_id: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Replaces the in-memory collection with the file's contents.
    ///
    /// A missing or empty file yields an empty collection. Malformed content
    /// also leaves the collection empty but is reported as `StoreError::Json`.
    pub fn load(&mut self) -> Result<LoadOutcome> {
        self.cards.clear();
        self.max_id = 0;

        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LoadOutcome::Missing),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if bytes.is_empty() {
            return Ok(LoadOutcome::Empty);
        }

        let cards: Vec<Flashcard> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        self.max_id = cards.iter().map(|c| c.id).max().unwrap_or(0);
        self.cards = cards;
        log::debug!(
            "loaded {} cards from {} (max id {})",
            self.len(),
            self.path.display(),
            self.max_id
        );
        Ok(LoadOutcome::Loaded(self.len()))
    }

    /// Overwrites the file with the full collection, pretty-printed.
    pub fn save(&self) -> Result<()> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let s = serde_json::to_string_pretty(&self.cards).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, s).map_err(io_err)?;
        log::debug!("saved {} cards to {}", self.len(), self.path.display());
        Ok(())
    }

    pub fn next_id(&mut self) -> u64 {
        self.max_id += 1;
        self.max_id
    }

    /// Normalises and appends a card, then persists.
    ///
    /// On a save failure the card stays in memory and the error is returned.
    pub fn add(&mut self, new: NewCard) -> Result<Added> {
        self.add_at(new, Utc::now())
    }

    fn add_at(&mut self, new: NewCard, now: DateTime<Utc>) -> Result<Added> {
        let NewCard {
            question,
            answer,
            category,
            options,
            mut correct_answers,
        } = new;

        let category = if category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category
        };

        let mut defaulted_to = None;
        if options.is_empty() {
            correct_answers = vec![answer.clone()];
        } else if correct_answers.is_empty() {
            let first = options[0].clone();
            log::warn!("no correct answer marked, defaulting to first option '{first}'");
            correct_answers = vec![first.clone()];
            defaulted_to = Some(first);
        }

        let card = Flashcard {
            id: self.next_id(),
            question,
            answer,
            correct_answers,
            options,
            category,
            created_at: now,
            last_reviewed: None,
            times_reviewed: 0,
            times_correct: 0,
        };
        self.cards.push(card.clone());
        log::debug!("added card {}", card.id);
        self.save()?;
        Ok(Added { card, defaulted_to })
    }

    pub fn find_by_id(&self, id: u64) -> Option<&Flashcard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: u64) -> Option<&mut Flashcard> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    /// Removes the card and persists. `Ok(None)` leaves everything untouched.
    ///
    /// On a save failure the card is already gone from memory.
    pub fn delete(&mut self, id: u64) -> Result<Option<Flashcard>> {
        let Some(idx) = self.cards.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        let removed = self.cards.remove(idx);
        log::debug!("deleted card {id}");
        self.save()?;
        Ok(Some(removed))
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.cards
            .iter()
            .map(|c| c.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
