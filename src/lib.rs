//! Flashcard store, review and quiz sessions behind a terminal menu.

pub mod app;
pub mod card;
pub mod config;
pub mod prompt;
pub mod select;
pub mod session;
pub mod store;
pub mod table;

pub use app::App;
pub use card::{Flashcard, NewCard};
pub use store::{Store, StoreError};
