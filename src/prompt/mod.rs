//! Prompt primitives the menu and the sessions talk to.

use anyhow::Result;

pub mod terminal;

#[cfg(test)]
pub mod script;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Warning,
    Error,
    Success,
}

/// Styling hint for plain output lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Header,
    Section,
    Question,
    Choice,
    Answer,
    Plain,
}

pub trait Prompter {
    /// Picks one of `options`; an empty string means the pick was cancelled.
    fn select_one(&mut self, label: &str, options: &[String]) -> Result<String>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    fn text_input(&mut self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Blocks until the user acknowledges `prompt`.
    fn pause(&mut self, prompt: &str) -> Result<()>;

    fn notify(&mut self, level: Notice, text: &str);

    fn say(&mut self, tone: Tone, text: &str);

    fn table(&mut self, header: &[&str], rows: &[Vec<String>]);

    fn info(&mut self, text: &str) {
        self.notify(Notice::Info, text)
    }

    fn warning(&mut self, text: &str) {
        self.notify(Notice::Warning, text)
    }

    fn error(&mut self, text: &str) {
        self.notify(Notice::Error, text)
    }

    fn success(&mut self, text: &str) {
        self.notify(Notice::Success, text)
    }
}
