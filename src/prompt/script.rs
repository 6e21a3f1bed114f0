//! Replays queued replies and records everything shown.

use std::collections::VecDeque;

use anyhow::{anyhow, bail, Result};

use super::{Notice, Prompter, Tone};

#[derive(Debug, Clone)]
pub enum Reply {
    /// Returned verbatim from `select_one`.
    Pick(String),
    /// Returns the first option whose text starts with this prefix.
    PickStarting(String),
    Confirm(bool),
    Text(String),
    /// Accept the default of a `text_input`.
    Default,
}

#[derive(Debug, Default)]
pub struct Script {
    replies: VecDeque<Reply>,
    pub notices: Vec<(Notice, String)>,
    pub lines: Vec<(Tone, String)>,
    pub tables: Vec<Vec<Vec<String>>>,
    pub pauses: usize,
    /// Options offered by each `select_one`, in order.
    pub offered: Vec<Vec<String>>,
}

impl Script {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn pick(s: &str) -> Reply {
        Reply::Pick(s.into())
    }

    /// Picks whichever offered option begins with `prefix`.
    pub fn pick_starting(prefix: &str) -> Reply {
        Reply::PickStarting(prefix.into())
    }

    pub fn text(s: &str) -> Reply {
        Reply::Text(s.into())
    }

    pub fn has(&self, level: Notice, needle: &str) -> bool {
        self.notices
            .iter()
            .any(|(l, t)| *l == level && t.contains(needle))
    }

    pub fn finished(&self) -> bool {
        self.replies.is_empty()
    }

    fn next(&mut self, what: &str) -> Result<Reply> {
        self.replies
            .pop_front()
            .ok_or_else(|| anyhow!("script ran out of replies at {what}"))
    }
}

impl Prompter for Script {
    fn select_one(&mut self, label: &str, options: &[String]) -> Result<String> {
        self.offered.push(options.to_vec());
        match self.next(label)? {
            Reply::Pick(s) => Ok(s),
            Reply::PickStarting(prefix) => options
                .iter()
                .find(|o| o.starts_with(&prefix))
                .cloned()
                .ok_or_else(|| anyhow!("no option starting with '{prefix}' in {options:?}")),
            other => bail!("expected a pick for '{label}', got {other:?}"),
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        match self.next(prompt)? {
            Reply::Confirm(b) => Ok(b),
            Reply::Default => Ok(default),
            other => bail!("expected a confirm for '{prompt}', got {other:?}"),
        }
    }

    fn text_input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        match self.next(prompt)? {
            Reply::Text(s) => Ok(s),
            Reply::Default => Ok(default.unwrap_or_default().to_string()),
            other => bail!("expected text for '{prompt}', got {other:?}"),
        }
    }

    fn pause(&mut self, _prompt: &str) -> Result<()> {
        self.pauses += 1;
        Ok(())
    }

    fn notify(&mut self, level: Notice, text: &str) {
        self.notices.push((level, text.to_string()));
    }

    fn say(&mut self, tone: Tone, text: &str) {
        self.lines.push((tone, text.to_string()));
    }

    fn table(&mut self, _header: &[&str], rows: &[Vec<String>]) {
        self.tables.push(rows.to_vec());
    }
}
