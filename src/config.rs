//! Settings file and colour themes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use ratatui::style::Color;
use serde::Deserialize;

pub const DEFAULT_QUIZ_SIZE: usize = 5;
const SETTINGS_FILE: &str = "flashcards.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeKind,
    /// Offered as the quiz length and used when the typed count is invalid.
    pub quiz_size: usize,
    pub question_width: usize,
    pub answer_width: usize,
    pub category_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeKind::Dark,
            quiz_size: DEFAULT_QUIZ_SIZE,
            question_width: 40,
            answer_width: 30,
            category_width: 15,
        }
    }
}

impl Settings {
    fn sanitized(mut self) -> Self {
        if self.quiz_size == 0 {
            self.quiz_size = DEFAULT_QUIZ_SIZE;
        }
        // room for at least one glyph plus "..."
        self.question_width = self.question_width.max(4);
        self.answer_width = self.answer_width.max(4);
        self.category_width = self.category_width.max(4);
        self
    }
}

/// `flashcards.toml` next to the data file.
pub fn default_settings_path(data_file: &Path) -> PathBuf {
    data_file
        .parent()
        .map(|p| p.join(SETTINGS_FILE))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
}

pub fn parse_settings(content: &str) -> Result<Settings> {
    let s: Settings = toml::from_str(content).context("failed to parse settings TOML")?;
    Ok(s.sanitized())
}

/// Reads `path` if it exists. `Ok(None)` means there is nothing to read.
pub fn load_settings(path: &Path) -> Result<Option<Settings>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings: {}", path.display()))?;
    let s = parse_settings(&content)
        .with_context(|| format!("in settings file {}", path.display()))?;
    Ok(Some(s))
}

// ---------------- Themes ----------------
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub bar_bg: Color,
    pub good: Color,
    pub warn: Color,
    pub bad: Color,
    pub info: Color,
}

pub fn theme_of(kind: ThemeKind) -> Theme {
    match kind {
        ThemeKind::Dark => Theme {
            fg: Color::Rgb(220, 220, 220),
            muted: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(95, 175, 255),
            bar_bg: Color::Rgb(35, 40, 46),
            good: Color::Rgb(130, 200, 120),
            warn: Color::Rgb(255, 200, 110),
            bad: Color::Rgb(240, 110, 110),
            info: Color::Rgb(120, 170, 255),
        },
        ThemeKind::Light => Theme {
            fg: Color::Rgb(30, 30, 30),
            muted: Color::Rgb(120, 120, 120),
            accent: Color::Rgb(0, 122, 255),
            bar_bg: Color::Rgb(235, 240, 245),
            good: Color::Rgb(38, 166, 91),
            warn: Color::Rgb(255, 160, 0),
            bad: Color::Rgb(200, 40, 40),
            info: Color::Rgb(0, 122, 255),
        },
    }
}
