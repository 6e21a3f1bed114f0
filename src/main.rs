// Terminal flashcard manager.
// - Cards live in a single JSON file (--file, default flashcards.json)
// - Menu actions: add / review / quiz / list / delete / exit
// - Every change is written back to the file immediately

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use flashcards_tui::config::{
    default_settings_path, load_settings, theme_of, Settings, ThemeKind,
};
use flashcards_tui::prompt::terminal::TerminalPrompter;
use flashcards_tui::select::Shuffler;
use flashcards_tui::{App, Store};

#[derive(Debug, Clone, Parser)]
#[command(name = "flashcards", about = "Terminal flashcard manager", version)]
struct Cli {
    /// Path to the flashcards JSON file
    #[arg(long, short = 'f', default_value = "flashcards.json")]
    file: PathBuf,

    /// Settings file (TOML). Defaults to flashcards.toml next to the data file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Colour theme, overrides the settings file
    #[arg(long, value_enum)]
    theme: Option<ThemeKind>,

    /// Seed for card and option shuffling, for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,
}

fn settings_for(cli: &Cli) -> Settings {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| default_settings_path(&cli.file));
    let mut settings = match load_settings(&path) {
        Ok(Some(s)) => {
            log::debug!("settings loaded from {}", path.display());
            s
        }
        Ok(None) => {
            if cli.config.is_some() {
                log::warn!("settings file {} not found, using defaults", path.display());
            }
            Settings::default()
        }
        Err(e) => {
            log::warn!("{e:#}; using default settings");
            Settings::default()
        }
    };
    if let Some(t) = cli.theme {
        settings.theme = t;
    }
    settings
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let settings = settings_for(&cli);

    let shuffler = match cli.seed {
        Some(seed) => Shuffler::seeded(seed),
        None => Shuffler::from_entropy(),
    };
    let prompter = TerminalPrompter::new(theme_of(settings.theme));
    let mut app = App::new(Store::new(cli.file.clone()), prompter, shuffler, settings);
    app.load();
    app.run()
}
