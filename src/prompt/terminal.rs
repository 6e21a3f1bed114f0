//! Terminal implementation of the prompt primitives.
//!
//! Selection lists and the card table are drawn with ratatui in an inline
//! viewport, so they sit in the normal scrollback instead of taking over the
//! screen. Everything else is plain line I/O with crossterm colours.

use std::io::{self, BufRead, Write};
use std::ops::Range;

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    style::{self as cstyle, Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Position},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Row, Table},
    Terminal, TerminalOptions, Viewport,
};

use super::{Notice, Prompter, Tone};
use crate::config::Theme;

const MAX_LIST_HEIGHT: usize = 10;

pub struct TerminalPrompter {
    theme: Theme,
}

impl TerminalPrompter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn print(&self, color: Color, bold: bool, text: &str) {
        let mut out = io::stdout();
        let weight = if bold {
            Attribute::Bold
        } else {
            Attribute::NormalIntensity
        };
        let res = execute!(
            out,
            SetForegroundColor(term_color(color)),
            SetAttribute(weight),
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print("\n"),
        );
        if let Err(e) = res {
            log::warn!("terminal write failed: {e}");
        }
    }

    fn read_line(&self, prompt: &str) -> Result<String> {
        let mut out = io::stdout();
        execute!(
            out,
            SetForegroundColor(term_color(self.theme.accent)),
            Print("? "),
            ResetColor,
            Print(prompt),
        )?;
        out.flush()?;
        let mut buf = String::new();
        let n = io::stdin()
            .lock()
            .read_line(&mut buf)
            .context("failed to read from stdin")?;
        if n == 0 {
            bail!("input closed");
        }
        Ok(buf.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// ratatui and crossterm each have their own colour type.
fn term_color(c: Color) -> cstyle::Color {
    match c {
        Color::Rgb(r, g, b) => cstyle::Color::Rgb { r, g, b },
        _ => cstyle::Color::Reset,
    }
}

impl Prompter for TerminalPrompter {
    fn select_one(&mut self, label: &str, options: &[String]) -> Result<String> {
        if options.is_empty() {
            return Ok(String::new());
        }
        let height = options.len().min(MAX_LIST_HEIGHT) as u16 + 2;
        enable_raw_mode()?;
        let picked = run_select(&self.theme, label, options, height);
        disable_raw_mode()?;
        let picked = picked?;
        match &picked {
            Some(choice) => self.print(self.theme.muted, false, &format!("{label}: {choice}")),
            None => self.print(self.theme.muted, false, &format!("{label}: (cancelled)")),
        }
        Ok(picked.unwrap_or_default())
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let ans = self.read_line(&format!("{prompt} {hint} "))?;
            match ans.trim().to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.warning("Please answer y or n."),
            }
        }
    }

    fn text_input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        let shown = match default {
            Some(d) => format!("{prompt} [{d}]: "),
            None => format!("{prompt}: "),
        };
        let ans = self.read_line(&shown)?;
        match default {
            Some(d) if ans.is_empty() => Ok(d.to_string()),
            _ => Ok(ans),
        }
    }

    fn pause(&mut self, prompt: &str) -> Result<()> {
        self.read_line(prompt)?;
        Ok(())
    }

    fn notify(&mut self, level: Notice, text: &str) {
        let (tag, color) = match level {
            Notice::Info => (" INFO ", self.theme.info),
            Notice::Warning => (" WARNING ", self.theme.warn),
            Notice::Error => (" ERROR ", self.theme.bad),
            Notice::Success => (" SUCCESS ", self.theme.good),
        };
        let mut out = io::stdout();
        let res = execute!(
            out,
            SetForegroundColor(term_color(color)),
            SetAttribute(Attribute::Reverse),
            Print(tag),
            SetAttribute(Attribute::Reset),
            Print(" "),
            SetForegroundColor(term_color(color)),
            Print(text),
            ResetColor,
            Print("\n"),
        );
        if let Err(e) = res {
            log::warn!("terminal write failed: {e}");
        }
    }

    fn say(&mut self, tone: Tone, text: &str) {
        let th = self.theme;
        match tone {
            Tone::Header => {
                self.print(th.accent, true, &format!("\n{text}"));
            }
            Tone::Section => {
                self.print(th.accent, true, &format!("\n# {text}"));
            }
            Tone::Question => self.print(th.info, true, text),
            Tone::Choice => self.print(th.accent, false, text),
            Tone::Answer => self.print(th.good, false, text),
            Tone::Plain => self.print(th.fg, false, text),
        }
    }

    fn table(&mut self, header: &[&str], rows: &[Vec<String>]) {
        if let Err(e) = draw_table(&self.theme, header, rows) {
            log::warn!("table render failed: {e}");
            // fall back to tab-separated lines
            self.print(self.theme.accent, true, &header.join("\t"));
            for r in rows {
                self.print(self.theme.fg, false, &r.join("\t"));
            }
        }
    }
}

fn run_select(
    theme: &Theme,
    label: &str,
    options: &[String],
    height: u16,
) -> Result<Option<String>> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(height),
        },
    )?;
    let mut state = ListState::default();
    state.select(Some(0));
    let last = options.len() - 1;

    let picked = loop {
        terminal.draw(|f| {
            let items: Vec<ListItem> = options
                .iter()
                .map(|o| ListItem::new(Line::from(o.as_str())))
                .collect();
            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme.muted))
                        .title(format!(" {label} ")),
                )
                .style(Style::default().fg(theme.fg))
                .highlight_style(
                    Style::default()
                        .fg(theme.accent)
                        .bg(theme.bar_bg)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");
            f.render_stateful_widget(list, f.area(), &mut state);
        })?;

        let Event::Key(k) = event::read()? else {
            continue;
        };
        if k.kind != KeyEventKind::Press {
            continue;
        }
        let sel = state.selected().unwrap_or(0);
        match k.code {
            KeyCode::Up | KeyCode::Char('k') => state.select(Some(sel.saturating_sub(1))),
            KeyCode::Down | KeyCode::Char('j') => state.select(Some((sel + 1).min(last))),
            KeyCode::Home => state.select(Some(0)),
            KeyCode::End => state.select(Some(last)),
            KeyCode::Enter => break options.get(sel).cloned(),
            KeyCode::Esc | KeyCode::Char('q') => break None,
            KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => break None,
            _ => {}
        }
    };
    // wipe the list; the caller prints a one-line summary in its place
    terminal.clear()?;
    terminal.show_cursor()?;
    Ok(picked)
}

/// Table border plus header row.
const TABLE_CHROME: usize = 3;

/// Splits `len` rows into runs that each fit, with borders and header, in a
/// terminal `term_height` lines tall. Always yields at least one run.
fn chunk_rows(len: usize, term_height: u16) -> Vec<Range<usize>> {
    // one spare line for the newline printed after each run
    let per = usize::from(term_height)
        .saturating_sub(TABLE_CHROME + 1)
        .max(1);
    if len == 0 {
        return vec![0..0];
    }
    (0..len)
        .step_by(per)
        .map(|start| start..(start + per).min(len))
        .collect()
}

fn draw_table(theme: &Theme, header: &[&str], rows: &[Vec<String>]) -> Result<()> {
    // each column as wide as its widest cell
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for r in rows {
        for (w, cell) in widths.iter_mut().zip(r) {
            *w = (*w).max(unicode_width::UnicodeWidthStr::width(cell.as_str()));
        }
    }
    let constraints: Vec<Constraint> = widths
        .iter()
        .map(|w| Constraint::Length(u16::try_from(*w).unwrap_or(u16::MAX)))
        .collect();

    let (_, term_height) = terminal::size().unwrap_or((80, 24));
    for run in chunk_rows(rows.len(), term_height) {
        draw_table_run(theme, header, &rows[run], &constraints)?;
    }
    Ok(())
}

fn draw_table_run(
    theme: &Theme,
    header: &[&str],
    rows: &[Vec<String>],
    constraints: &[Constraint],
) -> Result<()> {
    let height = u16::try_from(rows.len() + TABLE_CHROME).unwrap_or(u16::MAX);
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(height),
        },
    )?;

    let frame = terminal.draw(|f| {
        let head = Row::new(header.iter().map(|h| h.to_string())).style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        );
        let body: Vec<Row> = rows
            .iter()
            .map(|r| Row::new(r.clone()).style(Style::default().fg(theme.fg)))
            .collect();
        let table = Table::new(body, constraints.to_vec())
            .header(head)
            .column_spacing(2)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.muted)),
            );
        f.render_widget(table, f.area());
    })?;
    let bottom = frame.area.bottom().saturating_sub(1);
    terminal.set_cursor_position(Position::new(0, bottom))?;
    terminal.show_cursor()?;
    drop(terminal);
    println!();
    Ok(())
}
