//! TUI (Terminal User Interface) module for Evil Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! - `EnteringGuess`: a letter key submits a guess immediately
//! - `GameOver`: only `N` (new game) and `ESC` are accepted

use crate::error::HangmanError;
use crate::game_loop::{GameInterface, GameView, Outcome, UserAction};
use crate::hangman::GameConfig;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// Gallows drawings from empty to complete.
const GALLOWS: [&[&str]; 7] = [
    &["  +---+", "      |", "      |", "      |", "     ==="],
    &["  +---+", "  O   |", "      |", "      |", "     ==="],
    &["  +---+", "  O   |", "  |   |", "      |", "     ==="],
    &["  +---+", "  O   |", " /|   |", "      |", "     ==="],
    &["  +---+", "  O   |", " /|\\  |", "      |", "     ==="],
    &["  +---+", "  O   |", " /|\\  |", " /    |", "     ==="],
    &["  +---+", "  O   |", " /|\\  |", " / \\  |", "     ==="],
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    EnteringGuess,
    GameOver,
}

/// Picks the gallows stage for the share of wrong guesses already used.
fn gallows_stage(remaining: usize, max: usize) -> usize {
    let last = GALLOWS.len() - 1;
    if max == 0 {
        return last;
    }
    let used = max.saturating_sub(remaining);
    (used * last).div_ceil(max).min(last)
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    view: Option<&'a GameView>,
    max_wrong_guesses: usize,
    state: TuiState,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: Option<GameView>,
    max_wrong_guesses: usize,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            view: None,
            max_wrong_guesses: 0,
            state: TuiState::EnteringGuess,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            view: self.view.as_ref(),
            max_wrong_guesses: self.max_wrong_guesses,
            state: self.state,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Pattern
                Constraint::Min(9),    // Gallows and info
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_pattern(f, chunks[1], ctx.view);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(16), Constraint::Min(20)])
            .split(chunks[2]);
        Self::render_gallows(f, middle[0], ctx.view, ctx.max_wrong_guesses);
        Self::render_info(f, middle[1], ctx);

        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("EVIL HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_pattern(f: &mut Frame, area: Rect, view: Option<&GameView>) {
        let pattern = view.map_or("", |v| v.pattern.as_str());
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(pattern.to_string(), SUCCESS_STYLE)),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().title("Word").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, view: Option<&GameView>, max: usize) {
        let remaining = view.map_or(max, |v| v.remaining_guesses);
        let lines: Vec<Line> = GALLOWS[gallows_stage(remaining, max)]
            .iter()
            .map(|row| Line::from(*row))
            .collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Gallows").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(view) = ctx.view {
            lines.push(Line::from(vec![
                Span::styled("Wrong guesses left: ", INFO_STYLE),
                Span::raw(view.remaining_guesses.to_string()),
            ]));
            let guessed: String = view
                .guessed
                .iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::from(vec![
                Span::styled("Guessed: ", INFO_STYLE),
                Span::raw(guessed),
            ]));
            if let Some(count) = view.candidate_count {
                lines.push(Line::from(vec![
                    Span::styled("Words possible: ", INFO_STYLE),
                    Span::raw(count.to_string()),
                ]));
            }
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, MESSAGE_STYLE)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => "Type a letter to guess | ESC: Quit",
            TuiState::GameOver => "N: New Game | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }
        debug_log!(
            "handle_input() - Key event received: code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );

        Ok(match self.state {
            TuiState::EnteringGuess => self.handle_guess_input(key),
            TuiState::GameOver => Self::handle_game_over_input(key),
        })
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Char(_)
                if key
                    .modifiers
                    .intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) =>
            {
                None
            }
            KeyCode::Char(c) if c.is_alphabetic() => {
                self.error_message.clear();
                Some(UserAction::Guess(c.to_lowercase().next().unwrap_or(c)))
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                None
            }
            _ => None,
        }
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            KeyCode::Esc => Some(UserAction::Exit),
            _ => None,
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_new_game(&mut self, config: &GameConfig, _word_count: usize) {
        self.view = None;
        self.max_wrong_guesses = config.max_wrong_guesses();
        self.state = TuiState::EnteringGuess;
        self.message = format!(
            "New game: {}-letter word, {} wrong guesses allowed.",
            config.length(),
            config.max_wrong_guesses()
        );
        self.error_message.clear();
        self.status = "New game - guess a letter".to_string();
        self.draw_or_log();
    }

    fn display_state(&mut self, view: &GameView) {
        self.view = Some(view.clone());
        self.state = TuiState::EnteringGuess;
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    debug_log!("read_action() - Input error: {}", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_guess_result(&mut self, letter: char, occurrences: usize) {
        self.message = match occurrences {
            0 => format!("Sorry, there are no {letter}'s"),
            1 => format!("Yes, there is one {letter}"),
            n => format!("Yes, there are {n} {letter}'s"),
        };
        self.status = format!("Guessed '{letter}'");
    }

    fn display_error(&mut self, error: &HangmanError) {
        self.error_message = error.to_string();
        self.draw_or_log();
    }

    fn display_outcome(&mut self, outcome: &Outcome) {
        self.state = TuiState::GameOver;
        match outcome {
            Outcome::Won(word) => {
                self.message = format!("You beat me! The word was {word}.");
                self.status = format!("Game Over - You won: {word}");
            }
            Outcome::Lost(word) => {
                self.message = format!("Sorry, you lose. The word was {word}.");
                self.status = format!("Game Over - The word was {word}");
            }
            Outcome::NoWords(length) => {
                self.message = format!("The dictionary has no words of length {length}.");
                self.status = "Error: No words to play with".to_string();
            }
        }
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallows_stage_bounds() {
        assert_eq!(gallows_stage(7, 7), 0);
        assert_eq!(gallows_stage(0, 7), GALLOWS.len() - 1);
        assert_eq!(gallows_stage(0, 0), GALLOWS.len() - 1);
    }

    #[test]
    fn test_gallows_stage_first_miss_shows_progress() {
        // Any miss draws something, even with a large budget.
        assert!(gallows_stage(19, 20) > 0);
        assert_eq!(gallows_stage(5, 6), 1);
    }

    #[test]
    fn test_gallows_stage_monotonic() {
        let max = 10;
        let stages: Vec<usize> = (0..=max).rev().map(|r| gallows_stage(r, max)).collect();
        assert!(stages.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_gallows_rows_have_same_height() {
        assert!(GALLOWS.iter().all(|rows| rows.len() == GALLOWS[0].len()));
    }

    #[test]
    fn test_game_over_input() {
        let key = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(TuiInterface::handle_game_over_input(key), Some(UserAction::NewGame));
        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(TuiInterface::handle_game_over_input(key), Some(UserAction::Exit));
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(TuiInterface::handle_game_over_input(key), None);
    }
}
