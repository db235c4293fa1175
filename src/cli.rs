use crate::error::HangmanError;
use crate::game_loop::{GameInterface, GameView, Outcome, UserAction};
use crate::hangman::GameConfig;
use clap::Parser;
use std::io::BufRead;

/// Hangman that never commits to a secret word
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a dictionary file (whitespace-separated words)
    #[arg(short = 'i', long = "input")]
    pub dictionary_path: Option<String>,

    /// Length of the word to guess
    #[arg(short, long, default_value_t = 5, allow_negative_numbers = true)]
    pub length: i64,

    /// Number of wrong guesses allowed
    #[arg(short, long, default_value_t = 7, allow_negative_numbers = true)]
    pub guesses: i64,

    /// Show how many words are still possible after each guess
    #[arg(long)]
    pub show_count: bool,

    /// Play in the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

impl Cli {
    pub fn game_config(&self) -> Result<GameConfig, HangmanError> {
        GameConfig::new(self.length, self.guesses)
    }
}

pub enum LetterInput {
    Valid(char),
    Invalid,
    Exit,
    NewGame,
}

/// Interprets one line of player input. Letters are lowercased to match the
/// dictionary loader.
pub fn parse_letter(line: &str) -> LetterInput {
    let input = line.trim().to_lowercase();
    match input.as_str() {
        "exit" => LetterInput::Exit,
        "next" => LetterInput::NewGame,
        _ => {
            let mut chars = input.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if !c.is_whitespace() => LetterInput::Valid(c),
                _ => LetterInput::Invalid,
            }
        }
    }
}

pub fn read_letter<R: BufRead>(reader: &mut R) -> LetterInput {
    println!("\nYour guess (one letter, 'next' for a new game, 'exit' to quit)?");
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => LetterInput::Exit,
        Ok(_) => match parse_letter(&input) {
            LetterInput::Invalid => {
                println!("Invalid guess. Please enter a single letter.");
                LetterInput::Invalid
            }
            other => other,
        },
    }
}

pub fn display_new_game(config: &GameConfig) {
    println!(
        "New game: {}-letter word, {} wrong guesses allowed.",
        config.length(),
        config.max_wrong_guesses()
    );
}

pub fn display_state(view: &GameView) {
    println!();
    if let Some(count) = view.candidate_count {
        println!("{count} words possible");
    }
    println!("guesses : {}", view.remaining_guesses);
    let guessed: String = view.guessed.iter().collect();
    println!("guessed : {guessed}");
    println!("current : {}", view.pattern);
}

pub fn display_guess_result(letter: char, occurrences: usize) {
    match occurrences {
        0 => println!("Sorry, there are no {letter}'s"),
        1 => println!("Yes, there is one {letter}"),
        n => println!("Yes, there are {n} {letter}'s"),
    }
}

pub fn display_error(error: &HangmanError) {
    println!("{error}");
}

pub fn display_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Won(word) => println!("You beat me! The word was {word}."),
        Outcome::Lost(word) => println!("Sorry, you lose. The word was {word}."),
        Outcome::NoWords(length) => {
            println!("The dictionary has no words of length {length}.")
        }
    }
    println!("Type 'next' to play again or 'exit' to quit.");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and prints to stdout
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_new_game(&mut self, config: &GameConfig, _word_count: usize) {
        display_new_game(config);
    }

    fn display_state(&mut self, view: &GameView) {
        display_state(view);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        match read_letter(&mut self.reader) {
            LetterInput::Valid(letter) => Some(UserAction::Guess(letter)),
            LetterInput::Exit => Some(UserAction::Exit),
            LetterInput::NewGame => Some(UserAction::NewGame),
            LetterInput::Invalid => None,
        }
    }

    fn display_guess_result(&mut self, letter: char, occurrences: usize) {
        display_guess_result(letter, occurrences);
    }

    fn display_error(&mut self, error: &HangmanError) {
        display_error(error);
    }

    fn display_outcome(&mut self, outcome: &Outcome) {
        display_outcome(outcome);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["evil-hangman"]);
        assert_eq!(cli.dictionary_path, None);
        assert_eq!(cli.length, 5);
        assert_eq!(cli.guesses, 7);
        assert!(!cli.show_count);
        assert!(!cli.tui);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_with_options() {
        let cli = Cli::parse_from([
            "evil-hangman",
            "-i",
            "words.txt",
            "--length",
            "8",
            "-g",
            "10",
            "--show-count",
        ]);
        assert_eq!(cli.dictionary_path.as_deref(), Some("words.txt"));
        assert_eq!(cli.game_config(), Ok(GameConfig::new(8, 10).unwrap()));
        assert!(cli.show_count);
    }

    #[test]
    fn test_cli_negative_guesses_reach_validation() {
        let cli = Cli::parse_from(["evil-hangman", "--guesses", "-3"]);
        assert_eq!(cli.game_config(), Err(HangmanError::NegativeGuessBudget(-3)));
    }

    #[test]
    fn test_cli_zero_length_rejected() {
        let cli = Cli::parse_from(["evil-hangman", "-l", "0"]);
        assert_eq!(cli.game_config(), Err(HangmanError::InvalidLength(0)));
    }

    #[test]
    fn test_parse_letter() {
        assert!(matches!(parse_letter("e\n"), LetterInput::Valid('e')));
        assert!(matches!(parse_letter("  E  "), LetterInput::Valid('e')));
        assert!(matches!(parse_letter("EXIT"), LetterInput::Exit));
        assert!(matches!(parse_letter("next"), LetterInput::NewGame));
        assert!(matches!(parse_letter("ab"), LetterInput::Invalid));
        assert!(matches!(parse_letter(""), LetterInput::Invalid));
    }

    #[test]
    fn test_read_letter_end_of_input_exits() {
        let mut reader = Cursor::new("");
        assert!(matches!(read_letter(&mut reader), LetterInput::Exit));
    }

    #[test]
    fn test_cli_interface_actions() {
        let mut ui = CliInterface::new(Cursor::new("a\nxy\nnext\nexit\n"));
        assert_eq!(ui.read_action(), Some(UserAction::Guess('a')));
        assert_eq!(ui.read_action(), None);
        assert_eq!(ui.read_action(), Some(UserAction::NewGame));
        assert_eq!(ui.read_action(), Some(UserAction::Exit));
        assert_eq!(ui.read_action(), Some(UserAction::Exit));
    }
}
