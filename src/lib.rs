// Library interface for evil-hangman
// The engine lives in `hangman`; the rest drives it from a terminal

pub mod cli;
pub mod dictionary;
pub mod error;
pub mod game_loop;
pub mod hangman;
pub mod logging;
pub mod tui;

// Re-export commonly used items for easier testing
pub use dictionary::{EMBEDDED_DICTIONARY, load_dictionary_from_file, load_dictionary_from_str};
pub use error::{ErrorKind, HangmanError, Result};
pub use game_loop::{GameInterface, GameView, Outcome, UserAction, game_loop};
pub use hangman::{GameConfig, GameState, PLACEHOLDER};
