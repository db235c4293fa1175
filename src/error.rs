use thiserror::Error;

/// Broad category of a [`HangmanError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a value the game cannot accept.
    InvalidArgument,
    /// The game is in a state where the operation is not allowed.
    InvalidState,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum HangmanError {
    #[error("Word length must be at least 1 (got {0})")]
    InvalidLength(i64),
    #[error("Maximum wrong guesses cannot be negative (got {0})")]
    NegativeGuessBudget(i64),
    #[error("The letter '{0}' has already been guessed")]
    AlreadyGuessed(char),
    #[error("The placeholder symbol cannot be guessed")]
    PlaceholderGuess,
    #[error("No wrong guesses remain")]
    OutOfGuesses,
    #[error("No candidate words remain")]
    NoCandidates,
}

impl HangmanError {
    pub const fn kind(self) -> ErrorKind {
        use HangmanError::*;
        match self {
            InvalidLength(_) | NegativeGuessBudget(_) | AlreadyGuessed(_) | PlaceholderGuess => {
                ErrorKind::InvalidArgument
            }
            OutOfGuesses | NoCandidates => ErrorKind::InvalidState,
        }
    }
}

pub type Result<T> = core::result::Result<T, HangmanError>;
