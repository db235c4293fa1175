//! Adversarial hangman engine.
//!
//! [`GameState`] never picks a secret word. Every guess splits the surviving
//! candidates by the pattern the guess would reveal and keeps the largest group,
//! so the word the player is chasing only exists as whatever remains.

use crate::debug_log;
use crate::error::{HangmanError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Symbol shown for a position that has not been revealed.
pub const PLACEHOLDER: char = '-';

/// Validated construction parameters. Only [`GameConfig::new`] builds one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    length: usize,
    max_wrong_guesses: usize,
}

impl GameConfig {
    /// Checks raw parameters as they come from a caller. The inputs are signed so a
    /// negative budget is reported instead of wrapping.
    pub fn new(length: i64, max_wrong_guesses: i64) -> Result<Self> {
        if length < 1 {
            return Err(HangmanError::InvalidLength(length));
        }
        if max_wrong_guesses < 0 {
            return Err(HangmanError::NegativeGuessBudget(max_wrong_guesses));
        }
        let length = usize::try_from(length).map_err(|_| HangmanError::InvalidLength(length))?;
        let max_wrong_guesses = usize::try_from(max_wrong_guesses)
            .map_err(|_| HangmanError::NegativeGuessBudget(max_wrong_guesses))?;
        Ok(Self {
            length,
            max_wrong_guesses,
        })
    }

    pub const fn length(&self) -> usize {
        self.length
    }

    pub const fn max_wrong_guesses(&self) -> usize {
        self.max_wrong_guesses
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    candidates: BTreeSet<String>,
    guessed: BTreeSet<char>,
    remaining_guesses: usize,
    max_wrong_guesses: usize,
    pattern: String,
    length: usize,
}

impl GameState {
    pub fn new<I, S>(words: I, length: i64, max_wrong_guesses: i64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_config(
            words,
            GameConfig::new(length, max_wrong_guesses)?,
        ))
    }

    /// Builds a game from already validated parameters. An empty candidate set is
    /// not an error here; callers check [`GameState::candidates`] to report it.
    pub fn with_config<I, S>(words: I, config: GameConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidates: BTreeSet<String> = words
            .into_iter()
            .map(|word| word.as_ref().to_string())
            .filter(|word| word.chars().count() == config.length)
            .collect();
        debug_log!(
            "GameState::with_config() - {} candidates of length {}",
            candidates.len(),
            config.length
        );
        // A surviving word bounds the pattern size; with none the pattern is never shown.
        let pattern = if candidates.is_empty() {
            String::new()
        } else {
            std::iter::repeat_n(PLACEHOLDER, config.length).collect()
        };

        Self {
            candidates,
            guessed: BTreeSet::new(),
            remaining_guesses: config.max_wrong_guesses,
            max_wrong_guesses: config.max_wrong_guesses,
            pattern,
            length: config.length,
        }
    }

    pub fn candidates(&self) -> &BTreeSet<String> {
        &self.candidates
    }

    pub fn remaining_guesses(&self) -> usize {
        self.remaining_guesses
    }

    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    /// The pattern currently shown to the player.
    ///
    /// Fails with [`HangmanError::NoCandidates`] when no word survives, since no
    /// pattern is meaningful then.
    pub fn pattern(&self) -> Result<&str> {
        if self.candidates.is_empty() {
            return Err(HangmanError::NoCandidates);
        }
        Ok(&self.pattern)
    }

    pub fn word_length(&self) -> usize {
        self.length
    }

    pub fn max_wrong_guesses(&self) -> usize {
        self.max_wrong_guesses
    }

    /// True once no further guess can be accepted.
    pub fn is_exhausted(&self) -> bool {
        self.candidates.is_empty() || self.remaining_guesses == 0
    }

    /// Records `letter` and narrows the candidates to the largest group that shares
    /// a revealed pattern. Returns how many times the letter appears in the new
    /// pattern; a result of zero costs one wrong guess.
    ///
    /// All checks run before anything is touched, so a failed call leaves the game
    /// exactly as it was.
    pub fn guess(&mut self, letter: char) -> Result<usize> {
        self.check_guess(letter)?;

        let mut partitions: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for word in &self.candidates {
            partitions
                .entry(self.derive_pattern(word, letter))
                .or_default()
                .insert(word.clone());
        }
        let partition_count = partitions.len();

        // max_by_key keeps the last maximum, so walking keys in reverse makes the
        // smallest pattern win among groups of equal size.
        let Some((pattern, words)) = partitions
            .into_iter()
            .rev()
            .max_by_key(|(_, words)| words.len())
        else {
            return Err(HangmanError::NoCandidates);
        };

        let occurrences = pattern.chars().filter(|&c| c == letter).count();
        debug_log!(
            "guess('{}') - {} partitions, keeping \"{}\" with {} words",
            letter,
            partition_count,
            pattern,
            words.len()
        );

        self.guessed.insert(letter);
        self.candidates = words;
        self.pattern = pattern;
        if occurrences == 0 {
            self.remaining_guesses -= 1;
        }
        Ok(occurrences)
    }

    fn check_guess(&self, letter: char) -> Result<()> {
        if self.remaining_guesses < 1 {
            return Err(HangmanError::OutOfGuesses);
        }
        if self.candidates.is_empty() {
            return Err(HangmanError::NoCandidates);
        }
        if self.guessed.contains(&letter) {
            return Err(HangmanError::AlreadyGuessed(letter));
        }
        if letter == PLACEHOLDER {
            return Err(HangmanError::PlaceholderGuess);
        }
        Ok(())
    }

    /// One-step refinement of the current pattern for `word`. Positions already
    /// revealed stay as they are because every survivor agrees on them.
    fn derive_pattern(&self, word: &str, letter: char) -> String {
        word.chars()
            .zip(self.pattern.chars())
            .map(|(c, shown)| if c == letter { letter } else { shown })
            .collect()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.candidates.is_empty() {
            return Ok(());
        }
        for (i, c) in self.pattern.chars().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
