use crate::error::HangmanError;
use crate::hangman::{GameConfig, GameState, PLACEHOLDER};
use crate::info_log;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    NewGame,
    Exit,
}

/// How a finished game ended. Deciding this is the driver's job; the engine only
/// reports its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every position is revealed. Holds the word.
    Won(String),
    /// The wrong-guess budget ran out. Holds the word shown to the player.
    Lost(String),
    /// The dictionary had no words of the requested length.
    NoWords(usize),
}

/// Snapshot of a running game for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub pattern: String,
    pub remaining_guesses: usize,
    pub guessed: Vec<char>,
    /// Only filled in when candidate counts are requested.
    pub candidate_count: Option<usize>,
}

impl GameView {
    pub fn from_game(game: &GameState, show_count: bool) -> Self {
        Self {
            pattern: game.to_string(),
            remaining_guesses: game.remaining_guesses(),
            guessed: game.guessed_letters().iter().copied().collect(),
            candidate_count: show_count.then(|| game.candidates().len()),
        }
    }
}

/// Trait for the front end that drives a game, so the loop works with both the
/// line-based CLI and the terminal UI.
pub trait GameInterface {
    /// Called whenever a fresh game begins.
    fn display_new_game(&mut self, config: &GameConfig, word_count: usize);

    fn display_state(&mut self, view: &GameView);

    /// Returns `None` when the input was unusable and should be asked for again.
    fn read_action(&mut self) -> Option<UserAction>;

    fn display_guess_result(&mut self, letter: char, occurrences: usize);

    fn display_error(&mut self, error: &HangmanError);

    fn display_outcome(&mut self, outcome: &Outcome);

    fn display_exit_message(&mut self);
}

/// Outcome of `game`, if it has one.
pub fn check_outcome(game: &GameState) -> Option<Outcome> {
    let Ok(pattern) = game.pattern() else {
        return Some(Outcome::NoWords(game.word_length()));
    };
    // A lone survivor equal to the pattern is fully revealed even if it holds the
    // placeholder symbol itself.
    let solved = !pattern.contains(PLACEHOLDER)
        || (game.candidates().len() == 1 && game.candidates().contains(pattern));
    if solved {
        return Some(Outcome::Won(pattern.to_string()));
    }
    if game.remaining_guesses() == 0 {
        // Any survivor is consistent with everything shown; reveal the first.
        let word = game.candidates().iter().next().cloned().unwrap_or_default();
        return Some(Outcome::Lost(word));
    }
    None
}

fn start_game<G: GameInterface>(
    dictionary: &[String],
    config: GameConfig,
    interface: &mut G,
) -> GameState {
    let game = GameState::with_config(dictionary, config);
    info_log!(
        "start_game() - length {}, {} wrong guesses, {} candidates",
        config.length(),
        config.max_wrong_guesses(),
        game.candidates().len()
    );
    interface.display_new_game(&config, game.candidates().len());
    game
}

/// Plays games until the interface asks to exit. Returns the outcome of every
/// game that reached one, in order.
pub fn game_loop<G: GameInterface>(
    dictionary: &[String],
    config: GameConfig,
    show_count: bool,
    interface: &mut G,
) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    let mut game = start_game(dictionary, config, interface);
    let mut finished = false;

    loop {
        if !finished {
            interface.display_state(&GameView::from_game(&game, show_count));
            if let Some(outcome) = check_outcome(&game) {
                info_log!("game_loop() - game over: {:?}", outcome);
                interface.display_outcome(&outcome);
                outcomes.push(outcome);
                finished = true;
            }
        }

        let Some(action) = interface.read_action() else {
            continue;
        };

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                game = start_game(dictionary, config, interface);
                finished = false;
            }
            UserAction::Guess(_) if finished => {}
            UserAction::Guess(letter) => match game.guess(letter) {
                Ok(occurrences) => interface.display_guess_result(letter, occurrences),
                Err(e) => interface.display_error(&e),
            },
        }
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Interface that replays scripted actions and records what was shown.
    #[derive(Default)]
    struct ScriptedInterface {
        actions: VecDeque<Option<UserAction>>,
        results: Vec<(char, usize)>,
        errors: Vec<HangmanError>,
        views: Vec<GameView>,
        new_games: usize,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(actions: &[UserAction]) -> Self {
            Self {
                actions: actions.iter().copied().map(Some).collect(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_new_game(&mut self, _config: &GameConfig, _word_count: usize) {
            self.new_games += 1;
        }

        fn display_state(&mut self, view: &GameView) {
            self.views.push(view.clone());
        }

        fn read_action(&mut self) -> Option<UserAction> {
            self.actions.pop_front().unwrap_or(Some(UserAction::Exit))
        }

        fn display_guess_result(&mut self, letter: char, occurrences: usize) {
            self.results.push((letter, occurrences));
        }

        fn display_error(&mut self, error: &HangmanError) {
            self.errors.push(*error);
        }

        fn display_outcome(&mut self, _outcome: &Outcome) {}

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn dictionary(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_immediate_exit() {
        let words = dictionary(&["aged", "bees"]);
        let mut ui = ScriptedInterface::new(&[UserAction::Exit]);
        let outcomes = game_loop(&words, GameConfig::new(4, 3).unwrap(), false, &mut ui);
        assert!(outcomes.is_empty());
        assert!(ui.exited);
        assert_eq!(ui.new_games, 1);
    }

    #[test]
    fn test_no_words_of_length() {
        let words = dictionary(&["aged", "bees"]);
        let mut ui = ScriptedInterface::new(&[UserAction::Guess('a'), UserAction::Exit]);
        let outcomes = game_loop(&words, GameConfig::new(7, 3).unwrap(), false, &mut ui);
        assert_eq!(outcomes, vec![Outcome::NoWords(7)]);
        // The guess after the outcome is ignored.
        assert!(ui.results.is_empty());
        assert!(ui.errors.is_empty());
    }

    #[test]
    fn test_duplicate_guess_reported_and_play_continues() {
        let words = dictionary(&["aged", "bees", "food", "grew", "lead"]);
        let mut ui = ScriptedInterface::new(&[
            UserAction::Guess('e'),
            UserAction::Guess('e'),
            UserAction::Exit,
        ]);
        game_loop(&words, GameConfig::new(4, 2).unwrap(), true, &mut ui);
        assert_eq!(ui.results, vec![('e', 1)]);
        assert_eq!(ui.errors, vec![HangmanError::AlreadyGuessed('e')]);
        let last = ui.views.last().unwrap();
        assert_eq!(last.pattern, "- - e -");
        assert_eq!(last.candidate_count, Some(2));
        assert_eq!(last.guessed, vec!['e']);
    }

    #[test]
    fn test_loss_reveals_first_candidate() {
        let words = dictionary(&["aged", "bees", "food", "grew", "lead"]);
        let mut ui = ScriptedInterface::new(&[UserAction::Guess('z'), UserAction::Exit]);
        let outcomes = game_loop(&words, GameConfig::new(4, 1).unwrap(), false, &mut ui);
        assert_eq!(outcomes, vec![Outcome::Lost("aged".to_string())]);
    }

    #[test]
    fn test_single_word_can_be_won() {
        let words = dictionary(&["ab"]);
        let mut ui = ScriptedInterface::new(&[UserAction::Guess('a'), UserAction::Guess('b')]);
        let outcomes = game_loop(&words, GameConfig::new(2, 3).unwrap(), false, &mut ui);
        assert_eq!(outcomes, vec![Outcome::Won("ab".to_string())]);
        assert_eq!(ui.results, vec![('a', 1), ('b', 1)]);
    }

    #[test]
    fn test_new_game_resets_state() {
        let words = dictionary(&["ab"]);
        let mut ui = ScriptedInterface::new(&[
            UserAction::Guess('a'),
            UserAction::NewGame,
            UserAction::Guess('a'),
            UserAction::Exit,
        ]);
        game_loop(&words, GameConfig::new(2, 3).unwrap(), false, &mut ui);
        assert_eq!(ui.new_games, 2);
        // 'a' is accepted again in the second game.
        assert_eq!(ui.results, vec![('a', 1), ('a', 1)]);
        assert!(ui.errors.is_empty());
    }

    #[test]
    fn test_zero_budget_is_immediate_loss() {
        let words = dictionary(&["aged", "bees"]);
        let mut ui = ScriptedInterface::new(&[]);
        let outcomes = game_loop(&words, GameConfig::new(4, 0).unwrap(), false, &mut ui);
        assert_eq!(outcomes, vec![Outcome::Lost("aged".to_string())]);
    }

    #[test]
    fn test_invalid_input_is_retried() {
        let words = dictionary(&["ab"]);
        let mut ui = ScriptedInterface::new(&[]);
        ui.actions = VecDeque::from(vec![None, Some(UserAction::Guess('a')), Some(UserAction::Exit)]);
        game_loop(&words, GameConfig::new(2, 3).unwrap(), false, &mut ui);
        assert_eq!(ui.results, vec![('a', 1)]);
    }

    #[test]
    fn test_word_with_placeholder_symbol_can_be_won() {
        let words = dictionary(&["x-ray"]);
        let mut ui = ScriptedInterface::new(&[
            UserAction::Guess('x'),
            UserAction::Guess('r'),
            UserAction::Guess('a'),
            UserAction::Guess('y'),
        ]);
        let outcomes = game_loop(&words, GameConfig::new(5, 3).unwrap(), false, &mut ui);
        assert_eq!(outcomes, vec![Outcome::Won("x-ray".to_string())]);
    }

    #[test]
    fn test_placeholder_word_not_won_while_rivals_remain() {
        // "xzray" still shows as "x-ray" until 'z' is guessed.
        let mut game = GameState::new(["x-ray", "xzray"], 5, 3).unwrap();
        for letter in ['x', 'r', 'a', 'y'] {
            game.guess(letter).unwrap();
        }
        assert_eq!(game.pattern(), Ok("x-ray"));
        assert_eq!(check_outcome(&game), None);
    }

    #[test]
    fn test_check_outcome_running_game() {
        let game = GameState::new(["aged", "bees"], 4, 3).unwrap();
        assert_eq!(check_outcome(&game), None);
    }
}
