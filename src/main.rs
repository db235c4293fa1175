use evil_hangman::cli::{CliInterface, parse_cli};
use evil_hangman::dictionary::{
    EMBEDDED_DICTIONARY, load_dictionary_from_file, load_dictionary_from_str, word_lengths,
};
use evil_hangman::game_loop::game_loop;
use evil_hangman::info_log;
use evil_hangman::logging::init_logging;
use evil_hangman::tui::TuiInterface;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    if let Err(e) = init_logging(cli.verbose, cli.tui) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let config = match cli.game_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let dictionary = match &cli.dictionary_path {
        Some(path) => match load_dictionary_from_file(path) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Failed to load dictionary from '{path}': {e}");
                return ExitCode::FAILURE;
            }
        },
        None => load_dictionary_from_str(EMBEDDED_DICTIONARY),
    };
    info_log!(
        "Loaded {} words with lengths {:?}",
        dictionary.len(),
        word_lengths(&dictionary)
    );

    if cli.tui {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to start terminal UI: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&dictionary, config, cli.show_count, &mut interface);
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&dictionary, config, cli.show_count, &mut interface);
    }

    ExitCode::SUCCESS
}
