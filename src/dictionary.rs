use crate::hangman::PLACEHOLDER;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_DICTIONARY: &str = include_str!("resources/dictionary.txt");

/// Lowercases a token. Tokens holding the placeholder symbol are dropped since they
/// could never be shown as fully revealed.
fn normalize(token: &str) -> Option<String> {
    let word = token.trim().to_lowercase();
    (!word.is_empty() && !word.contains(PLACEHOLDER)).then_some(word)
}

pub fn load_dictionary_from_str(data: &str) -> Vec<String> {
    data.split_whitespace().filter_map(normalize).collect()
}

pub fn load_dictionary_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        words.extend(line?.split_whitespace().filter_map(normalize));
    }
    Ok(words)
}

/// Distinct word lengths present in `words`, measured in characters.
pub fn word_lengths(words: &[String]) -> BTreeSet<usize> {
    words.iter().map(|word| word.chars().count()).collect()
}
