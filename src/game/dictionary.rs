//! Dictionary module for word validation
//!
//! The engine only asks one question: is this a word? Lookups are
//! case-insensitive and O(1). A ~45K-word list with regular inflections
//! (plurals, verb tenses, comparatives) is embedded at build time; a
//! different list can be loaded from disk (one word per line).

use derive_more::{Display, Error};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Embedded wordlist.
/// Words are lowercase, alphabetic only, one per line
static WORDS_DATA: &str = include_str!("../../data/words.txt");

/// Pre-built hash set for O(1) word lookup
static EMBEDDED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    WORDS_DATA.lines().map(str::trim).filter(|w| !w.is_empty()).collect()
});

/// Answers whether a string is a playable word.
pub trait WordOracle {
    fn is_valid_word(&self, word: &str) -> bool;
}

/// Failed to read a word list from disk.
#[derive(Debug, Display, Error)]
#[display("could not read word list {}: {source}", path.display())]
pub struct DictionaryError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

/// The word list compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedWords;

impl WordOracle for EmbeddedWords {
    fn is_valid_word(&self, word: &str) -> bool {
        is_valid_word(word)
    }
}

/// Stand-in for a dictionary that could not be loaded: rejects everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl WordOracle for Unavailable {
    fn is_valid_word(&self, _word: &str) -> bool {
        false
    }
}

/// A word list held in memory.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Build from any collection of words. Entries that are not purely
    /// alphabetic are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|w| normalize(w.as_ref()))
            .collect();
        Self { words }
    }

    /// Load a newline-separated list from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DictionaryError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_words(text.lines()))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordOracle for WordList {
    fn is_valid_word(&self, word: &str) -> bool {
        normalize(word).is_some_and(|w| self.words.contains(&w))
    }
}

fn normalize(word: &str) -> Option<String> {
    let word = word.trim();
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(word.to_ascii_lowercase())
}

/// Check if a word is in the embedded list.
/// Case-insensitive: input is converted to lowercase before lookup.
pub fn is_valid_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    EMBEDDED.contains(lower.as_str())
}

/// Returns the total number of words in the embedded list
pub fn word_count() -> usize {
    EMBEDDED.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_valid_words() {
        assert!(is_valid_word("cat"));
        assert!(is_valid_word("cab"));
        assert!(is_valid_word("retains"));
        assert!(is_valid_word("word"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_valid_word("Cat"));
        assert!(is_valid_word("CAT"));
        assert!(EmbeddedWords.is_valid_word("rEtAiNs"));
    }

    #[test]
    fn test_invalid_words() {
        assert!(!is_valid_word("xyzzyplugh"));
        assert!(!is_valid_word("qxz"));
        assert!(!is_valid_word(""));
    }

    #[test]
    fn test_two_letter_words() {
        for word in ["aa", "qi", "xi", "za", "at", "to"] {
            assert!(is_valid_word(word), "{} should be valid", word);
        }
    }

    #[test]
    fn test_word_count() {
        let count = word_count();
        assert!(count > 40_000, "Expected 40K+ words, got {}", count);
    }

    #[test]
    fn test_common_inflections() {
        for word in [
            "notes", "rates", "trains", "tears", "dines", "played", "boxes", "cities", "stopped",
            "running",
        ] {
            assert!(is_valid_word(word), "{} should be valid", word);
        }
    }

    #[test]
    fn test_unavailable_fails_closed() {
        assert!(!Unavailable.is_valid_word("cat"));
        assert!(!Unavailable.is_valid_word("the"));
    }

    #[test]
    fn test_word_list_from_words() {
        let list = WordList::from_words(["Cat", " dog ", "x-ray", "", "naïve"]);
        assert_eq!(list.len(), 2);
        assert!(list.is_valid_word("CAT"));
        assert!(list.is_valid_word("dog"));
        assert!(!list.is_valid_word("x-ray"));
        assert!(!list.is_valid_word("bird"));
    }

    #[test]
    fn test_word_list_load() {
        let path = std::env::temp_dir().join(format!("rackrush-words-{}.txt", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "alpha\nbeta\r\ngamma").unwrap();
        }
        let list = WordList::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(list.len(), 3);
        assert!(list.is_valid_word("Beta"));
    }

    #[test]
    fn test_word_list_missing_file() {
        let err = WordList::load("/definitely/not/here.txt").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
