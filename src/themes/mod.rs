//! Word search themes
//!
//! A theme is a named category supplying the word list for one puzzle. The
//! built-in catalog is embedded at compile time; custom catalogs use the same
//! `name: WORD WORD ...` line format.

mod embedded;

pub use embedded::{THEMES, THEMES_COUNT};

use rustc_hash::FxHashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// A named word list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    name: String,
    words: Vec<String>,
}

/// Error type for invalid themes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    EmptyName,
    NoWords,
    InvalidWord(String),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Theme name must not be empty"),
            Self::NoWords => write!(f, "Theme must contain at least one word"),
            Self::InvalidWord(word) => {
                write!(f, "Word '{word}' must be two or more ASCII letters")
            }
        }
    }
}

impl std::error::Error for ThemeError {}

impl Theme {
    /// Create a theme, normalizing words to uppercase and dropping repeats
    ///
    /// # Errors
    /// Returns `ThemeError` if the name is blank, there are no words, or a word
    /// is shorter than two letters or contains non-letters.
    pub fn new<N, I, W>(name: N, words: I) -> Result<Self, ThemeError>
    where
        N: Into<String>,
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ThemeError::EmptyName);
        }

        let mut seen = FxHashSet::default();
        let mut unique = Vec::new();
        for w in words {
            let word = w.as_ref().trim().to_ascii_uppercase();
            if word.len() < 2 || !word.bytes().all(|b| b.is_ascii_uppercase()) {
                return Err(ThemeError::InvalidWord(w.as_ref().to_string()));
            }
            // Repeats keep their first position
            if seen.insert(word.clone()) {
                unique.push(word);
            }
        }
        let words = unique;

        if words.is_empty() {
            return Err(ThemeError::NoWords);
        }

        Ok(Self { name, words })
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Parse a `name: WORD WORD ...` line
    fn parse_line(line: &str) -> Option<Result<Self, ThemeError>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (name, words) = line.split_once(':')?;
        Some(Self::new(name, words.split_whitespace()))
    }
}

/// The built-in theme catalog
///
/// # Examples
/// ```
/// use puzzle_pair::themes::builtin_catalog;
///
/// let catalog = builtin_catalog();
/// assert!(catalog.iter().all(|t| t.words().len() == 8));
/// ```
#[must_use]
pub fn builtin_catalog() -> Vec<Theme> {
    THEMES
        .iter()
        .filter_map(|&(name, words)| Theme::new(name, words.iter().copied()).ok())
        .collect()
}

/// Load a catalog from a file, skipping blank, comment, and invalid lines
///
/// # Errors
/// Returns an I/O error if the file cannot be read.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Theme>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_catalog(&content))
}

/// Parse catalog text, skipping blank, comment, and invalid lines
#[must_use]
pub fn parse_catalog(content: &str) -> Vec<Theme> {
    content
        .lines()
        .filter_map(Theme::parse_line)
        .filter_map(Result::ok)
        .collect()
}
