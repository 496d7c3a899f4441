//! Code peg symbols
//!
//! The code-breaking alphabet: six colors, in a fixed order.

use std::fmt;
use std::str::FromStr;

/// A single code peg color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

/// Error type for unparsable symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    Empty,
    Unknown(String),
}

impl fmt::Display for SymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Symbol must not be empty"),
            Self::Unknown(text) => write!(f, "Unknown symbol '{text}'"),
        }
    }
}

impl std::error::Error for SymbolError {}

impl Symbol {
    /// The full alphabet in display order
    pub const ALL: [Self; 6] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Yellow,
        Self::Purple,
        Self::Orange,
    ];

    /// Number of symbols in the alphabet
    pub const COUNT: usize = Self::ALL.len();

    /// Lowercase color name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Orange => "orange",
        }
    }

    /// Single-letter shorthand used in compact output
    #[must_use]
    pub const fn initial(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Green => 'G',
            Self::Yellow => 'Y',
            Self::Purple => 'P',
            Self::Orange => 'O',
        }
    }

    /// Symbol bound to a 1-based number key (1-6)
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        let index = key.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(index as usize).copied()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Symbol {
    type Err = SymbolError;

    /// Accepts full names ("red") or initials ("R"), case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SymbolError::Empty);
        }

        Self::ALL
            .into_iter()
            .find(|symbol| {
                trimmed.eq_ignore_ascii_case(symbol.name())
                    || (trimmed.len() == 1
                        && trimmed
                            .chars()
                            .all(|c| c.eq_ignore_ascii_case(&symbol.initial())))
            })
            .ok_or_else(|| SymbolError::Unknown(trimmed.to_string()))
    }
}
