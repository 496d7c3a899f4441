//! Puzzle Pair
//!
//! Two single-player puzzles: a Mastermind-style code breaker and a themed
//! word search, with a shared timer and best-score store.
//!
//! # Quick Start
//!
//! ```rust
//! use puzzle_pair::codebreak::{CodeBreakEngine, CodeBreakEvent};
//! use puzzle_pair::core::Symbol::{Blue, Green, Red, Yellow};
//!
//! let mut game = CodeBreakEngine::with_secret([Red, Blue, Green, Yellow]);
//! for symbol in [Red, Blue, Green, Yellow] {
//!     game.select_symbol(symbol);
//! }
//!
//! let events = game.submit_guess();
//! assert!(matches!(events.last(), Some(CodeBreakEvent::Won { attempts: 1, .. })));
//! ```
//!
//! ```rust
//! use puzzle_pair::core::{Cell, Grid};
//! use puzzle_pair::wordsearch::WordSearchEngine;
//!
//! let grid = Grid::from_rows(&["CAT", "DOG", "EMU"]).unwrap();
//! let mut game = WordSearchEngine::from_parts(grid, vec!["cat".into()]);
//!
//! game.begin_selection(Cell::new(0, 0));
//! game.extend_selection(Cell::new(0, 2));
//! game.end_selection();
//! assert!(game.is_completed());
//! ```

// Core domain types
pub mod core;

// Game engines
pub mod codebreak;
pub mod wordsearch;

// Theme catalog
pub mod themes;

// Timer and persistence
pub mod stats;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

// Tracing setup
pub mod logging;
