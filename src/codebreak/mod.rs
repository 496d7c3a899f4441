//! Code-breaking game (Mastermind style)
//!
//! Guess a hidden 4-peg code over six colors within ten attempts.

mod engine;

pub use engine::{CodeBreakEngine, CodeBreakEvent, GameState, GuessRecord, MAX_ATTEMPTS};
