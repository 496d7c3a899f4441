//! Core domain types for both puzzles
//!
//! This module contains the fundamental domain types with no I/O and no randomness.
//! All types here are pure and testable.

mod feedback;
mod grid;
mod symbol;

pub use feedback::{CODE_LENGTH, Code, Feedback};
pub use grid::{Cell, Direction, Grid, GridError, gcd};
pub use symbol::{Symbol, SymbolError};
