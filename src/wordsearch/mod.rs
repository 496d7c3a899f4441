//! Word search game
//!
//! Find a theme's words hidden in a letter grid, in any of eight directions.

mod engine;
pub mod generator;

pub use engine::{FoundWord, WordSearchEngine, WordSearchError, WordSearchEvent};
pub use generator::{
    GRID_SIZE, GenerationReport, GeneratorConfig, PLACEMENT_ATTEMPTS, Placement, Puzzle,
    build_puzzle, generate_puzzle,
};
