//! Word search puzzle generation
//!
//! Picks a theme, places each word by random trial in one of the eight
//! directions (crossings on equal letters allowed), then fills the rest of the
//! grid with random letters.

use crate::core::{Cell, Direction, Grid};
use crate::themes::Theme;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, warn};

/// Default grid height and width
pub const GRID_SIZE: usize = 15;

/// Random placements tried per word before it is skipped
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Grid dimensions and placement budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub rows: usize,
    pub cols: usize,
    pub placement_attempts: usize,
}

impl GeneratorConfig {
    /// Square grid with the default placement budget
    #[must_use]
    pub const fn square(size: usize) -> Self {
        Self {
            rows: size,
            cols: size,
            placement_attempts: PLACEMENT_ATTEMPTS,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::square(GRID_SIZE)
    }
}

/// Where a word was written into the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub start: Cell,
    pub direction: Direction,
}

impl Placement {
    /// Cells covered by the word, first letter first
    #[must_use]
    pub fn cells(&self) -> Vec<Cell> {
        (0..self.word.len())
            .filter_map(|i| self.start.step(self.direction, i))
            .collect()
    }
}

/// Outcome of placing a theme's words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub theme: String,
    pub placed: Vec<Placement>,
    /// Words that found no valid spot within the placement budget
    pub skipped: Vec<String>,
}

impl GenerationReport {
    #[must_use]
    pub fn all_placed(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// A generated grid with its placement report
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub grid: Grid,
    pub report: GenerationReport,
}

impl Puzzle {
    /// Words that can actually be found in the grid
    #[must_use]
    pub fn words(&self) -> Vec<String> {
        self.report.placed.iter().map(|p| p.word.clone()).collect()
    }
}

/// Partially filled grid used during placement
struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Option<u8>>,
}

impl Board {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        (cell.row < self.rows && cell.col < self.cols).then_some(cell.row * self.cols + cell.col)
    }

    /// Every letter in bounds, on an empty cell or one already holding that letter
    fn can_place(&self, word: &[u8], start: Cell, direction: Direction) -> bool {
        word.iter().enumerate().all(|(i, &letter)| {
            start
                .step(direction, i)
                .and_then(|cell| self.index(cell))
                .is_some_and(|idx| self.cells[idx].is_none_or(|existing| existing == letter))
        })
    }

    fn place(&mut self, word: &[u8], start: Cell, direction: Direction) {
        for (i, &letter) in word.iter().enumerate() {
            if let Some(idx) = start.step(direction, i).and_then(|cell| self.index(cell)) {
                self.cells[idx] = Some(letter);
            }
        }
    }

    fn try_place<R: Rng + ?Sized>(
        &mut self,
        word: &str,
        attempts: usize,
        rng: &mut R,
    ) -> Option<Placement> {
        let bytes = word.as_bytes();
        for attempt in 0..attempts {
            let direction = *Direction::ALL.choose(rng)?;
            let start = Cell::new(rng.random_range(0..self.rows), rng.random_range(0..self.cols));

            if self.can_place(bytes, start, direction) {
                self.place(bytes, start, direction);
                debug!(word, %start, ?direction, attempt, "placed word");
                return Some(Placement {
                    word: word.to_string(),
                    start,
                    direction,
                });
            }
        }
        None
    }

    fn fill<R: Rng + ?Sized>(self, rng: &mut R) -> Grid {
        let letters = self
            .cells
            .into_iter()
            .map(|cell| cell.unwrap_or_else(|| b'A' + rng.random_range(0..26u8)))
            .collect();
        Grid::from_letters(self.rows, self.cols, letters)
    }
}

/// Build a puzzle from one theme
///
/// # Panics
/// Panics if the configured grid has zero rows or columns.
pub fn build_puzzle<R: Rng + ?Sized>(theme: &Theme, config: &GeneratorConfig, rng: &mut R) -> Puzzle {
    assert!(config.rows > 0 && config.cols > 0, "Grid must not be empty");

    let mut board = Board::new(config.rows, config.cols);
    let mut placed = Vec::new();
    let mut skipped = Vec::new();

    for word in theme.words() {
        match board.try_place(word, config.placement_attempts, rng) {
            Some(placement) => placed.push(placement),
            None => {
                warn!(word = %word, theme = theme.name(), "word could not be placed, dropping it");
                skipped.push(word.clone());
            }
        }
    }

    Puzzle {
        grid: board.fill(rng),
        report: GenerationReport {
            theme: theme.name().to_string(),
            placed,
            skipped,
        },
    }
}

/// Pick a theme uniformly at random and build a puzzle from it
///
/// Returns `None` for an empty catalog.
pub fn generate_puzzle<R: Rng + ?Sized>(
    catalog: &[Theme],
    config: &GeneratorConfig,
    rng: &mut R,
) -> Option<Puzzle> {
    let theme = catalog.choose(rng)?;
    debug!(theme = theme.name(), rows = config.rows, cols = config.cols, "generating puzzle");
    Some(build_puzzle(theme, config, rng))
}
