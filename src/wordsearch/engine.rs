//! Word search game engine
//!
//! Owns the generated grid, the target words and the player's drag selection.
//! Operations are synchronous and return events for the UI to render.

use super::generator::{GenerationReport, GeneratorConfig, generate_puzzle};
use crate::core::{Cell, Direction, Grid};
use crate::stats::{KeyValueStore, StoreError, Stopwatch, Ticker, keys};
use crate::themes::Theme;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashSet;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

/// A matched target word and the cells it occupies, first letter first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundWord {
    pub word: String,
    pub cells: Vec<Cell>,
}

/// State changes reported back to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSearchEvent {
    WordFound {
        word: String,
        cells: Vec<Cell>,
        found: usize,
        total: usize,
    },
    Completed {
        total: usize,
        elapsed_seconds: u64,
    },
}

/// Error type for engine construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSearchError {
    EmptyCatalog,
}

impl fmt::Display for WordSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "Theme catalog must contain at least one theme"),
        }
    }
}

impl std::error::Error for WordSearchError {}

/// Word search game
pub struct WordSearchEngine {
    rng: StdRng,
    catalog: Vec<Theme>,
    config: GeneratorConfig,
    grid: Grid,
    words: Vec<String>,
    report: Option<GenerationReport>,
    found: Vec<FoundWord>,
    found_cells: FxHashSet<Cell>,
    selection: Vec<Cell>,
    selecting: bool,
    completed: bool,
    stopwatch: Stopwatch,
    ticker: Ticker,
}

impl WordSearchEngine {
    /// Start a game on the default 15x15 grid with an OS-seeded generator
    ///
    /// # Errors
    /// Returns `WordSearchError::EmptyCatalog` if `catalog` is empty.
    pub fn new(catalog: Vec<Theme>) -> Result<Self, WordSearchError> {
        Self::with_config(catalog, GeneratorConfig::default(), StdRng::from_os_rng())
    }

    /// Start a reproducible game on the default grid
    ///
    /// # Errors
    /// Returns `WordSearchError::EmptyCatalog` if `catalog` is empty.
    pub fn with_seed(catalog: Vec<Theme>, seed: u64) -> Result<Self, WordSearchError> {
        Self::with_config(catalog, GeneratorConfig::default(), StdRng::seed_from_u64(seed))
    }

    /// Start a game with explicit grid settings and generator
    ///
    /// # Errors
    /// Returns `WordSearchError::EmptyCatalog` if `catalog` is empty.
    pub fn with_config(
        catalog: Vec<Theme>,
        config: GeneratorConfig,
        rng: StdRng,
    ) -> Result<Self, WordSearchError> {
        if catalog.is_empty() {
            return Err(WordSearchError::EmptyCatalog);
        }

        let placeholder = Grid::from_letters(1, 1, vec![b'A']);
        let mut engine = Self::blank(placeholder, Vec::new(), rng);
        engine.config = config;
        engine.catalog = catalog;
        engine.reset();
        Ok(engine)
    }

    /// Play on a prepared grid with a fixed word list
    ///
    /// Words are normalized to uppercase and repeats dropped. An empty list is
    /// complete from the start. `reset` on such an engine keeps the grid and
    /// clears progress, since there is no catalog to draw from.
    #[must_use]
    pub fn from_parts(grid: Grid, words: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(words.len());
        for word in words {
            let word = word.to_ascii_uppercase();
            if !unique.contains(&word) {
                unique.push(word);
            }
        }
        let mut engine = Self::blank(grid, unique, StdRng::seed_from_u64(0));
        engine.clear_progress();
        engine
    }

    fn blank(grid: Grid, words: Vec<String>, rng: StdRng) -> Self {
        Self {
            rng,
            catalog: Vec::new(),
            config: GeneratorConfig::default(),
            grid,
            words,
            report: None,
            found: Vec::new(),
            found_cells: FxHashSet::default(),
            selection: Vec::new(),
            selecting: false,
            completed: false,
            stopwatch: Stopwatch::start(),
            ticker: Ticker::default(),
        }
    }

    /// Generate a new grid from a random theme of `catalog`
    ///
    /// Words that could not be placed are left out of the target list and
    /// listed in the returned report. The timer and ticker start over. An empty
    /// catalog leaves the game as is and returns `None`.
    pub fn generate_puzzle(&mut self, catalog: &[Theme]) -> Option<&GenerationReport> {
        let puzzle = generate_puzzle(catalog, &self.config, &mut self.rng)?;

        info!(
            theme = %puzzle.report.theme,
            placed = puzzle.report.placed.len(),
            skipped = puzzle.report.skipped.len(),
            "new word search"
        );

        self.words = puzzle.words();
        self.grid = puzzle.grid;
        self.report = Some(puzzle.report);
        self.clear_progress();
        self.report.as_ref()
    }

    /// Start a drag at `cell`; ignored outside the grid or once completed
    pub fn begin_selection(&mut self, cell: Cell) {
        if self.completed || !self.grid.contains(cell) {
            return;
        }
        self.selection = vec![cell];
        self.selecting = true;
    }

    /// Re-aim the drag toward `cell`
    ///
    /// The selection becomes the run from the start cell to the grid edge in
    /// the direction of `cell`. Zero or off-line displacements leave it unchanged.
    pub fn extend_selection(&mut self, cell: Cell) {
        if !self.selecting {
            return;
        }
        let Some(&start) = self.selection.first() else {
            return;
        };
        if let Some(direction) = Direction::between(start, cell) {
            self.selection = self.grid.run_to_edge(start, direction);
        }
    }

    /// Re-aim the drag toward `cell`, stopping at `cell`
    ///
    /// Same direction rule as [`extend_selection`](Self::extend_selection),
    /// but the run ends at the pointer instead of the grid edge. Cells outside
    /// the grid are ignored.
    pub fn extend_selection_to(&mut self, cell: Cell) {
        if !self.selecting || !self.grid.contains(cell) {
            return;
        }
        let Some(&start) = self.selection.first() else {
            return;
        };
        if let Some(direction) = Direction::between(start, cell) {
            let len = start.row.abs_diff(cell.row).max(start.col.abs_diff(cell.col)) + 1;
            self.selection = self.grid.run_to_edge(start, direction);
            self.selection.truncate(len);
        }
    }

    /// Finish the drag and check the selected letters against the remaining words
    ///
    /// The forward reading is tried before the reversed one. The selection is
    /// cleared whatever the outcome.
    pub fn end_selection(&mut self) -> Vec<WordSearchEvent> {
        if !self.selecting {
            return Vec::new();
        }
        self.selecting = false;
        let mut cells = std::mem::take(&mut self.selection);
        if cells.len() <= 1 {
            return Vec::new();
        }

        let forward = self.grid.read_cells(&cells);
        let reversed: String = forward.chars().rev().collect();

        let word = if self.is_target(&forward) {
            forward
        } else if self.is_target(&reversed) {
            cells.reverse();
            reversed
        } else {
            return Vec::new();
        };

        self.found_cells.extend(cells.iter().copied());
        self.found.push(FoundWord {
            word: word.clone(),
            cells: cells.clone(),
        });

        let mut events = vec![WordSearchEvent::WordFound {
            word,
            cells,
            found: self.found.len(),
            total: self.words.len(),
        }];

        if self.found.len() == self.words.len() {
            self.completed = true;
            self.stopwatch.stop();
            self.ticker.cancel();
            info!(words = self.words.len(), seconds = self.elapsed_seconds(), "word search completed");
            events.push(WordSearchEvent::Completed {
                total: self.words.len(),
                elapsed_seconds: self.elapsed_seconds(),
            });
        }

        events
    }

    /// Persist the found/total counts for the landing page
    ///
    /// # Errors
    /// Returns `StoreError` if the store rejects a write.
    pub fn record_progress(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(keys::WORD_SEARCH_FOUND, &self.found.len().to_string())?;
        store.set(keys::WORD_SEARCH_TOTAL, &self.words.len().to_string())
    }

    /// Throw away the current puzzle and start a new one
    pub fn reset(&mut self) {
        self.ticker.cancel();
        let catalog = std::mem::take(&mut self.catalog);
        if self.generate_puzzle(&catalog).is_none() {
            self.clear_progress();
        }
        self.catalog = catalog;
    }

    /// Report whether a display refresh is due
    pub fn poll_tick(&mut self, now: Instant) -> bool {
        self.ticker.poll(now)
    }

    /// Time until the next display refresh, `None` once completed
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_next(now)
    }

    /// Whole seconds since the puzzle started, frozen once completed
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.stopwatch.elapsed_seconds()
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Target words in placement order
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn found_words(&self) -> &[FoundWord] {
        &self.found
    }

    #[must_use]
    pub fn is_found(&self, word: &str) -> bool {
        self.found.iter().any(|f| f.word == word)
    }

    /// Check if `cell` is part of any found word
    #[must_use]
    pub fn is_found_cell(&self, cell: Cell) -> bool {
        self.found_cells.contains(&cell)
    }

    #[must_use]
    pub fn selection(&self) -> &[Cell] {
        &self.selection
    }

    #[must_use]
    pub const fn is_selecting(&self) -> bool {
        self.selecting
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Placement report of the last generated puzzle, `None` for prepared grids
    #[must_use]
    pub const fn report(&self) -> Option<&GenerationReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub const fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    #[must_use]
    pub const fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    fn is_target(&self, candidate: &str) -> bool {
        self.words.iter().any(|w| w == candidate) && !self.is_found(candidate)
    }

    fn clear_progress(&mut self) {
        self.found.clear();
        self.found_cells.clear();
        self.selection.clear();
        self.selecting = false;
        self.completed = false;
        self.stopwatch = Stopwatch::start();
        self.ticker.restart(Instant::now());

        // Nothing to find: already complete
        if self.words.is_empty() {
            self.completed = true;
            self.stopwatch.stop();
            self.ticker.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MemoryStore;
    use crate::themes::builtin_catalog;

    fn small_engine() -> WordSearchEngine {
        // Row 0 reads CAT then padding; column 4 reads DOG upward from the bottom
        let grid = Grid::from_rows(&["CATXG", "QWEZO", "RTYUD", "PLKJH", "MNBVC"]).unwrap();
        WordSearchEngine::from_parts(grid, vec!["tac".to_string(), "god".to_string()])
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(
            WordSearchEngine::with_seed(Vec::new(), 1).err(),
            Some(WordSearchError::EmptyCatalog)
        );
    }

    #[test]
    fn generated_game_lists_only_placed_words() {
        let engine = WordSearchEngine::with_seed(builtin_catalog(), 9).unwrap();
        let report = engine.report().unwrap();

        assert_eq!(engine.words().len(), report.placed.len());
        for placement in &report.placed {
            assert!(engine.words().contains(&placement.word));
        }
        for skipped in &report.skipped {
            assert!(!engine.words().contains(skipped));
        }
        assert_eq!(engine.grid().rows(), 15);
        assert!(engine.ticker().is_running());
    }

    #[test]
    fn selection_runs_to_grid_edge() {
        let mut engine = small_engine();
        engine.begin_selection(Cell::new(0, 0));
        engine.extend_selection(Cell::new(0, 2));

        assert_eq!(engine.selection().len(), 5);
        assert_eq!(engine.grid().read_cells(engine.selection()), "CATXG");
    }

    #[test]
    fn pointer_selection_stops_at_pointer() {
        let mut engine = small_engine();
        engine.begin_selection(Cell::new(1, 1));
        engine.extend_selection_to(Cell::new(3, 3));

        assert_eq!(
            engine.selection(),
            &[Cell::new(1, 1), Cell::new(2, 2), Cell::new(3, 3)]
        );

        // Off-line and out-of-grid pointers keep the last run
        engine.extend_selection_to(Cell::new(2, 3));
        engine.extend_selection_to(Cell::new(9, 9));
        assert_eq!(engine.selection().len(), 3);
    }

    #[test]
    fn pointer_selection_finds_interior_word() {
        let grid = Grid::from_rows(&["XXXXX", "XDOGX", "XXXXX"]).unwrap();
        let mut engine = WordSearchEngine::from_parts(grid, vec!["dog".to_string()]);
        engine.begin_selection(Cell::new(1, 3));
        engine.extend_selection_to(Cell::new(1, 1));

        let events = engine.end_selection();
        assert!(matches!(events.first(), Some(WordSearchEvent::WordFound { word, .. }) if word == "DOG"));
        assert!(engine.is_completed());
    }

    #[test]
    fn zero_and_off_line_extension_keep_selection() {
        let mut engine = small_engine();
        engine.begin_selection(Cell::new(2, 2));
        engine.extend_selection(Cell::new(2, 2));
        assert_eq!(engine.selection(), &[Cell::new(2, 2)]);

        engine.extend_selection(Cell::new(2, 4));
        let before = engine.selection().to_vec();
        // (4, 3) is two down and one right of the start: off-line
        engine.extend_selection(Cell::new(4, 3));
        assert_eq!(engine.selection(), before.as_slice());
    }

    #[test]
    fn extend_without_begin_is_ignored() {
        let mut engine = small_engine();
        engine.extend_selection(Cell::new(3, 3));
        assert!(engine.selection().is_empty());
        assert!(engine.end_selection().is_empty());
    }

    #[test]
    fn begin_outside_grid_is_ignored() {
        let mut engine = small_engine();
        engine.begin_selection(Cell::new(9, 9));
        assert!(!engine.is_selecting());
    }

    #[test]
    fn single_cell_selection_never_matches() {
        let grid = Grid::from_rows(&["AB", "CD"]).unwrap();
        let mut engine = WordSearchEngine::from_parts(grid, vec!["A".to_string()]);
        engine.begin_selection(Cell::new(0, 0));
        assert!(engine.end_selection().is_empty());
        assert!(engine.found_words().is_empty());
    }

    #[test]
    fn forward_match_found() {
        // Starting at (0, 2) heading left reads TAC
        let mut engine = small_engine();
        engine.begin_selection(Cell::new(0, 2));
        engine.extend_selection(Cell::new(0, 0));

        let events = engine.end_selection();
        assert_eq!(
            events,
            vec![WordSearchEvent::WordFound {
                word: "TAC".to_string(),
                cells: vec![Cell::new(0, 2), Cell::new(0, 1), Cell::new(0, 0)],
                found: 1,
                total: 2,
            }]
        );
        assert!(engine.is_found("TAC"));
        assert!(engine.selection().is_empty());
        assert!(!engine.is_selecting());
    }

    #[test]
    fn reversed_match_found_with_cells_in_word_order() {
        // Column 4 downward reads GODHC; from (2, 4) upward reads DOG, reversed GOD
        let mut engine = small_engine();
        engine.begin_selection(Cell::new(2, 4));
        engine.extend_selection(Cell::new(0, 4));

        let events = engine.end_selection();
        let Some(WordSearchEvent::WordFound { word, cells, .. }) = events.first() else {
            panic!("expected a found word, got {events:?}");
        };
        assert_eq!(word, "GOD");
        assert_eq!(cells, &vec![Cell::new(0, 4), Cell::new(1, 4), Cell::new(2, 4)]);
        assert!(engine.is_found_cell(Cell::new(1, 4)));
        assert!(!engine.is_found_cell(Cell::new(3, 4)));
    }

    #[test]
    fn word_cannot_be_found_twice() {
        let mut engine = small_engine();
        for _ in 0..2 {
            engine.begin_selection(Cell::new(0, 2));
            engine.extend_selection(Cell::new(0, 0));
            engine.end_selection();
        }
        assert_eq!(engine.found_words().len(), 1);
    }

    #[test]
    fn finding_every_word_completes() {
        let mut engine = small_engine();
        engine.begin_selection(Cell::new(0, 2));
        engine.extend_selection(Cell::new(0, 1));
        engine.end_selection();

        engine.begin_selection(Cell::new(2, 4));
        engine.extend_selection(Cell::new(1, 4));
        let events = engine.end_selection();

        assert!(matches!(
            events.last(),
            Some(WordSearchEvent::Completed { total: 2, .. })
        ));
        assert!(engine.is_completed());
        assert!(engine.stopwatch().is_stopped());
        assert!(!engine.ticker().is_running());

        // No more selections once complete
        engine.begin_selection(Cell::new(0, 0));
        assert!(!engine.is_selecting());
    }

    #[test]
    fn record_progress_writes_counts() {
        let mut engine = small_engine();
        let mut store = MemoryStore::new();
        engine.begin_selection(Cell::new(0, 2));
        engine.extend_selection(Cell::new(0, 0));
        engine.end_selection();

        engine.record_progress(&mut store).unwrap();
        assert_eq!(store.get(keys::WORD_SEARCH_FOUND), Some("1".to_string()));
        assert_eq!(store.get(keys::WORD_SEARCH_TOTAL), Some("2".to_string()));
    }

    #[test]
    fn reset_generates_new_puzzle() {
        let mut engine = WordSearchEngine::with_seed(builtin_catalog(), 21).unwrap();
        let first_grid = engine.grid().clone();
        engine.reset();

        assert_ne!(engine.grid(), &first_grid);
        assert!(engine.found_words().is_empty());
        assert!(!engine.is_completed());
        assert!(engine.ticker().is_running());
    }

    #[test]
    fn reset_prepared_grid_clears_progress() {
        let mut engine = small_engine();
        engine.begin_selection(Cell::new(0, 2));
        engine.extend_selection(Cell::new(0, 0));
        engine.end_selection();

        engine.reset();
        assert!(engine.found_words().is_empty());
        assert_eq!(engine.words().len(), 2);
        assert!(engine.report().is_none());
    }

    fn find_all(engine: &mut WordSearchEngine) {
        let placements = engine.report().unwrap().placed.clone();
        for placement in &placements {
            let cells = placement.cells();
            engine.begin_selection(cells[0]);
            engine.extend_selection_to(cells[cells.len() - 1]);
            engine.end_selection();
        }
    }

    #[test]
    fn repeated_theme_words_still_complete() {
        let catalog = crate::themes::parse_catalog("pets: cat dog cat");
        let mut engine = WordSearchEngine::with_seed(catalog, 4).unwrap();
        assert_eq!(engine.words().len(), 2);

        find_all(&mut engine);
        assert!(engine.is_completed());
    }

    #[test]
    fn prepared_grid_drops_repeated_words() {
        let grid = Grid::from_rows(&["CAT", "XYZ", "QRS"]).unwrap();
        let mut engine = WordSearchEngine::from_parts(
            grid,
            vec!["cat".to_string(), "CAT".to_string()],
        );
        assert_eq!(engine.words(), ["CAT"]);

        engine.begin_selection(Cell::new(0, 0));
        engine.extend_selection_to(Cell::new(0, 2));
        engine.end_selection();
        assert!(engine.is_completed());
    }

    #[test]
    fn generate_puzzle_after_completion_starts_over() {
        let mut engine = small_engine();
        engine.begin_selection(Cell::new(0, 2));
        engine.extend_selection(Cell::new(0, 0));
        engine.end_selection();
        engine.begin_selection(Cell::new(2, 4));
        engine.extend_selection_to(Cell::new(0, 4));
        engine.end_selection();
        assert!(engine.is_completed());
        assert!(!engine.ticker().is_running());

        assert!(engine.generate_puzzle(&builtin_catalog()).is_some());
        assert!(!engine.is_completed());
        assert!(engine.found_words().is_empty());
        assert!(engine.ticker().is_running());
        assert!(!engine.stopwatch().is_stopped());

        find_all(&mut engine);
        assert!(engine.is_completed());
    }

    #[test]
    fn empty_word_list_is_complete() {
        let grid = Grid::from_rows(&["AB", "CD"]).unwrap();
        let mut engine = WordSearchEngine::from_parts(grid, Vec::new());

        assert!(engine.is_completed());
        assert!(engine.stopwatch().is_stopped());
        assert!(!engine.ticker().is_running());

        engine.begin_selection(Cell::new(0, 0));
        assert!(!engine.is_selecting());
    }
}
