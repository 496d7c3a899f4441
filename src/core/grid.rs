//! Letter grid geometry
//!
//! Cells, the eight compass directions, and the filled letter grid shared by
//! puzzle generation and selection.

use std::fmt;

/// A grid position (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell `steps` moves away in `direction`, if it doesn't go below zero
    #[must_use]
    pub fn step(self, direction: Direction, steps: usize) -> Option<Self> {
        let row = self
            .row
            .checked_add_signed(isize::from(direction.dr) * steps as isize)?;
        let col = self
            .col
            .checked_add_signed(isize::from(direction.dc) * steps as isize)?;
        Some(Self { row, col })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the eight unit steps, diagonals included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    dr: i8,
    dc: i8,
}

impl Direction {
    pub const UP_LEFT: Self = Self { dr: -1, dc: -1 };
    pub const UP: Self = Self { dr: -1, dc: 0 };
    pub const UP_RIGHT: Self = Self { dr: -1, dc: 1 };
    pub const LEFT: Self = Self { dr: 0, dc: -1 };
    pub const RIGHT: Self = Self { dr: 0, dc: 1 };
    pub const DOWN_LEFT: Self = Self { dr: 1, dc: -1 };
    pub const DOWN: Self = Self { dr: 1, dc: 0 };
    pub const DOWN_RIGHT: Self = Self { dr: 1, dc: 1 };

    pub const ALL: [Self; 8] = [
        Self::UP_LEFT,
        Self::UP,
        Self::UP_RIGHT,
        Self::LEFT,
        Self::RIGHT,
        Self::DOWN_LEFT,
        Self::DOWN,
        Self::DOWN_RIGHT,
    ];

    /// Build a direction from a raw step; `None` unless it is one of the eight unit steps
    #[must_use]
    pub fn new(dr: isize, dc: isize) -> Option<Self> {
        if (dr, dc) == (0, 0) || !(-1..=1).contains(&dr) || !(-1..=1).contains(&dc) {
            return None;
        }
        Some(Self {
            dr: dr as i8,
            dc: dc as i8,
        })
    }

    /// Direction of the straight line from `from` to `to`
    ///
    /// The displacement is divided by the gcd of its absolute components. A zero
    /// displacement has no direction, and neither does one whose reduced step is
    /// not a unit step (e.g. (4, -2) reduces to (2, -1), which is off-line).
    ///
    /// # Examples
    /// ```
    /// use puzzle_pair::core::{Cell, Direction};
    ///
    /// assert_eq!(Direction::between(Cell::new(0, 0), Cell::new(3, 3)), Some(Direction::DOWN_RIGHT));
    /// assert_eq!(Direction::between(Cell::new(0, 4), Cell::new(4, 2)), None);
    /// ```
    #[must_use]
    pub fn between(from: Cell, to: Cell) -> Option<Self> {
        let dr = to.row as isize - from.row as isize;
        let dc = to.col as isize - from.col as isize;
        if dr == 0 && dc == 0 {
            return None;
        }

        let divisor = gcd(dr.unsigned_abs(), dc.unsigned_abs()) as isize;
        Self::new(dr / divisor, dc / divisor)
    }

    #[inline]
    #[must_use]
    pub const fn dr(self) -> i8 {
        self.dr
    }

    #[inline]
    #[must_use]
    pub const fn dc(self) -> i8 {
        self.dc
    }

    /// Opposite direction
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            dr: -self.dr,
            dc: -self.dc,
        }
    }
}

/// Greatest common divisor (iterative Euclid); `gcd(0, 0) == 0`
#[must_use]
pub const fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Error type for grids built from text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    Empty,
    RaggedRow { row: usize, expected: usize, got: usize },
    InvalidLetter { row: usize, col: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Grid must have at least one row and column"),
            Self::RaggedRow { row, expected, got } => {
                write!(f, "Row {row} has {got} letters, expected {expected}")
            }
            Self::InvalidLetter { row, col } => {
                write!(f, "Cell ({row}, {col}) is not an ASCII letter")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A fully filled grid of uppercase ASCII letters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    letters: Vec<u8>,
}

impl Grid {
    /// Build a grid from letter rows, normalizing to uppercase
    ///
    /// # Errors
    /// Returns `GridError` if the rows are empty, ragged, or contain non-letters.
    ///
    /// # Examples
    /// ```
    /// use puzzle_pair::core::{Cell, Grid};
    ///
    /// let grid = Grid::from_rows(&["cat", "xyz"]).unwrap();
    /// assert_eq!(grid.letter(Cell::new(0, 1)), Some('A'));
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let mut letters = Vec::with_capacity(rows.len() * cols);
        for (row, text) in rows.iter().enumerate() {
            let bytes = text.as_ref().as_bytes();
            if bytes.len() != cols {
                return Err(GridError::RaggedRow {
                    row,
                    expected: cols,
                    got: bytes.len(),
                });
            }
            for (col, &b) in bytes.iter().enumerate() {
                if !b.is_ascii_alphabetic() {
                    return Err(GridError::InvalidLetter { row, col });
                }
                letters.push(b.to_ascii_uppercase());
            }
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            letters,
        })
    }

    /// Build a grid from raw bytes already validated by the generator
    pub(crate) fn from_letters(rows: usize, cols: usize, letters: Vec<u8>) -> Self {
        debug_assert_eq!(letters.len(), rows * cols);
        Self {
            rows,
            cols,
            letters,
        }
    }

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Letter at `cell`, or `None` outside the grid
    #[must_use]
    pub fn letter(&self, cell: Cell) -> Option<char> {
        self.contains(cell)
            .then(|| char::from(self.letters[cell.row * self.cols + cell.col]))
    }

    /// Every cell from `start` stepping in `direction` up to the grid boundary
    ///
    /// Returns an empty run if `start` is outside the grid.
    #[must_use]
    pub fn run_to_edge(&self, start: Cell, direction: Direction) -> Vec<Cell> {
        let mut cells = Vec::new();
        let mut current = Some(start);
        while let Some(cell) = current.filter(|&c| self.contains(c)) {
            cells.push(cell);
            current = cell.step(direction, 1);
        }
        cells
    }

    /// Letters along a path of cells; cells outside the grid are skipped
    #[must_use]
    pub fn read_cells(&self, cells: &[Cell]) -> String {
        cells.iter().filter_map(|&c| self.letter(c)).collect()
    }

    /// `len` letters from `start` in `direction`, or `None` if the run leaves the grid
    #[must_use]
    pub fn read(&self, start: Cell, direction: Direction, len: usize) -> Option<String> {
        (0..len)
            .map(|i| start.step(direction, i).and_then(|c| self.letter(c)))
            .collect()
    }

    /// One row as text, for rendering
    #[must_use]
    pub fn row_text(&self, row: usize) -> Option<&str> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        std::str::from_utf8(&self.letters[start..start + self.cols]).ok()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if let Some(text) = self.row_text(row) {
                writeln!(f, "{text}")?;
            }
        }
        Ok(())
    }
}
