use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Marker used by Mazebot maps for impassable cells.
pub const WALL_MARKER: char = 'X';

/// Zero-indexed `(row, col)` position within a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shift by a signed offset, returning `None` when either axis would go negative.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Open,
    Wall,
}

impl CellState {
    /// Classify a single-character map marker. Only [`WALL_MARKER`] blocks movement.
    pub fn from_marker(marker: char) -> Self {
        if marker == WALL_MARKER {
            CellState::Wall
        } else {
            CellState::Open
        }
    }
}

/// Neighbour offsets in the fixed East, West, South, North order.
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Read-only rectangular maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<CellState>>,
    cols: usize,
}

impl Grid {
    /// Build a grid from rows of cell states, rejecting ragged input.
    pub fn new(cells: Vec<Vec<CellState>>) -> Result<Self> {
        let cols = cells.first().map(Vec::len).unwrap_or(0);
        if let Some((row, found)) = cells
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != cols)
            .map(|(idx, row)| (idx, row.len()))
        {
            return Err(Error::InvalidShape {
                row,
                expected: cols,
                found,
            });
        }

        Ok(Self { cells, cols })
    }

    /// Build a grid from a Mazebot map, where each cell is a one-character string.
    ///
    /// Empty strings count as open cells.
    pub fn from_markers<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self> {
        let cells = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|marker| {
                        let marker = marker.as_ref().chars().next().unwrap_or(' ');
                        CellState::from_marker(marker)
                    })
                    .collect()
            })
            .collect();
        Self::new(cells)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, coordinate: Coordinate) -> bool {
        coordinate.row < self.rows() && coordinate.col < self.cols
    }

    /// `true` when the coordinate is inside the grid and not a wall.
    pub fn is_open(&self, coordinate: Coordinate) -> bool {
        self.cell(coordinate) == Some(CellState::Open)
    }

    pub fn cell(&self, coordinate: Coordinate) -> Option<CellState> {
        self.cells
            .get(coordinate.row)
            .and_then(|row| row.get(coordinate.col))
            .copied()
    }

    /// Open, in-bounds axis neighbours of `coordinate`, ordered East, West, South, North.
    pub fn neighbors(&self, coordinate: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |(d_row, d_col)| coordinate.offset(d_row, d_col))
            .filter(move |next| self.is_open(*next))
    }
}

impl FromStr for Grid {
    type Err = Error;

    /// Parse one row per line, one cell per character. A single trailing
    /// newline is allowed; any other empty line is a zero-length row.
    fn from_str(s: &str) -> Result<Self> {
        let cells = s
            .lines()
            .map(|line| line.chars().map(CellState::from_marker).collect())
            .collect();
        Self::new(cells)
    }
}
