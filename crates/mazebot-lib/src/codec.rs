//! Conversion between coordinate paths and compass directions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::Coordinate;

/// Single grid move. North is towards row zero, West towards column zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "W")]
    West,
}

impl Direction {
    /// `(d_row, d_col)` offset of one step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    pub fn from_delta(d_row: isize, d_col: isize) -> Option<Self> {
        match (d_row, d_col) {
            (-1, 0) => Some(Direction::North),
            (1, 0) => Some(Direction::South),
            (0, 1) => Some(Direction::East),
            (0, -1) => Some(Direction::West),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Direction::North),
            'S' => Some(Direction::South),
            'E' => Some(Direction::East),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Translate consecutive path coordinates into directions.
///
/// Fails on any pair that is not exactly one axis step apart.
pub fn to_directions(path: &[Coordinate]) -> Result<Vec<Direction>> {
    path.windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let (from, to) = (pair[0], pair[1]);
            signed_delta(from, to)
                .and_then(|(d_row, d_col)| Direction::from_delta(d_row, d_col))
                .ok_or(Error::InvalidPath { index, from, to })
        })
        .collect()
}

fn signed_delta(from: Coordinate, to: Coordinate) -> Option<(isize, isize)> {
    let d_row = isize::try_from(to.row).ok()? - isize::try_from(from.row).ok()?;
    let d_col = isize::try_from(to.col).ok()? - isize::try_from(from.col).ok()?;
    Some((d_row, d_col))
}

/// Concatenate directions into the `NSEW` string the Mazebot API expects.
pub fn encode(directions: &[Direction]) -> String {
    directions.iter().map(|d| d.as_char()).collect()
}

/// Parse a direction string such as `"ESSE"`.
pub fn parse_directions(s: &str) -> Result<Vec<Direction>> {
    s.chars()
        .enumerate()
        .map(|(index, found)| {
            Direction::from_char(found).ok_or(Error::InvalidDirection { index, found })
        })
        .collect()
}

/// Walk `directions` from `start`, returning every visited coordinate including `start`.
pub fn replay(start: Coordinate, directions: &[Direction]) -> Result<Vec<Coordinate>> {
    let mut path = Vec::with_capacity(directions.len() + 1);
    path.push(start);
    let mut current = start;
    for (index, direction) in directions.iter().enumerate() {
        let (d_row, d_col) = direction.delta();
        current = current
            .offset(d_row, d_col)
            .ok_or(Error::StepOutOfRange {
                index,
                from: current,
            })?;
        path.push(current);
    }
    Ok(path)
}
