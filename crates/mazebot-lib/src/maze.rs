use std::fs;
use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::{Coordinate, Grid};

/// Maze document as served by the Mazebot API.
///
/// Positions are `[x, y]`, i.e. column first. Fields the solver does not use
/// are kept in `extra` so a cached document round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maze {
    pub name: String,
    pub map: Vec<Vec<String>>,
    pub starting_position: [usize; 2],
    pub ending_position: [usize; 2],
    pub maze_path: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Maze {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &FsPath) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Maze number taken from the `#<digits>` part of the name, e.g. `Maze #1480 (10x10)`.
    pub fn number(&self) -> Result<u64> {
        parse_maze_number(&self.name).ok_or_else(|| Error::InvalidMazeName {
            name: self.name.clone(),
        })
    }

    pub fn grid(&self) -> Result<Grid> {
        Grid::from_markers(&self.map)
    }

    /// Starting cell as `(row, col)`.
    pub fn start(&self) -> Coordinate {
        position_to_coordinate(self.starting_position)
    }

    /// Ending cell as `(row, col)`.
    pub fn goal(&self) -> Coordinate {
        position_to_coordinate(self.ending_position)
    }
}

fn position_to_coordinate([x, y]: [usize; 2]) -> Coordinate {
    Coordinate::new(y, x)
}

fn parse_maze_number(name: &str) -> Option<u64> {
    let (_, rest) = name.split_once('#')?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
