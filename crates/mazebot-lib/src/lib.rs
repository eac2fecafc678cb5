//! Mazebot library entry points.
//!
//! This crate models Mazebot grid mazes, finds shortest paths through them
//! with A* over a pairing heap, and encodes the result as compass directions.
//! It also carries the collaborators the CLI needs: a local maze store and a
//! blocking client for the Mazebot API. Higher-level consumers should only
//! depend on the items exported here.

pub mod api;
pub mod codec;
pub mod error;
pub mod grid;
pub mod heap;
pub mod maze;
pub mod path;
pub mod solver;
pub mod store;

pub use api::{
    Certificate, MazebotClient, RandomMazeParams, SubmissionOutcome, SubmissionResponse,
};
pub use codec::{encode, parse_directions, replay, to_directions, Direction};
pub use error::{Endpoint, Error, Result};
pub use grid::{CellState, Coordinate, Grid};
pub use heap::{PairingHeap, Priority};
pub use maze::Maze;
pub use path::{find_path, find_path_with, manhattan, Path, QueueStrategy, SearchOptions};
pub use solver::{solve_maze, Solution};
pub use store::{default_maze_dir, MazeStore};
