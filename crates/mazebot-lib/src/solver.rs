use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use tracing::info;

use crate::codec::encode;
use crate::error::Result;
use crate::grid::Coordinate;
use crate::maze::Maze;
use crate::path::{find_path_with, Path, QueueStrategy, SearchOptions};

/// Solved maze ready to be printed or submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub name: String,
    pub maze_path: String,
    pub queue: QueueStrategy,
    pub start: Coordinate,
    pub goal: Coordinate,
    pub path: Path,
    /// Compass moves as an `NSEW` string.
    pub directions: String,
    #[serde(rename = "elapsed_ns", serialize_with = "serialize_nanos")]
    pub elapsed: Duration,
}

impl Solution {
    pub fn move_count(&self) -> usize {
        self.directions.len()
    }
}

fn serialize_nanos<S: Serializer>(
    elapsed: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
}

/// Solve a Mazebot maze, converting its `[x, y]` positions and timing the work.
pub fn solve_maze(maze: &Maze, options: &SearchOptions) -> Result<Solution> {
    let started = Instant::now();

    let grid = maze.grid()?;
    let start = maze.start();
    let goal = maze.goal();
    let path = find_path_with(&grid, start, goal, options)?;
    let directions = encode(&path.directions()?);

    let elapsed = started.elapsed();
    info!(
        name = %maze.name,
        rows = grid.rows(),
        cols = grid.cols(),
        moves = directions.len(),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "solved maze"
    );

    Ok(Solution {
        name: maze.name.clone(),
        maze_path: maze.maze_path.clone(),
        queue: options.queue,
        start,
        goal,
        path,
        directions,
        elapsed,
    })
}
