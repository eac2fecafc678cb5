//! Common test utilities and fixture helpers.
//!
//! Provides an independent breadth-first search used as the reference for
//! path lengths, seeded random grid generation, and fixture paths.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

use mazebot_lib::{CellState, Coordinate, Grid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Path to the maze fixtures shared with the CLI tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/mazes")
}

/// Shortest number of moves from `start` to `goal`, or `None` when unreachable.
#[allow(dead_code)]
pub fn bfs_distance(grid: &Grid, start: Coordinate, goal: Coordinate) -> Option<usize> {
    let mut distance: HashMap<Coordinate, usize> = HashMap::new();
    let mut queue = VecDeque::new();
    distance.insert(start, 0);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let here = distance[&current];
        if current == goal {
            return Some(here);
        }
        for next in grid.neighbors(current) {
            if !distance.contains_key(&next) {
                distance.insert(next, here + 1);
                queue.push_back(next);
            }
        }
    }

    None
}

/// Random `rows x cols` grid where each cell is a wall with probability `wall_chance`.
#[allow(dead_code)]
pub fn random_grid(rng: &mut StdRng, rows: usize, cols: usize, wall_chance: f64) -> Grid {
    let cells = (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| {
                    if rng.random_bool(wall_chance) {
                        CellState::Wall
                    } else {
                        CellState::Open
                    }
                })
                .collect()
        })
        .collect();
    Grid::new(cells).expect("generated grid is rectangular")
}

/// Pick a random open cell, if the grid has any.
#[allow(dead_code)]
pub fn random_open_cell(rng: &mut StdRng, grid: &Grid) -> Option<Coordinate> {
    let open: Vec<Coordinate> = (0..grid.rows())
        .flat_map(|row| (0..grid.cols()).map(move |col| Coordinate::new(row, col)))
        .filter(|c| grid.is_open(*c))
        .collect();
    if open.is_empty() {
        return None;
    }
    Some(open[rng.random_range(0..open.len())])
}

#[allow(dead_code)]
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
