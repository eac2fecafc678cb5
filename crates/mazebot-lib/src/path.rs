use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::codec::{to_directions, Direction};
use crate::error::{Endpoint, Error, Result};
use crate::grid::{Coordinate, Grid};
use crate::heap::PairingHeap;

/// Open-set implementation used by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStrategy {
    /// Pairing heap with decrease-key.
    #[default]
    PairingHeap,
    /// `std` binary heap with reinsertion; superseded entries are skipped on pop.
    BinaryHeap,
}

impl fmt::Display for QueueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            QueueStrategy::PairingHeap => "pairing_heap",
            QueueStrategy::BinaryHeap => "binary_heap",
        };
        f.write_str(value)
    }
}

/// Tuning knobs for [`find_path_with`]. None of them change the path length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    pub queue: QueueStrategy,
    /// Let pairing-heap decrease-key skip subtrees that cannot hold the target.
    pub prune_decrease_key: bool,
}

/// Ordered coordinates from start to goal inclusive.
///
/// An empty path means nothing was computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Path {
    steps: Vec<Coordinate>,
}

impl Path {
    pub fn new(steps: Vec<Coordinate>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Coordinate] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Coordinate> {
        self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of moves in the path.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.steps.first().copied()
    }

    pub fn goal(&self) -> Option<Coordinate> {
        self.steps.last().copied()
    }

    pub fn directions(&self) -> Result<Vec<Direction>> {
        to_directions(&self.steps)
    }
}

/// Manhattan distance heuristic; admissible and consistent on a 4-connected unit grid.
pub fn manhattan(from: Coordinate, goal: Coordinate) -> u32 {
    u32::try_from(from.manhattan(goal)).unwrap_or(u32::MAX)
}

/// Find a shortest path between `start` and `goal` with default options.
pub fn find_path(grid: &Grid, start: Coordinate, goal: Coordinate) -> Result<Path> {
    find_path_with(grid, start, goal, &SearchOptions::default())
}

/// Run A* from `start` to `goal`.
///
/// Inputs are validated before searching: both endpoints must be inside the
/// grid and open. A goal that cannot be reached yields [`Error::Unreachable`].
pub fn find_path_with(
    grid: &Grid,
    start: Coordinate,
    goal: Coordinate,
    options: &SearchOptions,
) -> Result<Path> {
    validate_endpoint(grid, Endpoint::Start, start)?;
    validate_endpoint(grid, Endpoint::Goal, goal)?;

    if start == goal {
        return Ok(Path::new(vec![start]));
    }

    match options.queue {
        QueueStrategy::PairingHeap => {
            let heap = if options.prune_decrease_key {
                PairingHeap::with_pruned_search()
            } else {
                PairingHeap::new()
            };
            a_star(grid, start, goal, heap)
        }
        QueueStrategy::BinaryHeap => a_star(grid, start, goal, LazyQueue::default()),
    }
}

fn validate_endpoint(grid: &Grid, endpoint: Endpoint, coordinate: Coordinate) -> Result<()> {
    if !grid.in_bounds(coordinate) {
        return Err(Error::OutOfBounds {
            endpoint,
            coordinate,
            rows: grid.rows(),
            cols: grid.cols(),
        });
    }
    if !grid.is_open(coordinate) {
        return Err(Error::WallStartOrGoal {
            endpoint,
            coordinate,
        });
    }
    Ok(())
}

/// Operations the search needs from its open set.
trait OpenSet {
    fn push(&mut self, node: Coordinate, f_score: u32);
    fn pop(&mut self) -> Option<Coordinate>;
    fn contains(&self, node: Coordinate) -> bool;
    /// Record that `node` now has the lower estimate `f_score`.
    fn improve(&mut self, node: Coordinate, f_score: u32);
}

impl OpenSet for PairingHeap<Coordinate, u32> {
    fn push(&mut self, node: Coordinate, f_score: u32) {
        self.insert(node, f_score);
    }

    fn pop(&mut self) -> Option<Coordinate> {
        self.pop_min().map(|(node, _)| node)
    }

    fn contains(&self, node: Coordinate) -> bool {
        PairingHeap::contains(self, &node)
    }

    fn improve(&mut self, node: Coordinate, f_score: u32) {
        self.decrease_key(&node, f_score);
    }
}

/// Binary heap that tolerates duplicate entries; only the entry matching a
/// node's latest estimate is honoured.
#[derive(Debug, Default)]
struct LazyQueue {
    heap: BinaryHeap<Reverse<QueueEntry>>,
    live: HashMap<Coordinate, u32>,
    sequence: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    f_score: u32,
    // Later pushes win ties, matching the pairing heap.
    sequence: Reverse<u64>,
    node: Coordinate,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score
            .cmp(&other.f_score)
            .then_with(|| self.sequence.cmp(&other.sequence))
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl OpenSet for LazyQueue {
    fn push(&mut self, node: Coordinate, f_score: u32) {
        self.sequence += 1;
        self.live.insert(node, f_score);
        self.heap.push(Reverse(QueueEntry {
            f_score,
            sequence: Reverse(self.sequence),
            node,
        }));
    }

    fn pop(&mut self) -> Option<Coordinate> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            if self.live.get(&entry.node) == Some(&entry.f_score) {
                self.live.remove(&entry.node);
                return Some(entry.node);
            }
        }
        None
    }

    fn contains(&self, node: Coordinate) -> bool {
        self.live.contains_key(&node)
    }

    fn improve(&mut self, node: Coordinate, f_score: u32) {
        self.push(node, f_score);
    }
}

/// Per-search bookkeeping; dropped when the search returns.
#[derive(Debug, Default)]
struct SearchLedger {
    g_score: HashMap<Coordinate, u32>,
    f_score: HashMap<Coordinate, u32>,
    came_from: HashMap<Coordinate, Coordinate>,
    closed: HashSet<Coordinate>,
}

impl SearchLedger {
    fn record(&mut self, node: Coordinate, parent: Option<Coordinate>, g: u32, goal: Coordinate) {
        self.g_score.insert(node, g);
        self.f_score.insert(node, g.saturating_add(manhattan(node, goal)));
        if let Some(parent) = parent {
            self.came_from.insert(node, parent);
        }
    }

    fn reconstruct(&self, start: Coordinate, goal: Coordinate) -> Path {
        let mut steps = vec![goal];
        let mut current = goal;
        while current != start {
            let Some(&parent) = self.came_from.get(&current) else {
                break;
            };
            steps.push(parent);
            current = parent;
        }
        steps.reverse();
        Path::new(steps)
    }
}

fn a_star<Q: OpenSet>(grid: &Grid, start: Coordinate, goal: Coordinate, mut open: Q) -> Result<Path> {
    let mut ledger = SearchLedger::default();
    ledger.record(start, None, 0, goal);
    open.push(start, manhattan(start, goal));

    while let Some(current) = open.pop() {
        if current == goal {
            let path = ledger.reconstruct(start, goal);
            debug!(
                start = %start,
                goal = %goal,
                hops = path.hop_count(),
                expanded = ledger.closed.len(),
                "path found"
            );
            return Ok(path);
        }

        ledger.closed.insert(current);
        let current_g = ledger.g_score.get(&current).copied().unwrap_or(u32::MAX);

        for next in grid.neighbors(current) {
            if ledger.closed.contains(&next) {
                continue;
            }

            // Moves are single grid steps.
            let tentative_g = current_g.saturating_add(1);
            let estimate = tentative_g.saturating_add(manhattan(next, goal));

            if !open.contains(next) {
                open.push(next, estimate);
            } else if tentative_g >= ledger.g_score.get(&next).copied().unwrap_or(u32::MAX) {
                continue;
            } else {
                open.improve(next, estimate);
            }

            ledger.record(next, Some(current), tentative_g, goal);
        }
    }

    debug!(
        start = %start,
        goal = %goal,
        expanded = ledger.closed.len(),
        "search exhausted without reaching goal"
    );
    Err(Error::Unreachable { start, goal })
}
