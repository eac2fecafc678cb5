//! Mazebot CLI library.
//!
//! Command handlers and output formatting for the `mazebot` binary. Argument
//! structs live here so handlers can be exercised without going through
//! `main`.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use mazebot_lib::QueueStrategy;

pub mod commands;
pub mod output;

/// Open-set implementation selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum QueueArg {
    /// Pairing heap with decrease-key.
    #[default]
    PairingHeap,
    /// Binary heap with lazy reinsertion.
    BinaryHeap,
}

impl From<QueueArg> for QueueStrategy {
    fn from(value: QueueArg) -> Self {
        match value {
            QueueArg::PairingHeap => QueueStrategy::PairingHeap,
            QueueArg::BinaryHeap => QueueStrategy::BinaryHeap,
        }
    }
}

/// Arguments for `mazebot single`.
#[derive(Args, Debug, Clone)]
pub struct SingleArgs {
    /// Solve the cached maze with this number instead of fetching one.
    #[arg(long, value_name = "NUMBER")]
    pub local: Option<u64>,

    /// Smallest maze size requested from the API.
    #[arg(long, default_value_t = 200)]
    pub min_size: u32,

    /// Largest maze size requested from the API.
    #[arg(long, default_value_t = 200)]
    pub max_size: u32,

    /// Do not cache fetched mazes.
    #[arg(long)]
    pub no_save: bool,

    /// Solve without posting the solution back.
    #[arg(long)]
    pub no_submit: bool,
}

/// Arguments for `mazebot race`.
#[derive(Args, Debug, Clone)]
pub struct RaceArgs {
    /// GitHub login the race is registered under.
    #[arg(long)]
    pub login: String,

    /// File the completion certificate is appended to.
    #[arg(long, default_value = "completion-certs.txt")]
    pub certs: PathBuf,
}

/// Arguments for `mazebot solve`.
#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    /// Maze JSON document to solve.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}
