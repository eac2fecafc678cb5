//! `solve <FILE>`: solve a maze document from disk.

use anyhow::{Context, Result};
use mazebot_lib::{solve_maze, Maze};

use crate::commands::CommandContext;
use crate::output::format_solution_text;
use crate::SolveArgs;

pub fn handle_solve(context: &CommandContext, args: &SolveArgs) -> Result<()> {
    let maze = Maze::from_path(&args.file)
        .with_context(|| format!("failed to read maze from {}", args.file.display()))?;
    let solution = solve_maze(&maze, &context.search)
        .with_context(|| format!("failed to solve {}", maze.name))?;

    context.format.emit(&solution, format_solution_text)
}
