//! `single`: solve one maze, either fetched at random or loaded from the cache.

use std::time::Instant;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use mazebot_lib::{solve_maze, RandomMazeParams, SubmissionOutcome};

use crate::commands::CommandContext;
use crate::output::{format_single_text, nanos, SingleOutput};
use crate::SingleArgs;

/// Handle the `single` subcommand.
///
/// Cached mazes (`--local`) are solved offline. Fetched mazes are cached
/// unless `--no-save` and submitted unless `--no-submit`; a rejected
/// submission makes the command fail after the verdict is printed.
pub fn handle_single(context: &CommandContext, args: &SingleArgs) -> Result<()> {
    let store = context.store()?;
    let started = Instant::now();

    let (maze, client) = match args.local {
        Some(number) => {
            let maze = store
                .load(number)
                .with_context(|| format!("failed to load cached maze {number}"))?;
            info!(number, dir = %store.dir().display(), "loaded cached maze");
            (maze, None)
        }
        None => {
            if args.min_size > args.max_size {
                bail!(
                    "--min-size ({}) must not exceed --max-size ({})",
                    args.min_size,
                    args.max_size
                );
            }
            let client = context.client()?;
            let params = RandomMazeParams::sized(args.min_size, args.max_size);
            let maze = client
                .random_maze(&params)
                .context("failed to fetch a random maze")?;
            (maze, Some(client))
        }
    };

    let mut saved_to = None;
    if client.is_some() && !args.no_save {
        // Caching is best effort.
        match store.save(&maze) {
            Ok(path) => saved_to = Some(path.display().to_string()),
            Err(err) => warn!(error = %err, name = %maze.name, "failed to cache maze"),
        }
    }

    let solution = solve_maze(&maze, &context.search)
        .with_context(|| format!("failed to solve {}", maze.name))?;
    let total_elapsed_ns = nanos(started.elapsed());

    let submission = match client {
        Some(client) if !args.no_submit => Some(
            client
                .submit(&solution.maze_path, &solution.directions)
                .with_context(|| {
                    format!(
                        "failed to submit solution (mazePath => {}, directions => {})",
                        solution.maze_path, solution.directions
                    )
                })?,
        ),
        _ => None,
    };

    let rejected = submission
        .as_ref()
        .is_some_and(|response| response.result == SubmissionOutcome::Failed);
    let output = SingleOutput {
        solution,
        saved_to,
        submission,
        total_elapsed_ns,
    };
    context.format.emit(&output, format_single_text)?;

    if rejected {
        bail!("the API rejected the solution for {}", output.solution.name);
    }
    Ok(())
}
