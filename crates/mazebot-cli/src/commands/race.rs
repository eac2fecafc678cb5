//! `race`: solve consecutive race mazes until the API issues a certificate.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{info, warn};

use mazebot_lib::{solve_maze, SubmissionOutcome};

use crate::commands::CommandContext;
use crate::output::{format_race_text, RaceLeg, RaceOutput};
use crate::RaceArgs;

pub fn handle_race(context: &CommandContext, args: &RaceArgs) -> Result<()> {
    let client = context.client()?;
    let mut next_maze = client
        .start_race(&args.login)
        .with_context(|| format!("failed to start a race for {}", args.login))?;

    let mut legs = Vec::new();
    let finished = loop {
        let maze = client
            .maze(&next_maze)
            .with_context(|| format!("failed to fetch race maze {next_maze}"))?;
        info!(name = %maze.name, "solving race maze");

        let solution = solve_maze(&maze, &context.search)
            .with_context(|| format!("failed to solve {}", maze.name))?;
        let response = client
            .submit(&solution.maze_path, &solution.directions)
            .with_context(|| format!("failed to submit solution for {}", solution.name))?;
        legs.push(RaceLeg::new(&solution));

        match response.result {
            SubmissionOutcome::Success => {
                next_maze = response.next_maze.ok_or_else(|| {
                    anyhow!("{} was accepted but no next maze was offered", solution.name)
                })?;
            }
            SubmissionOutcome::Finished => break response,
            SubmissionOutcome::Failed => bail!(
                "race stopped at {}: {}",
                solution.name,
                response.message.as_deref().unwrap_or("solution rejected")
            ),
        }
    };

    let certificate = finished
        .certificate
        .ok_or_else(|| anyhow!("race finished without a certificate"))?;
    let certificate_url = client.url(&certificate);

    // The certificate log is only written when the certificate itself can be read.
    let certificate_summary = match client.certificate(&certificate) {
        Ok(details) => {
            let summary = details.summary_line();
            append_certificate(&args.certs, &summary, &certificate_url)?;
            Some(summary)
        }
        Err(err) => {
            warn!(error = %err, url = %certificate_url, "failed to fetch certificate");
            None
        }
    };

    let output = RaceOutput {
        login: args.login.clone(),
        legs,
        message: finished.message,
        certificate_url,
        certificate_summary,
    };
    context.format.emit(&output, format_race_text)
}

fn append_certificate(path: &Path, summary: &str, url: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open certificate log {}", path.display()))?;
    writeln!(file, "{summary}\n{url}")
        .with_context(|| format!("failed to write certificate log {}", path.display()))?;
    info!(path = %path.display(), "recorded race certificate");
    Ok(())
}
