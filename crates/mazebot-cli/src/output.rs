//! Output formatting for solved mazes, submissions and races.
//!
//! Text formatters return `String`s so they can be asserted on directly; JSON
//! output serializes the same structures the text formatters read.

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use mazebot_lib::{Solution, SubmissionOutcome, SubmissionResponse};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

impl OutputFormat {
    /// Print `value` as JSON or through its text formatter.
    pub fn emit<T: Serialize>(self, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
        match self {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Text => print!("{}", text(value)),
        }
        Ok(())
    }
}

/// Result of `mazebot single`.
#[derive(Debug, Clone, Serialize)]
pub struct SingleOutput {
    pub solution: Solution,
    /// Cache file written for a freshly fetched maze.
    pub saved_to: Option<String>,
    pub submission: Option<SubmissionResponse>,
    /// Fetch plus solve time.
    pub total_elapsed_ns: u64,
}

/// One solved maze of a race.
#[derive(Debug, Clone, Serialize)]
pub struct RaceLeg {
    pub name: String,
    pub moves: usize,
    pub elapsed_ns: u64,
}

impl RaceLeg {
    pub fn new(solution: &Solution) -> Self {
        Self {
            name: solution.name.clone(),
            moves: solution.move_count(),
            elapsed_ns: nanos(solution.elapsed),
        }
    }
}

/// Result of `mazebot race`.
#[derive(Debug, Clone, Serialize)]
pub struct RaceOutput {
    pub login: String,
    pub legs: Vec<RaceLeg>,
    pub message: Option<String>,
    pub certificate_url: String,
    /// `<completed> - <elapsed>:` line, when the certificate could be fetched.
    pub certificate_summary: Option<String>,
}

pub fn nanos(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
}

fn seconds(elapsed_ns: u64) -> f64 {
    elapsed_ns as f64 / 1e9
}

pub fn format_solution_text(solution: &Solution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", solution.name);
    let _ = writeln!(
        out,
        "Start {} -> goal {} via {}",
        solution.start, solution.goal, solution.queue
    );
    let _ = writeln!(out, "Moves: {}", solution.move_count());
    let _ = writeln!(out, "Directions: {}", solution.directions);
    out
}

pub fn format_submission_text(response: &SubmissionResponse) -> String {
    let message = response.message.as_deref().unwrap_or("");
    match response.result {
        SubmissionOutcome::Success => {
            let mut out = format!("Accepted: {message}\n");
            if let (Some(shortest), Some(yours)) = (
                response.shortest_solution_length,
                response.your_solution_length,
            ) {
                let _ = writeln!(out, "Shortest: {shortest}, Yours: {yours}");
            }
            out
        }
        SubmissionOutcome::Finished => format!("Finished: {message}\n"),
        SubmissionOutcome::Failed => format!("Rejected: {message}\n"),
    }
}

pub fn format_single_text(output: &SingleOutput) -> String {
    let mut out = format_solution_text(&output.solution);
    let _ = writeln!(
        out,
        "Elapsed: {}ns => {:.3}s",
        output.total_elapsed_ns,
        seconds(output.total_elapsed_ns)
    );
    if let Some(path) = &output.saved_to {
        let _ = writeln!(out, "Saved to {path}");
    }
    if let Some(response) = &output.submission {
        out.push_str(&format_submission_text(response));
    }
    out
}

pub fn format_race_text(output: &RaceOutput) -> String {
    let border = "=".repeat(40);
    let mut out = String::new();
    for leg in &output.legs {
        let _ = writeln!(
            out,
            "Solved {} in {} moves ({:.3}s)",
            leg.name,
            leg.moves,
            seconds(leg.elapsed_ns)
        );
    }
    let _ = writeln!(out, "{border}");
    if let Some(message) = &output.message {
        let _ = writeln!(out, "{message}");
    }
    let _ = writeln!(out, "{}", output.certificate_url);
    let _ = writeln!(out, "{border}");
    out
}
