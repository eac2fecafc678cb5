//! Blocking client for the Mazebot API.
//!
//! The client only exchanges JSON documents: it fetches mazes, posts
//! direction strings back, and walks the race flow. Solving happens
//! elsewhere.

use std::env;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::maze::Maze;

/// Default API host.
pub const DEFAULT_API_BASE: &str = "http://api.noopschallenge.com";
/// Environment variable overriding the API host, mainly for tests.
pub const API_BASE_ENV: &str = "MAZEBOT_API_BASE";

const RANDOM_MAZE_PATH: &str = "/mazebot/random";
const RACE_START_PATH: &str = "/mazebot/race/start";

/// Size filter for random mazes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RandomMazeParams {
    pub min_size: Option<u32>,
    pub max_size: Option<u32>,
}

impl RandomMazeParams {
    pub fn sized(min_size: u32, max_size: u32) -> Self {
        Self {
            min_size: Some(min_size),
            max_size: Some(max_size),
        }
    }

    fn query(&self) -> Vec<(&'static str, u32)> {
        let mut query = Vec::new();
        if let Some(min) = self.min_size {
            query.push(("minSize", min));
        }
        if let Some(max) = self.max_size {
            query.push(("maxSize", max));
        }
        query
    }
}

/// Outcome reported for a submitted solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionOutcome {
    Success,
    /// The final maze of a race was solved.
    Finished,
    #[serde(other)]
    Failed,
}

/// Response to a posted solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub result: SubmissionOutcome,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub shortest_solution_length: Option<u64>,
    #[serde(default)]
    pub your_solution_length: Option<u64>,
    #[serde(default)]
    pub elapsed: Option<u64>,
    /// Next maze of a race, when one follows.
    #[serde(default)]
    pub next_maze: Option<String>,
    /// Certificate path once a race is finished.
    #[serde(default)]
    pub certificate: Option<String>,
}

impl SubmissionResponse {
    pub fn is_success(&self) -> bool {
        self.result == SubmissionOutcome::Success
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RaceStart {
    next_maze: String,
}

/// Race completion certificate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Certificate {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub elapsed: Option<serde_json::Value>,
    #[serde(default)]
    pub completed: Option<serde_json::Value>,
}

impl Certificate {
    /// `<completed> - <elapsed>:` header line used in certificate logs.
    pub fn summary_line(&self) -> String {
        format!(
            "{} - {}:",
            display_value(self.completed.as_ref()),
            display_value(self.elapsed.as_ref())
        )
    }
}

fn display_value(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "unknown".to_string(),
    }
}

/// Mazebot API client.
#[derive(Debug, Clone)]
pub struct MazebotClient {
    client: Client,
    base_url: String,
}

impl MazebotClient {
    /// Client for `base_url`, e.g. `http://api.noopschallenge.com`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(base_url, build_client()?))
    }

    /// Client for `base_url` using a preconfigured HTTP client.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client for `MAZEBOT_API_BASE` or [`DEFAULT_API_BASE`].
    pub fn from_env() -> Result<Self> {
        let base = env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(base)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/mazebot/random`.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub fn random_maze(&self, params: &RandomMazeParams) -> Result<Maze> {
        let url = self.url(RANDOM_MAZE_PATH);
        debug!(%url, ?params, "requesting random maze");
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&params.query())
            .send()?;
        let maze: Maze = expect_success(response, &url)?.json()?;
        info!(name = %maze.name, "fetched maze");
        Ok(maze)
    }

    /// Fetch a maze by its API path, as found in `nextMaze`.
    pub fn maze(&self, path: &str) -> Result<Maze> {
        let url = self.url(path);
        debug!(%url, "requesting maze");
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()?;
        Ok(expect_success(response, &url)?.json()?)
    }

    /// Post a direction string to a maze path.
    ///
    /// A 400 response carries the verdict for a wrong solution and is
    /// returned as a [`SubmissionResponse`] rather than an error.
    pub fn submit(&self, maze_path: &str, directions: &str) -> Result<SubmissionResponse> {
        let url = self.url(maze_path);
        debug!(%url, moves = directions.len(), "submitting solution");
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "directions": directions }))
            .send()?;

        if response.status() == StatusCode::BAD_REQUEST {
            return Ok(response.json()?);
        }
        Ok(expect_success(response, &url)?.json()?)
    }

    /// Start a race for `login`, returning the path of the first maze.
    pub fn start_race(&self, login: &str) -> Result<String> {
        let url = self.url(RACE_START_PATH);
        info!(%login, "starting race");
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "login": login }))
            .send()?;
        let start: RaceStart = expect_success(response, &url)?.json()?;
        Ok(start.next_maze)
    }

    pub fn certificate(&self, path: &str) -> Result<Certificate> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()?;
        Ok(expect_success(response, &url)?.json()?)
    }
}

fn expect_success(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::ApiStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response)
}

fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(user_agent())
        .build()
        .map_err(Error::Http)
}

fn user_agent() -> String {
    format!("mazebot-lib/{version}", version = env!("CARGO_PKG_VERSION"))
}
