// One module per subcommand; main.rs parses arguments and dispatches here.

use std::path::PathBuf;

use anyhow::{Context, Result};
use mazebot_lib::{MazeStore, MazebotClient, SearchOptions};

use crate::output::OutputFormat;

pub mod race;
pub mod single;
pub mod solve;

pub use race::handle_race;
pub use single::handle_single;
pub use solve::handle_solve;

/// Global settings shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    pub maze_dir: Option<PathBuf>,
    pub api_base: Option<String>,
    pub format: OutputFormat,
    pub search: SearchOptions,
}

impl CommandContext {
    /// Maze cache honoring `--maze-dir`, then `MAZEBOT_MAZE_DIR`.
    pub fn store(&self) -> Result<MazeStore> {
        MazeStore::resolve(self.maze_dir.as_deref())
            .context("failed to resolve the maze cache directory")
    }

    /// API client honoring `--api-base`, then `MAZEBOT_API_BASE`.
    pub fn client(&self) -> Result<MazebotClient> {
        let client = match &self.api_base {
            Some(base) => MazebotClient::new(base.as_str()),
            None => MazebotClient::from_env(),
        };
        client.context("failed to build the Mazebot API client")
    }
}
