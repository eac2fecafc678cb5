use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::maze::Maze;

/// Environment variable overriding the maze store directory.
pub const MAZE_DIR_ENV: &str = "MAZEBOT_MAZE_DIR";

const MAZE_DIR_NAME: &str = "mazes";

/// Resolve the default store location using platform-specific project directories.
pub fn default_maze_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "noopschallenge", "mazebot").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(MAZE_DIR_NAME))
}

/// Directory of cached maze documents, one `<number>.json` per maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeStore {
    dir: PathBuf,
}

impl MazeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve the store directory.
    ///
    /// The resolution order is:
    /// 1. Explicit `dir` argument when provided.
    /// 2. `MAZEBOT_MAZE_DIR` environment variable.
    /// 3. Platform-specific project data directory.
    pub fn resolve(dir: Option<&Path>) -> Result<Self> {
        if let Some(explicit) = dir {
            return Ok(Self::new(explicit));
        }

        if let Some(env_dir) = env::var_os(MAZE_DIR_ENV) {
            return Ok(Self::new(PathBuf::from(env_dir)));
        }

        default_maze_dir().map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, number: u64) -> PathBuf {
        self.dir.join(format!("{}.json", number))
    }

    pub fn contains(&self, number: u64) -> bool {
        self.path_for(number).is_file()
    }

    /// Write `maze` to the store, replacing any earlier copy. Returns the file path.
    pub fn save(&self, maze: &Maze) -> Result<PathBuf> {
        let number = maze.number()?;
        let destination = self.path_for(number);
        fs::create_dir_all(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(maze.to_json()?.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&destination).map_err(|err| err.error)?;

        info!(maze = number, path = %destination.display(), "saved maze");
        Ok(destination)
    }

    pub fn load(&self, number: u64) -> Result<Maze> {
        let path = self.path_for(number);
        if !path.is_file() {
            return Err(Error::MazeNotCached { number, path });
        }

        debug!(maze = number, path = %path.display(), "loading cached maze");
        Maze::from_path(&path)
    }

    /// Numbers of all cached mazes in ascending order.
    pub fn numbers(&self) -> Result<Vec<u64>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut numbers = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<u64>().ok())
            {
                Some(number) => numbers.push(number),
                None => warn!(path = %path.display(), "skipping unrecognised file in maze store"),
            }
        }
        numbers.sort_unstable();
        Ok(numbers)
    }
}
