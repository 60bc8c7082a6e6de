use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "FITTRACK_DATA_DIR";

pub const GOALS_FILE: &str = "goals.json";
pub const PROGRESS_FILE: &str = "fitness_progress.json";

const SAVE_DATA_DIR: &str = "SaveData";

/// Where the stores keep their files. Passed to each store at construction so
/// tests can point independent instances at separate directories.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `FITTRACK_DATA_DIR` if set, otherwise `SaveData` under the platform
    /// data directory.
    pub fn from_env() -> Result<Self> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(dir));
        }

        let dirs = directories::ProjectDirs::from("", "", "fittrack").ok_or(Error::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join(SAVE_DATA_DIR)))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn goals_path(&self) -> PathBuf {
        self.data_dir.join(GOALS_FILE)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.data_dir.join(PROGRESS_FILE)
    }
}
