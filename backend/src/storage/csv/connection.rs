//! # CSV Connection
//!
//! Handle to the data directory all repositories share. Layout:
//!
//! ```text
//! data/
//! ├── global_config.yaml
//! └── {household_dir}/
//!     ├── household.yaml
//!     ├── profiles.csv
//!     ├── tasks.csv
//!     ├── rewards.csv
//!     ├── claims.csv
//!     ├── earned_badges.csv
//!     └── streak_history.csv
//! ```

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Shared handle to the base data directory.
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a connection, ensuring the base directory exists
    pub fn new(base_directory: impl AsRef<Path>) -> Result<Self> {
        let base_directory = base_directory.as_ref().to_path_buf();
        fs::create_dir_all(&base_directory)?;
        Ok(Self { base_directory })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Directory holding a household's files. Household ids contain `::`
    /// which is flattened for the filesystem.
    pub fn household_directory(&self, household_id: &str) -> PathBuf {
        self.base_directory.join(household_id.replace("::", "_"))
    }

    /// Ensure a household's directory exists and return it
    pub fn ensure_household_directory(&self, household_id: &str) -> Result<PathBuf> {
        let dir = self.household_directory(household_id);
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(dir)
    }

    /// List the directories of every household under the base directory
    pub fn list_household_directories(&self) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(&self.base_directory)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    /// Atomic write: write to a temp file, then rename over the target
    pub fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}
