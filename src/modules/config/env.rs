//! Environment variable loading

use calconnect_core::CalconnectError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads a dotenv file into the process environment
pub struct EnvLoader {
    /// Explicit dotenv file; `None` means the default `.env` lookup
    path: Option<PathBuf>,
}

impl EnvLoader {
    /// Loader for the default `.env` file (missing file is not an error)
    pub fn new() -> Self {
        Self { path: None }
    }

    /// Loader for an explicit file (missing file is an error)
    pub fn with_file(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Read the dotenv file into the process environment.
    ///
    /// Variables already set in the environment take precedence.
    pub fn load(&self) -> Result<(), CalconnectError> {
        match &self.path {
            None => {
                if let Ok(path) = dotenvy::dotenv() {
                    debug!("Loaded environment from {}", path.display());
                }
                Ok(())
            }
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| {
                    CalconnectError::Config(format!(
                        "Failed to load env file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                debug!("Loaded environment from {}", path.display());
                Ok(())
            }
        }
    }

    /// Read a variable from the process environment, treating blank values as unset
    pub fn var(name: &str) -> Option<String> {
        std::env::var(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new()
    }
}
