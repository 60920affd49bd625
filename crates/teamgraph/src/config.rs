//! Repository configuration stored in `.teamgraph/config.yaml`.

use crate::error::{ConfigError, Result};
use crate::graph::DEFAULT_SUGGESTION_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the teamgraph directory
pub const TEAMGRAPH_DIR_NAME: &str = ".teamgraph";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the people data file
pub const PEOPLE_FILE_NAME: &str = "people.jsonl";

/// Name of the gitignore file within .teamgraph
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Largest accepted suggestion limit
pub const MAX_SUGGESTION_LIMIT: usize = 100;

/// Maximum directory depth to traverse when searching for the repository root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Contents of `config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamgraphConfig {
    /// Storage configuration
    pub storage: StorageConfig,

    /// Suggestion defaults
    #[serde(default)]
    pub suggestions: SuggestionConfig,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// People file, relative to the repository root
    pub data_file: String,
}

/// Suggestion configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestionConfig {
    /// Suggestions returned when the command line gives no `--limit`
    pub limit: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl Default for TeamgraphConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_file: format!("{TEAMGRAPH_DIR_NAME}/{PEOPLE_FILE_NAME}"),
            },
            suggestions: SuggestionConfig::default(),
        }
    }
}

impl TeamgraphConfig {
    /// Load and validate configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// holds out-of-range values.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSuggestionLimit` unless the suggestion
    /// limit is within `1..=MAX_SUGGESTION_LIMIT`.
    pub fn validate(&self) -> Result<()> {
        let limit = self.suggestions.limit;
        if !(1..=MAX_SUGGESTION_LIMIT).contains(&limit) {
            return Err(ConfigError::InvalidSuggestionLimit(limit).into());
        }
        Ok(())
    }

    /// Absolute location of the people file for a repository rooted at `root`.
    #[must_use]
    pub fn data_path(&self, root: &Path) -> PathBuf {
        root.join(&self.storage.data_file)
    }
}

/// Check if a directory has been initialized with teamgraph.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(TEAMGRAPH_DIR_NAME).exists()
}

/// Find the repository root by searching up the directory tree.
///
/// Returns the first directory, starting at `start_dir`, that contains a
/// `.teamgraph/` directory. Gives up at the filesystem root or after
/// [`MAX_TRAVERSAL_DEPTH`] levels.
pub fn find_teamgraph_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if is_initialized(&current) {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
