//! Application context for CLI command execution.
//!
//! # Example
//!
//! ```no_run
//! use teamgraph::app::App;
//! use teamgraph::graph::TeamGraph;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     let snapshot = app.snapshot().await?;
//!     println!("{} relationships", TeamGraph::new(&snapshot).total_relationships());
//!     Ok(())
//! }
//! ```

use crate::config::{find_teamgraph_root, TeamgraphConfig, CONFIG_FILE_NAME, TEAMGRAPH_DIR_NAME};
use crate::error::{ConfigError, Result};
use crate::snapshot::{
    save_snapshot_to_jsonl, JsonlSnapshotProvider, LoadWarning, Snapshot, SnapshotProvider,
};
use std::path::{Path, PathBuf};

/// Repository located on disk: its configuration and people file.
///
/// Every query command takes a fresh snapshot through [`App::snapshot`];
/// mutating commands build a new snapshot and hand it to [`App::save`].
#[derive(Debug, Clone)]
pub struct App {
    /// Directory containing `.teamgraph/`
    root_dir: PathBuf,

    /// Loaded configuration
    config: TeamgraphConfig,

    /// Reader for the configured people file
    provider: JsonlSnapshotProvider,
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree for a `.teamgraph/` directory and
    /// loads its configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No teamgraph repository is found in the directory tree
    /// - Configuration cannot be loaded or is invalid
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_teamgraph_root(working_dir).ok_or(ConfigError::NotInitialized)?;
        let config_path = root_dir.join(TEAMGRAPH_DIR_NAME).join(CONFIG_FILE_NAME);
        let config = TeamgraphConfig::load(&config_path).await?;
        let provider = JsonlSnapshotProvider::new(config.data_path(&root_dir));

        tracing::debug!(root = %root_dir.display(), data = %provider.path().display(), "Opened repository");

        Ok(Self {
            root_dir,
            config,
            provider,
        })
    }

    /// Directory containing `.teamgraph/`.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// The loaded configuration.
    pub fn config(&self) -> &TeamgraphConfig {
        &self.config
    }

    /// Provider for the people file.
    pub fn provider(&self) -> &JsonlSnapshotProvider {
        &self.provider
    }

    /// Suggestion limit used when none is given on the command line.
    pub fn suggestion_limit(&self) -> usize {
        self.config.suggestions.limit
    }

    /// Take a fresh snapshot, logging any load warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the people file exists but cannot be read.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        self.provider.load_snapshot().await
    }

    /// Take a fresh snapshot and return its load warnings to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the people file exists but cannot be read.
    pub async fn load_with_warnings(&self) -> Result<(Snapshot, Vec<LoadWarning>)> {
        self.provider.load_with_warnings().await
    }

    /// Replace the people file with `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        save_snapshot_to_jsonl(snapshot, self.provider.path()).await
    }
}
