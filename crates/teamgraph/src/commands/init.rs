//! Implementation of the `init` command.
//!
//! Creates the `.teamgraph/` directory with a configuration file, a people
//! file (empty, or holding the demo team) and a `.gitignore`.

use crate::config::{
    TeamgraphConfig, CONFIG_FILE_NAME, GITIGNORE_FILE_NAME, PEOPLE_FILE_NAME, TEAMGRAPH_DIR_NAME,
};
use crate::error::{ConfigError, Result};
use crate::snapshot::{demo::demo_snapshot, save_snapshot_to_jsonl};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created teamgraph directory
    pub teamgraph_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created people file
    pub people_file: PathBuf,
    /// Path to the created gitignore file
    pub gitignore_file: PathBuf,
    /// Number of people written to the people file
    pub people: usize,
}

/// Initialize a new teamgraph repository in `base_dir`.
///
/// With `demo` set, the people file is filled with the built-in demo team.
///
/// # Errors
///
/// Returns an error if:
/// - The `.teamgraph/` directory already exists
/// - File system operations fail
pub async fn init(base_dir: &Path, demo: bool) -> Result<InitResult> {
    let teamgraph_dir = base_dir.join(TEAMGRAPH_DIR_NAME);

    if teamgraph_dir.exists() {
        return Err(ConfigError::AlreadyInitialized(TEAMGRAPH_DIR_NAME.to_string()).into());
    }

    fs::create_dir_all(&teamgraph_dir).await?;

    let config_file = teamgraph_dir.join(CONFIG_FILE_NAME);
    TeamgraphConfig::default().save(&config_file).await?;

    let people_file = teamgraph_dir.join(PEOPLE_FILE_NAME);
    let people = if demo {
        let snapshot = demo_snapshot();
        save_snapshot_to_jsonl(&snapshot, &people_file).await?;
        snapshot.len()
    } else {
        fs::write(&people_file, "").await?;
        0
    };

    let gitignore_file = teamgraph_dir.join(GITIGNORE_FILE_NAME);
    let gitignore_content = "\
# Teamgraph scratch files
# people.jsonl and config.yaml should be tracked
*.tmp
";
    fs::write(&gitignore_file, gitignore_content).await?;

    tracing::info!(dir = %teamgraph_dir.display(), people, "Initialized teamgraph repository");

    Ok(InitResult {
        teamgraph_dir,
        config_file,
        people_file,
        gitignore_file,
        people,
    })
}
