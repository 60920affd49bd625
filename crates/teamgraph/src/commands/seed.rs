//! Implementation of the `seed` command.
//!
//! Loads the demo team into an existing people file. A non-empty file is
//! left alone unless the caller forces a reset.

use crate::error::Result;
use crate::snapshot::{demo::demo_snapshot, save_snapshot_to_jsonl, JsonlSnapshotProvider};

/// What `seed` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Demo data was written; holds the number of people.
    Seeded(usize),
    /// The file already held people and `force` was not given.
    Skipped {
        /// People already present
        existing: usize,
    },
}

/// Write the demo team to the provider's file.
///
/// Existing people are replaced only when `force` is set.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub async fn seed(provider: &JsonlSnapshotProvider, force: bool) -> Result<SeedOutcome> {
    let (current, _) = provider.load_with_warnings().await?;
    if !current.is_empty() && !force {
        tracing::info!(existing = current.len(), "People file not empty, skipping seed");
        return Ok(SeedOutcome::Skipped {
            existing: current.len(),
        });
    }

    let demo = demo_snapshot();
    save_snapshot_to_jsonl(&demo, provider.path()).await?;
    tracing::info!(people = demo.len(), replaced = current.len(), "Seeded demo data");
    Ok(SeedOutcome::Seeded(demo.len()))
}
