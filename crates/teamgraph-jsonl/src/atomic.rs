//! Whole-file atomic JSONL writes.
//!
//! Records are written to a sibling `*.tmp` file which is then renamed over
//! the target. A rename within one filesystem is atomic on POSIX, so readers
//! see either the old file or the complete new one.

use crate::{JsonlWriter, Result};
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs::File;

/// Atomically replaces the file at `path` with `values`, one per line.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or the rename fails.
/// On failure the original file is untouched and the temp file is removed on
/// a best-effort basis.
///
/// # Examples
///
/// ```no_run
/// use teamgraph_jsonl::write_jsonl_atomic;
/// use serde_json::json;
///
/// # async fn example() -> teamgraph_jsonl::Result<()> {
/// write_jsonl_atomic("people.jsonl", [json!({"id": 1, "name": "Alice"})]).await?;
/// # Ok(())
/// # }
/// ```
pub async fn write_jsonl_atomic<T, I, P>(path: P, values: I) -> Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = temp_path_for(path);

    if let Err(err) = write_file(&temp_path, values).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(err);
    }

    tokio::fs::rename(&temp_path, path).await?;
    tracing::debug!(path = %path.display(), "Wrote JSONL file atomically");
    Ok(())
}

/// `people.jsonl` -> `people.jsonl.tmp`, `people` -> `people.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let extension = match path.extension() {
        Some(ext) => {
            let mut ext = ext.to_os_string();
            ext.push(".tmp");
            ext
        }
        None => OsString::from("tmp"),
    };
    path.with_extension(extension)
}

async fn write_file<T, I>(path: &Path, values: I) -> Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = JsonlWriter::new(File::create(path).await?);
    writer.write_all(values).await?;
    writer.flush().await
}
