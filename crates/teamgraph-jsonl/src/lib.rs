//! JSON Lines support for teamgraph snapshot files.
//!
//! Provides line-numbered async reading that keeps going past bad lines
//! (collecting [`Warning`]s instead of failing), buffered writing, and an
//! atomic temp-file-then-rename writer for whole files.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod reader;
pub mod warning;
pub mod writer;

pub use atomic::write_jsonl_atomic;
pub use error::{Error, Result};
pub use reader::JsonlReader;
pub use warning::{Warning, WarningCollector};
pub use writer::JsonlWriter;

use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs::File;

/// Read every parseable record from a JSONL file.
///
/// Lines that fail to parse are skipped and reported as warnings; only
/// failing to open the file is an error.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened.
///
/// # Examples
///
/// ```no_run
/// use teamgraph_jsonl::read_jsonl_resilient;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Row { id: u64 }
///
/// # async fn example() -> teamgraph_jsonl::Result<()> {
/// let (rows, warnings) = read_jsonl_resilient::<Row, _>("people.jsonl").await?;
/// println!("{} rows, {} warnings", rows.len(), warnings.len());
/// # Ok(())
/// # }
/// ```
pub async fn read_jsonl_resilient<T, P>(path: P) -> Result<(Vec<T>, Vec<Warning>)>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref()).await?;
    let collector = WarningCollector::new();
    let records: Vec<T> = JsonlReader::new(file)
        .stream_resilient(collector.clone())
        .collect()
        .await;

    let warnings = collector.into_warnings();
    tracing::debug!(
        path = %path.as_ref().display(),
        records = records.len(),
        warnings = warnings.len(),
        "Read JSONL file"
    );
    Ok((records, warnings))
}
