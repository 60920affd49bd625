//! JSONL persistence for snapshots.
//!
//! The people file holds one [`PersonRecord`] per line. Loading is resilient:
//! damaged lines and dangling references are skipped and reported as
//! [`LoadWarning`]s, while data the engine can still answer over (asymmetric
//! relations, self-references) is kept as stored and only reported.

use super::{Snapshot, SnapshotProvider};
use crate::domain::{PersonId, PersonRecord};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use teamgraph_jsonl::{read_jsonl_resilient, write_jsonl_atomic, Warning as JsonlWarning};

/// Non-fatal data problems found while loading a people file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// Line could not be parsed into a person record.
    ///
    /// **Effect**: the line is skipped.
    MalformedJson {
        /// 1-based line number in the file
        line_number: usize,
        /// Parser message
        error: String,
    },

    /// A second record used an id that was already loaded.
    ///
    /// **Effect**: the later record is skipped; the first one wins.
    DuplicatePerson {
        /// The repeated id
        id: PersonId,
    },

    /// A teammate id does not match any person in the file.
    ///
    /// **Effect**: that teammate entry is dropped.
    OrphanedTeammate {
        /// Person listing the teammate
        person: PersonId,
        /// The unknown id
        teammate: PersonId,
    },

    /// A person lists themselves as a teammate.
    ///
    /// **Effect**: kept as stored.
    SelfTeammate {
        /// The person
        person: PersonId,
    },

    /// `person` lists `teammate`, but not the other way round.
    ///
    /// **Effect**: kept as stored. Relationship totals become approximate.
    AsymmetricTeammate {
        /// Person listing the teammate
        person: PersonId,
        /// Teammate missing the reverse entry
        teammate: PersonId,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {line_number}: malformed record: {error}")
            }
            Self::DuplicatePerson { id } => write!(f, "duplicate person id {id}, later record skipped"),
            Self::OrphanedTeammate { person, teammate } => {
                write!(f, "person {person} lists unknown teammate {teammate}")
            }
            Self::SelfTeammate { person } => write!(f, "person {person} lists themselves as a teammate"),
            Self::AsymmetricTeammate { person, teammate } => {
                write!(f, "person {person} lists {teammate}, but {teammate} does not list {person}")
            }
        }
    }
}

/// Load a snapshot from a JSONL people file.
///
/// Records are kept in file order, which becomes the snapshot's natural
/// order.
///
/// # Errors
///
/// Returns an error only if the file cannot be opened or read.
///
/// # Example
///
/// ```no_run
/// use teamgraph::snapshot::load_snapshot_from_jsonl;
/// use std::path::Path;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> anyhow::Result<()> {
/// let (snapshot, warnings) = load_snapshot_from_jsonl(Path::new(".teamgraph/people.jsonl")).await?;
/// for warning in &warnings {
///     eprintln!("warning: {warning}");
/// }
/// println!("{} people", snapshot.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_snapshot_from_jsonl(path: &Path) -> Result<(Snapshot, Vec<LoadWarning>)> {
    let (parsed, jsonl_warnings) = read_jsonl_resilient::<PersonRecord, _>(path).await?;

    let mut warnings: Vec<LoadWarning> = jsonl_warnings
        .into_iter()
        .map(|warning| match warning {
            JsonlWarning::MalformedJson { line_number, error } => {
                LoadWarning::MalformedJson { line_number, error }
            }
            JsonlWarning::SkippedLine {
                line_number,
                reason,
            } => LoadWarning::MalformedJson {
                line_number,
                error: reason,
            },
        })
        .collect();

    // First pass: keep the first record per id
    let mut known = HashSet::new();
    let mut records = Vec::with_capacity(parsed.len());
    for record in parsed {
        if known.insert(record.person.id) {
            records.push(record);
        } else {
            warnings.push(LoadWarning::DuplicatePerson {
                id: record.person.id,
            });
        }
    }

    // Second pass: drop repeated and dangling teammate ids, note self-references
    for record in &mut records {
        let person = record.person.id;
        let mut listed = HashSet::new();
        record.teammates.retain(|&teammate| {
            if !listed.insert(teammate) {
                false
            } else if known.contains(&teammate) {
                true
            } else {
                warnings.push(LoadWarning::OrphanedTeammate { person, teammate });
                false
            }
        });
        if record.teammates.contains(&person) {
            warnings.push(LoadWarning::SelfTeammate { person });
        }
    }

    // Third pass: report one-sided relations without repairing them
    let stored: HashSet<(PersonId, PersonId)> = records
        .iter()
        .flat_map(|record| {
            record
                .teammates
                .iter()
                .map(move |&teammate| (record.person.id, teammate))
        })
        .collect();
    for record in &records {
        let person = record.person.id;
        for &teammate in &record.teammates {
            if teammate != person && !stored.contains(&(teammate, person)) {
                warnings.push(LoadWarning::AsymmetricTeammate { person, teammate });
            }
        }
    }

    let snapshot = Snapshot::from_records(records);
    tracing::debug!(
        path = %path.display(),
        people = snapshot.len(),
        warnings = warnings.len(),
        "Loaded snapshot"
    );
    Ok((snapshot, warnings))
}

/// Write a snapshot to a JSONL people file, replacing it atomically.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn save_snapshot_to_jsonl(snapshot: &Snapshot, path: &Path) -> Result<()> {
    write_jsonl_atomic(path, snapshot.records()).await?;
    tracing::debug!(path = %path.display(), people = snapshot.len(), "Saved snapshot");
    Ok(())
}

/// Provider reading a fresh snapshot from a JSONL file on every load.
#[derive(Debug, Clone)]
pub struct JsonlSnapshotProvider {
    path: PathBuf,
}

impl JsonlSnapshotProvider {
    /// Read from the people file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The people file this provider reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and also return the warnings instead of only logging them.
    ///
    /// A missing file is treated as an empty graph (first run).
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read.
    pub async fn load_with_warnings(&self) -> Result<(Snapshot, Vec<LoadWarning>)> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "People file missing, using empty snapshot");
            return Ok((Snapshot::empty(), Vec::new()));
        }
        load_snapshot_from_jsonl(&self.path).await
    }
}

#[async_trait]
impl SnapshotProvider for JsonlSnapshotProvider {
    async fn load_snapshot(&self) -> Result<Snapshot> {
        let (snapshot, warnings) = self.load_with_warnings().await?;
        for warning in &warnings {
            tracing::warn!(warning = ?warning, "Snapshot load warning");
        }
        Ok(snapshot)
    }
}
