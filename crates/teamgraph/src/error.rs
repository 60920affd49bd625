//! Error types for teamgraph operations.
//!
//! Graph queries never fail; these errors come from the edges of the system:
//! reading and writing snapshot files, configuration, and the snapshot
//! builder's mutation rules.

use crate::domain::PersonId;
use std::io;
use thiserror::Error;

/// The error type for teamgraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSONL file error.
    #[error("JSONL error: {0}")]
    Jsonl(#[from] teamgraph_jsonl::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot mutation error.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Violations of the snapshot builder's rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// No person with this id exists.
    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),

    /// Tried to make a person their own teammate.
    #[error("A person cannot be their own teammate: {0}")]
    SelfTeammate(PersonId),

    /// A person with this id already exists.
    #[error("Duplicate person id: {0}")]
    DuplicatePerson(PersonId),
}

/// Configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.teamgraph/` directory was found.
    #[error("Not a teamgraph repository (run 'teamgraph init' first)")]
    NotInitialized,

    /// `.teamgraph/` already exists.
    #[error("Teamgraph is already initialized in this directory. Found existing '{0}'")]
    AlreadyInitialized(String),

    /// The config file could not be parsed or written.
    #[error("YAML error: {0}")]
    Parse(String),

    /// The configured suggestion limit is out of range.
    #[error("Suggestion limit must be between 1 and 100, got {0}")]
    InvalidSuggestionLimit(usize),
}

/// A specialized Result type for teamgraph operations.
pub type Result<T> = std::result::Result<T, Error>;
