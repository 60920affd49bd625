//! Non-fatal problems found while reading JSONL data.
//!
//! Resilient reading never aborts on a bad line. Each skipped line is turned
//! into a [`Warning`] and pushed into a shared [`WarningCollector`], which the
//! caller drains once the stream has been consumed.
//!
//! ```
//! use teamgraph_jsonl::warning::{Warning, WarningCollector};
//!
//! let collector = WarningCollector::new();
//! collector.add(Warning::MalformedJson {
//!     line_number: 3,
//!     error: "expected value".to_string(),
//! });
//!
//! let warnings = collector.into_warnings();
//! assert_eq!(warnings[0].line_number(), 3);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A line that was skipped during resilient reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The line was valid UTF-8 but did not decode into the target type.
    MalformedJson {
        /// The 1-based line number.
        line_number: usize,
        /// The decoder's error message.
        error: String,
    },

    /// The line could not be considered at all (bad encoding, read failure).
    SkippedLine {
        /// The 1-based line number.
        line_number: usize,
        /// Why the line was skipped.
        reason: String,
    },
}

impl Warning {
    /// The 1-based line number this warning refers to.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedJson { line_number, .. } | Self::SkippedLine { line_number, .. } => {
                *line_number
            }
        }
    }

    /// Short machine-friendly name of the warning kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedJson { .. } => "malformed_json",
            Self::SkippedLine { .. } => "skipped_line",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {line_number}: malformed JSON: {error}")
            }
            Self::SkippedLine {
                line_number,
                reason,
            } => write!(f, "line {line_number}: skipped: {reason}"),
        }
    }
}

impl std::error::Error for Warning {}

/// Shared, cloneable sink for warnings.
///
/// Clones share one buffer, so a clone can be moved into a stream while the
/// original is kept to read the warnings back. A poisoned lock is recovered.
#[derive(Debug, Clone, Default)]
pub struct WarningCollector {
    warnings: Arc<Mutex<Vec<Warning>>>,
}

impl WarningCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning.
    pub fn add(&self, warning: Warning) {
        self.lock().push(warning);
    }

    /// Number of warnings recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no warnings have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the collector and returns the warnings in the order added.
    ///
    /// Moves the buffer out when this is the last handle, clones otherwise.
    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        match Arc::try_unwrap(self.warnings) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => shared.lock().unwrap_or_else(PoisonError::into_inner).clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Warning>> {
        self.warnings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
