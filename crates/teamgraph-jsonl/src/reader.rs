//! JSONL reading operations.
//!
//! [`JsonlReader`] reads one record per line with 1-based line tracking.
//! Blank lines are ignored in both modes. [`JsonlReader::read_record`] is
//! strict and fails on the first bad line; [`JsonlReader::stream_resilient`]
//! skips bad lines and reports them through a [`WarningCollector`].

use crate::error::{Error, Result};
use crate::warning::{Warning, WarningCollector};
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Async, line-numbered reader for JSONL data.
///
/// # Examples
///
/// ```no_run
/// use teamgraph_jsonl::reader::JsonlReader;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("people.jsonl").await?;
/// let mut reader = JsonlReader::new(file);
/// while let Some(row) = reader.read_record::<serde_json::Value>().await? {
///     println!("{row}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct JsonlReader<R> {
    reader: BufReader<R>,
    /// Number of lines consumed so far (0 before the first read).
    line_number: usize,
}

/// One physical line, decoded or not.
enum RawLine {
    Text(String),
    Undecodable(String),
}

impl<R: AsyncRead + Unpin> JsonlReader<R> {
    /// Wraps `reader` in a buffered JSONL reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
        }
    }

    /// Line number of the last line consumed, 0 before any read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next record, skipping blank lines.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for a line that is not valid UTF-8 or
    /// does not decode into `T`, and [`Error::Io`] if reading fails.
    pub async fn read_record<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        loop {
            let Some(line) = self.next_line().await? else {
                return Ok(None);
            };
            let text = match line {
                RawLine::Text(text) => text,
                RawLine::Undecodable(reason) => {
                    return Err(Error::InvalidFormat {
                        line_number: self.line_number,
                        reason,
                    });
                }
            };
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }
            return serde_json::from_str(trimmed)
                .map(Some)
                .map_err(|e| Error::InvalidFormat {
                    line_number: self.line_number,
                    reason: e.to_string(),
                });
        }
    }

    /// Turns the reader into a stream of every record that decodes.
    ///
    /// Undecodable lines become warnings in `warnings`. A read failure ends
    /// the stream after recording a [`Warning::SkippedLine`] for the line that
    /// could not be read.
    pub fn stream_resilient<T: DeserializeOwned>(
        self,
        warnings: WarningCollector,
    ) -> impl Stream<Item = T> {
        stream::unfold((self, warnings), |(mut reader, warnings)| async move {
            loop {
                let line = match reader.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => return None,
                    Err(err) => {
                        warnings.add(Warning::SkippedLine {
                            line_number: reader.line_number + 1,
                            reason: format!("read failed: {err}"),
                        });
                        return None;
                    }
                };

                match line {
                    RawLine::Undecodable(reason) => warnings.add(Warning::SkippedLine {
                        line_number: reader.line_number,
                        reason,
                    }),
                    RawLine::Text(text) => {
                        let trimmed = text.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<T>(trimmed) {
                            Ok(record) => return Some((record, (reader, warnings))),
                            Err(err) => warnings.add(Warning::MalformedJson {
                                line_number: reader.line_number,
                                error: err.to_string(),
                            }),
                        }
                    }
                }
            }
        })
    }

    async fn next_line(&mut self) -> Result<Option<RawLine>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes).await? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(match String::from_utf8(bytes) {
            Ok(text) => RawLine::Text(text),
            Err(err) => RawLine::Undecodable(format!("invalid UTF-8: {err}")),
        }))
    }
}
