//! Trace file reader.
//!
//! Wraps any buffered source and yields one [`AccessRecord`] per well-formed
//! line. Blank lines are skipped silently; malformed lines, including lines
//! that are not valid UTF-8, are skipped with a warning. An I/O error ends the
//! stream after being reported once.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::record::{AccessRecord, ParseRecordError};
use crate::common::SimError;

/// Iterator over the access records of a trace.
#[derive(Debug)]
pub struct TraceReader<R> {
    source: R,
    path: PathBuf,
    line: Vec<u8>,
    line_no: usize,
    skipped: usize,
    done: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens the trace at `path`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::TraceUnavailable` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SimError::trace(path, e))?;
        debug!(path = %path.display(), "opened trace");
        Ok(Self::with_path(BufReader::new(file), path))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps an in-memory or already opened source.
    pub fn new(source: R) -> Self {
        Self::with_path(source, "<memory>")
    }

    /// Wraps `source`, naming it `path` in errors and log output.
    pub fn with_path(source: R, path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            path: path.into(),
            line: Vec::new(),
            line_no: 0,
            skipped: 0,
            done: false,
        }
    }

    /// Number of non-blank lines rejected so far.
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of lines read so far.
    pub const fn lines_read(&self) -> usize {
        self.line_no
    }

    fn skip(&mut self, reason: &dyn std::error::Error) {
        self.skipped += 1;
        warn!(
            path = %self.path.display(),
            line = self.line_no,
            error = %reason,
            "skipping malformed trace line"
        );
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<AccessRecord, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.line.clear();
            match self.source.read_until(b'\n', &mut self.line) {
                Ok(0) => {
                    self.done = true;
                    if self.skipped > 0 {
                        warn!(
                            path = %self.path.display(),
                            skipped = self.skipped,
                            "trace contained malformed lines"
                        );
                    }
                }
                Ok(_) => {
                    self.line_no += 1;
                    let parsed = match std::str::from_utf8(&self.line) {
                        Ok(text) => text.parse::<AccessRecord>(),
                        Err(e) => {
                            self.skip(&e);
                            continue;
                        }
                    };
                    match parsed {
                        Ok(record) => return Some(Ok(record)),
                        Err(ParseRecordError::Empty) => {}
                        Err(e) => self.skip(&e),
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(SimError::trace(self.path.clone(), e)));
                }
            }
        }
        None
    }
}
