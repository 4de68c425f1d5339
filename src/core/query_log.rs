//! Bounded in-memory logs with rotation to append-only files

use super::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default number of entries kept in memory before a log is rotated
pub const DEFAULT_LOG_CAPACITY: usize = 1000;

/// In-memory log that hands its entries off for writing once it grows past
/// `capacity`
///
/// The buffer never holds more than `capacity + 1` entries: on overflow it is
/// drained into a [`Rotation`] whether or not that batch is later written.
#[derive(Debug)]
pub struct RotatingLog<T> {
    entries: Vec<T>,
    capacity: usize,
    path: PathBuf,
    format: fn(&T) -> String,
}

/// Drained batch of entries waiting to be appended to the log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    path: PathBuf,
    body: String,
    entries: usize,
}

impl Rotation {
    /// File the batch is appended to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries in the batch
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Text appended to the file: `"\n"` then one line per entry
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Append the batch to its file
    ///
    /// Blocking; call it from a blocking context.
    pub fn write(&self) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(self.body.as_bytes())?;
        Ok(())
    }
}

impl<T: Clone> RotatingLog<T> {
    /// Create an empty log rotating into `path`
    pub fn new(path: impl Into<PathBuf>, capacity: usize, format: fn(&T) -> String) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            path: path.into(),
            format,
        }
    }

    /// Append an entry, draining the buffer when it exceeds its capacity
    pub fn push(&mut self, entry: T) -> Option<Rotation> {
        self.entries.push(entry);
        if self.entries.len() <= self.capacity {
            return None;
        }

        let lines: Vec<String> = self.entries.iter().map(self.format).collect();
        let rotation = Rotation {
            path: self.path.clone(),
            body: format!("\n{}", lines.join("\n")),
            entries: lines.len(),
        };
        self.entries.clear();
        Some(rotation)
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&T> {
        self.entries.last()
    }

    /// Copy of the buffered entries
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.clone()
    }

    /// Number of buffered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File the log rotates into
    pub fn path(&self) -> &Path {
        &self.path
    }
}
