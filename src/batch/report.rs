//! Batch summary types.
//!
//! A [`BatchReport`] records the terminal state each annotation file reached,
//! so the end of a run can be shown to users or emitted as JSON.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Terminal state of one annotation file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Rewritten content replaced the file on disk.
    Committed,
    /// Not written: previewed, or declined at the confirmation prompt.
    Skipped,
    /// Not written: a line could not be remapped.
    Aborted,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileStatus::Committed => "committed",
            FileStatus::Skipped => "skipped",
            FileStatus::Aborted => "aborted",
        };
        f.pad(label)
    }
}

/// What happened to a single annotation file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
    /// Data lines rewritten (0 when aborted).
    pub lines: usize,
    /// True when the rewritten content was printed instead of written.
    pub previewed: bool,
    /// Error message for aborted files; it already names the file and line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FileOutcome {
    pub fn committed(path: impl Into<PathBuf>, lines: usize) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Committed,
            lines,
            previewed: false,
            message: None,
        }
    }

    pub fn skipped(path: impl Into<PathBuf>, lines: usize, previewed: bool) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Skipped,
            lines,
            previewed,
            message: None,
        }
    }

    pub fn aborted(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: FileStatus::Aborted,
            lines: 0,
            previewed: false,
            message: Some(message.into()),
        }
    }
}

/// Outcomes for every annotation file in a run, in processing order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, outcome: FileOutcome) {
        self.files.push(outcome);
    }

    pub fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    pub fn committed_count(&self) -> usize {
        self.count(FileStatus::Committed)
    }

    pub fn skipped_count(&self) -> usize {
        self.count(FileStatus::Skipped)
    }

    pub fn aborted_count(&self) -> usize {
        self.count(FileStatus::Aborted)
    }

    /// Returns true if no file was aborted.
    pub fn is_ok(&self) -> bool {
        self.aborted_count() == 0
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Processed {} file(s): {} committed, {} skipped, {} aborted",
            self.files.len(),
            self.committed_count(),
            self.skipped_count(),
            self.aborted_count()
        )?;

        for file in &self.files {
            match &file.message {
                Some(message) => writeln!(f, "  {:<9} {}", file.status, message)?,
                None => writeln!(
                    f,
                    "  {:<9} {} ({} line(s){})",
                    file.status,
                    file.path.display(),
                    file.lines,
                    if file.previewed { ", previewed" } else { "" }
                )?,
            }
        }

        Ok(())
    }
}
