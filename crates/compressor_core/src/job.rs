use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::SnapshotError;

/// Backend-assigned job identifier. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for JobId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JobStatus {
    /// Created but not yet picked up. Older backends report this as `pending`.
    #[default]
    Queued,
    Processing,
    Paused,
    Stopped,
    Completed,
    Error,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Paused => "paused",
            JobStatus::Stopped => "stopped",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }

    /// `completed`, `stopped` and `error` admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Stopped | JobStatus::Error
        )
    }

    /// Whether the backend is expected to move a job from `self` to `next`.
    ///
    /// Only used to flag anomalies; snapshots are applied regardless.
    pub fn allows_transition_to(self, next: JobStatus) -> bool {
        if self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        next != JobStatus::Queued
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = SnapshotError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "queued" | "pending" => Ok(JobStatus::Queued),
            "processing" => Ok(JobStatus::Processing),
            "paused" => Ok(JobStatus::Paused),
            "stopped" => Ok(JobStatus::Stopped),
            "completed" => Ok(JobStatus::Completed),
            "error" => Ok(JobStatus::Error),
            _ => Err(SnapshotError::UnknownStatus(raw.to_string())),
        }
    }
}

/// One folder-to-folder batch conversion as last reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub status: JobStatus,
    /// Percentage, 0..=100.
    pub progress: u8,
    pub total_files: u32,
    pub done_files: u32,
    pub current_file: Option<String>,
}

impl Job {
    /// A freshly created job before any progress event has arrived.
    pub fn new(id: impl Into<JobId>, source_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            id: id.into(),
            source_path,
            output_path,
            status: JobStatus::Queued,
            progress: 0,
            total_files: 0,
            done_files: 0,
            current_file: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// The file being converted, only while the job is processing.
    pub fn active_file(&self) -> Option<&str> {
        match self.status {
            JobStatus::Processing => self.current_file.as_deref(),
            _ => None,
        }
    }
}
