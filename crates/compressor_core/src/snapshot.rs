//! Boundary validation for loosely typed job snapshots pushed by the backend.
//!
//! Every field is optional on the wire. A missing field takes its default in the
//! resulting [`Job`]; nothing is carried over from a previously stored entry.

use std::path::PathBuf;

use client_logging::client_warn;
use serde::Deserialize;
use thiserror::Error;

use crate::{Job, JobId, JobStatus};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot payload is not decodable: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("snapshot has no job id")]
    MissingId,
    #[error("unknown job status {0:?}")]
    UnknownStatus(String),
    #[error("progress {0} is outside 0..=100")]
    ProgressOutOfRange(f64),
    #[error("{field} is negative or too large: {value}")]
    CountOutOfRange { field: &'static str, value: i64 },
}

/// The wire shape of a `jobUpdate` payload and of each `listJobs` entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobSnapshot {
    pub id: Option<String>,
    pub source_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub status: Option<String>,
    pub progress: Option<f64>,
    pub total_files: Option<i64>,
    pub done_files: Option<i64>,
    pub current_file: Option<String>,
}

impl JobSnapshot {
    pub fn from_json(value: serde_json::Value) -> Result<Job, SnapshotError> {
        let snapshot: JobSnapshot = serde_json::from_value(value)?;
        Job::try_from(snapshot)
    }

    pub fn from_json_str(raw: &str) -> Result<Job, SnapshotError> {
        let snapshot: JobSnapshot = serde_json::from_str(raw)?;
        Job::try_from(snapshot)
    }
}

impl TryFrom<JobSnapshot> for Job {
    type Error = SnapshotError;

    fn try_from(snapshot: JobSnapshot) -> Result<Self, Self::Error> {
        let id = snapshot
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or(SnapshotError::MissingId)?;

        let status = match snapshot.status.as_deref() {
            Some(raw) => raw.parse()?,
            None => JobStatus::Queued,
        };

        let progress = match snapshot.progress {
            None => 0,
            Some(value) if value.is_finite() && (0.0..=100.0).contains(&value) => {
                value.round() as u8
            }
            Some(value) => return Err(SnapshotError::ProgressOutOfRange(value)),
        };

        let total_files = count("totalFiles", snapshot.total_files)?;
        let done_files = count("doneFiles", snapshot.done_files)?;
        // A zero total means the backend has not counted the folder yet.
        if total_files > 0 && done_files > total_files {
            client_warn!(
                "Job {}: doneFiles {} exceeds totalFiles {}",
                id,
                done_files,
                total_files
            );
        }

        Ok(Job {
            id: JobId::new(id),
            source_path: snapshot.source_path.unwrap_or_default(),
            output_path: snapshot.output_path.unwrap_or_default(),
            status,
            progress,
            total_files,
            done_files,
            current_file: snapshot.current_file.filter(|name| !name.is_empty()),
        })
    }
}

fn count(field: &'static str, value: Option<i64>) -> Result<u32, SnapshotError> {
    match value {
        None => Ok(0),
        Some(value) => {
            u32::try_from(value).map_err(|_| SnapshotError::CountOutOfRange { field, value })
        }
    }
}
