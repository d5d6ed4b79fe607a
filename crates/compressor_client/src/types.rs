use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use compressor_core::JobId;
use thiserror::Error;

/// Failure of a single backend call. Says nothing about the job's eventual state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("unknown job {0}")]
    UnknownJob(JobId),
    #[error("rejected by backend: {0}")]
    Rejected(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("could not resolve {path:?}: {source}")]
    Resolution {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("could not submit {path:?}: {source}")]
    Submission {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

impl IntakeError {
    pub fn path(&self) -> &Path {
        match self {
            IntakeError::Resolution { path, .. } | IntakeError::Submission { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to start client worker: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to subscribe to backend events: {0}")]
    Subscribe(#[from] BackendError),
    #[error("invalid settings file {path:?}: {message}")]
    Settings { path: PathBuf, message: String },
}

/// Push notification produced by the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// `jobUpdate`: one job snapshot, still loosely typed.
    JobUpdate(serde_json::Value),
    /// `fileDrop`: raw paths dropped onto the application surface.
    FileDrop(Vec<PathBuf>),
    /// The event channel was re-established after a backend restart.
    Reconnected,
}

/// Token identifying one event subscription at its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);
