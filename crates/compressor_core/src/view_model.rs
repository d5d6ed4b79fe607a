use std::path::PathBuf;

use crate::{IntakeStats, JobId, JobStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Newest first.
    pub jobs: Vec<JobRowView>,
    pub job_count: usize,
    /// Jobs not yet in a terminal status.
    pub active_count: usize,
    pub last_intake: Option<IntakeStats>,
    pub load_error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub status: JobStatus,
    pub progress: u8,
    pub done_files: u32,
    pub total_files: u32,
    /// Only set while processing.
    pub current_file: Option<String>,
    pub actions: JobActions,
}

/// Which controls make sense for a job in its current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobActions {
    pub pause: bool,
    pub resume: bool,
    pub stop: bool,
    pub clear: bool,
}

impl JobActions {
    pub fn for_status(status: JobStatus) -> Self {
        Self {
            pause: status == JobStatus::Processing,
            resume: status == JobStatus::Paused,
            stop: matches!(status, JobStatus::Processing | JobStatus::Paused),
            clear: status.is_terminal(),
        }
    }
}
