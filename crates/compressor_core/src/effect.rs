use std::fmt;
use std::path::PathBuf;

use crate::JobId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the bootstrap listing.
    LoadJobs,
    /// Resolve and submit each raw path, one after another.
    IngestFolders {
        paths: Vec<PathBuf>,
        /// Sources of jobs still running; a folder matching one is not resubmitted.
        active_sources: Vec<PathBuf>,
    },
    /// Send a control request for one job.
    Command(JobCommand),
    /// Ask the host to open its folder picker.
    SelectFolder,
}

/// Control requests understood by the backend. Delivery is all the caller learns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobCommand {
    Pause(JobId),
    Resume(JobId),
    Stop(JobId),
}

impl JobCommand {
    pub fn job_id(&self) -> &JobId {
        match self {
            JobCommand::Pause(id) | JobCommand::Resume(id) | JobCommand::Stop(id) => id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            JobCommand::Pause(_) => "pause",
            JobCommand::Resume(_) => "resume",
            JobCommand::Stop(_) => "stop",
        }
    }
}

impl fmt::Display for JobCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.job_id())
    }
}
