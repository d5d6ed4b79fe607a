use std::path::PathBuf;

use crate::{IntakeReport, Job, JobCommand, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Bootstrap listing arrived; replaces every stored job.
    JobsLoaded(Vec<Job>),
    /// Bootstrap listing could not be fetched.
    JobsLoadFailed(String),
    /// Backend pushed a validated `jobUpdate` snapshot.
    JobUpdated(Job),
    /// Backend event channel came back after a restart; jobs must be re-listed.
    BackendReconnected,
    /// Raw paths dropped onto the application surface.
    FilesDropped(Vec<PathBuf>),
    /// User asked to add one folder by path.
    AddFolderRequested(PathBuf),
    /// Folder intake finished a batch.
    IntakeFinished(IntakeReport),
    /// User clicked Pause on a job.
    PauseClicked(JobId),
    /// User clicked Resume on a job.
    ResumeClicked(JobId),
    /// User clicked Stop on a job.
    StopClicked(JobId),
    /// User clicked Clear on a job. Purely local.
    ClearClicked(JobId),
    /// User asked for the native folder picker.
    SelectFolderClicked,
    /// A control request did not reach the backend.
    CommandFailed { command: JobCommand, reason: String },
    /// The folder picker request did not reach the backend.
    SelectFolderFailed(String),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
