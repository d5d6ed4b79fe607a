use std::path::{Path, PathBuf};

use client_logging::{client_debug, client_info, client_warn};

use crate::intake::non_blank_paths;
use crate::view_model::JobActions;
use crate::{AppState, Effect, Job, JobCommand, JobId, JobStatus, Msg, Upsert};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::JobsLoaded(jobs) => {
            client_info!("Loaded {} jobs from backend", jobs.len());
            state.store_mut().load(jobs);
            state.set_load_error(None);
            Vec::new()
        }
        Msg::JobsLoadFailed(reason) => {
            client_warn!("Job listing failed: {}", reason);
            state.set_load_error(Some(reason));
            Vec::new()
        }
        Msg::BackendReconnected => vec![Effect::LoadJobs],
        Msg::JobUpdated(job) => {
            apply_snapshot(&mut state, job);
            Vec::new()
        }
        Msg::FilesDropped(paths) => ingest(&state, paths),
        Msg::AddFolderRequested(path) => ingest(&state, vec![path]),
        Msg::IntakeFinished(report) => {
            let stats = report.stats();
            client_info!(
                "Intake finished: submitted={} skipped={} failed={}",
                stats.submitted,
                stats.skipped,
                stats.failed
            );
            state.set_last_intake(stats);
            Vec::new()
        }
        Msg::PauseClicked(id) => command(&state, JobCommand::Pause(id), |a| a.pause),
        Msg::ResumeClicked(id) => command(&state, JobCommand::Resume(id), |a| a.resume),
        Msg::StopClicked(id) => command(&state, JobCommand::Stop(id), |a| a.stop),
        Msg::ClearClicked(id) => {
            clear(&mut state, &id);
            Vec::new()
        }
        Msg::SelectFolderClicked => vec![Effect::SelectFolder],
        Msg::CommandFailed { command, reason } => {
            // The request may be re-issued by the user; nothing is retried here.
            client_debug!("Command {} not delivered: {}", command, reason);
            Vec::new()
        }
        Msg::SelectFolderFailed(reason) => {
            client_debug!("Folder picker not opened: {}", reason);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_snapshot(state: &mut AppState, job: Job) {
    let id = job.id.clone();
    let next_status = job.status;
    let next_progress = job.progress;

    match state.store_mut().upsert(job) {
        Upsert::Inserted => {
            client_debug!("Job {} appeared with status {}", id, next_status);
        }
        Upsert::Replaced { previous } => {
            if !previous.status.allows_transition_to(next_status) {
                client_warn!(
                    "Job {} moved {} -> {}; applying snapshot anyway",
                    id,
                    previous.status,
                    next_status
                );
            } else if previous.status == JobStatus::Processing
                && next_status == JobStatus::Processing
                && next_progress < previous.progress
            {
                client_warn!(
                    "Job {} progress went back {} -> {}; snapshot may be stale",
                    id,
                    previous.progress,
                    next_progress
                );
            }
        }
    }
}

fn ingest(state: &AppState, paths: Vec<PathBuf>) -> Vec<Effect> {
    let paths = non_blank_paths(paths);
    if paths.is_empty() {
        return Vec::new();
    }
    let active_sources = state.store().active_sources().map(Path::to_path_buf).collect();
    vec![Effect::IngestFolders {
        paths,
        active_sources,
    }]
}

fn command(
    state: &AppState,
    command: JobCommand,
    allowed: impl Fn(JobActions) -> bool,
) -> Vec<Effect> {
    let Some(job) = state.store().get(command.job_id()) else {
        client_debug!("Ignoring {}: job not in store", command);
        return Vec::new();
    };
    if !allowed(JobActions::for_status(job.status)) {
        client_debug!("Ignoring {}: job is {}", command, job.status);
        return Vec::new();
    }
    vec![Effect::Command(command)]
}

fn clear(state: &mut AppState, id: &JobId) {
    let Some(job) = state.store().get(id) else {
        return;
    };
    if !job.is_terminal() {
        client_warn!("Refusing to clear job {} while {}", id, job.status);
        return;
    }
    state.store_mut().remove(id);
}
