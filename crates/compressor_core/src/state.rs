use crate::view_model::{AppViewModel, JobActions, JobRowView};
use crate::{IntakeStats, JobStore};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    store: JobStore,
    last_intake: Option<IntakeStats>,
    load_error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &JobStore {
        &self.store
    }

    pub fn view(&self) -> AppViewModel {
        let jobs: Vec<JobRowView> = self
            .store
            .iter()
            .map(|job| JobRowView {
                job_id: job.id.clone(),
                source_path: job.source_path.clone(),
                output_path: job.output_path.clone(),
                status: job.status,
                progress: job.progress,
                done_files: job.done_files,
                total_files: job.total_files,
                current_file: job.active_file().map(ToOwned::to_owned),
                actions: JobActions::for_status(job.status),
            })
            .collect();
        let active_count = jobs.iter().filter(|row| !row.status.is_terminal()).count();

        AppViewModel {
            job_count: jobs.len(),
            active_count,
            jobs,
            last_intake: self.last_intake,
            load_error: self.load_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn store_mut(&mut self) -> &mut JobStore {
        self.dirty = true;
        &mut self.store
    }

    pub(crate) fn set_last_intake(&mut self, stats: IntakeStats) {
        self.last_intake = Some(stats);
        self.dirty = true;
    }

    pub(crate) fn set_load_error(&mut self, error: Option<String>) {
        if self.load_error != error {
            self.load_error = error;
            self.dirty = true;
        }
    }
}
