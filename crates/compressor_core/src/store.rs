use std::path::Path;

use client_logging::client_warn;

use crate::{Job, JobId};

/// Result of applying a snapshot to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upsert {
    /// The id was unseen; the job now sits at position 0.
    Inserted,
    /// The entry was replaced in place; carries the snapshot it replaced.
    Replaced { previous: Job },
}

/// Ordered, newest-first collection of jobs keyed by id.
///
/// Ids are unique. Entries are only ever replaced whole, never edited field by field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobStore {
    jobs: Vec<Job>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole store with a bootstrap listing, keeping backend order.
    ///
    /// Later duplicates of an id already seen in the listing are dropped.
    pub fn load(&mut self, jobs: Vec<Job>) {
        let mut loaded: Vec<Job> = Vec::with_capacity(jobs.len());
        for job in jobs {
            if loaded.iter().any(|existing| existing.id == job.id) {
                client_warn!("Bootstrap listing repeats job {}; keeping first entry", job.id);
                continue;
            }
            loaded.push(job);
        }
        self.jobs = loaded;
    }

    pub fn upsert(&mut self, job: Job) -> Upsert {
        match self.position(&job.id) {
            Some(index) => {
                let previous = std::mem::replace(&mut self.jobs[index], job);
                Upsert::Replaced { previous }
            }
            None => {
                self.jobs.insert(0, job);
                Upsert::Inserted
            }
        }
    }

    /// Remove the entry with `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: &JobId) -> Option<Job> {
        let index = self.position(id)?;
        Some(self.jobs.remove(index))
    }

    pub fn get(&self, id: &JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| &job.id == id)
    }

    pub fn position(&self, id: &JobId) -> Option<usize> {
        self.jobs.iter().position(|job| &job.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Source folders of the jobs that are not yet terminal.
    pub fn active_sources(&self) -> impl Iterator<Item = &Path> {
        self.jobs
            .iter()
            .filter(|job| !job.is_terminal())
            .map(Job::source_path)
    }
}
