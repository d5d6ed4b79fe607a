use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use client_logging::{client_debug, client_info, client_warn};
use compressor_core::{non_blank_paths, IntakeFilter, IntakeReport};

use crate::backend::with_deadline;
use crate::{Backend, CommandDispatcher, IntakeError};

enum Ingested {
    Submitted(PathBuf),
    Empty,
    Duplicate(PathBuf),
}

/// Turns raw dropped or picked paths into folder submissions.
pub struct FolderIntake {
    backend: Arc<dyn Backend>,
    dispatcher: CommandDispatcher,
    resolve_timeout: Duration,
    /// Canonical folders submitted by this intake whose job has not finished yet.
    /// Shared by every batch, so a folder dropped twice before its job shows up
    /// is still submitted once.
    in_flight: Mutex<HashSet<PathBuf>>,
}

impl FolderIntake {
    pub fn new(
        backend: Arc<dyn Backend>,
        dispatcher: CommandDispatcher,
        resolve_timeout: Duration,
    ) -> Self {
        Self {
            backend,
            dispatcher,
            resolve_timeout,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Resolve and submit each path in order. One failing path never stops the rest.
    pub async fn ingest(&self, paths: Vec<PathBuf>, active_sources: Vec<PathBuf>) -> IntakeReport {
        let mut filter = IntakeFilter::new(active_sources);
        let mut report = IntakeReport::default();

        for raw in non_blank_paths(paths) {
            match self.ingest_one(&raw, &mut filter).await {
                Ok(Ingested::Submitted(canonical)) => report.submitted.push(canonical),
                Ok(Ingested::Empty) => report.skipped_empty.push(raw),
                Ok(Ingested::Duplicate(canonical)) => report.skipped_duplicate.push(canonical),
                Err(err) => {
                    client_warn!("Intake: {}", err);
                    report.failed.push((err.path().to_path_buf(), err.to_string()));
                }
            }
        }
        report
    }

    /// The job converting `source` reached a terminal status; it may be submitted again.
    pub fn job_finished(&self, source: &Path) {
        if self.in_flight().remove(source) {
            client_debug!("Intake: {:?} may be submitted again", source);
        }
    }

    async fn ingest_one(
        &self,
        raw: &Path,
        filter: &mut IntakeFilter,
    ) -> Result<Ingested, IntakeError> {
        let resolved = with_deadline(
            "resolve",
            self.resolve_timeout,
            self.backend.resolve_folder(raw),
        )
        .await
        .map_err(|source| IntakeError::Resolution {
            path: raw.to_path_buf(),
            source,
        })?;

        let Some(canonical) = resolved.filter(|path| !path.as_os_str().is_empty()) else {
            client_info!("Skipping {:?}: nothing to process", raw);
            return Ok(Ingested::Empty);
        };

        // Claimed before submitting: the backend may push the new job before it answers.
        if !filter.admit(&canonical) || !self.in_flight().insert(canonical.clone()) {
            client_debug!("Skipping {:?}: already submitted", canonical);
            return Ok(Ingested::Duplicate(canonical));
        }

        if let Err(source) = self.dispatcher.add_folder(&canonical).await {
            self.in_flight().remove(&canonical);
            return Err(IntakeError::Submission {
                path: canonical,
                source,
            });
        }
        Ok(Ingested::Submitted(canonical))
    }

    fn in_flight(&self) -> MutexGuard<'_, HashSet<PathBuf>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
