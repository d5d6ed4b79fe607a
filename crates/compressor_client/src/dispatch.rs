use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use client_logging::{client_info, client_warn};
use compressor_core::{JobCommand, JobId};

use crate::backend::with_deadline;
use crate::{Backend, BackendError};

/// Sends one-way requests to the backend.
///
/// A returned `Ok` means the request was delivered, not that it took effect.
/// Failures are logged here and handed back; nothing is retried.
#[derive(Clone)]
pub struct CommandDispatcher {
    backend: Arc<dyn Backend>,
    timeout: Duration,
}

impl CommandDispatcher {
    pub fn new(backend: Arc<dyn Backend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub async fn pause(&self, id: &JobId) -> Result<(), BackendError> {
        self.send(&JobCommand::Pause(id.clone())).await
    }

    pub async fn resume(&self, id: &JobId) -> Result<(), BackendError> {
        self.send(&JobCommand::Resume(id.clone())).await
    }

    pub async fn stop(&self, id: &JobId) -> Result<(), BackendError> {
        self.send(&JobCommand::Stop(id.clone())).await
    }

    pub async fn send(&self, command: &JobCommand) -> Result<(), BackendError> {
        let backend = self.backend.as_ref();
        let result = match command {
            JobCommand::Pause(id) => {
                with_deadline("pause", self.timeout, backend.pause_job(id)).await
            }
            JobCommand::Resume(id) => {
                with_deadline("resume", self.timeout, backend.resume_job(id)).await
            }
            JobCommand::Stop(id) => with_deadline("stop", self.timeout, backend.stop_job(id)).await,
        };
        if let Err(err) = &result {
            log_failure(&command.to_string(), err);
        }
        result
    }

    /// Enqueue a new job for an already resolved folder.
    pub async fn add_folder(&self, canonical: &Path) -> Result<(), BackendError> {
        let result = with_deadline(
            "submit",
            self.timeout,
            self.backend.submit_folder(canonical),
        )
        .await;
        match &result {
            Ok(()) => client_info!("Submitted folder {:?}", canonical),
            Err(err) => log_failure(&format!("submit {}", canonical.display()), err),
        }
        result
    }

    pub async fn select_folder(&self) -> Result<(), BackendError> {
        let result = with_deadline("select", self.timeout, self.backend.select_folder()).await;
        if let Err(err) = &result {
            log_failure("select folder", err);
        }
        result
    }
}

fn log_failure(request: &str, err: &BackendError) {
    match err {
        // Usually a job that finished or was removed while the request was in flight.
        BackendError::UnknownJob(_) => client_info!("{} ignored: {}", request, err),
        _ => client_warn!("{} failed: {}", request, err),
    }
}
