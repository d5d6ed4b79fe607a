use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use compressor_core::JobId;

use crate::{BackendError, BackendEvent, SubscriptionId};

/// Command boundary of the processing engine.
///
/// Every call reports delivery only. Effects on jobs show up later as events.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Bootstrap listing; each entry is one raw job snapshot.
    async fn list_jobs(&self) -> Result<Vec<serde_json::Value>, BackendError>;

    /// Canonical folder for a raw path, or `None` when there is nothing to process.
    async fn resolve_folder(&self, raw: &Path) -> Result<Option<PathBuf>, BackendError>;

    async fn submit_folder(&self, canonical: &Path) -> Result<(), BackendError>;

    async fn pause_job(&self, id: &JobId) -> Result<(), BackendError>;

    async fn resume_job(&self, id: &JobId) -> Result<(), BackendError>;

    async fn stop_job(&self, id: &JobId) -> Result<(), BackendError>;

    /// Open the host's folder picker. The pick arrives later as a submission.
    async fn select_folder(&self) -> Result<(), BackendError>;
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: BackendEvent);
}

/// Push side of the backend. Implemented by whatever transport the host uses.
pub trait EventSource: Send + Sync {
    fn subscribe(&self, sink: Arc<dyn EventSink>) -> Result<SubscriptionId, BackendError>;

    /// Stop delivering to `id`. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

pub(crate) async fn with_deadline<T>(
    operation: &'static str,
    after: Duration,
    call: impl Future<Output = Result<T, BackendError>>,
) -> Result<T, BackendError> {
    match tokio::time::timeout(after, call).await {
        Ok(result) => result,
        Err(_) => Err(BackendError::Timeout { operation, after }),
    }
}
