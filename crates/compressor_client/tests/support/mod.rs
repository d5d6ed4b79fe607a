#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::thread;
use std::time::{Duration, Instant};

use compressor_client::{
    Backend, BackendError, BackendEvent, EventSink, EventSource, JobClient, SubscriptionId,
};
use compressor_core::JobId;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Resolve(PathBuf),
    Submit(PathBuf),
    Pause(JobId),
    Resume(JobId),
    Stop(JobId),
    Select,
}

/// Scriptable backend that records every call it receives.
#[derive(Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    listing: Option<Result<Vec<serde_json::Value>, BackendError>>,
    resolutions: HashMap<PathBuf, Result<Option<PathBuf>, BackendError>>,
    submit_failures: HashMap<PathBuf, BackendError>,
    unknown_jobs: HashSet<JobId>,
    transport_down: bool,
    delay: Option<Duration>,
    pause_delay: Option<Duration>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, listing: Vec<serde_json::Value>) -> Self {
        self.listing = Some(Ok(listing));
        self
    }

    pub fn with_failing_listing(mut self, err: BackendError) -> Self {
        self.listing = Some(Err(err));
        self
    }

    /// Unscripted paths resolve to themselves.
    pub fn resolving(mut self, raw: &str, result: Result<Option<&str>, BackendError>) -> Self {
        self.resolutions
            .insert(PathBuf::from(raw), result.map(|path| path.map(PathBuf::from)));
        self
    }

    pub fn rejecting_submit(mut self, canonical: &str, err: BackendError) -> Self {
        self.submit_failures.insert(PathBuf::from(canonical), err);
        self
    }

    pub fn with_unknown_job(mut self, id: &str) -> Self {
        self.unknown_jobs.insert(JobId::from(id));
        self
    }

    pub fn with_transport_down(mut self) -> Self {
        self.transport_down = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Pause calls are recorded only once this delay has passed.
    pub fn with_slow_pause(mut self, delay: Duration) -> Self {
        self.pause_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Submit(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: Call) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.transport_down {
            return Err(BackendError::Transport("connection refused".to_string()));
        }
        Ok(())
    }

    fn check_job(&self, id: &JobId) -> Result<(), BackendError> {
        if self.unknown_jobs.contains(id) {
            Err(BackendError::UnknownJob(id.clone()))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl Backend for FakeBackend {
    async fn list_jobs(&self) -> Result<Vec<serde_json::Value>, BackendError> {
        self.record(Call::List).await?;
        self.listing.clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn resolve_folder(&self, raw: &Path) -> Result<Option<PathBuf>, BackendError> {
        self.record(Call::Resolve(raw.to_path_buf())).await?;
        match self.resolutions.get(raw) {
            Some(result) => result.clone(),
            None => Ok(Some(raw.to_path_buf())),
        }
    }

    async fn submit_folder(&self, canonical: &Path) -> Result<(), BackendError> {
        self.record(Call::Submit(canonical.to_path_buf())).await?;
        match self.submit_failures.get(canonical) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn pause_job(&self, id: &JobId) -> Result<(), BackendError> {
        if let Some(delay) = self.pause_delay {
            tokio::time::sleep(delay).await;
        }
        self.record(Call::Pause(id.clone())).await?;
        self.check_job(id)
    }

    async fn resume_job(&self, id: &JobId) -> Result<(), BackendError> {
        self.record(Call::Resume(id.clone())).await?;
        self.check_job(id)
    }

    async fn stop_job(&self, id: &JobId) -> Result<(), BackendError> {
        self.record(Call::Stop(id.clone())).await?;
        self.check_job(id)
    }

    async fn select_folder(&self) -> Result<(), BackendError> {
        self.record(Call::Select).await
    }
}

/// In-process event source; tests push events by hand.
#[derive(Default)]
pub struct FakeEvents {
    next_id: AtomicU64,
    sinks: Mutex<HashMap<SubscriptionId, Arc<dyn EventSink>>>,
    refuse: bool,
}

impl FakeEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    pub fn push(&self, event: BackendEvent) {
        let sinks: Vec<_> = self.sinks.lock().unwrap().values().cloned().collect();
        for sink in sinks {
            sink.emit(event.clone());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sinks.lock().unwrap().len()
    }
}

impl EventSource for FakeEvents {
    fn subscribe(&self, sink: Arc<dyn EventSink>) -> Result<SubscriptionId, BackendError> {
        if self.refuse {
            return Err(BackendError::Transport("event bus unavailable".to_string()));
        }
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.sinks.lock().unwrap().insert(id, sink);
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.sinks.lock().unwrap().remove(&id);
    }
}

/// Pump until `done` holds or a few seconds pass.
pub fn pump_until(client: &mut JobClient, mut done: impl FnMut(&JobClient) -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        client.pump();
        if done(client) {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    false
}
