use std::sync::{mpsc, Arc};

use compressor_core::{update, AppState, AppViewModel, Effect, Msg};

use crate::{Backend, ClientError, ClientHandle, ClientSettings, EventSource};

/// Owns the job state on the host's thread and feeds it messages in arrival order.
///
/// All state changes happen inside [`JobClient::send`] and [`JobClient::pump`],
/// so the store has a single writer and needs no locking.
pub struct JobClient {
    state: AppState,
    handle: ClientHandle,
}

impl JobClient {
    /// Subscribe to backend events and request the bootstrap listing.
    pub fn connect(
        backend: Arc<dyn Backend>,
        events: Arc<dyn EventSource>,
        settings: &ClientSettings,
    ) -> Result<Self, ClientError> {
        let handle = ClientHandle::new(backend, events, settings)?;
        let client = Self::new(handle);
        client.bootstrap();
        Ok(client)
    }

    pub fn new(handle: ClientHandle) -> Self {
        Self {
            state: AppState::new(),
            handle,
        }
    }

    /// Re-list all jobs; the listing replaces the store when it arrives.
    pub fn bootstrap(&self) {
        self.handle.execute(vec![Effect::LoadJobs]);
    }

    /// Apply one message now.
    pub fn send(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.handle.execute(effects);
    }

    /// Apply every queued message. Returns whether the view changed.
    pub fn pump(&mut self) -> bool {
        while let Some(msg) = self.handle.try_recv() {
            self.send(msg);
        }
        self.state.consume_dirty()
    }

    /// For input produced on other threads; delivered on the next [`JobClient::pump`].
    pub fn sender(&self) -> mpsc::Sender<Msg> {
        self.handle.sender()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
