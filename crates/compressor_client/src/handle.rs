use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use client_logging::{client_debug, client_warn};
use compressor_core::{Effect, Job, JobCommand, JobSnapshot, Msg};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use crate::backend::with_deadline;
use crate::{
    Backend, BackendEvent, ClientError, ClientSettings, CommandDispatcher, EventSink, EventSource,
    EventSubscription, FolderIntake,
};

/// Runs effects on a background runtime and collects everything that comes back
/// (effect results and backend events) into one ordered message queue.
///
/// Job commands go through a single queue and reach the backend in the order they
/// were issued. Other effects run as independent tasks.
pub struct ClientHandle {
    effect_tx: mpsc::Sender<Effect>,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    // Held so backend events keep flowing until the handle is dropped.
    _subscription: EventSubscription,
}

impl ClientHandle {
    pub fn new(
        backend: Arc<dyn Backend>,
        events: Arc<dyn EventSource>,
        settings: &ClientSettings,
    ) -> Result<Self, ClientError> {
        let (effect_tx, effect_rx) = mpsc::channel::<Effect>();
        let (msg_tx, msg_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new().map_err(ClientError::Runtime)?;

        let runner = Arc::new(EffectRunner::new(backend, settings, msg_tx.clone()));
        let sink = Arc::new(ReconcilingSink::new(msg_tx.clone(), runner.intake.clone()));
        let subscription = EventSubscription::acquire(events, sink)?;

        let (command_tx, command_rx) = unbounded_channel();
        runtime.spawn(deliver_commands(runner.clone(), command_rx));

        thread::Builder::new()
            .name("compressor-client".to_string())
            .spawn(move || {
                while let Ok(effect) = effect_rx.recv() {
                    match effect {
                        Effect::Command(command) => {
                            let _ = command_tx.send(command);
                        }
                        effect => {
                            let runner = runner.clone();
                            runtime.spawn(async move {
                                runner.run(effect).await;
                            });
                        }
                    }
                }
            })
            .map_err(ClientError::Runtime)?;

        Ok(Self {
            effect_tx,
            msg_tx,
            msg_rx,
            _subscription: subscription,
        })
    }

    pub fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            client_debug!("Executing {:?}", effect);
            let _ = self.effect_tx.send(effect);
        }
    }

    /// Sender for host input (clicks, picks) so it queues behind backend events.
    pub fn sender(&self) -> mpsc::Sender<Msg> {
        self.msg_tx.clone()
    }

    pub fn try_recv(&self) -> Option<Msg> {
        self.msg_rx.try_recv().ok()
    }
}

async fn deliver_commands(
    runner: Arc<EffectRunner>,
    mut commands: UnboundedReceiver<JobCommand>,
) {
    while let Some(command) = commands.recv().await {
        runner.deliver(command).await;
    }
}

/// Event sink that validates pushed snapshots before they reach the store.
struct ReconcilingSink {
    tx: mpsc::Sender<Msg>,
    intake: Arc<FolderIntake>,
}

impl ReconcilingSink {
    fn new(tx: mpsc::Sender<Msg>, intake: Arc<FolderIntake>) -> Self {
        Self { tx, intake }
    }
}

impl EventSink for ReconcilingSink {
    fn emit(&self, event: BackendEvent) {
        let msg = match event {
            BackendEvent::JobUpdate(payload) => match JobSnapshot::from_json(payload) {
                Ok(job) => {
                    if job.is_terminal() {
                        self.intake.job_finished(&job.source_path);
                    }
                    Msg::JobUpdated(job)
                }
                Err(err) => {
                    client_warn!("Dropping jobUpdate event: {}", err);
                    return;
                }
            },
            BackendEvent::FileDrop(paths) => Msg::FilesDropped(paths),
            BackendEvent::Reconnected => Msg::BackendReconnected,
        };
        let _ = self.tx.send(msg);
    }
}

struct EffectRunner {
    backend: Arc<dyn Backend>,
    dispatcher: CommandDispatcher,
    intake: Arc<FolderIntake>,
    list_timeout: Duration,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    fn new(
        backend: Arc<dyn Backend>,
        settings: &ClientSettings,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        let dispatcher = CommandDispatcher::new(backend.clone(), settings.command_timeout());
        let intake = Arc::new(FolderIntake::new(
            backend.clone(),
            dispatcher.clone(),
            settings.resolve_timeout(),
        ));
        Self {
            backend,
            dispatcher,
            intake,
            list_timeout: settings.list_timeout(),
            msg_tx,
        }
    }

    async fn run(&self, effect: Effect) {
        let msg = match effect {
            Effect::Command(command) => return self.deliver(command).await,
            Effect::LoadJobs => Some(self.load_jobs().await),
            Effect::IngestFolders {
                paths,
                active_sources,
            } => Some(Msg::IntakeFinished(
                self.intake.ingest(paths, active_sources).await,
            )),
            Effect::SelectFolder => self
                .dispatcher
                .select_folder()
                .await
                .err()
                .map(|err| Msg::SelectFolderFailed(err.to_string())),
        };
        if let Some(msg) = msg {
            let _ = self.msg_tx.send(msg);
        }
    }

    async fn deliver(&self, command: JobCommand) {
        if let Err(err) = self.dispatcher.send(&command).await {
            let _ = self.msg_tx.send(Msg::CommandFailed {
                command,
                reason: err.to_string(),
            });
        }
    }

    async fn load_jobs(&self) -> Msg {
        match with_deadline("list", self.list_timeout, self.backend.list_jobs()).await {
            Ok(payloads) => {
                let jobs = decode_listing(payloads);
                for job in jobs.iter().filter(|job| job.is_terminal()) {
                    self.intake.job_finished(&job.source_path);
                }
                Msg::JobsLoaded(jobs)
            }
            Err(err) => Msg::JobsLoadFailed(err.to_string()),
        }
    }
}

fn decode_listing(payloads: Vec<serde_json::Value>) -> Vec<Job> {
    payloads
        .into_iter()
        .filter_map(|payload| match JobSnapshot::from_json(payload) {
            Ok(job) => Some(job),
            Err(err) => {
                client_warn!("Dropping listed job: {}", err);
                None
            }
        })
        .collect()
}
