//! Compressor client: backend boundary, event reconciliation and effect execution.
mod backend;
mod client;
mod dispatch;
mod handle;
mod intake;
mod settings;
mod subscription;
mod types;

pub use backend::{Backend, EventSink, EventSource};
pub use client::JobClient;
pub use dispatch::CommandDispatcher;
pub use handle::ClientHandle;
pub use intake::FolderIntake;
pub use settings::ClientSettings;
pub use subscription::EventSubscription;
pub use types::{BackendError, BackendEvent, ClientError, IntakeError, SubscriptionId};
