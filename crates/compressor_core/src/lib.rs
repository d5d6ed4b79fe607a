//! Compressor core: job model, job store and the pure state machine driving them.
mod effect;
mod intake;
mod job;
mod msg;
mod snapshot;
mod state;
mod store;
mod update;
mod view_model;

pub use effect::{Effect, JobCommand};
pub use intake::{non_blank_paths, IntakeFilter, IntakeReport, IntakeStats};
pub use job::{Job, JobId, JobStatus};
pub use msg::Msg;
pub use snapshot::{JobSnapshot, SnapshotError};
pub use state::AppState;
pub use store::{JobStore, Upsert};
pub use update::update;
pub use view_model::{AppViewModel, JobActions, JobRowView};
