//! Tracker engine: optimistic reconciler, remote capabilities and the jobs API client.
mod client;
mod engine;
mod error;
mod jobs;
mod options;
mod reconciler;
mod remote;
mod sink;

pub use client::{ClientSettings, JobsClient};
pub use engine::{EngineEvent, EngineHandle};
pub use error::{EngineError, ReconcileError, RemoteError};
pub use jobs::{CreateJob, DeleteJob, UpdateJob};
pub use options::{MissingTarget, Options};
pub use reconciler::Reconciler;
pub use remote::{RemoteCreate, RemoteDelete, RemoteUpdate};
pub use sink::{ChannelSink, CollectionSink};
