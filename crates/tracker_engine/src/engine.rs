use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tokio::sync::mpsc as tokio_mpsc;
use tracker_core::{
    Job, JobChange, JobDraft, JobFilter, OperationKind, Outcome, RecordId, ReconcileState,
    Settlement, SettledStatus,
};
use tracker_logging::{tracker_debug, tracker_warn};

use crate::{
    ClientSettings, CollectionSink, CreateJob, DeleteJob, EngineError, JobsClient, MissingTarget,
    Options, ReconcileError, Reconciler, RemoteError, UpdateJob,
};

enum EngineCommand {
    Refresh {
        filter: JobFilter,
    },
    Create {
        snapshot: Vec<Job>,
        draft: JobDraft,
    },
    Update {
        snapshot: Vec<Job>,
        id: RecordId,
        change: JobChange,
    },
    Delete {
        snapshot: Vec<Job>,
        id: RecordId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Result of a listing request.
    Loaded(Result<Vec<Job>, RemoteError>),
    /// A whole collection published by the reconciler.
    Published(ReconcileState<Job>),
    /// Terminal outcome of a create/update/delete.
    Settled(Settlement),
}

struct EventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl CollectionSink<Job> for EventSink {
    fn publish(&self, state: ReconcileState<Job>) {
        let _ = self.tx.send(EngineEvent::Published(state));
    }
}

/// Runs jobs API work on a background runtime, one command at a time.
pub struct EngineHandle {
    cmd_tx: tokio_mpsc::UnboundedSender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let client = JobsClient::new(settings)?;
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, mut cmd_rx) = tokio_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let reconciler = Reconciler::new(EventSink {
                tx: event_tx.clone(),
            });
            runtime.block_on(async move {
                // Awaiting each command before the next keeps collection mutations serialized.
                while let Some(command) = cmd_rx.recv().await {
                    handle_command(&client, &reconciler, command, &event_tx).await;
                }
            });
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn refresh(&self, filter: JobFilter) {
        self.send(EngineCommand::Refresh { filter });
    }

    pub fn create(&self, snapshot: Vec<Job>, draft: JobDraft) {
        self.send(EngineCommand::Create { snapshot, draft });
    }

    pub fn update(&self, snapshot: Vec<Job>, id: RecordId, change: impl Into<JobChange>) {
        self.send(EngineCommand::Update {
            snapshot,
            id,
            change: change.into(),
        });
    }

    pub fn delete(&self, snapshot: Vec<Job>, id: RecordId) {
        self.send(EngineCommand::Delete { snapshot, id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            tracker_warn!("engine thread has stopped; command dropped");
        }
    }
}

async fn handle_command(
    client: &JobsClient,
    reconciler: &Reconciler<EventSink>,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Refresh { filter } => {
            let result = client.list_jobs(&filter).await;
            if let Ok(jobs) = &result {
                tracker_debug!("loaded {} jobs", jobs.len());
            }
            EngineEvent::Loaded(result)
        }
        EngineCommand::Create { snapshot, draft } => {
            let result = reconciler
                .create(&snapshot, &CreateJob::new(client), draft, Options::new())
                .await;
            EngineEvent::Settled(settlement(OperationKind::Create, result))
        }
        EngineCommand::Update {
            snapshot,
            id,
            change,
        } => {
            // Every job endpoint needs a saved job, so a missing one cannot proceed.
            let remote = UpdateJob::new(client, id.clone(), &change);
            let options = Options::new().missing_target(MissingTarget::Reject);
            let result = reconciler
                .update(&snapshot, &remote, &change, |job| &job.id, &id, options)
                .await;
            EngineEvent::Settled(settlement(OperationKind::Update, result))
        }
        EngineCommand::Delete { snapshot, id } => {
            let result = reconciler
                .delete(&snapshot, &DeleteJob::new(client), |job| &job.id, &id, Options::new())
                .await;
            EngineEvent::Settled(settlement(OperationKind::Delete, result))
        }
    };
    let _ = event_tx.send(event);
}

fn settlement(kind: OperationKind, result: Result<Outcome<Job>, ReconcileError>) -> Settlement {
    match result {
        Ok(outcome) => outcome.settlement(),
        Err(err) => Settlement {
            kind,
            status: SettledStatus::Failed {
                reason: err.to_string(),
            },
        },
    }
}
