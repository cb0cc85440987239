use crate::{Job, JobChange, JobDraft, JobFilter, RecordId};

/// Work the dashboard hands to the engine. Mutations carry the collection
/// as the dashboard saw it, which becomes the rollback snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
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
