use crate::{Job, JobDraft, JobPatch, Priority, RecordId, ReconcileState, Settlement, Stage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Initial or refreshed fetch of the user's jobs.
    JobsLoaded(Vec<Job>),
    /// The jobs listing could not be fetched.
    LoadFailed(String),
    /// User asked for a fresh listing from the server.
    RefreshRequested,
    /// User submitted the new-job form.
    CreateRequested(JobDraft),
    /// User saved edits to an existing job.
    EditRequested { id: RecordId, patch: JobPatch },
    /// User wrote a note on a job.
    NoteRequested { id: RecordId, content: String },
    /// User created a tag for a job.
    TagRequested {
        id: RecordId,
        name: String,
        color: String,
    },
    /// User removed a tag from a job.
    TagRemovalRequested { id: RecordId, tag_id: String },
    /// User confirmed deletion of a job.
    DeleteRequested { id: RecordId },
    /// The reconciler published a whole collection (optimistic or terminal).
    CollectionPublished(ReconcileState<Job>),
    /// A create/update/delete reached its terminal outcome.
    MutationSettled(Settlement),
    SearchChanged(String),
    StageFilterChanged(Option<Stage>),
    PriorityFilterChanged(Option<Priority>),
    FiltersCleared,
    NoticeDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
