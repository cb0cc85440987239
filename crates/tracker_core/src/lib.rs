//! Tracker core: pure collection transforms, job model and dashboard state machine.
mod change;
mod collection;
mod effect;
mod entity;
mod filter;
mod id;
mod job;
mod msg;
mod outcome;
mod state;
mod stats;
mod update;
mod validate;
mod view_model;

pub use change::JobChange;
pub use collection::{append_optimistic, apply_patch, remove_matching, replace_temp, Mutation};
pub use effect::Effect;
pub use entity::{Entity, Patch};
pub use filter::JobFilter;
pub use id::{RecordId, TempId, TempIdSource};
pub use job::{Job, JobDraft, JobPatch, JobTag, Note, Priority, Stage, Tag};
pub use msg::Msg;
pub use outcome::{
    OperationKind, Outcome, OutcomeStatus, PendingOperation, PendingTarget, ReconcileState,
    Settlement, SettledStatus,
};
pub use state::DashboardState;
pub use stats::{priority_stats, stage_stats, PriorityStats, StageStats};
pub use update::update;
pub use validate::{validate_note_content, validate_tag, ValidationError};
pub use view_model::{DashboardView, JobRowView, Notice, NoticeLevel};
