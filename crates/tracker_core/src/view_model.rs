use chrono::{DateTime, Utc};

use crate::{
    Job, OperationKind, Priority, PriorityStats, RecordId, Settlement, SettledStatus, Stage,
    StageStats,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient message for the user, decided by the dashboard rather than the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn from_settlement(settlement: &Settlement) -> Self {
        let (done, failed) = match settlement.kind {
            OperationKind::Create => ("Created", "Creation"),
            OperationKind::Update => ("Updated", "Update"),
            OperationKind::Delete => ("Deleted", "Deletion"),
        };
        match &settlement.status {
            SettledStatus::Reconciled => Notice::success(format!("{done} successfully")),
            SettledStatus::RolledBack { .. } => {
                Notice::error(format!("{failed} failed, rolling back changes"))
            }
            SettledStatus::Failed { reason } => Notice::error(format!("{failed} failed: {reason}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardView {
    pub rows: Vec<JobRowView>,
    pub job_count: usize,
    pub stage_stats: StageStats,
    pub priority_stats: PriorityStats,
    pub is_updating: bool,
    pub loaded: bool,
    pub filter_active: bool,
    pub notice: Option<Notice>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub id: RecordId,
    pub title: String,
    pub company: String,
    pub stage: Stage,
    pub priority: Priority,
    pub applied_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub note_count: usize,
    /// Still waiting for the server to confirm a create.
    pub pending: bool,
}

impl JobRowView {
    pub(crate) fn from_job(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            stage: job.stage,
            priority: job.priority,
            applied_at: job.applied_at,
            tags: job.tag_names().map(ToOwned::to_owned).collect(),
            note_count: job.notes.len(),
            pending: job.is_pending(),
        }
    }
}
