use std::fmt;

use crate::TempId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Create => f.write_str("create"),
            OperationKind::Update => f.write_str("update"),
            OperationKind::Delete => f.write_str("delete"),
        }
    }
}

/// What a pending operation points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingTarget {
    /// Key value of an existing entity, rendered for diagnostics.
    Existing(String),
    /// Placeholder inserted by an optimistic create.
    Temporary(TempId),
}

impl fmt::Display for PendingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingTarget::Existing(key) => f.write_str(key),
            PendingTarget::Temporary(temp) => temp.fmt(f),
        }
    }
}

/// One in-flight mutation and the collection as it was before it.
///
/// Settling consumes the operation, so a success and a rollback can never
/// both be applied.
#[derive(Debug)]
pub struct PendingOperation<T> {
    kind: OperationKind,
    target: PendingTarget,
    snapshot: Vec<T>,
}

impl<T> PendingOperation<T> {
    pub fn new(kind: OperationKind, target: PendingTarget, snapshot: Vec<T>) -> Self {
        Self {
            kind,
            target,
            snapshot,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn target(&self) -> &PendingTarget {
        &self.target
    }

    pub fn snapshot(&self) -> &[T] {
        &self.snapshot
    }

    pub fn reconcile(self, collection: Vec<T>) -> Outcome<T> {
        Outcome {
            kind: self.kind,
            status: OutcomeStatus::Reconciled,
            collection,
        }
    }

    pub fn roll_back(self, reason: impl Into<String>) -> Outcome<T> {
        Outcome {
            kind: self.kind,
            status: OutcomeStatus::RolledBack {
                reason: reason.into(),
            },
            collection: self.snapshot,
        }
    }

    /// Gives the snapshot back when the failure is handed to the caller instead.
    pub fn abandon(self) -> Vec<T> {
        self.snapshot
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Reconciled,
    RolledBack { reason: String },
}

/// Terminal result of a reconciled mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub kind: OperationKind,
    pub status: OutcomeStatus,
    pub collection: Vec<T>,
}

impl<T> Outcome<T> {
    pub fn is_reconciled(&self) -> bool {
        self.status == OutcomeStatus::Reconciled
    }

    pub fn is_rolled_back(&self) -> bool {
        matches!(self.status, OutcomeStatus::RolledBack { .. })
    }

    pub fn settlement(&self) -> Settlement {
        let status = match &self.status {
            OutcomeStatus::Reconciled => SettledStatus::Reconciled,
            OutcomeStatus::RolledBack { reason } => SettledStatus::RolledBack {
                reason: reason.clone(),
            },
        };
        Settlement {
            kind: self.kind,
            status,
        }
    }
}

/// Collection-free summary of how an operation ended, for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub kind: OperationKind,
    pub status: SettledStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettledStatus {
    Reconciled,
    RolledBack { reason: String },
    /// The failure was handed back to the caller without a rollback outcome.
    Failed { reason: String },
}

/// What the rendering layer observes: a whole collection and the busy flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileState<T> {
    pub collection: Vec<T>,
    pub is_updating: bool,
}

impl<T> ReconcileState<T> {
    pub fn idle(collection: Vec<T>) -> Self {
        Self {
            collection,
            is_updating: false,
        }
    }
}

impl<T> Default for ReconcileState<T> {
    fn default() -> Self {
        Self::idle(Vec::new())
    }
}
