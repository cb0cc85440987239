use std::fmt;

use crate::RemoteError;

type SuccessCallback<'a, T> = Box<dyn FnOnce(&[T]) + Send + 'a>;
type ErrorCallback<'a> = Box<dyn FnOnce(&RemoteError) + Send + 'a>;

/// What to do when an update or delete finds no entity with the given key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTarget {
    /// Leave the collection unchanged and still call the remote.
    #[default]
    Proceed,
    /// Fail with `ReconcileError::TargetNotFound` before publishing anything.
    Reject,
}

/// Per-call knobs shared by create, update and delete.
pub struct Options<'a, T> {
    pub(crate) on_success: Option<SuccessCallback<'a, T>>,
    pub(crate) on_error: Option<ErrorCallback<'a>>,
    pub(crate) rollback_on_error: bool,
    pub(crate) missing_target: MissingTarget,
}

impl<'a, T> Options<'a, T> {
    pub fn new() -> Self {
        Self {
            on_success: None,
            on_error: None,
            rollback_on_error: true,
            missing_target: MissingTarget::Proceed,
        }
    }

    /// Called with the reconciled collection.
    pub fn on_success(mut self, callback: impl FnOnce(&[T]) + Send + 'a) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Called on the rollback path only; a re-raised failure goes to the caller instead.
    pub fn on_error(mut self, callback: impl FnOnce(&RemoteError) + Send + 'a) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn rollback_on_error(mut self, rollback: bool) -> Self {
        self.rollback_on_error = rollback;
        self
    }

    pub fn missing_target(mut self, policy: MissingTarget) -> Self {
        self.missing_target = policy;
        self
    }
}

impl<T> Default for Options<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Options<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("rollback_on_error", &self.rollback_on_error)
            .field("missing_target", &self.missing_target)
            .finish()
    }
}
