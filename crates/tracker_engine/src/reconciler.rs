//! Optimistic collection reconciler.
//!
//! Each operation publishes an optimistic collection before awaiting the
//! remote, then exactly one terminal collection: the reconciled result on
//! success, the pre-mutation snapshot otherwise.

use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracker_core::{
    append_optimistic, apply_patch, remove_matching, replace_temp, Entity, OperationKind, Outcome,
    Patch, PendingOperation, PendingTarget, ReconcileState, TempIdSource,
};
use tracker_logging::{tracker_debug, tracker_info, tracker_warn};

use crate::{
    CollectionSink, MissingTarget, Options, ReconcileError, RemoteCreate, RemoteDelete,
    RemoteError, RemoteUpdate,
};

pub struct Reconciler<S> {
    sink: S,
    in_flight: AtomicUsize,
    temp_ids: TempIdSource,
}

/// Clears this call's share of the "is updating" flag on every exit path.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<S> Reconciler<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            in_flight: AtomicUsize::new(0),
            temp_ids: TempIdSource::new(),
        }
    }

    /// True while any operation on this reconciler awaits its remote.
    pub fn is_updating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Merges `patch` into the entity whose key equals `key_value`.
    pub async fn update<T, K, P, F, R>(
        &self,
        items: &[T],
        remote: &R,
        patch: &P,
        key: F,
        key_value: &K,
        options: Options<'_, T>,
    ) -> Result<Outcome<T>, ReconcileError>
    where
        S: CollectionSink<T>,
        T: Clone + Send + 'static,
        K: PartialEq + Display + ?Sized,
        P: Patch<T> + ?Sized,
        F: Fn(&T) -> &K,
        R: RemoteUpdate<T> + ?Sized,
    {
        let pending = PendingOperation::new(
            OperationKind::Update,
            PendingTarget::Existing(key_value.to_string()),
            items.to_vec(),
        );
        let mutation = apply_patch(items, key, key_value, patch);
        self.check_target(&pending, mutation.matched, options.missing_target)?;

        let result = {
            let _guard = InFlight::enter(&self.in_flight);
            self.publish(mutation.optimistic.clone());
            remote.update(mutation.optimistic).await
        };
        self.settle(pending, result, options)
    }

    /// Appends a placeholder under a fresh temporary id, then swaps in the
    /// server's entity at the same position.
    pub async fn create<T, R>(
        &self,
        items: &[T],
        remote: &R,
        draft: T::Draft,
        options: Options<'_, T>,
    ) -> Result<Outcome<T>, ReconcileError>
    where
        S: CollectionSink<T>,
        T: Entity + Send + 'static,
        T::Draft: Send + 'static,
        R: RemoteCreate<T> + ?Sized,
    {
        let temp = self.temp_ids.next_id();
        let pending = PendingOperation::new(
            OperationKind::Create,
            PendingTarget::Temporary(temp),
            items.to_vec(),
        );
        let optimistic = append_optimistic(items, temp, &draft);
        tracker_debug!("create: placeholder {} at position {}", temp, items.len());

        let result = {
            let _guard = InFlight::enter(&self.in_flight);
            self.publish(optimistic.clone());
            remote.create(draft).await
        };
        let result = result.map(|created| replace_temp(optimistic, temp, created));
        self.settle(pending, result, options)
    }

    /// Removes the entity whose key equals `key_value`.
    pub async fn delete<T, K, F, R>(
        &self,
        items: &[T],
        remote: &R,
        key: F,
        key_value: &K,
        options: Options<'_, T>,
    ) -> Result<Outcome<T>, ReconcileError>
    where
        S: CollectionSink<T>,
        T: Clone + Send + 'static,
        K: Clone + PartialEq + Display + Send + 'static,
        F: Fn(&T) -> &K,
        R: RemoteDelete<K> + ?Sized,
    {
        let pending = PendingOperation::new(
            OperationKind::Delete,
            PendingTarget::Existing(key_value.to_string()),
            items.to_vec(),
        );
        let mutation = remove_matching(items, key, key_value);
        self.check_target(&pending, mutation.matched, options.missing_target)?;

        let result = {
            let _guard = InFlight::enter(&self.in_flight);
            self.publish(mutation.optimistic.clone());
            remote.delete(key_value.clone()).await
        };
        let result = result.map(|()| mutation.optimistic);
        self.settle(pending, result, options)
    }

    fn check_target<T>(
        &self,
        pending: &PendingOperation<T>,
        matched: usize,
        policy: MissingTarget,
    ) -> Result<(), ReconcileError> {
        if matched > 0 {
            return Ok(());
        }
        match policy {
            MissingTarget::Proceed => {
                tracker_warn!(
                    "{}: no entity matches {}; remote call proceeds on an unchanged collection",
                    pending.kind(),
                    pending.target()
                );
                Ok(())
            }
            MissingTarget::Reject => Err(ReconcileError::TargetNotFound {
                key: pending.target().to_string(),
            }),
        }
    }

    fn publish<T>(&self, collection: Vec<T>)
    where
        S: CollectionSink<T>,
    {
        self.sink.publish(ReconcileState {
            collection,
            is_updating: self.is_updating(),
        });
    }

    fn settle<T>(
        &self,
        pending: PendingOperation<T>,
        result: Result<Vec<T>, RemoteError>,
        options: Options<'_, T>,
    ) -> Result<Outcome<T>, ReconcileError>
    where
        S: CollectionSink<T>,
        T: Clone,
    {
        let kind = pending.kind();
        match result {
            Ok(collection) => {
                tracker_info!("{} {} reconciled", kind, pending.target());
                self.publish(collection.clone());
                if let Some(on_success) = options.on_success {
                    on_success(&collection);
                }
                Ok(pending.reconcile(collection))
            }
            Err(err) if options.rollback_on_error => {
                tracker_warn!("{} {} rolled back: {}", kind, pending.target(), err);
                if let Some(on_error) = options.on_error {
                    on_error(&err);
                }
                self.publish(pending.snapshot().to_vec());
                Ok(pending.roll_back(err.message()))
            }
            Err(err) => {
                tracker_warn!("{} {} failed: {}", kind, pending.target(), err);
                self.publish(pending.abandon());
                Err(ReconcileError::Remote(err))
            }
        }
    }
}
