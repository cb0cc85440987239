use std::sync::mpsc;

use tracker_core::ReconcileState;

/// Receives every collection the reconciler publishes, whole.
pub trait CollectionSink<T>: Send + Sync {
    fn publish(&self, state: ReconcileState<T>);
}

/// Discards publishes; for callers that only use returned outcomes.
impl<T> CollectionSink<T> for () {
    fn publish(&self, _state: ReconcileState<T>) {}
}

pub struct ChannelSink<T> {
    tx: mpsc::Sender<ReconcileState<T>>,
}

impl<T> ChannelSink<T> {
    pub fn new(tx: mpsc::Sender<ReconcileState<T>>) -> Self {
        Self { tx }
    }
}

impl<T: Send> CollectionSink<T> for ChannelSink<T> {
    fn publish(&self, state: ReconcileState<T>) {
        let _ = self.tx.send(state);
    }
}
