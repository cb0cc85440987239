use crate::RecordId;

/// A record the reconciler can create optimistically.
pub trait Entity: Clone {
    /// Field data a user supplies before the server has assigned an id.
    type Draft: Clone;

    fn record_id(&self) -> &RecordId;

    /// Builds the placeholder shown while the create is in flight.
    fn from_draft(id: RecordId, draft: &Self::Draft) -> Self;
}

/// Partial-field update merged into a matching entity.
pub trait Patch<T> {
    fn apply_to(&self, target: &mut T);
}
