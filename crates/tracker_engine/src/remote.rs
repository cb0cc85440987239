//! Remote capabilities the reconciler calls into.
//!
//! Each trait has a blanket impl for async closures, so callers can pass
//! `|items| async move { ... }` directly.

use std::future::Future;

use tracker_core::Entity;

use crate::RemoteError;

#[async_trait::async_trait]
pub trait RemoteUpdate<T>: Send + Sync
where
    T: Send + 'static,
{
    /// Receives the optimistic collection and resolves to the authoritative one.
    async fn update(&self, optimistic: Vec<T>) -> Result<Vec<T>, RemoteError>;
}

#[async_trait::async_trait]
pub trait RemoteCreate<T>: Send + Sync
where
    T: Entity + Send + 'static,
    T::Draft: Send + 'static,
{
    /// Receives the candidate field data and resolves to the created entity.
    async fn create(&self, draft: T::Draft) -> Result<T, RemoteError>;
}

#[async_trait::async_trait]
pub trait RemoteDelete<K>: Send + Sync
where
    K: Send + 'static,
{
    async fn delete(&self, key: K) -> Result<(), RemoteError>;
}

#[async_trait::async_trait]
impl<T, F, Fut> RemoteUpdate<T> for F
where
    T: Send + 'static,
    F: Fn(Vec<T>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<T>, RemoteError>> + Send,
{
    async fn update(&self, optimistic: Vec<T>) -> Result<Vec<T>, RemoteError> {
        self(optimistic).await
    }
}

#[async_trait::async_trait]
impl<T, F, Fut> RemoteCreate<T> for F
where
    T: Entity + Send + 'static,
    T::Draft: Send + 'static,
    F: Fn(T::Draft) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, RemoteError>> + Send,
{
    async fn create(&self, draft: T::Draft) -> Result<T, RemoteError> {
        self(draft).await
    }
}

#[async_trait::async_trait]
impl<K, F, Fut> RemoteDelete<K> for F
where
    K: Send + 'static,
    F: Fn(K) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), RemoteError>> + Send,
{
    async fn delete(&self, key: K) -> Result<(), RemoteError> {
        self(key).await
    }
}
