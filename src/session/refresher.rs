use async_trait::async_trait;
use std::future::Future;
use thiserror::Error;

use super::store::SessionStore;

/// Errors a refresh attempt may report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// The backend rejected the stored credentials.
    #[error("Session refresh rejected: not authorized")]
    Unauthorized,

    /// The backend could not be reached or answered with an error.
    #[error("Session refresh unavailable: {0}")]
    Unavailable(String),
}

/// Re-acquires the session token, typically from the auth backend.
///
/// Implementations write the new session into the store, or leave it
/// unchanged on failure. They must tolerate concurrent calls, since two
/// guards racing on the same store may both trigger a refresh.
#[async_trait]
pub trait SessionRefresher: Send + Sync {
    async fn refresh(&self, store: &SessionStore) -> Result<(), RefreshError>;
}

/// Adapts an async closure into a [`SessionRefresher`].
pub struct FnRefresher<F> {
    refresh: F,
}

impl<F> FnRefresher<F> {
    pub fn new(refresh: F) -> Self {
        Self { refresh }
    }
}

#[async_trait]
impl<F, Fut> SessionRefresher for FnRefresher<F>
where
    F: Fn(SessionStore) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), RefreshError>> + Send + 'static,
{
    async fn refresh(&self, store: &SessionStore) -> Result<(), RefreshError> {
        (self.refresh)(store.clone()).await
    }
}

/// Refresher that never changes the store.
///
/// For pages that should only pass when a session is already present.
pub struct NoRefresh;

#[async_trait]
impl SessionRefresher for NoRefresh {
    async fn refresh(&self, _store: &SessionStore) -> Result<(), RefreshError> {
        Ok(())
    }
}
