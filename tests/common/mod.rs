//! Shared test utilities.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use storefront_session::session::{RefreshError, Role, Session, SessionRefresher, SessionStore};

/// Refresher that counts calls and stores a session after a delay.
///
/// With `delay: None` it reports failure and never stores anything.
#[derive(Clone)]
pub struct DelayedRefresher {
    pub calls: Arc<AtomicUsize>,
    delay: Option<Duration>,
    role: Role,
}

impl DelayedRefresher {
    pub fn after(delay: Duration, role: Role) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            delay: Some(delay),
            role,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            delay: None,
            role: Role::Customer,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionRefresher for DelayedRefresher {
    async fn refresh(&self, store: &SessionStore) -> Result<(), RefreshError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let Some(delay) = self.delay else {
            return Err(RefreshError::Unavailable("auth service down".to_string()));
        };
        tokio::time::sleep(delay).await;
        store.set(Session::new("refreshed-token-0001", self.role));
        Ok(())
    }
}
