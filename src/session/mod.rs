//! Session state read by route guards and the refresh seam that renews it.

mod refresher;
mod store;

pub use refresher::{FnRefresher, NoRefresh, RefreshError, SessionRefresher};
pub use store::{Role, Session, SessionStore};

use crate::gate::{Readiness, ReadinessCheck};

impl SessionStore {
    /// Runs the readiness gate with "token present" as its predicate and
    /// `refresher` as its one refresh attempt.
    pub async fn wait_until_authenticated<R>(
        &self,
        refresher: &R,
        check: &ReadinessCheck,
    ) -> Readiness
    where
        R: SessionRefresher + ?Sized,
    {
        check
            .wait(|| self.is_authenticated(), || refresher.refresh(self))
            .await
    }
}
