//! Route guard for protected storefront and back-office pages.
//!
//! Wraps the readiness gate: waits for the session, then checks the role.
//! The guard only decides; performing the redirect is the router's job.

use crate::config::{Config, GuardConfig};
use crate::gate::ReadinessCheck;
use crate::session::{Role, SessionRefresher, SessionStore};

/// What a route requires before it may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Role(Role),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect { to: String },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

pub struct RouteGuard<R> {
    store: SessionStore,
    refresher: R,
    check: ReadinessCheck,
    paths: GuardConfig,
}

impl<R: SessionRefresher> RouteGuard<R> {
    pub fn new(store: SessionStore, refresher: R, check: ReadinessCheck, paths: GuardConfig) -> Self {
        Self {
            store,
            refresher,
            check,
            paths,
        }
    }

    pub fn from_config(store: SessionStore, refresher: R, config: &Config) -> Self {
        Self::new(
            store,
            refresher,
            ReadinessCheck::from(&config.gate),
            config.guard.clone(),
        )
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Decides whether a route with `access` may render.
    ///
    /// Public routes never wait. Others wait for the session through the
    /// readiness gate; a timeout sends the visitor to the login path, and a
    /// session without the required role goes to the forbidden path.
    pub async fn check(&self, access: Access) -> GuardDecision {
        let required = match access {
            Access::Public => return GuardDecision::Allow,
            Access::Authenticated => None,
            Access::Role(role) => Some(role),
        };

        let readiness = self
            .store
            .wait_until_authenticated(&self.refresher, &self.check)
            .await;

        if !readiness.is_ready() {
            tracing::info!(to = %self.paths.login_path, "No session, redirecting to login");
            return GuardDecision::Redirect {
                to: self.paths.login_path.clone(),
            };
        }

        match required {
            Some(role) if !self.store.has_role(role) => {
                tracing::info!(
                    required = %role,
                    to = %self.paths.forbidden_path,
                    "Role check failed"
                );
                GuardDecision::Redirect {
                    to: self.paths.forbidden_path.clone(),
                }
            }
            _ => GuardDecision::Allow,
        }
    }
}
