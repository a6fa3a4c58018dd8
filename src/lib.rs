//! Session readiness and alert notifications for the storefront client.
//!
//! - [`gate`]: waits for a predicate after one refresh attempt, with timeout
//! - [`session`]: token/role store and the refresh seam
//! - [`guard`]: allow/redirect decisions for protected routes
//! - [`alerts`]: ordered, self-expiring user notifications
//! - [`config`]: TOML configuration
//! - [`logging`]: tracing setup

pub mod alerts;
pub mod config;
pub mod gate;
pub mod guard;
pub mod logging;
pub mod session;

pub use alerts::{AlertEntry, AlertId, AlertKind, AlertQueue};
pub use gate::{wait_until_ready, Readiness, ReadinessCheck};
pub use guard::{Access, GuardDecision, RouteGuard};
pub use session::{Role, Session, SessionRefresher, SessionStore};
