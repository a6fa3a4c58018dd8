//! Transient user-facing alerts.
//!
//! Application code pushes alerts (HTTP failures, saved carts, validation
//! errors); a rendering layer reads [`AlertQueue::list`] or subscribes to
//! [`AlertEvent`]s. Each entry counts down on its own and removes itself when
//! its lifetime runs out, unless dismissed first.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use storefront_session::alerts::{AlertKind, AlertQueue};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let alerts = AlertQueue::new();
//! let id = alerts.show_for(AlertKind::Error, "Payment failed", Duration::from_secs(3));
//! assert_eq!(alerts.list().len(), 1);
//! alerts.dismiss(&id);
//! assert!(alerts.is_empty());
//! # }
//! ```
//!
//! Default lifetimes: 3s for success and info, 5s for warnings and errors.

mod entry;
mod kind;
mod queue;

pub use entry::{AlertEntry, AlertId};
pub use kind::AlertKind;
pub use queue::{Alert, AlertEvent, AlertQueue, RemovalReason};
