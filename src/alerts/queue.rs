//! Process-wide alert queue with per-entry countdowns.
//!
//! Every entry owns one countdown task. The entry sequence is guarded by a
//! single mutex so `push`, `dismiss`, `clear` and tick expiry never interleave.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::entry::{AlertEntry, AlertId};
use super::kind::AlertKind;
use crate::config::AlertConfig;

const MIN_TICK: Duration = Duration::from_millis(1);

/// Request to show an alert.
#[derive(Debug, Clone)]
pub struct Alert {
    id: Option<AlertId>,
    kind: AlertKind,
    message: String,
    timeout: Option<Duration>,
}

impl Alert {
    pub fn new(kind: impl Into<AlertKind>, message: impl Into<String>) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            message: message.into(),
            timeout: None,
        }
    }

    /// Uses a caller-chosen id. A live entry with the same id is replaced.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<AlertId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Overrides the per-kind default lifetime.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Why an entry left the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    Dismissed,
    Expired,
    /// A newer alert was pushed with the same id.
    Replaced,
    Cleared,
}

/// Change notifications for the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertEvent {
    Added(AlertEntry),
    Removed { id: AlertId, reason: RemovalReason },
}

/// Shared handle to the alert queue.
///
/// Cloning is cheap; all clones see the same entries. Dropping the last
/// handle cancels every pending countdown.
#[derive(Clone)]
pub struct AlertQueue {
    inner: Arc<QueueInner>,
}

struct QueueInner {
    slots: Mutex<Vec<Slot>>,
    settings: AlertConfig,
    events: broadcast::Sender<AlertEvent>,
}

struct Slot {
    entry: AlertEntry,
    shown_at: Instant,
    countdown: Option<JoinHandle<()>>,
}

impl Slot {
    fn cancel(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
    }
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::with_config(AlertConfig::default())
    }

    pub fn with_config(settings: AlertConfig) -> Self {
        let (events, _) = broadcast::channel(settings.event_capacity.max(1));
        Self {
            inner: Arc::new(QueueInner {
                slots: Mutex::new(Vec::new()),
                settings,
                events,
            }),
        }
    }

    /// Shows an alert with the default lifetime for its kind.
    pub fn show(&self, kind: impl Into<AlertKind>, message: impl Into<String>) -> AlertId {
        self.push(Alert::new(kind, message))
    }

    /// Shows an alert that lives for `timeout`.
    pub fn show_for(
        &self,
        kind: impl Into<AlertKind>,
        message: impl Into<String>,
        timeout: Duration,
    ) -> AlertId {
        self.push(Alert::new(kind, message).with_timeout(timeout))
    }

    pub fn success(&self, message: impl Into<String>) -> AlertId {
        self.show(AlertKind::Success, message)
    }

    pub fn info(&self, message: impl Into<String>) -> AlertId {
        self.show(AlertKind::Info, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> AlertId {
        self.show(AlertKind::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) -> AlertId {
        self.show(AlertKind::Error, message)
    }

    /// Appends an alert and starts its countdown.
    ///
    /// Must be called from within a tokio runtime for the countdown to run.
    /// Outside one the entry is still added and is dropped the first time
    /// the queue is read after its lifetime has passed.
    pub fn push(&self, alert: Alert) -> AlertId {
        let id = alert.id.unwrap_or_default();
        let timeout = alert
            .timeout
            .unwrap_or_else(|| self.inner.settings.default_timeout(alert.kind));
        let entry = AlertEntry::new(id.clone(), alert.kind, alert.message, timeout);
        let shown_at = Instant::now();

        let mut slots = self.inner.slots.lock();

        if let Some(pos) = slots.iter().position(|s| s.entry.id() == &id) {
            let mut old = slots.remove(pos);
            old.cancel();
            self.inner.emit(AlertEvent::Removed {
                id: id.clone(),
                reason: RemovalReason::Replaced,
            });
        }

        let countdown = spawn_countdown(
            Arc::downgrade(&self.inner),
            id.clone(),
            shown_at,
            self.inner.settings.tick().max(MIN_TICK),
        );

        tracing::debug!(
            id = %id,
            kind = %entry.kind(),
            timeout_ms = timeout.as_millis() as u64,
            "Alert shown"
        );

        self.inner.emit(AlertEvent::Added(entry.clone()));
        slots.push(Slot {
            entry,
            shown_at,
            countdown,
        });

        id
    }

    /// Removes an entry and cancels its countdown.
    ///
    /// Returns `true` if the entry was live. Unknown or already removed ids
    /// are ignored.
    pub fn dismiss(&self, id: &AlertId) -> bool {
        let mut slots = self.inner.slots.lock();
        let Some(pos) = slots.iter().position(|s| s.entry.id() == id) else {
            return false;
        };

        let mut slot = slots.remove(pos);
        slot.cancel();
        tracing::debug!(id = %id, "Alert dismissed");
        self.inner.emit(AlertEvent::Removed {
            id: id.clone(),
            reason: RemovalReason::Dismissed,
        });
        true
    }

    /// Removes every entry and cancels all countdowns.
    pub fn clear(&self) {
        let mut slots = self.inner.slots.lock();
        for mut slot in slots.drain(..) {
            slot.cancel();
            self.inner.emit(AlertEvent::Removed {
                id: slot.entry.id().clone(),
                reason: RemovalReason::Cleared,
            });
        }
    }

    /// Snapshot of live entries in insertion order.
    pub fn list(&self) -> Vec<AlertEntry> {
        let mut slots = self.inner.slots.lock();
        self.inner.sweep(&mut slots);
        slots.iter().map(|s| s.entry.clone()).collect()
    }

    pub fn get(&self, id: &AlertId) -> Option<AlertEntry> {
        let mut slots = self.inner.slots.lock();
        self.inner.sweep(&mut slots);
        slots
            .iter()
            .find(|s| s.entry.id() == id)
            .map(|s| s.entry.clone())
    }

    pub fn contains(&self, id: &AlertId) -> bool {
        let mut slots = self.inner.slots.lock();
        self.inner.sweep(&mut slots);
        slots.iter().any(|s| s.entry.id() == id)
    }

    pub fn len(&self) -> usize {
        let mut slots = self.inner.slots.lock();
        self.inner.sweep(&mut slots);
        slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribes to added/removed events from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<AlertEvent> {
        self.inner.events.subscribe()
    }
}

impl Default for AlertQueue {
    fn default() -> Self {
        Self::new()
    }
}

enum Tick {
    Continue,
    Stop,
}

impl QueueInner {
    fn emit(&self, event: AlertEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn tick(&self, id: &AlertId) -> Tick {
        let mut slots = self.slots.lock();
        let Some(pos) = slots.iter().position(|s| s.entry.id() == id) else {
            return Tick::Stop;
        };

        let elapsed = slots[pos].shown_at.elapsed();
        if !slots[pos].entry.advance(elapsed) {
            return Tick::Continue;
        }

        // Called from this entry's own countdown; dropping its handle detaches it.
        drop(slots.remove(pos));
        tracing::debug!(id = %id, "Alert expired");
        self.emit(AlertEvent::Removed {
            id: id.clone(),
            reason: RemovalReason::Expired,
        });
        Tick::Stop
    }

    /// Refreshes remaining percentages and drops entries past their lifetime.
    fn sweep(&self, slots: &mut Vec<Slot>) {
        let mut expired = Vec::new();
        slots.retain_mut(|slot| {
            if slot.entry.advance(slot.shown_at.elapsed()) {
                slot.cancel();
                expired.push(slot.entry.id().clone());
                false
            } else {
                true
            }
        });

        for id in expired {
            tracing::debug!(id = %id, "Alert expired");
            self.emit(AlertEvent::Removed {
                id,
                reason: RemovalReason::Expired,
            });
        }
    }
}

impl Drop for QueueInner {
    fn drop(&mut self) {
        for slot in self.slots.get_mut().iter_mut() {
            slot.cancel();
        }
    }
}

fn spawn_countdown(
    inner: Weak<QueueInner>,
    id: AlertId,
    shown_at: Instant,
    tick: Duration,
) -> Option<JoinHandle<()>> {
    let handle = match Handle::try_current() {
        Ok(handle) => handle,
        Err(_) => {
            tracing::warn!(id = %id, "No tokio runtime, alert will expire lazily");
            return None;
        }
    };

    Some(handle.spawn(async move {
        let mut ticker = interval_at(shown_at + tick, tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let Some(inner) = inner.upgrade() else {
                return;
            };
            if let Tick::Stop = inner.tick(&id) {
                return;
            }
        }
    }))
}
