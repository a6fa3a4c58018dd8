//! Readiness gate for route guards.
//!
//! Waits until a predicate over external state holds, triggering one refresh
//! first. Used to hold a protected route until the session token is back.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

use crate::config::GateConfig;

/// Result of a gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    TimedOut,
}

impl Readiness {
    pub fn is_ready(self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// What a refresh action may resolve to.
///
/// Failures are only logged; the gate keeps polling either way.
pub trait RefreshOutcome {
    fn failure(&self) -> Option<String>;
}

impl RefreshOutcome for () {
    fn failure(&self) -> Option<String> {
        None
    }
}

impl<T, E: Display> RefreshOutcome for Result<T, E> {
    fn failure(&self) -> Option<String> {
        self.as_ref().err().map(|e| e.to_string())
    }
}

/// Timing for one gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessCheck {
    timeout: Duration,
    poll_interval: Duration,
}

impl ReadinessCheck {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
    const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

    /// A zero poll interval is raised to 1ms so polling never spins.
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval: poll_interval.max(Self::MIN_POLL_INTERVAL),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Waits until `predicate` holds or the timeout elapses.
    ///
    /// If the predicate already holds, returns [`Readiness::Ready`] without
    /// calling `refresh`. Otherwise `refresh` runs exactly once, then the
    /// predicate is polled every `poll_interval`. Elapsed time counts from
    /// entry, refresh included.
    ///
    /// Concurrent evaluations on shared state may each call their refresh;
    /// the refresh action has to tolerate duplicate calls.
    pub async fn wait<P, R, Fut>(&self, mut predicate: P, refresh: R) -> Readiness
    where
        P: FnMut() -> bool,
        R: FnOnce() -> Fut,
        Fut: Future,
        Fut::Output: RefreshOutcome,
    {
        let started = Instant::now();

        if predicate() {
            tracing::trace!("Gate already satisfied");
            return Readiness::Ready;
        }

        if let Some(reason) = refresh().await.failure() {
            tracing::warn!(reason = %reason, "Refresh failed, polling anyway");
        }

        loop {
            if predicate() {
                tracing::debug!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Gate ready"
                );
                return Readiness::Ready;
            }

            let elapsed = started.elapsed();
            if elapsed >= self.timeout {
                tracing::info!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Gate timed out"
                );
                return Readiness::TimedOut;
            }

            tokio::time::sleep(self.poll_interval.min(self.timeout - elapsed)).await;
        }
    }
}

impl Default for ReadinessCheck {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT, Self::DEFAULT_POLL_INTERVAL)
    }
}

impl From<&GateConfig> for ReadinessCheck {
    fn from(config: &GateConfig) -> Self {
        Self::new(config.timeout(), config.poll_interval())
    }
}

/// Boolean form of [`ReadinessCheck::wait`].
pub async fn wait_until_ready<P, R, Fut>(
    predicate: P,
    refresh: R,
    timeout: Duration,
    poll_interval: Duration,
) -> bool
where
    P: FnMut() -> bool,
    R: FnOnce() -> Fut,
    Fut: Future,
    Fut::Output: RefreshOutcome,
{
    ReadinessCheck::new(timeout, poll_interval)
        .wait(predicate, refresh)
        .await
        .is_ready()
}
