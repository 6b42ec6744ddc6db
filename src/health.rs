//! Manually togglable health state for probe experiments.
//!
//! The state is a single (unhealthy, reason) pair behind one mutex, owned by
//! a cloneable handle that is injected into request handlers through the
//! shared application state. All reads and writes take the lock for the
//! duration of the compound update only, so a caller can never observe the
//! flag and the reason out of sync. No I/O happens under the lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::FALLBACK_FAIL_REASON;

/// Snapshot of the current health state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy { reason: String },
}

/// Shared health toggle. Clones refer to the same underlying state.
///
/// Initialized healthy at process start; nothing is persisted across
/// restarts and no transition history is kept.
#[derive(Clone, Default)]
pub struct HealthState {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    unhealthy: bool,
    reason: Option<String>,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn status(&self) -> HealthStatus {
        let inner = self.lock();
        if inner.unhealthy {
            HealthStatus::Unhealthy {
                reason: inner
                    .reason
                    .clone()
                    .unwrap_or_else(|| FALLBACK_FAIL_REASON.to_string()),
            }
        } else {
            HealthStatus::Healthy
        }
    }

    /// Marks the state unhealthy with the given reason.
    ///
    /// Calling `fail` while already failed overwrites the reason. An empty
    /// reason is replaced with a fixed literal so the stored reason is never
    /// the empty string.
    pub fn fail(&self, reason: &str) {
        let reason = if reason.is_empty() {
            FALLBACK_FAIL_REASON
        } else {
            reason
        };
        let mut inner = self.lock();
        inner.unhealthy = true;
        inner.reason = Some(reason.to_string());
    }

    /// Marks the state healthy, clearing any recorded reason.
    ///
    /// A no-op when already healthy.
    pub fn restore(&self) {
        let mut inner = self.lock();
        inner.unhealthy = false;
        inner.reason = None;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
