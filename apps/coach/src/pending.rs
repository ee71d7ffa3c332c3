//! Per-action pending flags.
//!
//! Each user action that calls the model owns one gate. While a call is out
//! the gate is closed and a second attempt at the same action is refused;
//! different actions never share a gate and may overlap freely.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct ActionGate {
    action: &'static str,
    busy: Arc<AtomicBool>,
}

impl ActionGate {
    pub fn new(action: &'static str) -> Self {
        Self {
            action,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Marks the action pending until the returned guard is dropped, or fails
    /// with [`AppError::Busy`] if it already is.
    pub fn try_begin(&self) -> Result<GateGuard, AppError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AppError::Busy(self.action));
        }
        debug!("{} pending", self.action);
        Ok(GateGuard {
            action: self.action,
            busy: Arc::clone(&self.busy),
        })
    }
}

/// Holds an action's gate closed. There is no cancellation; the guard is
/// dropped once the call has succeeded or failed.
#[derive(Debug)]
pub struct GateGuard {
    action: &'static str,
    busy: Arc<AtomicBool>,
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
        debug!("{} idle", self.action);
    }
}

/// One gate per model-calling action.
#[derive(Debug, Clone)]
pub struct ActionGates {
    pub generate: ActionGate,
    pub refine: ActionGate,
    pub interview: ActionGate,
    pub connection_test: ActionGate,
}

impl Default for ActionGates {
    fn default() -> Self {
        Self {
            generate: ActionGate::new("Project generation"),
            refine: ActionGate::new("Experience rewrite"),
            interview: ActionGate::new("Interview reply"),
            connection_test: ActionGate::new("Connection test"),
        }
    }
}
