//! Error types used by the slotvisor gate.
//!
//! The decision core itself has no recoverable errors: empty-queue queries
//! return `None`, capacity exhaustion just leaves the request queued, and an
//! unmatched `complete` is a loud programming-error panic (see
//! [`Scheduler::complete`](crate::Scheduler::complete)). What remains is the
//! channel-level [`SubmitError`] returned by gate handles.

use thiserror::Error;

/// Error returned by `GateHandle` submission methods (feature `gate`).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Submission queue is full (try again later or use async `submit`).
    #[error("submission queue full")]
    Full,

    /// Gate channel is closed (gate task stopped or was never started).
    #[error("gate channel closed")]
    Closed,
}

impl SubmitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SubmitError::Full => "submit_full",
            SubmitError::Closed => "submit_closed",
        }
    }
}
