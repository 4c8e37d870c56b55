//! # Scheduler events emitted by the gate.
//!
//! The [`EventKind`] enum classifies the observable transitions of the
//! admission pipeline:
//! - **Request transitions**: queued, admitted
//! - **Slot transitions**: released
//! - **Lifecycle**: gate stopped
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the
//! request class, and the priority involved.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use slotvisor::{Event, EventKind, RequestClass};
//!
//! let ev = Event::new(EventKind::RequestQueued)
//!     .with_class(RequestClass::Write)
//!     .with_priority(20);
//!
//! assert_eq!(ev.kind, EventKind::RequestQueued);
//! assert_eq!(ev.class, Some(RequestClass::Write));
//! assert_eq!(ev.priority, Some(20));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::core::{Grant, RequestClass};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of scheduler events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Request entered its class queue and no admission happened.
    ///
    /// Sets:
    /// - `class`: request class
    /// - `priority`: submitted priority
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    RequestQueued,

    /// A pending request was granted an execution slot.
    ///
    /// Emitted once per admission, cascades included: a single completion
    /// may be followed by several of these.
    ///
    /// Sets:
    /// - `class`: request class
    /// - `priority`: priority at admission time (aging included)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    RequestAdmitted,

    /// An active request completed and returned its slot to the pool.
    ///
    /// Sets:
    /// - `class`: request class
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SlotReleased,

    /// The gate's owner loop exited (cancellation or channel closure).
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    GateStopped,
}

/// Scheduler event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Request class, if applicable.
    pub class: Option<RequestClass>,
    /// Priority involved, if applicable.
    pub priority: Option<i64>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            class: None,
            priority: None,
        }
    }

    /// Attaches a request class.
    #[inline]
    pub fn with_class(mut self, class: RequestClass) -> Self {
        self.class = Some(class);
        self
    }

    /// Attaches a priority.
    #[inline]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Creates an admission event from a [`Grant`].
    #[inline]
    pub fn admitted(grant: &Grant) -> Self {
        Event::new(EventKind::RequestAdmitted)
            .with_class(grant.class)
            .with_priority(grant.priority)
    }

    /// Creates a queued event for a submission that found no slot.
    #[inline]
    pub fn queued(class: RequestClass, priority: i64) -> Self {
        Event::new(EventKind::RequestQueued)
            .with_class(class)
            .with_priority(priority)
    }

    /// Creates a release event for a completed request.
    #[inline]
    pub fn released(class: RequestClass) -> Self {
        Event::new(EventKind::SlotReleased).with_class(class)
    }
}
