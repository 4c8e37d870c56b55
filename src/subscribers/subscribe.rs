//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging custom event handlers
//! into the gate. Each subscriber is driven by a dedicated listener task fed
//! from its own bus receiver, so a slow subscriber never blocks the
//! publisher or other subscribers; it just lags and skips.

use async_trait::async_trait;

use crate::events::Event;

/// Contract for event subscribers.
///
/// Called from a subscriber-dedicated listener task. Implementations should
/// avoid blocking the async runtime (prefer async I/O and cooperative
/// waits).
///
/// ## Example
/// ```rust
/// use async_trait::async_trait;
/// use slotvisor::{Event, EventKind, Subscribe};
///
/// struct AdmissionCounter;
///
/// #[async_trait]
/// impl Subscribe for AdmissionCounter {
///     async fn on_event(&self, event: &Event) {
///         if event.kind == EventKind::RequestAdmitted {
///             // increment a counter...
///         }
///     }
///
///     fn name(&self) -> &'static str {
///         "admission_counter"
///     }
/// }
/// ```
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    ///
    /// # Parameters
    /// - `event`: Reference to the event (does not transfer ownership)
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
