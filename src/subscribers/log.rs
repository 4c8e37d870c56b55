//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [queued] class=write priority=20
//! [admitted] class=read priority=10
//! [released] class=read
//! [gate-stopped]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints human-readable event
/// descriptions to stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::RequestQueued => {
                if let (Some(class), Some(priority)) = (e.class, e.priority) {
                    println!("[queued] class={class} priority={priority}");
                }
            }
            EventKind::RequestAdmitted => {
                if let (Some(class), Some(priority)) = (e.class, e.priority) {
                    println!("[admitted] class={class} priority={priority}");
                }
            }
            EventKind::SlotReleased => {
                if let Some(class) = e.class {
                    println!("[released] class={class}");
                }
            }
            EventKind::GateStopped => {
                println!("[gate-stopped]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
