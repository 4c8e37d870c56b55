//! Owner-task gate around the scheduler.
//!
//! The scheduler's state (three queues, active counts, free slots) is one
//! critical section: the gate serializes all mutation through a single
//! bounded channel drained by one loop, and broadcasts every admission
//! decision on the event bus.

mod core;

pub use core::{Gate, GateHandle};
