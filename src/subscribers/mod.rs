//! # Event subscribers for the slotvisor gate.
//!
//! This module provides the [`Subscribe`] trait and built-in
//! implementations for handling events broadcast through the
//! [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Gate ── publish(Event) ──► Bus ──► broadcast to all listeners
//!                                          │
//!                                     ┌────┴─────┬─────────┐
//!                                     ▼          ▼         ▼
//!                                  LogWriter  Metrics   Custom ...
//!                               (one listener task per subscriber)
//! ```

mod subscribe;

#[cfg(feature = "logging")]
mod log;

pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
