//! # slotvisor
//!
//! **Slotvisor** is a priority-aware admission controller for a bounded pool
//! of execution slots.
//!
//! Three request classes (Read, Write, Erase) compete for capacity, each
//! request carrying an integer priority. The scheduler decides, at any
//! instant, which queued request(s) may enter the pool, enforces
//! mutual-exclusion rules between classes, and ages waiting requests so
//! low-priority work cannot starve forever.
//!
//! ## Architecture
//! ```text
//!     submit(class, prio)        complete(class)
//!            │                         │
//!            ▼                         ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Scheduler (decision core, synchronous)                   │
//! │  - per-class MinMaxHeap (pending priorities)              │
//! │  - per-class active count + free-slot counter             │
//! │  - eligibility: class max ≥ every other non-empty max     │
//! │  - exclusivity: Read ∥ Read, Write/Erase run alone        │
//! │  - aging: bump each queue minimum per admission event     │
//! └──────────────────────────┬────────────────────────────────┘
//!                            │ Vec<Grant> (who got a slot)
//!                            ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Gate (feature "gate"): owner task serializing all calls  │
//! │  GateHandle ──mpsc──► owner loop ──► Bus (broadcast)      │
//! └──────────────────────────┬────────────────────────────────┘
//!                            ▼
//!                   listener tasks ──► Subscribe impls
//!                                      (LogWriter, custom)
//! ```
//!
//! ## Admission rules
//! - A class is **eligible** when its highest pending priority is at least
//!   as large as every other non-empty class's highest. Ties resolve by the
//!   fixed order [`RequestClass::ADMISSION_ORDER`] (Read > Write > Erase).
//! - **Read** admits when no Write or Erase is active; concurrent reads
//!   share the pool.
//! - **Write** and **Erase** admit only into an empty pool and exclude
//!   everything, including their own class.
//! - Every admission event bumps the *minimum* pending priority of each
//!   non-empty queue by the configured aging increment, so the most-starved
//!   request of every class keeps climbing until it wins.
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits              |
//! |-------------------|--------------------------------------------------------------|---------------------------------|
//! | **Decision core** | Synchronous admission engine over min-max heaps.             | [`Scheduler`], [`Grant`]        |
//! | **Container**     | Dual-ended priority queue with O(log n) extremes.            | [`MinMaxHeap`]                  |
//! | **Events**        | Broadcast of queue/admit/release transitions.                | [`Event`], [`EventKind`], [`Bus`] |
//! | **Subscribers**   | Hook into admission events (logging, metrics, custom).       | [`Subscribe`]                   |
//! | **Errors**        | Typed submission errors for the gate handle.                 | [`SubmitError`]                 |
//! | **Configuration** | Centralized settings with documented defaults.               | [`Config`]                      |
//!
//! ## Optional features
//! - `gate` *(default)*: the owner task that serializes scheduler calls and
//!   publishes events (`Gate`, `GateHandle`).
//! - `logging`: exports a simple built-in `LogWriter` _(demo/reference
//!   only)_.
//!
//! ## Example
//! ```rust
//! use slotvisor::{RequestClass, Scheduler};
//!
//! // One slot, aging increment 5.
//! let mut sched = Scheduler::new(1, 5);
//!
//! // The read takes the slot immediately.
//! let grants = sched.submit(RequestClass::Read, 10);
//! assert_eq!(grants.len(), 1);
//!
//! // The write is blocked by the active read and stays queued,
//! // priority notwithstanding.
//! assert!(sched.submit(RequestClass::Write, 20).is_empty());
//!
//! // Completion frees the slot and hands it to the write.
//! let next = sched.complete(RequestClass::Read);
//! assert_eq!(next[0].class, RequestClass::Write);
//! assert_eq!(next[0].priority, 20);
//! ```

mod config;
mod core;
mod error;
mod events;
mod heap;
mod subscribers;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{Grant, RequestClass, Scheduler};
pub use error::SubmitError;
pub use events::{Bus, Event, EventKind};
pub use heap::MinMaxHeap;
pub use subscribers::Subscribe;

// Optional: expose the owner-task gate.
// Enable with: `--features gate` (on by default)
#[cfg(feature = "gate")]
mod gate;
#[cfg(feature = "gate")]
pub use gate::{Gate, GateHandle};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
