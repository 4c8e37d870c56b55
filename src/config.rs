//! # Shared configuration.
//!
//! Provides [`Config`] centralized settings for the scheduler and the gate.
//!
//! Config is used in two ways:
//! 1. **Scheduler creation**: `Scheduler::from_config(&config)`
//! 2. **Gate creation**: `Gate::new(config)` (feature `gate`)
//!
//! ## Sentinel values
//! - `capacity = 0` → nothing is ever admitted (requests queue forever)
//! - `bus_capacity` / `queue_capacity` are clamped to a minimum of 1 by the
//!   accessors below

/// Configuration for the admission scheduler and its gate.
///
/// Defines:
/// - **Pool size**: how many requests may hold a slot at once
/// - **Aging**: the per-admission-event priority boost
/// - **Channels**: event bus and submission queue capacities (gate only)
///
/// ## Field semantics
/// - `capacity`: execution slots (`0` = admit nothing)
/// - `aging_increment`: added to each queue's minimum on every admission
///   event; may be negative, though that defeats starvation mitigation
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped)
/// - `queue_capacity`: gate submission channel size (min 1; clamped)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the clamped accessors over
/// sprinkling `.max(1)` across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of execution slots in the pool.
    ///
    /// Slots are a logical capacity counter, not threads or processes: the
    /// scheduler only decides who may proceed, it does not run anything.
    pub capacity: usize,

    /// Priority boost applied to the single most-waiting request of each
    /// non-empty class on every admission event anywhere in the system.
    pub aging_increment: i64,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` events will
    /// receive `Lagged` and skip older items.
    pub bus_capacity: usize,

    /// Capacity of the gate's submission channel.
    ///
    /// When full, `submit()` waits and `try_submit()` returns
    /// [`SubmitError::Full`](crate::SubmitError::Full).
    pub queue_capacity: usize,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns a submission queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `capacity = 1` (fully serialized access)
    /// - `aging_increment = 5`
    /// - `bus_capacity = 1024`
    /// - `queue_capacity = 1024`
    fn default() -> Self {
        Self {
            capacity: 1,
            aging_increment: 5,
            bus_capacity: 1024,
            queue_capacity: 1024,
        }
    }
}
