use std::fmt;

use crate::heap::MinMaxHeap;

/// Class of a request competing for an execution slot.
///
/// Classes differ only in their mutual-exclusion rules:
/// - [`RequestClass::Read`] tolerates other active reads but is blocked by an
///   active write or erase.
/// - [`RequestClass::Write`] and [`RequestClass::Erase`] require sole
///   occupancy of the pool: nothing else may be active, including requests
///   of the same class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestClass {
    /// Shared access: concurrent reads are allowed.
    Read,

    /// Exclusive mutation: runs alone.
    Write,

    /// Exclusive removal: runs alone, same condition as `Write`.
    Erase,
}

impl RequestClass {
    /// Fixed evaluation order for admission and eligibility tie-breaks.
    ///
    /// When two classes hold equal pending maxima, the one listed earlier
    /// wins: Read beats Write and Erase, Write beats Erase. This order is a
    /// deliberate policy constant, not an artifact of iteration order.
    pub const ADMISSION_ORDER: [RequestClass; 3] =
        [RequestClass::Read, RequestClass::Write, RequestClass::Erase];

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RequestClass::Read => "read",
            RequestClass::Write => "write",
            RequestClass::Erase => "erase",
        }
    }

    /// Index into per-class storage; follows [`Self::ADMISSION_ORDER`].
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            RequestClass::Read => 0,
            RequestClass::Write => 1,
            RequestClass::Erase => 2,
        }
    }
}

impl fmt::Display for RequestClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Per-class scheduler record: the pending queue plus the in-flight count.
pub(super) struct ClassState {
    /// Priorities of requests waiting for a slot.
    pub pending: MinMaxHeap,

    /// Requests of this class currently occupying a slot.
    pub active: usize,
}

impl ClassState {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self {
            pending: MinMaxHeap::new(),
            active: 0,
        }
    }
}
