//! # Admission scheduler for the slot pool.
//!
//! [`Scheduler`] owns one pending queue ([`MinMaxHeap`](crate::MinMaxHeap))
//! and one active count per [`RequestClass`], plus the free-slot counter.
//! All mutation funnels through [`Scheduler::submit`] and
//! [`Scheduler::complete`]; the admission decision reads all three queue
//! maxima and mutates the counters as one step, so the whole struct is a
//! single critical section for callers that share it across tasks (see the
//! crate docs and the `gate` feature).
//!
//! ## Decision pipeline
//! ```text
//! submit(class, prio) ──► push to class queue
//!                          │  free slot?  ──no──► stays queued
//!                          ▼
//!                     burst loop: while slot free
//!                          ├─ eligible(class)?   (max ≥ every other max)
//!                          ├─ exclusivity ok?    (Read: no W/E active;
//!                          │                      W/E: pool empty)
//!                          ├─ pop class max, take slot  ──► Grant
//!                          └─ aging pass (queue left non-empty)
//!
//! complete(class) ──► release slot ──► reschedule: first class in
//!                     ADMISSION_ORDER passing both predicates enters the
//!                     same burst loop (at most one class advances)
//! ```
//!
//! ## Invariants
//! - `free_slots + active(Read) + active(Write) + active(Erase) == capacity`
//!   between calls.
//! - At most one of `active(Write)`, `active(Erase)` is positive, and never
//!   together with `active(Read) > 0`.
//!
//! ## Aging
//! Every admission that leaves the admitted-from queue non-empty bumps the
//! **minimum** of every non-empty queue by the configured increment. Only
//! the single most-starved request per class moves per event; all other
//! waiters keep their priorities. A waiter's effective priority is thus
//! non-decreasing, and once it is the class minimum it climbs on every
//! admission event anywhere in the system until it becomes the class
//! maximum and wins a slot.

use crate::config::Config;
use crate::core::class::{ClassState, RequestClass};

/// One granted admission: this priority of this class now holds a slot.
///
/// Returned by [`Scheduler::submit`] and [`Scheduler::complete`] so the
/// caller learns which pending requests entered the pool (a completion can
/// cascade into several read admissions at once).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grant {
    /// Class of the admitted request.
    pub class: RequestClass,
    /// Priority the request held at admission time (aging included).
    pub priority: i64,
}

/// Priority-aware admission controller over a bounded pool of slots.
///
/// ## Example
/// ```rust
/// use slotvisor::{RequestClass, Scheduler};
///
/// let mut sched = Scheduler::new(1, 5);
///
/// // One slot: the read takes it immediately.
/// let grants = sched.submit(RequestClass::Read, 10);
/// assert_eq!(grants.len(), 1);
/// assert_eq!(sched.free_slots(), 0);
///
/// // The write waits, exclusivity aside there is no capacity anyway.
/// assert!(sched.submit(RequestClass::Write, 20).is_empty());
///
/// // Completion hands the slot to the waiting write.
/// let next = sched.complete(RequestClass::Read);
/// assert_eq!(next[0].class, RequestClass::Write);
/// assert_eq!(sched.active(RequestClass::Write), 1);
/// ```
pub struct Scheduler {
    /// Per-class queue + active count, indexed by `RequestClass::index()`.
    classes: [ClassState; 3],
    /// Slots currently unoccupied.
    free_slots: usize,
    /// Total pool size; `free_slots` plus all active counts always equals it.
    capacity: usize,
    /// Priority boost applied to each queue minimum per admission event.
    aging_increment: i64,
}

impl Scheduler {
    /// Creates a scheduler with `capacity` execution slots.
    ///
    /// ### Parameters
    /// - `capacity`: pool size; `0` means nothing is ever admitted.
    /// - `aging_increment`: added to each queue's minimum on admission
    ///   events (5 is the usual choice, see [`Config::default`]).
    pub fn new(capacity: usize, aging_increment: i64) -> Self {
        Self {
            classes: [ClassState::new(), ClassState::new(), ClassState::new()],
            free_slots: capacity,
            capacity,
            aging_increment,
        }
    }

    /// Creates a scheduler from the shared [`Config`].
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.capacity, cfg.aging_increment)
    }

    /// Enqueues a request and attempts admission for its class.
    ///
    /// With no free slot the request simply stays queued (not an error).
    /// Otherwise the class runs the burst loop: Read can absorb several free
    /// slots in one call (each admission is the class maximum at that
    /// moment, aging included); Write and Erase stop at one because their
    /// own admission un-satisfies the exclusivity predicate.
    ///
    /// Returns every admission this call produced; empty means queued.
    pub fn submit(&mut self, class: RequestClass, priority: i64) -> Vec<Grant> {
        self.classes[class.index()].pending.push(priority);
        let mut grants = Vec::new();
        if self.free_slots == 0 {
            return grants;
        }
        self.burst_admit(class, &mut grants);
        grants
    }

    /// Releases one active slot of `class` and advances the queues.
    ///
    /// Reschedule picks the first class in
    /// [`RequestClass::ADMISSION_ORDER`] that passes eligibility and
    /// exclusivity and runs its burst loop; at most one class advances per
    /// completion. Returns the admissions the released slot triggered.
    ///
    /// # Panics
    /// Panics if `class` has no active request: calling `complete` more
    /// often than requests were admitted is a caller bug, and recovering
    /// silently would corrupt the exclusivity invariant for every future
    /// decision.
    pub fn complete(&mut self, class: RequestClass) -> Vec<Grant> {
        let state = &mut self.classes[class.index()];
        assert!(
            state.active > 0,
            "complete({}) without a matching admission",
            class.as_label()
        );
        state.active -= 1;
        self.free_slots += 1;

        let mut grants = Vec::new();
        self.reschedule(&mut grants);
        grants
    }

    /// `true` iff `class` has pending work whose maximum is ≥ the maximum of
    /// every other non-empty class.
    ///
    /// Ties count as eligible; combined with the fixed evaluation order this
    /// makes Read win ties against Write/Erase and Write win against Erase.
    pub fn is_eligible(&self, class: RequestClass) -> bool {
        let Some(own) = self.classes[class.index()].pending.peek_max() else {
            return false;
        };
        RequestClass::ADMISSION_ORDER
            .into_iter()
            .filter(|&other| other != class)
            .all(|other| {
                self.classes[other.index()]
                    .pending
                    .peek_max()
                    .map_or(true, |max| own >= max)
            })
    }

    /// Highest pending priority of `class`, if any.
    pub fn peek_max(&self, class: RequestClass) -> Option<i64> {
        self.classes[class.index()].pending.peek_max()
    }

    /// Number of `class` requests currently holding a slot.
    #[inline]
    pub fn active(&self, class: RequestClass) -> usize {
        self.classes[class.index()].active
    }

    /// Number of `class` requests still waiting.
    #[inline]
    pub fn pending(&self, class: RequestClass) -> usize {
        self.classes[class.index()].pending.len()
    }

    /// Slots currently unoccupied.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.free_slots
    }

    /// Total pool size.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Configured aging increment.
    #[inline]
    pub fn aging_increment(&self) -> i64 {
        self.aging_increment
    }

    /// Eligibility plus the class's mutual-exclusion rule. Capacity is
    /// checked by the callers.
    fn can_admit(&self, class: RequestClass) -> bool {
        if !self.is_eligible(class) {
            return false;
        }
        match class {
            RequestClass::Read => {
                self.active(RequestClass::Write) == 0 && self.active(RequestClass::Erase) == 0
            }
            RequestClass::Write | RequestClass::Erase => RequestClass::ADMISSION_ORDER
                .into_iter()
                .all(|other| self.active(other) == 0),
        }
    }

    /// Admits while a slot is free and both predicates hold.
    ///
    /// Only Read ever takes a second iteration; Write and Erase fail
    /// `can_admit` as soon as they are active themselves.
    fn burst_admit(&mut self, class: RequestClass, grants: &mut Vec<Grant>) {
        while self.free_slots > 0 && self.can_admit(class) {
            match self.admit_one(class) {
                Some(grant) => grants.push(grant),
                None => break,
            }
        }
    }

    /// Pops the class maximum into a slot and runs the aging pass when the
    /// admitted-from queue still has waiters.
    fn admit_one(&mut self, class: RequestClass) -> Option<Grant> {
        let state = &mut self.classes[class.index()];
        let priority = state.pending.pop_max()?;
        state.active += 1;
        self.free_slots -= 1;

        if !self.classes[class.index()].pending.is_empty() {
            self.age_queues();
        }
        Some(Grant { class, priority })
    }

    /// Bumps the minimum of every non-empty queue by the aging increment.
    fn age_queues(&mut self) {
        let delta = self.aging_increment;
        for class in RequestClass::ADMISSION_ORDER {
            self.classes[class.index()].pending.bump_min(delta);
        }
    }

    /// Advances the first admissible class in evaluation order.
    fn reschedule(&mut self, grants: &mut Vec<Grant>) {
        for class in RequestClass::ADMISSION_ORDER {
            if self.free_slots > 0 && self.can_admit(class) {
                self.burst_admit(class, grants);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(sched: &Scheduler) {
        let active: usize = RequestClass::ADMISSION_ORDER
            .iter()
            .map(|&c| sched.active(c))
            .sum();
        assert_eq!(
            sched.free_slots() + active,
            sched.capacity(),
            "capacity invariant broken"
        );

        let writes = sched.active(RequestClass::Write);
        let erases = sched.active(RequestClass::Erase);
        assert!(writes + erases <= 1, "two exclusive requests active");
        if writes + erases > 0 {
            assert_eq!(
                sched.active(RequestClass::Read),
                0,
                "read active alongside an exclusive request"
            );
        }
    }

    #[test]
    fn test_scenario_read_then_blocked_write() {
        // Capacity 1: read admits, write queues behind it, completion hands
        // the slot over.
        let mut sched = Scheduler::new(1, 5);

        let grants = sched.submit(RequestClass::Read, 10);
        assert_eq!(
            grants,
            vec![Grant {
                class: RequestClass::Read,
                priority: 10
            }]
        );
        assert_eq!(sched.active(RequestClass::Read), 1);
        assert_eq!(sched.free_slots(), 0);
        assert_invariants(&sched);

        assert!(sched.submit(RequestClass::Write, 20).is_empty());
        assert_eq!(sched.pending(RequestClass::Write), 1);
        assert_invariants(&sched);

        let grants = sched.complete(RequestClass::Read);
        assert_eq!(
            grants,
            vec![Grant {
                class: RequestClass::Write,
                priority: 20
            }]
        );
        assert_eq!(sched.active(RequestClass::Read), 0);
        assert_eq!(sched.active(RequestClass::Write), 1);
        assert_eq!(sched.free_slots(), 0);
        assert_invariants(&sched);
    }

    #[test]
    fn test_scenario_reads_fill_all_slots() {
        // Capacity 3: three reads all make it in, nothing else competing.
        let mut sched = Scheduler::new(3, 5);
        for priority in [1, 2, 3] {
            let grants = sched.submit(RequestClass::Read, priority);
            assert_eq!(grants.len(), 1, "read {priority} should admit");
            assert_invariants(&sched);
        }
        assert_eq!(sched.active(RequestClass::Read), 3);
        assert_eq!(sched.free_slots(), 0);
    }

    #[test]
    fn test_scenario_exclusivity_overrides_priority() {
        // An active write blocks a much higher-priority read until it
        // completes.
        let mut sched = Scheduler::new(1, 5);

        assert_eq!(sched.submit(RequestClass::Write, 5).len(), 1);
        assert!(sched.submit(RequestClass::Read, 100).is_empty());
        assert_invariants(&sched);

        let grants = sched.complete(RequestClass::Write);
        assert_eq!(
            grants,
            vec![Grant {
                class: RequestClass::Read,
                priority: 100
            }]
        );
        assert_invariants(&sched);
    }

    #[test]
    fn test_active_write_blocks_read_despite_free_slot() {
        let mut sched = Scheduler::new(2, 5);
        assert_eq!(sched.submit(RequestClass::Write, 10).len(), 1);
        assert_eq!(sched.free_slots(), 1);

        assert!(sched.submit(RequestClass::Read, 5).is_empty());
        assert_eq!(sched.pending(RequestClass::Read), 1);
        assert_invariants(&sched);
    }

    #[test]
    fn test_pending_write_outranks_read_at_submit() {
        // A queued higher-priority write makes a new read ineligible even
        // though a slot is free and only reads are active.
        let mut sched = Scheduler::new(2, 5);
        assert_eq!(sched.submit(RequestClass::Read, 1).len(), 1);
        assert!(sched.submit(RequestClass::Write, 10).is_empty());

        assert!(sched.submit(RequestClass::Read, 5).is_empty());
        assert_eq!(sched.free_slots(), 1);
        assert_eq!(sched.pending(RequestClass::Read), 1);
        assert_invariants(&sched);
    }

    #[test]
    fn test_reschedule_prefers_higher_priority_write() {
        let mut sched = Scheduler::new(1, 5);
        assert_eq!(sched.submit(RequestClass::Erase, 3).len(), 1);
        assert!(sched.submit(RequestClass::Write, 10).is_empty());
        assert!(sched.submit(RequestClass::Read, 5).is_empty());

        let grants = sched.complete(RequestClass::Erase);
        assert_eq!(
            grants,
            vec![Grant {
                class: RequestClass::Write,
                priority: 10
            }]
        );
        assert_eq!(sched.pending(RequestClass::Read), 1);
        assert_invariants(&sched);
    }

    #[test]
    fn test_tie_breaks_follow_admission_order() {
        // Equal maxima: Read wins against Write and Erase.
        let mut sched = Scheduler::new(1, 5);
        assert_eq!(sched.submit(RequestClass::Write, 7).len(), 1);
        assert!(sched.submit(RequestClass::Read, 5).is_empty());
        assert!(sched.submit(RequestClass::Erase, 5).is_empty());

        let grants = sched.complete(RequestClass::Write);
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].class, RequestClass::Read);

        // And Write wins against Erase once reads are out of the picture.
        let mut sched = Scheduler::new(1, 5);
        assert_eq!(sched.submit(RequestClass::Read, 9).len(), 1);
        assert!(sched.submit(RequestClass::Write, 5).is_empty());
        assert!(sched.submit(RequestClass::Erase, 5).is_empty());

        let grants = sched.complete(RequestClass::Read);
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].class, RequestClass::Write);
    }

    #[test]
    fn test_completion_bursts_multiple_reads() {
        // One completion can cascade into several read admissions, with the
        // aging pass applied between them.
        let mut sched = Scheduler::new(2, 5);
        assert_eq!(sched.submit(RequestClass::Write, 5).len(), 1);
        assert!(sched.submit(RequestClass::Read, 3).is_empty());
        assert!(sched.submit(RequestClass::Read, 4).is_empty());

        let grants = sched.complete(RequestClass::Write);
        // First admission takes the max (4) and ages the remaining 3 to 8;
        // the second admission then takes the aged value.
        assert_eq!(
            grants,
            vec![
                Grant {
                    class: RequestClass::Read,
                    priority: 4
                },
                Grant {
                    class: RequestClass::Read,
                    priority: 8
                },
            ]
        );
        assert_eq!(sched.active(RequestClass::Read), 2);
        assert_eq!(sched.free_slots(), 0);
        assert_invariants(&sched);
    }

    #[test]
    fn test_aging_touches_every_nonempty_queue() {
        let mut sched = Scheduler::new(1, 5);
        assert_eq!(sched.submit(RequestClass::Read, 10).len(), 1);
        assert!(sched.submit(RequestClass::Read, 1).is_empty());
        assert!(sched.submit(RequestClass::Read, 2).is_empty());
        assert!(sched.submit(RequestClass::Write, 7).is_empty());
        assert!(sched.submit(RequestClass::Write, 6).is_empty());

        // Write (max 7) outranks the reads (max 2); its admission leaves
        // one write pending, so every queue minimum ages: write 6 → 11,
        // read 1 → 6.
        let grants = sched.complete(RequestClass::Read);
        assert_eq!(
            grants,
            vec![Grant {
                class: RequestClass::Write,
                priority: 7
            }]
        );
        assert_eq!(sched.peek_max(RequestClass::Write), Some(11));
        assert_eq!(sched.peek_max(RequestClass::Read), Some(6));
        assert_invariants(&sched);
    }

    #[test]
    fn test_no_aging_when_admitted_queue_drains() {
        let mut sched = Scheduler::new(2, 5);
        assert_eq!(sched.submit(RequestClass::Read, 1).len(), 1);
        assert!(sched.submit(RequestClass::Write, 10).is_empty());
        assert!(sched.submit(RequestClass::Read, 5).is_empty());

        // The write admission empties its own queue, so the pending read
        // keeps its original priority.
        let grants = sched.complete(RequestClass::Read);
        assert_eq!(grants[0].class, RequestClass::Write);
        assert_eq!(sched.peek_max(RequestClass::Read), Some(5));
        assert_invariants(&sched);
    }

    #[test]
    fn test_aged_request_is_monotonically_boosted() {
        let mut sched = Scheduler::new(1, 5);
        assert_eq!(sched.submit(RequestClass::Read, 100).len(), 1);
        assert!(sched.submit(RequestClass::Erase, 1).is_empty());
        assert!(sched.submit(RequestClass::Read, 90).is_empty());
        assert!(sched.submit(RequestClass::Read, 80).is_empty());

        // Each completion admits the read maximum and ages the stragglers;
        // the erase keeps climbing until it outranks everything.
        let mut erase_priority = 1;
        for _ in 0..60 {
            let grants = sched.complete(RequestClass::Read);
            assert_eq!(grants.len(), 1);
            let grant = grants[0];
            if grant.class == RequestClass::Erase {
                assert!(grant.priority > 90, "erase admitted at {}", grant.priority);
                return;
            }
            assert!(
                sched.peek_max(RequestClass::Erase).unwrap() >= erase_priority,
                "erase priority regressed"
            );
            erase_priority = sched.peek_max(RequestClass::Erase).unwrap();
            sched.submit(RequestClass::Read, grant.priority);
        }
        panic!("erase starved despite aging");
    }

    #[test]
    fn test_zero_capacity_never_admits() {
        let mut sched = Scheduler::new(0, 5);
        assert!(sched.submit(RequestClass::Read, 10).is_empty());
        assert!(sched.submit(RequestClass::Write, 10).is_empty());
        assert_eq!(sched.free_slots(), 0);
        assert_eq!(sched.pending(RequestClass::Read), 1);
        assert_invariants(&sched);
    }

    #[test]
    fn test_eligibility_introspection() {
        let mut sched = Scheduler::new(0, 5);
        assert!(!sched.is_eligible(RequestClass::Read));

        sched.submit(RequestClass::Read, 5);
        sched.submit(RequestClass::Write, 9);
        assert!(!sched.is_eligible(RequestClass::Read));
        assert!(sched.is_eligible(RequestClass::Write));
        assert_eq!(sched.peek_max(RequestClass::Read), Some(5));
        assert_eq!(sched.peek_max(RequestClass::Erase), None);
    }

    #[test]
    #[should_panic(expected = "without a matching admission")]
    fn test_unmatched_complete_is_loud() {
        let mut sched = Scheduler::new(1, 5);
        sched.complete(RequestClass::Read);
    }
}
