// Copyright (c) Calibra Research
// SPDX-License-Identifier: Apache-2.0
//
// Virtual-clock event queue. Structurally this keeps the teacher's
// `BinaryHeap<Reverse<GlobalTime>>` min-heap idiom (see the former `bft-lib::simulator`),
// generalized to an arbitrary event payload and an explicit monotonic sequence number so
// that events scheduled for the same deadline run in FIFO insertion order, as required of
// this kernel (the teacher's own `Ord`-derived `Event` enum tie-breaks on variant/payload
// content instead, which this crate's ordering contract does not allow).

use crate::base_types::{Duration, VirtualTime};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

#[cfg(test)]
#[path = "unit_tests/scheduler_tests.rs"]
mod scheduler_tests;

struct ScheduledEvent<E> {
    time: VirtualTime,
    seq: u64,
    event: E,
}

impl<E> PartialEq for ScheduledEvent<E> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}
impl<E> Eq for ScheduledEvent<E> {}
impl<E> PartialOrd for ScheduledEvent<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<E> Ord for ScheduledEvent<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.time, self.seq).cmp(&(other.time, other.seq))
    }
}

/// Monotonic virtual clock plus a time-ordered queue of pending events.
pub struct Scheduler<E> {
    now: VirtualTime,
    next_seq: u64,
    queue: BinaryHeap<Reverse<ScheduledEvent<E>>>,
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Scheduler {
            now: VirtualTime::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    pub fn now(&self) -> VirtualTime {
        self.now
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn peek_deadline(&self) -> Option<VirtualTime> {
        self.queue.peek().map(|Reverse(e)| e.time)
    }

    /// Appends `event` at `now + delay`. A negative delay is clamped to zero rather than
    /// rejected, per the kernel's documented failure mode.
    pub fn schedule_after(&mut self, delay: Duration, event: E) -> VirtualTime {
        let time = self.now + delay.clamp_non_negative();
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(ScheduledEvent { time, seq, event }));
        time
    }

    pub fn schedule_at(&mut self, time: VirtualTime, event: E) {
        let time = if time < self.now { self.now } else { time };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(ScheduledEvent { time, seq, event }));
    }

    /// Pops the next event. Events whose deadline has already passed (which cannot
    /// happen given `schedule_after`'s clamping, but can for externally constructed
    /// times) do not move the clock backward.
    pub fn pop_next(&mut self) -> Option<(VirtualTime, E)> {
        let Reverse(scheduled) = self.queue.pop()?;
        self.now = std::cmp::max(self.now, scheduled.time);
        Some((self.now, scheduled.event))
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Optional cosmetic real-time pacing: sleeps the host thread between events so a run
/// can be watched at a human pace. Purely a wall-clock side effect; it never changes
/// `VirtualTime` ordering or values, matching §4.1's pacing contract.
pub struct RealtimePacer {
    timescale: f64,
    last_poll: Instant,
    last_virtual: VirtualTime,
}

impl RealtimePacer {
    pub fn new(timescale: f64, start: VirtualTime) -> Self {
        RealtimePacer {
            timescale,
            last_poll: Instant::now(),
            last_virtual: start,
        }
    }

    /// Blocks until wall-clock has advanced by `timescale * (next - last_virtual)`.
    pub fn pace(&mut self, next: VirtualTime) {
        if self.timescale <= 0.0 {
            return;
        }
        let elapsed_virtual = (next - self.last_virtual).as_secs_f64();
        if elapsed_virtual > 0.0 {
            let wall_budget = std::time::Duration::from_secs_f64(elapsed_virtual * self.timescale);
            let elapsed_wall = self.last_poll.elapsed();
            if elapsed_wall < wall_budget {
                std::thread::sleep(wall_budget - elapsed_wall);
            }
        }
        self.last_poll = Instant::now();
        self.last_virtual = next;
    }
}
