// Copyright (c) Calibra Research
// SPDX-License-Identifier: Apache-2.0

use super::*;

#[test]
fn test_events_fire_in_deadline_order() {
    let mut sched: Scheduler<&'static str> = Scheduler::new();
    sched.schedule_after(Duration(10), "second");
    sched.schedule_after(Duration(5), "first");
    let (_, first) = sched.pop_next().unwrap();
    let (_, second) = sched.pop_next().unwrap();
    assert_eq!(first, "first");
    assert_eq!(second, "second");
}

#[test]
fn test_equal_deadlines_are_fifo() {
    let mut sched: Scheduler<u32> = Scheduler::new();
    sched.schedule_after(Duration(5), 1);
    sched.schedule_after(Duration(5), 2);
    sched.schedule_after(Duration(5), 3);
    assert_eq!(sched.pop_next().unwrap().1, 1);
    assert_eq!(sched.pop_next().unwrap().1, 2);
    assert_eq!(sched.pop_next().unwrap().1, 3);
}

#[test]
fn test_negative_delay_is_clamped_to_now() {
    let mut sched: Scheduler<&'static str> = Scheduler::new();
    sched.schedule_after(Duration(-100), "now");
    let (time, event) = sched.pop_next().unwrap();
    assert_eq!(time, VirtualTime::ZERO);
    assert_eq!(event, "now");
}

#[test]
fn test_clock_never_moves_backward() {
    let mut sched: Scheduler<u32> = Scheduler::new();
    sched.schedule_after(Duration(100), 1);
    let (t1, _) = sched.pop_next().unwrap();
    assert_eq!(t1, VirtualTime(100));
    // Scheduling something "in the past" relative to now must not rewind the clock.
    sched.schedule_at(VirtualTime(10), 2);
    let (t2, _) = sched.pop_next().unwrap();
    assert_eq!(t2, VirtualTime(100));
}
