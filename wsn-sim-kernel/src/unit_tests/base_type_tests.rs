// Copyright (c) Calibra Research
// SPDX-License-Identifier: Apache-2.0

use super::*;

#[test]
fn test_virtual_time_add_duration() {
    assert_eq!(VirtualTime(10) + Duration(5), VirtualTime(15));
}

#[test]
fn test_duration_clamp_non_negative() {
    assert_eq!(Duration(-3).clamp_non_negative(), Duration(0));
    assert_eq!(Duration(3).clamp_non_negative(), Duration(3));
}

#[test]
fn test_duration_from_secs_f64_matches_reference_floor() {
    // wsnlab.py clamps prop_time to a floor of 1e-5 seconds.
    let floor = Duration::from_secs_f64(0.00001);
    assert_eq!(floor, Duration(10));
}

#[test]
fn test_virtual_time_never_is_default() {
    assert_eq!(VirtualTime::default(), VirtualTime::never());
}
