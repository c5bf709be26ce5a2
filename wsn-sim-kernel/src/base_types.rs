// Copyright (c) Calibra Research
// SPDX-License-Identifier: Apache-2.0

use anyhow::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
#[path = "unit_tests/base_type_tests.rs"]
mod base_type_tests;

pub type Result<T> = std::result::Result<T, Error>;

/// Simulated global clock, in microseconds so the reference's `1e-5` second
/// propagation-delay floor stays an exact integer.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Serialize, Deserialize)]
pub struct VirtualTime(pub i64);

#[derive(
    Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Serialize, Deserialize, Debug, Default,
)]
pub struct Duration(pub i64);

pub const MICROS_PER_SECOND: i64 = 1_000_000;

impl fmt::Debug for VirtualTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl VirtualTime {
    pub const ZERO: VirtualTime = VirtualTime(0);

    pub fn never() -> Self {
        VirtualTime(std::i64::MAX)
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / MICROS_PER_SECOND as f64
    }
}

impl Default for VirtualTime {
    fn default() -> Self {
        Self::never()
    }
}

impl std::ops::Add<Duration> for VirtualTime {
    type Output = VirtualTime;

    fn add(self, rhs: Duration) -> Self::Output {
        VirtualTime(self.0 + rhs.0)
    }
}

impl std::ops::Sub for VirtualTime {
    type Output = Duration;

    fn sub(self, rhs: VirtualTime) -> Self::Output {
        Duration(self.0 - rhs.0)
    }
}

impl Duration {
    pub fn from_secs_f64(secs: f64) -> Self {
        Duration((secs * MICROS_PER_SECOND as f64).round() as i64)
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / MICROS_PER_SECOND as f64
    }

    /// Negative delays are clamped to zero, per the kernel's failure-mode contract.
    pub fn clamp_non_negative(self) -> Self {
        if self.0 < 0 {
            Duration(0)
        } else {
            self
        }
    }
}
