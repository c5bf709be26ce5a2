// Copyright (c) Calibra Research
// SPDX-License-Identifier: Apache-2.0

/// Common time/duration types.
pub mod base_types;

/// Virtual clock and time-ordered event queue.
pub mod scheduler;

/// Per-node neighbor-by-distance index.
pub mod topology;

/// Append-only CSV trace writer.
pub mod trace;

pub use scheduler::{RealtimePacer, Scheduler};
pub use topology::{NeighborEntry, TopologyIndex};
pub use trace::CsvAppendWriter;
