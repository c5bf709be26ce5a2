// Copyright (c) Calibra Research
// SPDX-License-Identifier: Apache-2.0
//
// Append-only CSV row emitter. Grounded on the teacher's `bft-lib::data_writer::DataWriter`
// (`csv::Writer::from_path`, header written once) and on the `write_*_csv` functions in
// `wsnlab/data_collection_tree.py` / `repairing_network.py`, which open a fresh writer per
// export and always write the header row even when there is no data yet.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::base_types::Result;

/// Lazily-opened CSV writer for one trace file. The header row is written on first use;
/// subsequent rows are appended in the same process without reopening the file.
pub struct CsvAppendWriter {
    path: PathBuf,
    inner: Option<csv::Writer<fs::File>>,
}

impl CsvAppendWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvAppendWriter {
            path: path.into(),
            inner: None,
        }
    }

    fn writer(&mut self) -> Result<&mut csv::Writer<fs::File>> {
        if self.inner.is_none() {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            self.inner = Some(csv::Writer::from_path(&self.path)?);
        }
        Ok(self.inner.as_mut().unwrap())
    }

    pub fn write_row<S: Serialize>(&mut self, row: &S) -> Result<()> {
        self.writer()?.serialize(row)?;
        self.writer()?.flush()?;
        Ok(())
    }

    /// (Re)creates the file with only the given header row, for exporters that must
    /// refresh an existing file even when there is currently no data (e.g.
    /// `clusterhead_distances.csv` with fewer than two live cluster heads).
    pub fn write_header_only(&mut self, headers: &[&str]) -> Result<()> {
        let mut w = csv::Writer::from_path(&self.path)?;
        w.write_record(headers)?;
        w.flush()?;
        self.inner = Some(w);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[path = "unit_tests/trace_tests.rs"]
mod trace_tests;
