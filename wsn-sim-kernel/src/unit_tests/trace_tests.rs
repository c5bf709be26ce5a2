use super::*;
use serde::Serialize;
use tempfile_free_testing::TempPath;

#[derive(Serialize)]
struct Row {
    a: u32,
    b: String,
}

#[test]
fn test_write_row_creates_header_on_first_write() {
    let path = TempPath::new("wsn_sim_kernel_trace_test.csv");
    {
        let mut writer = CsvAppendWriter::new(path.as_path());
        writer
            .write_row(&Row {
                a: 1,
                b: "x".to_string(),
            })
            .unwrap();
        writer
            .write_row(&Row {
                a: 2,
                b: "y".to_string(),
            })
            .unwrap();
    }
    let contents = std::fs::read_to_string(path.as_path()).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("a,b"));
    assert_eq!(lines.next(), Some("1,x"));
    assert_eq!(lines.next(), Some("2,y"));
}

#[test]
fn test_write_header_only_refreshes_file_without_rows() {
    let path = TempPath::new("wsn_sim_kernel_trace_test_header_only.csv");
    let mut writer = CsvAppendWriter::new(path.as_path());
    writer.write_header_only(&["a", "b"]).unwrap();
    let contents = std::fs::read_to_string(path.as_path()).unwrap();
    assert_eq!(contents.trim(), "a,b");
}

/// Minimal scratch-file helper so these tests don't depend on an external crate for
/// temp directories; cleans up after itself on drop.
mod tempfile_free_testing {
    use std::path::{Path, PathBuf};

    pub struct TempPath(PathBuf);

    impl TempPath {
        pub fn new(name: &str) -> Self {
            let mut path = std::env::temp_dir();
            path.push(format!("{}-{}", std::process::id(), name));
            TempPath(path)
        }

        pub fn as_path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for TempPath {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }
}
