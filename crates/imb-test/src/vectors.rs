//! Test vector files
//!
//! One vector per line, three whitespace-separated columns:
//!
//! ```text
//! # tracking code        routing      bars
//! 01234567094987654321   01234        DTTAFADDTT...
//! ```
//!
//! A routing column of `-` means no routing code. Blank lines and lines
//! starting with `#` are skipped.

use crate::error::{TestError, TestResult};
use crate::test_data_path;
use std::fs;

/// One line of a vector file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    /// 20-digit tracking code
    pub tracking: String,
    /// Routing code, empty when absent
    pub routing: String,
    /// Expected 65-bar text
    pub bars: String,
    /// Line number in the source file (1-based)
    pub line: usize,
}

/// Load vectors from `tests/data/vectors/<name>`.
pub fn load_test_vectors(name: &str) -> TestResult<Vec<TestVector>> {
    let path = test_data_path(name);
    let text = fs::read_to_string(&path).map_err(|e| TestError::VectorLoad {
        path: path.clone(),
        message: e.to_string(),
    })?;
    parse_test_vectors(&text, &path)
}

/// Parse vector file contents; `path` is only used in error messages.
pub fn parse_test_vectors(text: &str, path: &str) -> TestResult<Vec<TestVector>> {
    let mut vectors = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = line.split_whitespace().collect();
        let [tracking, routing, bars] = columns.as_slice() else {
            return Err(TestError::VectorParse {
                path: path.to_string(),
                line: i + 1,
                message: format!("expected 3 columns, found {}", columns.len()),
            });
        };

        vectors.push(TestVector {
            tracking: tracking.to_string(),
            routing: if *routing == "-" {
                String::new()
            } else {
                routing.to_string()
            },
            bars: bars.to_string(),
            line: i + 1,
        });
    }
    Ok(vectors)
}
