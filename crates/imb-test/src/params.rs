//! Regression test parameters and operations

use crate::error::TestResult;
use crate::{golden_dir, regout_dir};
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse mode from a string; anything unknown means compare
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the index of the current check, the mode, and
/// every failure recorded so far.
pub struct RegParams {
    /// Name of the test (e.g., "encode")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode comes from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        // Ensure directories exist
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, detail: String) {
        let msg = format!(
            "Failure in {}_reg, index {}: {}",
            self.test_name, self.index, detail
        );
        eprintln!("{}", msg);
        self.failures.push(msg);
    }

    /// Compare two numeric values
    ///
    /// Returns `true` if `actual` is within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if diff > delta {
            self.fail(format!(
                "value comparison: expected {}, actual {}, difference {} exceeds {}",
                expected, actual, diff, delta
            ));
            false
        } else {
            true
        }
    }

    /// Compare two strings, reporting the first differing position
    pub fn compare_strings(&mut self, expected: &str, actual: &str) -> bool {
        self.index += 1;
        if expected == actual {
            return true;
        }

        let first_diff = expected
            .chars()
            .zip(actual.chars())
            .position(|(e, a)| e != a)
            .unwrap_or_else(|| expected.chars().count().min(actual.chars().count()));
        self.fail(format!(
            "string comparison: first difference at {}\n  expected = {}\n  actual   = {}",
            first_diff, expected, actual
        ));
        false
    }

    /// Record a boolean check
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            self.fail(format!("check failed: {}", what));
        }
        condition
    }

    /// Write data to file and check against golden file
    ///
    /// The local copy goes to `tests/regout/<name>.<index>.<ext>`, the
    /// golden file is `tests/golden/<name>_golden.<index>.<ext>`.
    pub fn write_data_and_check(&mut self, data: &[u8], ext: &str) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        );
        fs::write(&local_path, data)?;
        self.check_file(&local_path, ext)
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode, copies the file to golden.
    /// In compare mode, compares with golden file.
    /// In display mode, does nothing.
    fn check_file(&mut self, local_path: &str, ext: &str) -> TestResult<()> {
        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    self.fail(format!("golden file not found: {}", golden_path));
                    return Ok(());
                }
                if fs::read(local_path)? != fs::read(&golden_path)? {
                    self.fail(format!("comparing {} with {}", local_path, golden_path));
                }
            }
            RegTestMode::Display => {}
        }
        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.failures.is_empty()
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
