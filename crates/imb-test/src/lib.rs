//! imb-test - Regression test framework for the Intelligent Mail codec
//!
//! Accumulates checks for one regression test and reports them at the end,
//! with three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison
//!
//! # Usage
//!
//! ```ignore
//! use imb_test::{RegParams, load_test_vectors};
//!
//! let mut rp = RegParams::new("encode");
//! for v in load_test_vectors("usps.txt").unwrap() {
//!     rp.compare_strings(v.bars.as_bytes(), encoded.as_bytes());
//! }
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;
mod vectors;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
pub use vectors::{TestVector, load_test_vectors, parse_test_vectors};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // imb-test is at crates/imb-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/vectors/{}", workspace_root(), name)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
