//! Output formatting module
//!
//! Console report and JSON summary for check runs.

mod formatter;

pub use formatter::{write_summary_to_file, OutputFormat, ResultFormatter};
