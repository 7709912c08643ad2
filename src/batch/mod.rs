mod files;
mod report;

pub use files::{FileSet, display_name};
pub use report::{BatchReport, FailurePolicy, ItemOutcome, run_batch};
