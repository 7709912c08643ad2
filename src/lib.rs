pub mod batch;
pub mod check;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod mask;
pub mod split;

pub use batch::{BatchReport, FailurePolicy, FileSet};
pub use check::CornerReport;
pub use cli::{CliArgs, Command};
pub use error::StampError;
pub use mask::{Mask, MaskSpec};
pub use split::SplitSpec;
