mod args;

pub use args::{CheckArgs, CliArgs, Command, CommonArgs, CompressionLevel, MaskArgs, SplitArgs};
