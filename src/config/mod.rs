mod load;
mod types;

pub use load::LoadedConfig;
pub use types::{CompressConfig, DEFAULT_NAMES, DEFAULT_SUFFIX, StampConfig};
