use serde::{Deserialize, Serialize};

use crate::mask::MaskSpec;

/// Default file-name filter for check and mask.
pub const DEFAULT_SUFFIX: &str = "_ball.png";

/// Default slice names for the character sprite sheet, left to right.
pub const DEFAULT_NAMES: &[&str] = &[
    "kikurage",
    "eringi",
    "shiitake",
    "shimeji",
    "enoki",
    "matsutake",
];

/// PNG compression level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Stampkit configuration file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StampConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Directory scanned by check and mask
    pub image_dir: String,
    /// File-name suffix selecting images for check and mask
    pub suffix: String,
    /// Mask geometry
    pub mask: MaskSpec,
    /// Sprite sheet read by split
    pub sprite_sheet: String,
    /// Directory split writes its slices to
    pub output_dir: String,
    /// Slice names, left to right
    pub names: Vec<String>,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            version: 1,
            image_dir: "img".to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            mask: MaskSpec::default(),
            sprite_sheet: "img/characters.png".to_string(),
            output_dir: "img".to_string(),
            names: DEFAULT_NAMES.iter().map(|s| (*s).to_string()).collect(),
            compress: None,
        }
    }
}
