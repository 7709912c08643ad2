use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::types::{CompressConfig, StampConfig};
use crate::cli::CompressionLevel;

/// A loaded configuration file with its associated directory.
///
/// Paths in the config are relative to the config file location,
/// so we need to track where the config was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration
    pub config: StampConfig,
    /// The directory containing the config file
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// Load a config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: StampConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        if config.version != 1 {
            bail!(
                "unsupported config version {} in {}",
                config.version,
                path.display()
            );
        }

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    pub fn resolve_image_dir(&self) -> PathBuf {
        self.config_dir.join(&self.config.image_dir)
    }

    pub fn resolve_sprite_sheet(&self) -> PathBuf {
        self.config_dir.join(&self.config.sprite_sheet)
    }

    pub fn resolve_output_dir(&self) -> PathBuf {
        self.config_dir.join(&self.config.output_dir)
    }

    /// Compression level from the config, if any.
    pub fn compression(&self) -> Result<Option<CompressionLevel>> {
        let raw = match &self.config.compress {
            None => return Ok(None),
            Some(CompressConfig::Level(n)) => n.to_string(),
            Some(CompressConfig::Max(s)) => s.clone(),
        };

        raw.parse::<CompressionLevel>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("invalid compress setting in config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_resolves_relative_paths() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("assets.stampkit");
        std::fs::write(
            &path,
            r#"{ "image_dir": "stamps", "sprite_sheet": "src/sheet.png", "output_dir": "out" }"#,
        )
        .unwrap();

        let loaded = LoadedConfig::load(&path).unwrap();

        assert_eq!(loaded.config_dir, temp_dir.path());
        assert_eq!(loaded.resolve_image_dir(), temp_dir.path().join("stamps"));
        assert_eq!(
            loaded.resolve_sprite_sheet(),
            temp_dir.path().join("src/sheet.png")
        );
        assert_eq!(loaded.resolve_output_dir(), temp_dir.path().join("out"));
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.stampkit");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(LoadedConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("future.stampkit");
        std::fs::write(&path, r#"{ "version": 2 }"#).unwrap();

        let err = LoadedConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported config version"));
    }

    #[test]
    fn test_compression_from_config() {
        let mut loaded = LoadedConfig {
            config: StampConfig::default(),
            config_dir: PathBuf::from("."),
        };
        assert_eq!(loaded.compression().unwrap(), None);

        loaded.config.compress = Some(CompressConfig::Level(4));
        assert_eq!(
            loaded.compression().unwrap(),
            Some(CompressionLevel::Level(4))
        );

        loaded.config.compress = Some(CompressConfig::Max("max".to_string()));
        assert_eq!(loaded.compression().unwrap(), Some(CompressionLevel::Max));

        loaded.config.compress = Some(CompressConfig::Level(9));
        assert!(loaded.compression().is_err());
    }
}
