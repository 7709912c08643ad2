use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use log::{debug, error, info, warn};

use crate::batch::{FailurePolicy, run_batch};
use crate::cli::CompressionLevel;
use crate::codec::{load_image, save_png};
use crate::config::DEFAULT_NAMES;
use crate::error::StampError;

/// Where a sprite sheet comes from and where its slices go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSpec {
    /// Sprite sheet image (read only)
    pub source: PathBuf,
    /// Directory receiving `<name>.png` for each slice
    pub output_dir: PathBuf,
    /// Slice names, left to right
    pub names: Vec<String>,
}

impl Default for SplitSpec {
    fn default() -> Self {
        Self {
            source: PathBuf::from("img/characters.png"),
            output_dir: PathBuf::from("img"),
            names: DEFAULT_NAMES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl SplitSpec {
    /// Reject names that would not map to one distinct file inside
    /// `output_dir`.
    pub fn validate_names(&self) -> Result<(), StampError> {
        let mut seen = HashSet::new();
        for name in &self.names {
            let reason = if name.trim().is_empty() {
                Some("name is empty")
            } else if name.contains(['/', '\\']) {
                Some("name contains a path separator")
            } else if name == "." || name == ".." {
                Some("name is a relative path component")
            } else if !seen.insert(name.as_str()) {
                Some("name is used more than once")
            } else {
                None
            };

            if let Some(reason) = reason {
                return Err(StampError::InvalidSliceName {
                    name: name.clone(),
                    reason,
                });
            }
        }
        Ok(())
    }
}

/// Width of each slice when `width` pixels are shared by `count` slices.
///
/// Remainder pixels on the right are dropped.
pub fn slice_width(width: u32, count: usize) -> Result<u32, StampError> {
    let slices = u32::try_from(count).unwrap_or(u32::MAX);
    match width.checked_div(slices) {
        Some(w) if w > 0 => Ok(w),
        _ => Err(StampError::InvalidSheet { width, count }),
    }
}

/// Cut `sheet` into one full-height slice per name, left to right.
///
/// Slices keep the sheet's color type.
pub fn split_sheet(
    sheet: &DynamicImage,
    names: &[String],
) -> Result<Vec<(String, DynamicImage)>, StampError> {
    let (width, height) = sheet.dimensions();
    let slice = slice_width(width, names.len())?;

    Ok((0u32..)
        .zip(names)
        .map(|(i, name)| (name.clone(), sheet.crop_imm(i * slice, 0, slice, height)))
        .collect())
}

/// Slice the sheet and write `<output_dir>/<name>.png` for each name.
///
/// Stops at the first failure. Slices already written are left in place.
pub fn split_file(
    spec: &SplitSpec,
    compress: Option<CompressionLevel>,
) -> Result<Vec<PathBuf>, StampError> {
    spec.validate_names()?;

    let sheet = load_image(&spec.source)?;
    let (width, height) = sheet.dimensions();
    info!("Image size: {}x{}", width, height);

    let slice = slice_width(width, spec.names.len())?;
    info!("Character width: {}", slice);

    let dropped = width - slice * u32::try_from(spec.names.len()).unwrap_or(u32::MAX);
    if dropped > 0 {
        warn!(
            "Sheet width {} is not a multiple of {}, dropping {} px on the right",
            width,
            spec.names.len(),
            dropped
        );
    }

    ensure_dir(&spec.output_dir)?;

    let slices = split_sheet(&sheet, &spec.names)?;
    let report = run_batch(slices, FailurePolicy::Abort, |(name, image)| {
        let path = spec.output_dir.join(format!("{}.png", name));
        debug!("Cropping {} ({}x{})", name, image.width(), image.height());
        save_png(image, &path, compress)?;
        info!("Saved {}", path.display());
        Ok(path)
    });

    if report.aborted {
        error!(
            "Stopped after {} of {} slices",
            report.success_count(),
            spec.names.len()
        );
    }

    report.into_result()
}

fn ensure_dir(dir: &Path) -> Result<(), StampError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| StampError::OutputWrite {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}
