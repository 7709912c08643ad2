use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use log::{error, info, warn};

use crate::batch::{BatchReport, FailurePolicy, FileSet, display_name, run_batch};
use crate::codec::load_image;
use crate::error::StampError;

/// One sampled corner pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub x: u32,
    pub y: u32,
    pub pixel: Rgba<u8>,
}

/// Corner sample of a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CornerReport {
    pub width: u32,
    pub height: u32,
    /// Top-left, top-right, bottom-left, bottom-right
    pub corners: [Corner; 4],
}

impl CornerReport {
    /// Sample the four corner pixels of an image.
    pub fn inspect(image: &RgbaImage) -> Result<Self, StampError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(StampError::EmptyImage { width, height });
        }

        let corner = |x: u32, y: u32| Corner {
            x,
            y,
            pixel: *image.get_pixel(x, y),
        };
        let (right, bottom) = (width - 1, height - 1);

        Ok(Self {
            width,
            height,
            corners: [
                corner(0, 0),
                corner(right, 0),
                corner(0, bottom),
                corner(right, bottom),
            ],
        })
    }

    /// True if any corner is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.corners.iter().any(|c| c.pixel[3] == 0)
    }
}

/// Load an image as RGBA and sample its corners.
pub fn check_file(path: &Path) -> Result<CornerReport, StampError> {
    let image = load_image(path)?.into_rgba8();

    CornerReport::inspect(&image)
}

/// Check every file in the set, continuing past per-file failures.
///
/// Only listing the directory can fail the whole run.
pub fn check_files(files: &FileSet) -> Result<BatchReport<PathBuf, CornerReport>, StampError> {
    let paths = files.collect()?;
    if paths.is_empty() {
        info!(
            "No files ending in '{}' found in {}",
            files.suffix,
            files.dir.display()
        );
    }

    let report = run_batch(paths, FailurePolicy::Continue, |path| {
        let name = display_name(path);
        match check_file(path) {
            Ok(corners) => {
                log_report(&name, &corners);
                Ok(corners)
            }
            Err(e) => {
                error!("Error checking {}: {}", name, e);
                Err(e)
            }
        }
    });

    let opaque = report.successes().filter(|(_, r)| !r.is_transparent()).count();
    info!(
        "Checked {} files: {} without transparent corners, {} failed",
        report.success_count(),
        opaque,
        report.failure_count()
    );

    Ok(report)
}

fn log_report(name: &str, report: &CornerReport) {
    info!("Checking {} ({}x{}):", name, report.width, report.height);
    for corner in &report.corners {
        let [r, g, b, a] = corner.pixel.0;
        info!(
            "  Corner ({}, {}): ({}, {}, {}, {})",
            corner.x, corner.y, r, g, b, a
        );
    }
    if !report.is_transparent() {
        warn!("{} might not be transparent at corners.", name);
    }
}
