use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};
use log::{error, info};

use super::Mask;
use crate::batch::{BatchReport, FailurePolicy, FileSet, display_name, run_batch};
use crate::cli::CompressionLevel;
use crate::codec::{load_image, save_png};
use crate::error::StampError;

/// Replace the alpha channel of `image` with the mask, pixel for pixel.
///
/// Existing alpha is discarded, not blended. Color channels are untouched.
/// On a size mismatch the image is left unchanged.
pub fn apply_mask(image: &mut RgbaImage, mask: &Mask) -> Result<(), StampError> {
    let (width, height) = image.dimensions();
    let (mask_width, mask_height) = mask.dimensions();
    if (width, height) != (mask_width, mask_height) {
        return Err(StampError::DimensionMismatch {
            mask_width,
            mask_height,
            width,
            height,
        });
    }

    for (pixel, alpha) in image.pixels_mut().zip(mask.as_image().pixels()) {
        pixel[3] = alpha[0];
    }

    Ok(())
}

/// Mask a single file in place. The original is overwritten without backup.
pub fn mask_file(
    path: &Path,
    mask: &Mask,
    compress: Option<CompressionLevel>,
) -> Result<(), StampError> {
    let mut image = load_image(path)?.into_rgba8();
    apply_mask(&mut image, mask)?;
    save_png(&DynamicImage::ImageRgba8(image), path, compress)
}

/// Mask every file in the set, continuing past per-file failures.
///
/// Files processed before a failure stay rewritten; there is no rollback.
pub fn mask_files(
    files: &FileSet,
    mask: &Mask,
    compress: Option<CompressionLevel>,
) -> Result<BatchReport<PathBuf, ()>, StampError> {
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
        mask_file(path, mask, compress)
            .inspect(|_| info!("Processed {}", name))
            .inspect_err(|e| error!("Error processing {}: {}", name, e))
    });

    info!(
        "Masked {} files, {} failed",
        report.success_count(),
        report.failure_count()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::MaskSpec;
    use image::Rgba;
    use tempfile::TempDir;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 200])
        })
    }

    #[test]
    fn test_apply_replaces_alpha_and_keeps_rgb() {
        let mask = MaskSpec::square(64, 4).build().unwrap();
        let original = gradient(64, 64);
        let mut image = original.clone();

        apply_mask(&mut image, &mask).unwrap();

        for (x, y, pixel) in image.enumerate_pixels() {
            let before = original.get_pixel(x, y);
            assert_eq!(pixel[3], mask.at(x, y), "alpha at ({}, {})", x, y);
            assert_eq!(pixel.0[..3], before.0[..3], "rgb at ({}, {})", x, y);
        }
    }

    #[test]
    fn test_apply_ignores_existing_alpha() {
        let mask = MaskSpec::square(32, 2).build().unwrap();
        let mut clear = RgbaImage::from_pixel(32, 32, Rgba([9, 9, 9, 0]));
        let mut solid = RgbaImage::from_pixel(32, 32, Rgba([9, 9, 9, 255]));

        apply_mask(&mut clear, &mask).unwrap();
        apply_mask(&mut solid, &mask).unwrap();

        assert_eq!(clear, solid);
        assert_eq!(clear.get_pixel(16, 16)[3], 255);
        assert_eq!(solid.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mask = MaskSpec::square(48, 3).build().unwrap();
        let mut once = gradient(48, 48);
        apply_mask(&mut once, &mask).unwrap();
        let mut twice = once.clone();
        apply_mask(&mut twice, &mask).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_dimension_mismatch_leaves_image() {
        let mask = MaskSpec::default().build().unwrap();
        let original = gradient(512, 512);
        let mut image = original.clone();

        let err = apply_mask(&mut image, &mask).unwrap_err();

        assert!(matches!(
            err,
            StampError::DimensionMismatch {
                mask_width: 1024,
                mask_height: 1024,
                width: 512,
                height: 512
            }
        ));
        assert_eq!(image, original);
    }

    #[test]
    fn test_mask_file_twice_matches_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a_ball.png");
        gradient(40, 40).save(&path).unwrap();
        let mask = MaskSpec::square(40, 2).build().unwrap();

        mask_file(&path, &mask, None).unwrap();
        let once = image::open(&path).unwrap().into_rgba8();
        mask_file(&path, &mask, None).unwrap();
        let twice = image::open(&path).unwrap().into_rgba8();

        let alpha = |img: &RgbaImage| img.pixels().map(|p| p[3]).collect::<Vec<u8>>();
        assert_eq!(alpha(&once), alpha(&twice));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mask_files_isolates_failures() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        gradient(32, 32).save(dir.join("a_ball.png")).unwrap();
        std::fs::write(dir.join("b_ball.png"), b"garbage").unwrap();
        gradient(16, 16).save(dir.join("c_ball.png")).unwrap();
        gradient(32, 32).save(dir.join("d_ball.png")).unwrap();
        gradient(32, 32).save(dir.join("untouched.png")).unwrap();
        let mask = MaskSpec::square(32, 2).build().unwrap();

        let report = mask_files(&FileSet::new(dir, "_ball.png"), &mask, None).unwrap();

        assert_eq!(report.outcomes.len(), 4);
        assert_eq!(report.success_count(), 2);
        let failed: Vec<String> = report.failures().map(|(p, _)| display_name(p)).collect();
        assert_eq!(failed, vec!["b_ball.png", "c_ball.png"]);

        for name in ["a_ball.png", "d_ball.png"] {
            let img = image::open(dir.join(name)).unwrap().into_rgba8();
            assert_eq!(img.get_pixel(0, 0)[3], 0);
            assert_eq!(img.get_pixel(16, 16)[3], 255);
        }
        // Wrong-sized file keeps its original alpha.
        let small = image::open(dir.join("c_ball.png")).unwrap().into_rgba8();
        assert_eq!(small.get_pixel(0, 0)[3], 200);
        let other = image::open(dir.join("untouched.png")).unwrap().into_rgba8();
        assert_eq!(other.get_pixel(0, 0)[3], 200);
    }

    #[test]
    fn test_mask_file_converts_rgb_to_rgba() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rgb_ball.png");
        image::RgbImage::from_pixel(24, 24, image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();
        let mask = MaskSpec::square(24, 1).build().unwrap();

        mask_file(&path, &mask, None).unwrap();

        let img = image::open(&path).unwrap();
        assert!(img.color().has_alpha());
        let img = img.into_rgba8();
        assert_eq!(*img.get_pixel(0, 0), Rgba([10, 20, 30, 0]));
        assert_eq!(*img.get_pixel(12, 12), Rgba([10, 20, 30, 255]));
    }
}
