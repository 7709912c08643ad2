use std::path::Path;

use image::{DynamicImage, ImageReader};

use crate::error::StampError;

/// Open and decode an image, keeping its stored color type.
pub fn load_image(path: &Path) -> Result<DynamicImage, StampError> {
    ImageReader::open(path)
        .map_err(|e| StampError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .with_guessed_format()
        .map_err(|e| StampError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| StampError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })
}
