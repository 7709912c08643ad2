use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StampError {
    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("Failed to read directory '{path}': {message}")]
    DirectoryRead { path: PathBuf, message: String },

    #[error("Mask is {mask_width}x{mask_height} but image is {width}x{height}")]
    DimensionMismatch {
        mask_width: u32,
        mask_height: u32,
        width: u32,
        height: u32,
    },

    #[error("Image is empty ({width}x{height}), no corners to sample")]
    EmptyImage { width: u32, height: u32 },

    #[error("Mask inset {inset} leaves no ellipse inside a {width}x{height} canvas")]
    InvalidMask { width: u32, height: u32, inset: u32 },

    #[error("Cannot split a {width}px wide sheet into {count} slices")]
    InvalidSheet { width: u32, count: usize },

    #[error("Invalid slice name '{name}': {reason}")]
    InvalidSliceName { name: String, reason: &'static str },
}
