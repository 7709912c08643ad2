use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};

use crate::error::StampError;

/// Alpha value inside the ellipse.
pub const OPAQUE: u8 = 255;
/// Alpha value outside the ellipse.
pub const TRANSPARENT: u8 = 0;

/// Geometry of a circular mask.
///
/// The ellipse is inscribed in the inclusive pixel box
/// `(inset, inset)..=(width - inset, height - inset)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskSpec {
    /// Canvas width in pixels (must equal the image width)
    pub width: u32,
    /// Canvas height in pixels (must equal the image height)
    pub height: u32,
    /// Gap between the canvas edge and the ellipse bounding box
    pub inset: u32,
}

impl Default for MaskSpec {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            inset: 10,
        }
    }
}

impl MaskSpec {
    pub fn square(size: u32, inset: u32) -> Self {
        Self {
            width: size,
            height: size,
            inset,
        }
    }

    fn validate(&self) -> Result<(), StampError> {
        let margin = u64::from(self.inset) * 2;
        if margin >= u64::from(self.width) || margin >= u64::from(self.height) {
            return Err(StampError::InvalidMask {
                width: self.width,
                height: self.height,
                inset: self.inset,
            });
        }
        Ok(())
    }

    /// Rasterize the mask: 255 inside the ellipse, 0 elsewhere.
    pub fn build(&self) -> Result<Mask, StampError> {
        self.validate()?;

        let ellipse = Ellipse::inscribed(
            self.inset,
            self.inset,
            self.width - self.inset,
            self.height - self.inset,
        );

        let alpha = GrayImage::from_fn(self.width, self.height, |x, y| {
            if ellipse.contains_pixel(x, y) {
                Luma([OPAQUE])
            } else {
                Luma([TRANSPARENT])
            }
        });

        Ok(Mask { alpha })
    }
}

/// Axis-aligned ellipse in continuous pixel coordinates.
#[derive(Debug, Clone, Copy)]
struct Ellipse {
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
}

impl Ellipse {
    /// Ellipse filling the inclusive pixel box `(left, top)..=(right, bottom)`.
    fn inscribed(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        let (left, top) = (f64::from(left), f64::from(top));
        let (right, bottom) = (f64::from(right) + 1.0, f64::from(bottom) + 1.0);
        Self {
            cx: (left + right) / 2.0,
            cy: (top + bottom) / 2.0,
            rx: (right - left) / 2.0,
            ry: (bottom - top) / 2.0,
        }
    }

    /// True if the centre of pixel `(x, y)` lies inside or on the ellipse.
    fn contains_pixel(&self, x: u32, y: u32) -> bool {
        let dx = (f64::from(x) + 0.5 - self.cx) / self.rx;
        let dy = (f64::from(y) + 0.5 - self.cy) / self.ry;
        dx * dx + dy * dy <= 1.0
    }
}

/// Single-channel alpha mask, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    alpha: GrayImage,
}

impl Mask {
    pub fn dimensions(&self) -> (u32, u32) {
        self.alpha.dimensions()
    }

    /// Alpha value at `(x, y)`. Panics if out of bounds.
    pub fn at(&self, x: u32, y: u32) -> u8 {
        self.alpha.get_pixel(x, y)[0]
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.alpha
    }
}
