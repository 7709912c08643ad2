mod apply;
mod shape;

pub use apply::{apply_mask, mask_file, mask_files};
pub use shape::{Mask, MaskSpec, OPAQUE, TRANSPARENT};
