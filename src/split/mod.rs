mod sheet;

pub use sheet::{SplitSpec, slice_width, split_file, split_sheet};
