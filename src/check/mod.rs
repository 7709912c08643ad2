mod corners;

pub use corners::{Corner, CornerReport, check_file, check_files};
