mod load;
mod save;

pub use load::load_image;
pub use save::save_png;
