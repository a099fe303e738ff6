pub mod squarer;

pub use squarer::{scaled_size, square_image, square_images, Padding};
