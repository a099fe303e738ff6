pub mod collector;
pub mod counter;
pub mod filter;
pub(crate) mod walk;

pub use collector::{get_class_image_paths, get_image_paths_all_years};
pub use counter::{get_class_counts, get_class_counts_all_years, total_count};
pub use filter::{ImageFilter, DEFAULT_IMAGE_PATTERN};
