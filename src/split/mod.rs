pub mod labels;
pub mod writer;

pub use labels::{assign_labels, label_records};
pub use writer::{make_csv_files, split_index, SplitOptions, DEFAULT_TRAIN_RATIO};
