pub mod dataset;

pub use burn_dataset::Dataset;
pub use dataset::{DiatomDataset, DiatomItem};
