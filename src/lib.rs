//! 珪藻画像データセットの準備ツール
//!
//! 年度ごと・クラスごとに分かれた画像フォルダを走査して、
//! 学習用のCSV（画像パス,ラベル）を作成したり、画像を正方形に整形したりします。
//!
//! 想定するフォルダ構成:
//! ```text
//! diatom_data/
//!   2017/
//!     chain/*.png
//!     single/*.png
//!   2018/
//!     chain/*.png
//! ```

pub mod config;
pub mod csv_loader;
pub mod error;
pub mod imaging;
pub mod logging;
pub mod scan;
pub mod split;
pub mod types;

#[cfg(feature = "ml")]
pub mod ml;

#[cfg(test)]
mod test_util;

pub use error::{ErrorKind, PrepError, Result};
pub use imaging::{square_image, square_images};
pub use scan::{
    get_class_counts, get_class_counts_all_years, get_class_image_paths,
    get_image_paths_all_years, ImageFilter,
};
pub use split::{make_csv_files, SplitOptions};
pub use types::{
    ClassCounts, ClassImagePaths, ClassLabels, CsvPaths, LabelRecord, SampleRecord, SplitSummary,
};
