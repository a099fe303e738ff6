//! クラスごとの画像枚数カウント

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::scan::filter::ImageFilter;
use crate::scan::walk::{class_dirs, dir_name, ensure_dir, matching_files, year_dirs};
use crate::types::ClassCounts;

/// base配下のクラスフォルダごとに画像枚数を数え、countsに加算する
///
/// base配下の全ディレクトリ（深さを問わない）について、直下にあるパターン一致ファイルを数える。
/// キーはフルパスではなくディレクトリ名なので、同名フォルダの枚数は合算される。
/// 一致するファイルが無いフォルダも 0 件として登録される。
pub fn get_class_counts(base: &Path, filter: &ImageFilter, counts: &mut ClassCounts) -> Result<()> {
    ensure_dir(base)?;
    for dir in class_dirs(base)? {
        let count = matching_files(&dir, filter)?.len();
        *counts.entry(dir_name(&dir)).or_insert(0) += count;
    }
    Ok(())
}

/// 年度フォルダをまたいでクラスごとの画像枚数を数える
///
/// rootは年度ごとのフォルダを含むディレクトリ。
pub fn get_class_counts_all_years(root: &Path, filter: &ImageFilter) -> Result<ClassCounts> {
    ensure_dir(root)?;
    let mut counts = ClassCounts::new();
    for year in year_dirs(root)? {
        debug!("年度フォルダを集計中: {}", year.display());
        get_class_counts(&year, filter, &mut counts)?;
    }
    Ok(counts)
}

/// 全クラスの合計枚数
pub fn total_count(counts: &ClassCounts) -> usize {
    counts.values().sum()
}
