//! クラスごとの画像パス収集

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::scan::filter::ImageFilter;
use crate::scan::walk::{class_dirs, dir_name, ensure_dir, matching_files, year_dirs};
use crate::types::ClassImagePaths;

/// base配下のクラスフォルダごとに画像パスを集め、pathsに追加する
///
/// 走査方法は [`get_class_counts`](crate::scan::get_class_counts) と同じ。
/// 一致するファイルが1つも無いフォルダはキーを作らない。
pub fn get_class_image_paths(
    base: &Path,
    filter: &ImageFilter,
    paths: &mut ClassImagePaths,
) -> Result<()> {
    ensure_dir(base)?;
    for dir in class_dirs(base)? {
        let files = matching_files(&dir, filter)?;
        if files.is_empty() {
            continue;
        }
        paths.entry(dir_name(&dir)).or_default().extend(files);
    }
    Ok(())
}

/// 年度フォルダをまたいでクラスごとの画像パスを集める
pub fn get_image_paths_all_years(root: &Path, filter: &ImageFilter) -> Result<ClassImagePaths> {
    ensure_dir(root)?;
    let mut paths = ClassImagePaths::new();
    for year in year_dirs(root)? {
        debug!("年度フォルダを走査中: {}", year.display());
        get_class_image_paths(&year, filter, &mut paths)?;
    }
    Ok(paths)
}
