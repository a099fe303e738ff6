//! クラスフォルダ走査の共通処理

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{PrepError, Result};
use crate::scan::filter::ImageFilter;

/// ディレクトリであることを確認する
pub(crate) fn ensure_dir(base: &Path) -> Result<()> {
    if !base.is_dir() {
        return Err(PrepError::NotADirectory {
            path: base.to_path_buf(),
        });
    }
    Ok(())
}

/// base配下（base自身は含まない）の全ディレクトリをファイル名順に列挙
///
/// シンボリックリンクのフォルダも辿る。
pub(crate) fn class_dirs(base: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(base)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// baseの直下にあるディレクトリ（年度フォルダ）をファイル名順に列挙
pub(crate) fn year_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// ディレクトリ直下でパターンに一致するファイルをファイル名順に列挙
pub(crate) fn matching_files(dir: &Path, filter: &ImageFilter) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| PrepError::io(dir, e))? {
        let entry = entry.map_err(|e| PrepError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            debug!("UTF-8でないファイル名をスキップします: {}", path.display());
            continue;
        };
        if filter.matches(&name) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// ディレクトリ名（クラス名）を取得
pub(crate) fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
