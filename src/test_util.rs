//! テスト用のデータセットツリー生成

use std::fs;
use std::path::{Path, PathBuf};

/// root/<year>/<class>/ 以下に count 枚のダミー画像ファイルを作成
pub fn make_class_dir(root: &Path, year: &str, class: &str, count: usize) -> PathBuf {
    let dir = root.join(year).join(class);
    fs::create_dir_all(&dir).unwrap();
    for i in 0..count {
        fs::write(dir.join(format!("{class}_{i:03}.png")), b"png").unwrap();
    }
    dir
}

/// パターンに一致しないファイルを置く
pub fn add_noise(dir: &Path) {
    fs::write(dir.join("notes.txt"), b"memo").unwrap();
    fs::write(dir.join("scan.jpg"), b"jpg").unwrap();
}
