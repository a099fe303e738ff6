//! 学習/テスト/ラベルCSVの作成
//!
//! 出力されるCSVはヘッダー無しで、以下の形式:
//! - 学習・テスト: `画像パス,ラベル`
//! - ラベル: `ラベル,クラス名`
//!
//! 作成したCSVの削除は呼び出し側の責任。

use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{PrepError, Result};
use crate::scan::{get_image_paths_all_years, ImageFilter};
use crate::split::labels::{assign_labels, label_records};
use crate::types::{CsvPaths, SampleRecord, SplitSummary};

/// 学習データの割合の既定値（学習 80% / テスト 20%）
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;

/// 分割の設定
#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub filter: ImageFilter,
    pub train_ratio: f64,
}

impl SplitOptions {
    pub fn new(filter: ImageFilter) -> Self {
        Self {
            filter,
            train_ratio: DEFAULT_TRAIN_RATIO,
        }
    }

    pub fn with_train_ratio(mut self, train_ratio: f64) -> Self {
        self.train_ratio = train_ratio;
        self
    }
}

/// 学習側に入る枚数: floor(len * ratio)
pub fn split_index(len: usize, train_ratio: f64) -> usize {
    ((len as f64 * train_ratio) as usize).min(len)
}

/// データセットから学習/テスト/ラベルCSVを作成する
///
/// クラスごとに画像パスを走査順のまま先頭 `train_ratio` を学習用、残りをテスト用に振り分ける。
/// 3つの出力パスのいずれかが既にファイルまたはディレクトリとして存在する場合は、
/// 何も書き込まずに [`PrepError::AlreadyExists`] を返す。
pub fn make_csv_files(
    outputs: &CsvPaths,
    dataset_root: &Path,
    ignored: &BTreeSet<String>,
    options: &SplitOptions,
) -> Result<SplitSummary> {
    validate_outputs(outputs)?;
    if !(0.0..=1.0).contains(&options.train_ratio) {
        return Err(PrepError::InvalidArgument(format!(
            "train ratio must be within 0.0..=1.0 (got {})",
            options.train_ratio
        )));
    }

    let class_image_paths = get_image_paths_all_years(dataset_root, &options.filter)?;
    let labels = assign_labels(&class_image_paths, ignored);
    info!(
        "{} クラスを検出しました（除外: {}, パターン: {}）",
        labels.len(),
        class_image_paths.len() - labels.len(),
        options.filter
    );

    let label_rows = write_records(&outputs.label_csv, label_records(&labels))?;
    info!("ラベルCSVを作成しました: {} ({} 行)", outputs.label_csv.display(), label_rows);

    let mut train = Vec::new();
    let mut test = Vec::new();
    for (class_name, &label) in &labels {
        let paths = &class_image_paths[class_name];
        let cut = split_index(paths.len(), options.train_ratio);
        debug!("  クラス '{}' (label={}): 学習 {} / テスト {}", class_name, label, cut, paths.len() - cut);

        let (train_paths, test_paths) = paths.split_at(cut);
        train.extend(train_paths.iter().map(|p| sample(p, label)));
        test.extend(test_paths.iter().map(|p| sample(p, label)));
    }

    let train_rows = write_records(&outputs.train_csv, train)?;
    info!("学習CSVを作成しました: {} ({} 行)", outputs.train_csv.display(), train_rows);
    let test_rows = write_records(&outputs.test_csv, test)?;
    info!("テストCSVを作成しました: {} ({} 行)", outputs.test_csv.display(), test_rows);

    Ok(SplitSummary {
        labels,
        train_rows,
        test_rows,
    })
}

fn validate_outputs(outputs: &CsvPaths) -> Result<()> {
    let unique: BTreeSet<PathBuf> = outputs.iter().map(|p| resolved(p)).collect();
    if unique.len() != 3 {
        return Err(PrepError::InvalidArgument(
            "train, test and label csv paths must be distinct".to_string(),
        ));
    }
    for path in outputs.iter() {
        if path.exists() {
            return Err(PrepError::AlreadyExists { path: path.clone() });
        }
    }
    Ok(())
}

/// 親ディレクトリを正規化したパス（`out/sub/../a.csv` と `out/a.csv` を同一視する）
///
/// 親が存在しない場合は元のパスをそのまま使う。
fn resolved(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

fn sample(path: &Path, label: usize) -> SampleRecord {
    SampleRecord {
        path: path.to_string_lossy().into_owned(),
        label,
    }
}

fn create_new(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                PrepError::AlreadyExists {
                    path: path.to_path_buf(),
                }
            } else {
                PrepError::io(path, e)
            }
        })
}

fn write_records<T: Serialize>(path: &Path, records: Vec<T>) -> Result<usize> {
    let file = create_new(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    let rows = records.len();
    for record in records {
        writer.serialize(record).map_err(|e| PrepError::csv(path, e))?;
    }
    writer.flush().map_err(|e| PrepError::io(path, e))?;
    Ok(rows)
}
