use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// クラス名 -> 画像枚数（年度をまたいで合算）
pub type ClassCounts = BTreeMap<String, usize>;

/// クラス名 -> 画像パス一覧（走査順）
pub type ClassImagePaths = BTreeMap<String, Vec<PathBuf>>;

/// クラス名 -> ラベル番号
pub type ClassLabels = BTreeMap<String, usize>;

/// 学習/テストCSVの1行: 画像パス,ラベル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub path: String,
    pub label: usize,
}

/// ラベルCSVの1行: ラベル,クラス名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub label: usize,
    pub class_name: String,
}

/// 3つの出力CSVのパス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvPaths {
    pub train_csv: PathBuf,
    pub test_csv: PathBuf,
    pub label_csv: PathBuf,
}

impl CsvPaths {
    pub fn new(
        train_csv: impl Into<PathBuf>,
        test_csv: impl Into<PathBuf>,
        label_csv: impl Into<PathBuf>,
    ) -> Self {
        Self {
            train_csv: train_csv.into(),
            test_csv: test_csv.into(),
            label_csv: label_csv.into(),
        }
    }

    /// 学習用かテスト用かでCSVパスを選ぶ
    pub fn samples_csv(&self, train: bool) -> &PathBuf {
        if train {
            &self.train_csv
        } else {
            &self.test_csv
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        [&self.train_csv, &self.test_csv, &self.label_csv].into_iter()
    }
}

impl Default for CsvPaths {
    fn default() -> Self {
        Self::new(
            "data/csv_files/train.csv",
            "data/csv_files/test.csv",
            "data/csv_files/labels.csv",
        )
    }
}

/// 分割結果のサマリ
#[derive(Debug, Clone, Default)]
pub struct SplitSummary {
    pub labels: ClassLabels,
    pub train_rows: usize,
    pub test_rows: usize,
}

impl SplitSummary {
    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }
}
