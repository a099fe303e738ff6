//! アプリケーション設定管理モジュール
//!
//! データセットの場所や出力CSVのパスなどをJSON形式で保存・読み込みします。
//! 一部の値は環境変数で上書きできます。

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::scan::DEFAULT_IMAGE_PATTERN;
use crate::split::DEFAULT_TRAIN_RATIO;
use crate::types::CsvPaths;

/// データセットルートを上書きする環境変数
pub const ENV_DATASET_ROOT: &str = "DIATOM_DATASET_ROOT";
/// 学習CSVのパスを上書きする環境変数
pub const ENV_TRAIN_CSV: &str = "DIATOM_TRAIN_CSV";
/// テストCSVのパスを上書きする環境変数
pub const ENV_TEST_CSV: &str = "DIATOM_TEST_CSV";
/// ラベルCSVのパスを上書きする環境変数
pub const ENV_LABEL_CSV: &str = "DIATOM_LABEL_CSV";

/// 学習/テスト分割の設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitSettings {
    /// トレーニングデータの割合
    pub train_ratio: f64,
    /// 対象とする画像ファイル名のパターン
    pub image_pattern: String,
    /// ラベルを割り当てないクラス
    pub ignored_classes: Vec<String>,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            train_ratio: DEFAULT_TRAIN_RATIO,
            image_pattern: DEFAULT_IMAGE_PATTERN.to_string(),
            ignored_classes: ["mix_elongated", "bad", "mix", "other_interaction", "bead"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SplitSettings {
    pub fn ignored_set(&self) -> BTreeSet<String> {
        self.ignored_classes.iter().cloned().collect()
    }
}

/// 正方形変換の設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquareSettings {
    /// 出力画像の一辺（ピクセル）
    pub target_size: u32,
    /// 対象とする画像ファイル名のパターン
    pub image_pattern: String,
}

impl Default for SquareSettings {
    fn default() -> Self {
        Self {
            target_size: 224,
            image_pattern: DEFAULT_IMAGE_PATTERN.to_string(),
        }
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepConfig {
    /// 年度フォルダを含むデータセットのルート
    pub dataset_root: PathBuf,
    /// 出力CSVのパス
    pub csv: CsvPaths,
    /// 分割設定
    #[serde(default)]
    pub split: SplitSettings,
    /// 正方形変換設定
    #[serde(default)]
    pub square: SquareSettings,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            dataset_root: PathBuf::from("diatom_data"),
            csv: CsvPaths::default(),
            split: SplitSettings::default(),
            square: SquareSettings::default(),
        }
    }
}

impl PrepConfig {
    /// 設定ファイルのデフォルトパス
    pub fn default_path() -> PathBuf {
        PathBuf::from("diatom_prep.json")
    }

    /// 設定を読み込む
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: PrepConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// 設定を読み込む、存在しない場合はデフォルト設定を返す
    ///
    /// 読み込み後に環境変数による上書きを適用する。
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        let default_path = Self::default_path();
        let path = path.unwrap_or(default_path.as_path());
        let mut config = if path.exists() {
            let config = Self::load(path)?;
            info!("設定ファイルを読み込みました: {}", path.display());
            config
        } else {
            info!("設定ファイルが存在しません。デフォルト設定を使用します");
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// 環境変数による上書き
    ///
    /// lookup は変数名から値を返す関数（通常は std::env::var）。
    pub fn apply_env_overrides<L>(&mut self, lookup: L)
    where
        L: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        if let Some(root) = get(ENV_DATASET_ROOT) {
            self.dataset_root = root;
        }
        if let Some(train) = get(ENV_TRAIN_CSV) {
            self.csv.train_csv = train;
        }
        if let Some(test) = get(ENV_TEST_CSV) {
            self.csv.test_csv = test;
        }
        if let Some(label) = get(ENV_LABEL_CSV) {
            self.csv.label_csv = label;
        }
    }

    /// 設定を保存する
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if path.exists() {
            warn!("既存の設定ファイルを上書きします: {}", path.display());
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// 設定情報を表示
    pub fn display(&self) {
        info!("=== データセット準備設定 ===");
        info!("データセット: {}", self.dataset_root.display());
        info!("学習CSV: {}", self.csv.train_csv.display());
        info!("テストCSV: {}", self.csv.test_csv.display());
        info!("ラベルCSV: {}", self.csv.label_csv.display());
        info!("学習データの割合: {}", self.split.train_ratio);
        info!("画像パターン: {}", self.split.image_pattern);
        info!("除外クラス: {}", self.split.ignored_classes.join(", "));
        info!("正方形サイズ: {}x{}", self.square.target_size, self.square.target_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = PrepConfig::default();
        assert_eq!(config.split.train_ratio, 0.8);
        assert_eq!(config.split.image_pattern, "*.png");
        assert!(config.split.ignored_set().contains("bead"));
        assert_eq!(config.split.ignored_classes.len(), 5);
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = PrepConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PrepConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.csv, deserialized.csv);
        assert_eq!(config.square.target_size, deserialized.square.target_size);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let json = r#"{
            "dataset_root": "/data/diatoms",
            "csv": {"train_csv": "t_train.csv", "test_csv": "t_test.csv", "label_csv": "t_labels.csv"}
        }"#;
        let config: PrepConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.dataset_root, PathBuf::from("/data/diatoms"));
        assert_eq!(config.split.train_ratio, 0.8);
        assert_eq!(config.square.image_pattern, "*.png");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DATASET_ROOT, "/mnt/diatom_data"),
            (ENV_TRAIN_CSV, "/tmp/train.csv"),
            (ENV_LABEL_CSV, "  "),
        ]
        .into_iter()
        .collect();

        let mut config = PrepConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.dataset_root, PathBuf::from("/mnt/diatom_data"));
        assert_eq!(config.csv.train_csv, PathBuf::from("/tmp/train.csv"));
        assert_eq!(config.csv.test_csv, CsvPaths::default().test_csv);
        assert_eq!(config.csv.label_csv, CsvPaths::default().label_csv);
    }

    #[test]
    fn test_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");

        let mut config = PrepConfig::default();
        config.square.target_size = 128;
        config.save(&path).unwrap();

        let loaded = PrepConfig::load(&path).unwrap();
        assert_eq!(loaded.square.target_size, 128);
    }
}
