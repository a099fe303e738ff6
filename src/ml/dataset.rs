//! 学習フレームワーク（Burn）向けデータセット
//!
//! make_csv_files で作成した学習/テストCSVを読み込み、
//! インデックス指定で画像を読み込んで変換関数を適用したアイテムを返す。

#[cfg(feature = "ml")]
use std::collections::BTreeSet;
#[cfg(feature = "ml")]
use std::path::{Path, PathBuf};

#[cfg(feature = "ml")]
use burn_dataset::Dataset;
#[cfg(feature = "ml")]
use image::DynamicImage;
#[cfg(feature = "ml")]
use tracing::{info, warn};

#[cfg(feature = "ml")]
use crate::csv_loader::load_samples;
#[cfg(feature = "ml")]
use crate::error::Result;
#[cfg(feature = "ml")]
use crate::types::{CsvPaths, SampleRecord};

/// データセットアイテム
#[cfg(feature = "ml")]
#[derive(Clone, Debug)]
pub struct DiatomItem<T> {
    pub path: PathBuf,
    pub label: usize,
    pub image: T,
}

/// CSVの行（画像パス,ラベル）を保持するデータセット
///
/// 画像は get() のたびにディスクから読み込む。
#[cfg(feature = "ml")]
pub struct DiatomDataset<F> {
    samples: Vec<SampleRecord>,
    transform: F,
}

#[cfg(feature = "ml")]
fn identity(image: DynamicImage) -> DynamicImage {
    image
}

#[cfg(feature = "ml")]
impl<F> DiatomDataset<F> {
    /// 学習用(train=true)またはテスト用のCSVから読み込む
    pub fn open(paths: &CsvPaths, train: bool, transform: F) -> Result<Self> {
        Self::from_csv(paths.samples_csv(train), transform)
    }

    /// 指定したCSVから読み込む
    pub fn from_csv(csv_path: &Path, transform: F) -> Result<Self> {
        let samples = load_samples(csv_path)?;
        info!("{} 件のサンプルを読み込みました: {}", samples.len(), csv_path.display());
        Ok(Self { samples, transform })
    }

    pub fn samples(&self) -> &[SampleRecord] {
        &self.samples
    }

    /// CSV中に現れるラベルの種類数
    pub fn class_count(&self) -> usize {
        self.samples
            .iter()
            .map(|s| s.label)
            .collect::<BTreeSet<_>>()
            .len()
    }
}

#[cfg(feature = "ml")]
impl DiatomDataset<fn(DynamicImage) -> DynamicImage> {
    /// 変換なしで読み込む
    pub fn untransformed(csv_path: &Path) -> Result<Self> {
        Self::from_csv(csv_path, identity as fn(DynamicImage) -> DynamicImage)
    }
}

#[cfg(feature = "ml")]
impl<T, F> Dataset<DiatomItem<T>> for DiatomDataset<F>
where
    F: Fn(DynamicImage) -> T + Send + Sync,
{
    fn get(&self, index: usize) -> Option<DiatomItem<T>> {
        let sample = self.samples.get(index)?;
        let path = PathBuf::from(&sample.path);

        let image = match image::open(&path) {
            Ok(image) => image,
            Err(e) => {
                warn!("画像の読み込みに失敗しました {}: {}", path.display(), e);
                return None;
            }
        };

        Some(DiatomItem {
            image: (self.transform)(image),
            label: sample.label,
            path,
        })
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
