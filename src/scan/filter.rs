//! ファイル名のglobフィルタ（例: "*.png"）

use glob::Pattern;

use crate::error::{PrepError, Result};

/// 既定の画像パターン
pub const DEFAULT_IMAGE_PATTERN: &str = "*.png";

/// 画像ファイル名のフィルタ
///
/// パターンはファイル名のみに対して評価し、ディレクトリ部分は含めない。
/// 大文字小文字は区別する。
#[derive(Debug, Clone)]
pub struct ImageFilter {
    pattern: Pattern,
}

impl ImageFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Pattern::new(pattern).map_err(|source| PrepError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.matches(file_name)
    }
}

impl std::fmt::Display for ImageFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern.as_str())
    }
}
