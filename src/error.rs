//! データセット準備処理のエラー定義

use std::path::PathBuf;

use thiserror::Error;

/// エラーの大分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 引数が不正（ディレクトリでない、サイズが0など）
    InvalidArgument,
    /// 出力先が既に存在する
    AlreadyExists,
    /// 必要なディレクトリが存在しない
    NotFound,
    /// 読み書き・デコードの失敗
    Io,
}

/// データセット準備処理で発生するエラー
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("base path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("size must be greater than 0 (got {0})")]
    InvalidSize(u32),

    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("output path already exists as a file or directory: {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("directory not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("csv error in {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("image error for {}: {source}", path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl PrepError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrepError::NotADirectory { .. }
            | PrepError::InvalidArgument(_)
            | PrepError::InvalidSize(_)
            | PrepError::InvalidPattern { .. } => ErrorKind::InvalidArgument,
            PrepError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            PrepError::NotFound { .. } => ErrorKind::NotFound,
            PrepError::Io { .. }
            | PrepError::Walk(_)
            | PrepError::Csv { .. }
            | PrepError::Image { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PrepError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        PrepError::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        PrepError::Image {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PrepError>;
