use crate::error::{PrepError, Result};
use crate::types::{ClassLabels, LabelRecord, SampleRecord};
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::path::Path;

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| PrepError::csv(path, e))?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: T = result.map_err(|e| PrepError::csv(path, e))?;
        records.push(record);
    }

    Ok(records)
}

/// 学習/テストCSV（画像パス,ラベル）を読み込む
pub fn load_samples(path: &Path) -> Result<Vec<SampleRecord>> {
    load_records(path)
}

/// ラベルCSV（ラベル,クラス名）を読み込む
pub fn load_labels(path: &Path) -> Result<Vec<LabelRecord>> {
    load_records(path)
}

/// ラベルCSVをクラス名 -> ラベルの対応表として読み込む
pub fn load_class_labels(path: &Path) -> Result<ClassLabels> {
    Ok(load_labels(path)?
        .into_iter()
        .map(|r| (r.class_name, r.label))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_load_samples_without_header() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("train.csv");
        std::fs::write(&path, "data/2017/chain/a.png,0\ndata/2018/single/b.png,1\n").unwrap();

        let samples = load_samples(&path).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].path, "data/2017/chain/a.png");
        assert_eq!(samples[1].label, 1);
    }

    #[test]
    fn test_load_class_labels() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("labels.csv");
        std::fs::write(&path, "0,chain\n1,single\n").unwrap();

        let labels = load_class_labels(&path).unwrap();
        assert_eq!(labels["chain"], 0);
        assert_eq!(labels["single"], 1);
    }

    #[test]
    fn test_bad_label_column() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("train.csv");
        std::fs::write(&path, "a.png,not_a_number\n").unwrap();

        let err = load_samples(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(load_samples(&tmp.path().join("missing.csv")).is_err());
    }
}
