//! クラス名へのラベル番号割り当て

use std::collections::BTreeSet;

use crate::types::{ClassImagePaths, ClassLabels, LabelRecord};

/// 除外クラス以外に 0 から順にラベルを割り当てる
///
/// 割り当て順はクラス名の辞書順。
pub fn assign_labels(class_image_paths: &ClassImagePaths, ignored: &BTreeSet<String>) -> ClassLabels {
    class_image_paths
        .keys()
        .filter(|name| !ignored.contains(*name))
        .enumerate()
        .map(|(label, name)| (name.clone(), label))
        .collect()
}

/// ラベルCSVに書き出す行をラベル順に作る
pub fn label_records(labels: &ClassLabels) -> Vec<LabelRecord> {
    let mut records: Vec<LabelRecord> = labels
        .iter()
        .map(|(class_name, &label)| LabelRecord {
            label,
            class_name: class_name.clone(),
        })
        .collect();
    records.sort_by_key(|r| r.label);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn paths_for(names: &[&str]) -> ClassImagePaths {
        names
            .iter()
            .map(|n| (n.to_string(), vec![PathBuf::from(format!("{n}/0.png"))]))
            .collect()
    }

    #[test]
    fn test_labels_follow_name_order() {
        let paths = paths_for(&["single", "chain", "bead"]);
        let labels = assign_labels(&paths, &BTreeSet::new());

        assert_eq!(labels["bead"], 0);
        assert_eq!(labels["chain"], 1);
        assert_eq!(labels["single"], 2);
    }

    #[test]
    fn test_ignored_classes_get_no_label() {
        let paths = paths_for(&["bad", "chain", "mix", "single"]);
        let ignored: BTreeSet<String> = ["bad", "mix"].iter().map(|s| s.to_string()).collect();
        let labels = assign_labels(&paths, &ignored);

        assert_eq!(labels.len(), 2);
        assert_eq!(labels["chain"], 0);
        assert_eq!(labels["single"], 1);
        assert!(!labels.contains_key("bad"));
    }

    #[test]
    fn test_label_records_sorted_by_label() {
        let paths = paths_for(&["b", "a"]);
        let labels = assign_labels(&paths, &BTreeSet::new());
        let records = label_records(&labels);

        assert_eq!(
            records,
            vec![
                LabelRecord { label: 0, class_name: "a".to_string() },
                LabelRecord { label: 1, class_name: "b".to_string() },
            ]
        );
    }
}
