//! データセット準備用のコマンドラインツール

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use diatom_prep_lib::config::PrepConfig;
use diatom_prep_lib::csv_loader::{load_class_labels, load_samples};
use diatom_prep_lib::scan::{get_class_counts, total_count};
use diatom_prep_lib::{
    get_class_counts_all_years, logging, make_csv_files, square_images, ClassCounts, CsvPaths,
    ImageFilter, SplitOptions,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "diatom_prep", version, about = "Diatom dataset preparation tools")]
struct Cli {
    /// 設定ファイル（既定: ./diatom_prep.json）
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// デバッグログを表示
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count images per class across all year folders
    Counts {
        /// Dataset root (defaults to config dataset_root)
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        pattern: Option<String>,
        /// Count class folders directly under root instead of per year
        #[arg(long)]
        flat: bool,
    },
    /// Write train/test/label csv files
    Split {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        train: Option<PathBuf>,
        #[arg(long)]
        test: Option<PathBuf>,
        #[arg(long)]
        labels: Option<PathBuf>,
        /// Classes to exclude (replaces the configured list)
        #[arg(long = "ignore")]
        ignore: Vec<String>,
        #[arg(long)]
        ratio: Option<f64>,
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Resize and pad images to a square canvas
    Square {
        #[arg(long)]
        src: PathBuf,
        #[arg(long)]
        dst: PathBuf,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Summarize a generated train/test csv
    Inspect {
        #[arg(long)]
        csv: PathBuf,
        /// Label csv used to print class names
        #[arg(long)]
        labels: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config {
        /// Write the effective configuration to the config path
        #[arg(long)]
        write: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("警告: ログの初期化に失敗しました: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = PrepConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Command::Counts { root, pattern, flat } => {
            let root = root.unwrap_or_else(|| config.dataset_root.clone());
            let filter = ImageFilter::new(pattern.as_deref().unwrap_or(&config.split.image_pattern))?;
            counts_cmd(&root, &filter, flat)
        }
        Command::Split {
            root,
            train,
            test,
            labels,
            ignore,
            ratio,
            pattern,
        } => {
            let root = root.unwrap_or_else(|| config.dataset_root.clone());
            let outputs = CsvPaths {
                train_csv: train.unwrap_or_else(|| config.csv.train_csv.clone()),
                test_csv: test.unwrap_or_else(|| config.csv.test_csv.clone()),
                label_csv: labels.unwrap_or_else(|| config.csv.label_csv.clone()),
            };
            let ignored = if ignore.is_empty() {
                config.split.ignored_set()
            } else {
                ignore.into_iter().collect()
            };
            let filter = ImageFilter::new(pattern.as_deref().unwrap_or(&config.split.image_pattern))?;
            let options = SplitOptions::new(filter)
                .with_train_ratio(ratio.unwrap_or(config.split.train_ratio));

            let summary = make_csv_files(&outputs, &root, &ignored, &options)
                .with_context(|| format!("Failed to create csv files from {}", root.display()))?;
            println!(
                "{} classes, {} train rows, {} test rows",
                summary.num_classes(),
                summary.train_rows,
                summary.test_rows
            );
            Ok(())
        }
        Command::Square {
            src,
            dst,
            size,
            pattern,
        } => {
            let filter = ImageFilter::new(pattern.as_deref().unwrap_or(&config.square.image_pattern))?;
            let size = size.unwrap_or(config.square.target_size);
            let written = square_images(&src, &dst, size, &filter)
                .with_context(|| format!("Failed to square images in {}", src.display()))?;
            println!("{} images written to {}", written, dst.display());
            Ok(())
        }
        Command::Inspect { csv, labels } => inspect_cmd(&csv, labels.as_deref()),
        Command::Config { write } => {
            config.display();
            if write {
                let path = cli.config.unwrap_or_else(PrepConfig::default_path);
                config.save(&path)?;
                println!("設定ファイルを保存しました: {}", path.display());
            }
            Ok(())
        }
    }
}

fn counts_cmd(root: &Path, filter: &ImageFilter, flat: bool) -> Result<()> {
    let counts = if flat {
        let mut counts = ClassCounts::new();
        get_class_counts(root, filter, &mut counts)?;
        counts
    } else {
        get_class_counts_all_years(root, filter)?
    };

    for (class_name, count) in &counts {
        println!("{:<24} {:>6}", class_name, count);
    }
    println!("{:<24} {:>6}", "total", total_count(&counts));
    Ok(())
}

fn inspect_cmd(csv: &Path, labels: Option<&Path>) -> Result<()> {
    let samples = load_samples(csv)?;
    let names: BTreeMap<usize, String> = match labels {
        Some(path) => load_class_labels(path)?
            .into_iter()
            .map(|(name, label)| (label, name))
            .collect(),
        None => BTreeMap::new(),
    };

    let mut per_label: BTreeMap<usize, usize> = BTreeMap::new();
    for sample in &samples {
        *per_label.entry(sample.label).or_insert(0) += 1;
    }

    println!("{}: {} rows, {} labels", csv.display(), samples.len(), per_label.len());
    for (label, count) in &per_label {
        let name = names.get(label).map(String::as_str).unwrap_or("?");
        println!("  {:>3} {:<24} {:>6}", label, name, count);
    }
    Ok(())
}
