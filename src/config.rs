use crate::model::DedupPolicy;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Zipped listings CSV (a bare .csv also works).
    pub dataset_path: PathBuf,
    /// Where charts and report.md are written.
    pub save_dir: PathBuf,
    /// Seed for the category sampling, for reproducible charts.
    pub seed: u64,
    /// How many categories the bar/pie charts sample.
    pub sample_size: usize,
    pub price_bins: usize,
    pub rating_bins: usize,
    pub dedup: DedupPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("archive.zip"),
            save_dir: PathBuf::from("charts"),
            seed: 42,
            sample_size: 20,
            price_bins: 100,
            rating_bins: 20,
            dedup: DedupPolicy::First,
        }
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// One-shot EDA over a product listings table: category frequencies, price
/// and rating distributions, charts plus a markdown report.
#[derive(Debug, Parser)]
#[command(name = "listing-lens", version)]
pub struct Cli {
    /// Path to the dataset (.zip with a CSV inside, or a .csv)
    #[arg(long)]
    pub data: Option<PathBuf>,
    /// Optional JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Directory for charts and report.md
    #[arg(long)]
    pub save_dir: Option<PathBuf>,
    /// Sampling seed for the category charts
    #[arg(long)]
    pub seed: Option<u64>,
    /// Which row represents an asin that appears more than once
    #[arg(long, value_enum)]
    pub dedup: Option<DedupPolicy>,
}

impl AppConfig {
    /// Config file first (when given), CLI flags override.
    pub fn resolve(cli: &Cli) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = match &cli.config {
            Some(path) => load_config(path)?,
            None => AppConfig::default(),
        };
        if let Some(data) = &cli.data {
            config.dataset_path = data.clone();
        }
        if let Some(dir) = &cli.save_dir {
            config.save_dir = dir.clone();
        }
        if let Some(seed) = cli.seed {
            config.seed = seed;
        }
        if let Some(dedup) = cli.dedup {
            config.dedup = dedup;
        }
        Ok(config)
    }
}
