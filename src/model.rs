// Core structs: Listing, Dataset, StatisticalSummary
use thiserror::Error;

/// One row of the listings table. A product (asin) may appear in several rows.
#[derive(Debug, Clone)]
pub struct Listing {
    pub asin: String,
    pub title: String,
    pub category: String,
    pub price: f64,
    /// Star rating in `[0, 5]`. `0.0` means "not yet rated".
    pub stars: f64,
}

/// The loaded table. Built once by the loader, then passed by reference to
/// every analysis stage; never mutated after loading.
#[derive(Debug, Default)]
pub struct Dataset {
    pub listings: Vec<Listing>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

/// Which row represents a product that appears in multiple listing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DedupPolicy {
    /// Keep the first row seen for each asin.
    First,
    /// Keep the second row seen for each asin; asins with a single row are
    /// dropped entirely. Reproduces the upstream notebook's
    /// `groupby("asin").nth(1)` numbers.
    Second,
}

/// Scalar statistics of one numeric series. Pure function of the series.
///
/// Moments that are undefined for the series length (variance below n=2,
/// skewness below n=3, kurtosis below n=4) are stored as NaN and rendered
/// as `undefined` by the report layer.
#[derive(Debug, Clone)]
pub struct StatisticalSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub range: f64,
    pub iqr: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot read zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("archive contains no CSV entry")]
    NoCsvEntry,
    #[error("cannot parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("expected column `{0}` is missing")]
    MissingColumn(&'static str),
    #[error("row {row}: cannot parse `{field}` value {value:?} as a number")]
    BadField {
        row: usize,
        field: &'static str,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("not enough data: {0}")]
    InsufficientData(String),
    #[error("chart rendering failed: {0}")]
    Chart(String),
    #[error("report output failed: {0}")]
    Io(#[from] std::io::Error),
}
