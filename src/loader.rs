// Dataset ingestion: zip-wrapped CSV of product listings.
use crate::model::{Dataset, Listing, LoadError};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

const REQUIRED_COLUMNS: [&str; 4] = ["asin", "category", "price", "stars"];

/// Loads the listings table from `path`. A `.zip` archive is expected to
/// contain the CSV as its first `.csv` entry; a bare `.csv` path is read
/// directly. Any io, archive, parse, or schema problem is fatal.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let text = if ext == "zip" {
        read_zipped_csv(path)?
    } else {
        std::fs::read_to_string(path)?
    };

    let dataset = parse_csv(&text)?;
    info!("Loaded {} listing rows from {}", dataset.len(), path.display());
    Ok(dataset)
}

fn read_zipped_csv(path: &Path) -> Result<String, LoadError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    let entry_index = (0..archive.len())
        .find(|&i| {
            archive
                .by_index_raw(i)
                .map(|e| e.name().to_lowercase().ends_with(".csv"))
                .unwrap_or(false)
        })
        .ok_or(LoadError::NoCsvEntry)?;

    let mut entry = archive.by_index(entry_index)?;
    let mut text = String::with_capacity(entry.size() as usize);
    entry.read_to_string(&mut text)?;
    Ok(text)
}

fn parse_csv(text: &str) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let asin_idx = column(REQUIRED_COLUMNS[0])?;
    let category_idx = column(REQUIRED_COLUMNS[1])?;
    let price_idx = column(REQUIRED_COLUMNS[2])?;
    let stars_idx = column(REQUIRED_COLUMNS[3])?;
    let title_idx = headers.iter().position(|h| h.trim() == "title");

    let mut listings = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();
        let numeric = |idx: usize, name: &'static str| -> Result<f64, LoadError> {
            field(idx).parse::<f64>().map_err(|_| LoadError::BadField {
                row: row + 1,
                field: name,
                value: field(idx).to_string(),
            })
        };

        listings.push(Listing {
            asin: field(asin_idx).to_string(),
            title: title_idx.map(|i| field(i).to_string()).unwrap_or_default(),
            category: field(category_idx).to_string(),
            price: numeric(price_idx, "price")?,
            stars: numeric(stars_idx, "stars")?,
        });
    }

    Ok(Dataset { listings })
}
