// Analyzer module: aggregates the three analysis stages and their shared
// statistical reductions.

pub mod category;
pub mod price;
pub mod rating;
pub mod stats;

pub use category::CategoryAnalysis;
pub use price::PriceAnalysis;
pub use rating::RatingAnalysis;

use crate::model::{DedupPolicy, Listing};
use std::collections::HashMap;

/// Picks one representative row per asin, in dataset order.
///
/// `Second` keeps the second row seen for each asin and drops asins that
/// only appear once; `First` keeps the first row of every asin.
pub fn select_per_asin<'a>(listings: &'a [Listing], policy: DedupPolicy) -> Vec<&'a Listing> {
    let wanted = match policy {
        DedupPolicy::First => 0usize,
        DedupPolicy::Second => 1,
    };
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut selected = Vec::new();
    for listing in listings {
        let occurrence = seen.entry(listing.asin.as_str()).or_insert(0);
        if *occurrence == wanted {
            selected.push(listing);
        }
        *occurrence += 1;
    }
    selected
}
