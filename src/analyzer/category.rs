// Category frequency analysis: ranking, popularity ratio, chart sampling.
use crate::model::{AnalysisError, Dataset};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use std::collections::HashMap;

/// Frequency table of category labels, ordered by descending count.
/// Ties keep the order in which the categories first appeared in the data.
pub struct CategoryAnalysis {
    frequencies: Vec<(String, u64)>,
}

impl CategoryAnalysis {
    pub fn run(data: &Dataset) -> Result<Self, AnalysisError> {
        if data.is_empty() {
            return Err(AnalysisError::InsufficientData(
                "dataset has no rows".into(),
            ));
        }

        let mut counts: HashMap<&str, u64> = HashMap::new();
        let mut first_seen: Vec<&str> = Vec::new();
        for listing in &data.listings {
            let entry = counts.entry(listing.category.as_str()).or_insert(0);
            if *entry == 0 {
                first_seen.push(listing.category.as_str());
            }
            *entry += 1;
        }

        // Stable sort keeps first-seen order among equal counts.
        let mut frequencies: Vec<(String, u64)> = first_seen
            .into_iter()
            .map(|c| (c.to_string(), counts[c]))
            .collect();
        frequencies.sort_by_key(|(_, count)| std::cmp::Reverse(*count));

        Ok(Self { frequencies })
    }

    pub fn frequencies(&self) -> &[(String, u64)] {
        &self.frequencies
    }

    pub fn top(&self) -> &(String, u64) {
        &self.frequencies[0]
    }

    pub fn top_five(&self) -> impl Iterator<Item = &(String, u64)> {
        self.frequencies.iter().take(5)
    }

    /// How many times more frequent the top category is than the runner-up.
    /// Always >= 1 since the table is ranked descending.
    pub fn popularity_ratio(&self) -> Result<f64, AnalysisError> {
        if self.frequencies.len() < 2 {
            return Err(AnalysisError::InsufficientData(
                "popularity ratio needs at least 2 distinct categories".into(),
            ));
        }
        Ok(self.frequencies[0].1 as f64 / self.frequencies[1].1 as f64)
    }

    /// Draws `n` categories without replacement from everything except the
    /// top one. The top category is excluded to keep the charts readable.
    pub fn sample_rest(&self, n: usize, seed: u64) -> Result<Vec<(String, u64)>, AnalysisError> {
        let rest = &self.frequencies[1..];
        if rest.len() < n {
            return Err(AnalysisError::InsufficientData(format!(
                "need {n} categories to sample, only {} remain after excluding the top one",
                rest.len()
            )));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(sample(&mut rng, rest.len(), n)
            .iter()
            .map(|i| rest[i].clone())
            .collect())
    }
}
