// Price distribution analysis over the per-product price series.
use crate::analyzer::{select_per_asin, stats};
use crate::model::{AnalysisError, Dataset, DedupPolicy, StatisticalSummary};

pub struct PriceAnalysis {
    pub series: Vec<f64>,
    pub summary: StatisticalSummary,
}

impl PriceAnalysis {
    /// Derives one price per product (per the de-dup policy) and summarizes
    /// the resulting series.
    pub fn run(data: &Dataset, policy: DedupPolicy) -> Result<Self, AnalysisError> {
        let series: Vec<f64> = select_per_asin(&data.listings, policy)
            .iter()
            .map(|l| l.price)
            .collect();
        let summary = stats::summarize(&series)?;
        Ok(Self { series, summary })
    }

    /// `log10(price + 1)` series for the boxplot. The +1 offset keeps
    /// zero-priced listings out of `log(0)`.
    pub fn log_series(&self) -> Vec<f64> {
        self.series.iter().map(|p| (p + 1.0).log10()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Listing;

    fn listing(asin: &str, price: f64) -> Listing {
        Listing {
            asin: asin.to_string(),
            title: String::new(),
            category: "c".to_string(),
            price,
            stars: 4.0,
        }
    }

    #[test]
    fn summarizes_the_deduplicated_series() {
        let data = Dataset {
            listings: vec![
                listing("a", 10.0),
                listing("a", 999.0),
                listing("b", 20.0),
                listing("c", 30.0),
                listing("d", 1000.0),
            ],
        };
        let analysis = PriceAnalysis::run(&data, DedupPolicy::First).unwrap();
        assert_eq!(analysis.series, vec![10.0, 20.0, 30.0, 1000.0]);
        let s = &analysis.summary;
        assert!((s.mean - 265.0).abs() < 1e-9);
        assert!((s.range - 990.0).abs() < 1e-9);
        assert!((s.iqr - 255.0).abs() < 1e-9);
        assert!(s.range >= s.iqr && s.iqr >= 0.0);
    }

    #[test]
    fn second_occurrence_policy_matches_the_notebook() {
        let data = Dataset {
            listings: vec![
                listing("a", 10.0),
                listing("a", 999.0),
                listing("b", 20.0),
                listing("c", 30.0),
            ],
        };
        let analysis = PriceAnalysis::run(&data, DedupPolicy::Second).unwrap();
        // Only "a" has a second row; "b" and "c" are dropped.
        assert_eq!(analysis.series, vec![999.0]);
        assert_eq!(analysis.summary.count, 1);
        assert!(analysis.summary.variance.is_nan());
    }

    #[test]
    fn empty_series_aborts() {
        let data = Dataset { listings: vec![listing("a", 5.0)] };
        assert!(matches!(
            PriceAnalysis::run(&data, DedupPolicy::Second),
            Err(AnalysisError::InsufficientData(_))
        ));
    }

    #[test]
    fn log_series_offsets_zero_prices() {
        let data = Dataset {
            listings: vec![listing("a", 0.0), listing("b", 99.0)],
        };
        let analysis = PriceAnalysis::run(&data, DedupPolicy::First).unwrap();
        let logs = analysis.log_series();
        assert_eq!(logs[0], 0.0);
        assert!((logs[1] - 2.0).abs() < 1e-9);
    }
}
