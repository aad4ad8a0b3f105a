// Rating distribution analysis. Zero-star rows mean "not yet rated" and
// are dropped before the per-asin selection, so an unrated second row does
// not shadow a rated one.
use crate::analyzer::{select_per_asin, stats};
use crate::model::{AnalysisError, Dataset, DedupPolicy, StatisticalSummary};

pub struct RatingAnalysis {
    pub series: Vec<f64>,
    pub summary: StatisticalSummary,
}

impl RatingAnalysis {
    pub fn run(data: &Dataset, policy: DedupPolicy) -> Result<Self, AnalysisError> {
        let rated: Vec<_> = data
            .listings
            .iter()
            .filter(|l| l.stars != 0.0)
            .cloned()
            .collect();
        let series: Vec<f64> = select_per_asin(&rated, policy)
            .iter()
            .map(|l| l.stars)
            .collect();
        let summary = stats::summarize(&series)?;
        Ok(Self { series, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Listing;

    fn listing(asin: &str, stars: f64) -> Listing {
        Listing {
            asin: asin.to_string(),
            title: String::new(),
            category: "c".to_string(),
            price: 1.0,
            stars,
        }
    }

    #[test]
    fn zero_star_rows_are_excluded() {
        let data = Dataset {
            listings: vec![
                listing("a", 0.0),
                listing("b", 4.0),
                listing("c", 5.0),
                listing("d", 5.0),
                listing("e", 1.0),
            ],
        };
        let analysis = RatingAnalysis::run(&data, DedupPolicy::First).unwrap();
        assert_eq!(analysis.series, vec![4.0, 5.0, 5.0, 1.0]);
        assert!((analysis.summary.mean - 3.75).abs() < 1e-9);
        assert_eq!(analysis.summary.mode, 5.0);
    }

    #[test]
    fn filtering_never_grows_the_series() {
        let data = Dataset {
            listings: vec![
                listing("a", 0.0),
                listing("a", 4.5),
                listing("b", 3.0),
                listing("b", 0.0),
            ],
        };
        let unfiltered = select_per_asin(&data.listings, DedupPolicy::First).len();
        let analysis = RatingAnalysis::run(&data, DedupPolicy::First).unwrap();
        assert!(analysis.series.len() <= unfiltered);
        // The rated rows survive even where the asin's first row was unrated.
        assert_eq!(analysis.series, vec![4.5, 3.0]);
    }

    #[test]
    fn all_unrated_is_insufficient() {
        let data = Dataset {
            listings: vec![listing("a", 0.0), listing("b", 0.0)],
        };
        assert!(matches!(
            RatingAnalysis::run(&data, DedupPolicy::First),
            Err(AnalysisError::InsufficientData(_))
        ));
    }

    #[test]
    fn shape_moments_are_computed() {
        let stars = [5.0, 5.0, 5.0, 4.0, 4.0, 5.0, 1.0, 2.0, 5.0, 4.0];
        let data = Dataset {
            listings: stars
                .iter()
                .enumerate()
                .map(|(i, &s)| listing(&format!("p{i}"), s))
                .collect(),
        };
        let analysis = RatingAnalysis::run(&data, DedupPolicy::First).unwrap();
        // Ratings pile up at 4-5 with a long left tail.
        assert!(analysis.summary.skewness < 0.0);
        assert!(analysis.summary.kurtosis.is_finite());
    }
}
