// Descriptive statistics over a numeric series. All reductions follow the
// sample-based conventions (ddof = 1, adjusted moment estimators) so the
// numbers line up with the notebook this tool replaced.
use crate::model::{AnalysisError, StatisticalSummary};

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn median(values: &[f64]) -> f64 {
    let sorted = sorted(values);
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Most frequent value. Ties resolve to the smallest modal value.
pub fn mode(values: &[f64]) -> f64 {
    let sorted = sorted(values);
    let mut best = sorted[0];
    let mut best_count = 0usize;
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i + 1;
        while j < sorted.len() && sorted[j] == sorted[i] {
            j += 1;
        }
        if j - i > best_count {
            best_count = j - i;
            best = sorted[i];
        }
        i = j;
    }
    best
}

/// Sample variance (ddof = 1). NaN for series shorter than 2.
pub fn variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Quantile with linear interpolation between order statistics
/// (the R type-7 estimator, pandas' default).
pub fn quantile(values: &[f64], q: f64) -> f64 {
    let sorted = sorted(values);
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let frac = h - lo as f64;
    if frac == 0.0 {
        sorted[lo]
    } else {
        sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
    }
}

pub fn range(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    max - min
}

pub fn interquartile_range(values: &[f64]) -> f64 {
    quantile(values, 0.75) - quantile(values, 0.25)
}

/// Adjusted Fisher-Pearson skewness. NaN below n = 3 or for a constant
/// series.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n < 3.0 {
        return f64::NAN;
    }
    let m = mean(values);
    let s = std_dev(values);
    if s == 0.0 {
        return f64::NAN;
    }
    let m3: f64 = values.iter().map(|v| ((v - m) / s).powi(3)).sum();
    n / ((n - 1.0) * (n - 2.0)) * m3
}

/// Unbiased excess kurtosis. NaN below n = 4 or for a constant series.
pub fn kurtosis(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n < 4.0 {
        return f64::NAN;
    }
    let m = mean(values);
    let s = std_dev(values);
    if s == 0.0 {
        return f64::NAN;
    }
    let m4: f64 = values.iter().map(|v| ((v - m) / s).powi(4)).sum();
    n * (n + 1.0) / ((n - 1.0) * (n - 2.0) * (n - 3.0)) * m4
        - 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0))
}

/// Computes the full summary for a series. An empty series cannot be
/// summarized and is reported as insufficient data.
pub fn summarize(values: &[f64]) -> Result<StatisticalSummary, AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "cannot summarize an empty series".into(),
        ));
    }
    Ok(StatisticalSummary {
        count: values.len(),
        mean: mean(values),
        median: median(values),
        mode: mode(values),
        variance: variance(values),
        std_dev: std_dev(values),
        range: range(values),
        iqr: interquartile_range(values),
        skewness: skewness(values),
        kurtosis: kurtosis(values),
    })
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    v
}
