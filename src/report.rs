// Report assembly: fixed-precision markdown narrative per analysis stage,
// pushed through a ReportSink so the pipeline never talks to a display
// directly.
use crate::model::{AnalysisError, StatisticalSummary};
use chrono::Utc;
use std::io::Write;
use std::path::Path;

/// Output channel for the assembled report.
pub trait ReportSink {
    fn section(&mut self, markdown: &str) -> Result<(), AnalysisError>;
    fn chart(&mut self, path: &Path) -> Result<(), AnalysisError>;
}

/// Prints the report to stdout and mirrors it into `report.md` under the
/// save directory, with chart references as markdown images.
pub struct ConsoleSink {
    report: std::fs::File,
}

impl ConsoleSink {
    pub fn create(save_dir: &Path) -> Result<Self, AnalysisError> {
        let mut report = std::fs::File::create(save_dir.join("report.md"))?;
        writeln!(
            report,
            "# Product listings EDA\n\nGenerated {}\n",
            Utc::now().format("%Y-%m-%d %H:%M UTC")
        )?;
        Ok(Self { report })
    }
}

impl ReportSink for ConsoleSink {
    fn section(&mut self, markdown: &str) -> Result<(), AnalysisError> {
        println!("{markdown}\n");
        writeln!(self.report, "{markdown}\n")?;
        Ok(())
    }

    fn chart(&mut self, path: &Path) -> Result<(), AnalysisError> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("chart");
        writeln!(self.report, "![{name}]({})\n", path.display())?;
        Ok(())
    }
}

/// Fixed-precision figure, with an explicit marker instead of `NaN`/`inf`
/// leaking into the narrative.
pub fn fmt_stat(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        "undefined".to_string()
    }
}

pub fn top_five_section<'a>(top_five: impl Iterator<Item = &'a (String, u64)>) -> String {
    let mut text = String::from("# Part 1: Product category distribution\n\nTop 5 most frequent categories are:\n");
    for (label, count) in top_five {
        text.push_str(&format!("- {label} ({count} listings)\n"));
    }
    text
}

pub fn category_section(top: &str, ratio: f64, sample_size: usize) -> String {
    format!(
        "Samples of {sample_size} random categories visualized as bar and pie charts are below.\n\
         The most frequent category is *{top}* and it's *{}* times more popular than the next one.\n\
         To make visualizations readable, we exclude it from sampling.",
        fmt_stat(ratio, 1)
    )
}

pub fn central_tendency_section(
    noun: &str,
    s: &StatisticalSummary,
    mode_decimals: usize,
    with_mode_gap: bool,
) -> String {
    let mut text = format!(
        "## 1. Central tendency\n\n\
         Average {noun} of products is *{}*, median {noun} is *{}*, and mode {noun} is *{}*.",
        fmt_stat(s.mean, 2),
        fmt_stat(s.median, 2),
        fmt_stat(s.mode, mode_decimals)
    );
    if with_mode_gap {
        text.push_str(&format!(
            "\nAverage {noun} is higher than the most frequent {noun} in the dataset by *{}*.",
            fmt_stat(s.mean - s.mode, 2)
        ));
    }
    text
}

pub fn dispersion_section(noun: &str, s: &StatisticalSummary) -> String {
    format!(
        "## 2. Dispersion\n\n\
         Spread of {noun}s is *{}*. Variance and standard deviation are *{}* and *{}* \
         correspondingly, comparing with a sample mean of {}.\n\
         The interquartile range is *{}*.",
        fmt_stat(s.range, 2),
        fmt_stat(s.variance, 2),
        fmt_stat(s.std_dev, 2),
        fmt_stat(s.mean, 2),
        fmt_stat(s.iqr, 2)
    )
}

pub fn shape_section(noun: &str, s: &StatisticalSummary) -> String {
    format!(
        "## 3. Shape of distribution\n\n\
         Skewness of {noun}s is *{}* and kurtosis is *{}*.\n\
         Negative skewness means the left tail is longer than the right one; \
         positive kurtosis means heavier tails and a sharper peak than the normal distribution.",
        fmt_stat(s.skewness, 2),
        fmt_stat(s.kurtosis, 2)
    )
}

pub fn results_section(
    top_category: &str,
    price: &StatisticalSummary,
    rating: &StatisticalSummary,
) -> String {
    format!(
        "# Results\n\n\
         - Category *{top_category}* dominates over the rest.\n\
         - Prices spread across *{}* with half of them within an interquartile range of *{}*.\n\
         - Ratings average *{}* with a median of *{}*; most users rate products 4-5 stars.",
        fmt_stat(price.range, 2),
        fmt_stat(price.iqr, 2),
        fmt_stat(rating.mean, 2),
        fmt_stat(rating.median, 2)
    )
}

/// Collects sections in memory. Lets the pipeline run in tests without a
/// display or filesystem.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    pub sections: Vec<String>,
    pub charts: Vec<std::path::PathBuf>,
}

#[cfg(test)]
impl ReportSink for MemorySink {
    fn section(&mut self, markdown: &str) -> Result<(), AnalysisError> {
        self.sections.push(markdown.to_string());
        Ok(())
    }

    fn chart(&mut self, path: &Path) -> Result<(), AnalysisError> {
        self.charts.push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::stats;

    #[test]
    fn known_fixture_renders_exact_figures() {
        let s = stats::summarize(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let text = central_tendency_section("value", &s, 2, false);
        assert!(text.contains("*3.00*"), "mean/median missing: {text}");
        let text = dispersion_section("value", &s);
        assert!(text.contains("*1.58*"), "std missing: {text}");
        assert!(text.contains("*4.00*"), "range missing: {text}");
    }

    #[test]
    fn price_mode_uses_five_decimals() {
        let s = stats::summarize(&[9.99, 9.99, 20.0]).unwrap();
        let text = central_tendency_section("price", &s, 5, true);
        assert!(text.contains("*9.99000*"));
    }

    #[test]
    fn price_mode_gap_is_always_reported() {
        // Mode above the mean still gets the gap line, as the notebook
        // prints it unconditionally.
        let s = stats::summarize(&[100.0, 100.0, 1.0]).unwrap();
        let text = central_tendency_section("price", &s, 5, true);
        assert!(text.contains("most frequent price"));
        assert!(text.contains("*-33.00*"), "gap missing: {text}");

        let without = central_tendency_section("rating", &s, 2, false);
        assert!(!without.contains("most frequent"));
    }

    #[test]
    fn undefined_moments_do_not_leak_nan() {
        let s = stats::summarize(&[42.0]).unwrap();
        let disp = dispersion_section("price", &s);
        assert!(disp.contains("*undefined*"));
        assert!(!disp.contains("NaN"));
        let shape = shape_section("price", &s);
        assert!(shape.contains("*undefined*"));
    }

    #[test]
    fn category_section_mentions_top_and_ratio() {
        let text = category_section("Sports & Outdoors", 3.25, 20);
        assert!(text.contains("*Sports & Outdoors*"));
        assert!(text.contains("*3.2*"));
    }

    #[test]
    fn memory_sink_collects_everything() {
        let mut sink = MemorySink::default();
        sink.section("hello").unwrap();
        sink.chart(Path::new("charts/prices.png")).unwrap();
        assert_eq!(sink.sections, vec!["hello".to_string()]);
        assert_eq!(sink.charts.len(), 1);
    }
}
