mod analyzer;
mod chart;
mod config;
mod loader;
mod model;
mod report;

use analyzer::{CategoryAnalysis, PriceAnalysis, RatingAnalysis};
use clap::Parser;
use config::{AppConfig, Cli};
use report::{ConsoleSink, ReportSink};
use std::fs;
use tracing::{error, info};

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match AppConfig::resolve(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        error!("Analysis aborted: {e}");
        std::process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(&config.save_dir)?;
    let dataset = loader::load_dataset(&config.dataset_path)?;
    let mut sink = ConsoleSink::create(&config.save_dir)?;

    // Part 1: category distribution
    info!("Analyzing category frequencies...");
    let categories = CategoryAnalysis::run(&dataset)?;
    info!("Found {} distinct categories", categories.frequencies().len());
    sink.section(&report::top_five_section(categories.top_five()))?;
    let ratio = categories.popularity_ratio()?;
    sink.section(&report::category_section(
        &categories.top().0,
        ratio,
        config.sample_size,
    ))?;
    let sampled = categories.sample_rest(config.sample_size, config.seed)?;
    let path = chart::bar_chart(
        &config.save_dir,
        "categories_bar",
        "Listings per sampled category",
        &sampled,
    )?;
    sink.chart(&path)?;
    let path = chart::pie_chart(
        &config.save_dir,
        "categories_pie",
        "Sampled category share",
        &sampled,
    )?;
    sink.chart(&path)?;

    // Part 2: prices
    info!("Analyzing price distribution...");
    let prices = PriceAnalysis::run(&dataset, config.dedup)?;
    sink.section("# Part 2: Prices distribution")?;
    sink.section(&report::central_tendency_section("price", &prices.summary, 5, true))?;
    sink.section(&report::dispersion_section("price", &prices.summary))?;
    let path = chart::histogram(
        &config.save_dir,
        "prices_hist",
        "Price distribution",
        &prices.series,
        config.price_bins,
        false,
    )?;
    sink.chart(&path)?;
    let path = chart::histogram(
        &config.save_dir,
        "prices_hist_log",
        "Price distribution (log y)",
        &prices.series,
        config.price_bins,
        true,
    )?;
    sink.chart(&path)?;
    let path = chart::boxplot(
        &config.save_dir,
        "prices_box",
        "log10(price + 1)",
        "price",
        &prices.log_series(),
    )?;
    sink.chart(&path)?;

    // Part 3: ratings
    info!("Analyzing rating distribution...");
    let ratings = RatingAnalysis::run(&dataset, config.dedup)?;
    sink.section("# Part 3: Ratings")?;
    sink.section(&report::central_tendency_section("rating", &ratings.summary, 2, false))?;
    sink.section(&report::dispersion_section("rating", &ratings.summary))?;
    sink.section(&report::shape_section("rating", &ratings.summary))?;
    let path = chart::histogram(
        &config.save_dir,
        "ratings_hist",
        "Rating distribution",
        &ratings.series,
        config.rating_bins,
        false,
    )?;
    sink.chart(&path)?;

    sink.section(&report::results_section(
        &categories.top().0,
        &prices.summary,
        &ratings.summary,
    ))?;

    info!("Report written to {}", config.save_dir.join("report.md").display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dataset, DedupPolicy, Listing};
    use crate::report::MemorySink;

    fn listing(asin: &str, category: &str, price: f64, stars: f64) -> Listing {
        Listing {
            asin: asin.to_string(),
            title: String::new(),
            category: category.to_string(),
            price,
            stars,
        }
    }

    #[test]
    fn stages_feed_the_sink_in_report_order() {
        let mut listings = Vec::new();
        for i in 0..40 {
            let category = if i < 10 { "Sports".to_string() } else { format!("cat{i}") };
            listings.push(listing(&format!("B{i:03}"), &category, 10.0 + i as f64, 4.0));
        }
        listings.push(listing("B000", "Sports", 5.0, 0.0));
        let dataset = Dataset { listings };

        let mut sink = MemorySink::default();
        let categories = CategoryAnalysis::run(&dataset).unwrap();
        sink.section(&report::top_five_section(categories.top_five()))
            .unwrap();
        let ratio = categories.popularity_ratio().unwrap();
        sink.section(&report::category_section(&categories.top().0, ratio, 20))
            .unwrap();
        let sampled = categories.sample_rest(20, 42).unwrap();
        assert_eq!(sampled, categories.sample_rest(20, 42).unwrap());

        let prices = PriceAnalysis::run(&dataset, DedupPolicy::First).unwrap();
        sink.section(&report::central_tendency_section("price", &prices.summary, 5, true))
            .unwrap();
        sink.section(&report::dispersion_section("price", &prices.summary))
            .unwrap();

        let ratings = RatingAnalysis::run(&dataset, DedupPolicy::First).unwrap();
        sink.section(&report::central_tendency_section("rating", &ratings.summary, 2, false))
            .unwrap();
        sink.section(&report::shape_section("rating", &ratings.summary))
            .unwrap();

        assert_eq!(sink.sections.len(), 6);
        assert!(sink.sections[0].contains("Sports"));
        assert!(sink.sections[1].contains("*11.0*"));
        // The zero-star row for B000 is ignored; every rating is 4.0.
        assert!((ratings.summary.mean - 4.0).abs() < 1e-9);
        assert!(sink.sections[4].contains("*4.00*"));
    }
}
