// Chart rendering via plotters. Every function writes one PNG and returns
// the path it wrote so the report can reference it. Drawing objects borrow
// the output path, so each render happens in an inner scope that ends
// before the path is handed back.
use crate::model::AnalysisError;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

const CHART_SIZE: (u32, u32) = (1024, 768);
const PIE_SIZE: (u32, u32) = (800, 800);

fn chart_err<E: std::fmt::Display>(e: E) -> AnalysisError {
    AnalysisError::Chart(e.to_string())
}

/// Keeps long category labels from overlapping on the axes.
fn truncate(label: &str) -> String {
    if label.chars().count() <= 18 {
        label.to_string()
    } else {
        let head: String = label.chars().take(17).collect();
        format!("{head}…")
    }
}

pub fn bar_chart(
    dir: &Path,
    name: &str,
    title: &str,
    entries: &[(String, u64)],
) -> Result<PathBuf, AnalysisError> {
    let path = dir.join(format!("{name}.png"));
    {
        let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let peak = entries.iter().map(|(_, c)| *c).max().unwrap_or(1);
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(10)
            .x_label_area_size(140)
            .y_label_area_size(60)
            .build_cartesian_2d(0i32..entries.len() as i32, 0u64..peak + peak / 10 + 1)
            .map_err(chart_err)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(entries.len())
            .x_label_formatter(&|i| {
                entries
                    .get(*i as usize)
                    .map(|(label, _)| truncate(label))
                    .unwrap_or_default()
            })
            .y_desc("listings")
            .draw()
            .map_err(chart_err)?;
        chart
            .draw_series(entries.iter().enumerate().map(|(i, (_, count))| {
                Rectangle::new([(i as i32, 0), (i as i32 + 1, *count)], BLUE.filled())
            }))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }
    info!("Saved chart: {}", path.display());
    Ok(path)
}

pub fn pie_chart(
    dir: &Path,
    name: &str,
    title: &str,
    entries: &[(String, u64)],
) -> Result<PathBuf, AnalysisError> {
    let path = dir.join(format!("{name}.png"));
    {
        let root = BitMapBackend::new(&path, PIE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;
        let root = root.titled(title, ("sans-serif", 28)).map_err(chart_err)?;

        let sizes: Vec<f64> = entries.iter().map(|(_, c)| *c as f64).collect();
        let labels: Vec<String> = entries.iter().map(|(label, _)| truncate(label)).collect();
        let palette_len = <Palette99 as Palette>::COLORS.len();
        let colors: Vec<RGBColor> = (0..entries.len())
            .map(|i| {
                let (r, g, b) = <Palette99 as Palette>::COLORS[i % palette_len];
                RGBColor(r, g, b)
            })
            .collect();

        let center = (PIE_SIZE.0 as i32 / 2, PIE_SIZE.1 as i32 / 2);
        let radius = PIE_SIZE.0 as f64 / 3.0;
        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 14).into_font());
        root.draw(&pie).map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }
    info!("Saved chart: {}", path.display());
    Ok(path)
}

pub fn histogram(
    dir: &Path,
    name: &str,
    title: &str,
    values: &[f64],
    bins: usize,
    log_y: bool,
) -> Result<PathBuf, AnalysisError> {
    if values.is_empty() || bins == 0 {
        return Err(AnalysisError::InsufficientData(
            "nothing to draw a histogram from".into(),
        ));
    }
    let path = dir.join(format!("{name}.png"));
    {
        let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let width = ((max - min) / bins as f64).max(f64::EPSILON);
        let mut counts = vec![0u64; bins];
        for &v in values {
            let idx = (((v - min) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        let peak = counts.iter().copied().max().unwrap_or(1).max(1) as f64;
        let bars = counts.iter().enumerate().filter(|&(_, &c)| c > 0);

        if log_y {
            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 28))
                .margin(10)
                .x_label_area_size(50)
                .y_label_area_size(70)
                .build_cartesian_2d(min..max, (1.0..peak * 1.2).log_scale())
                .map_err(chart_err)?;
            chart
                .configure_mesh()
                .y_desc("count (log)")
                .draw()
                .map_err(chart_err)?;
            chart
                .draw_series(bars.map(|(i, &c)| {
                    let x0 = min + i as f64 * width;
                    Rectangle::new([(x0, 1.0), (x0 + width, c as f64)], BLUE.filled())
                }))
                .map_err(chart_err)?;
        } else {
            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 28))
                .margin(10)
                .x_label_area_size(50)
                .y_label_area_size(70)
                .build_cartesian_2d(min..max, 0.0..peak * 1.1)
                .map_err(chart_err)?;
            chart
                .configure_mesh()
                .y_desc("count")
                .draw()
                .map_err(chart_err)?;
            chart
                .draw_series(bars.map(|(i, &c)| {
                    let x0 = min + i as f64 * width;
                    Rectangle::new([(x0, 0.0), (x0 + width, c as f64)], BLUE.filled())
                }))
                .map_err(chart_err)?;
        }

        root.present().map_err(chart_err)?;
    }
    info!("Saved chart: {}", path.display());
    Ok(path)
}

pub fn boxplot(
    dir: &Path,
    name: &str,
    title: &str,
    axis_label: &str,
    values: &[f64],
) -> Result<PathBuf, AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "nothing to draw a boxplot from".into(),
        ));
    }
    let path = dir.join(format!("{name}.png"));
    {
        let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let quartiles = Quartiles::new(values);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min) as f32;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max) as f32;
        let pad = ((max - min) * 0.1).max(0.1);

        let keys = [axis_label];
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(keys[..].into_segmented(), min - pad..max + pad)
            .map_err(chart_err)?;
        chart.configure_mesh().draw().map_err(chart_err)?;
        chart
            .draw_series(std::iter::once(
                Boxplot::new_vertical(SegmentValue::CenterOf(&axis_label), &quartiles).width(120),
            ))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }
    info!("Saved chart: {}", path.display());
    Ok(path)
}
