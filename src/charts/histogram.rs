//! Histograms over numeric bins, optionally with a density curve.

use std::path::Path;

use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use crate::charts::{BACKGROUND, FONT, chart_err, empty_chart, font_size, headroom, palette_color};
use crate::config::ChartStyle;
use crate::error::{Result, SurveyError};
use crate::stats::gaussian_kde;

/// Points on the density curve
const KDE_POINTS: usize = 200;

fn check_bins(edges: &[f64], counts: &[usize]) -> Result<()> {
    if edges.len() != counts.len() + 1 {
        return Err(SurveyError::LengthMismatch {
            expected: counts.len() + 1,
            actual: edges.len(),
        });
    }
    Ok(())
}

type HistogramContext<'a, 'b> =
    ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn draw_bins(
    chart: &mut HistogramContext<'_, '_>,
    edges: &[f64],
    counts: &[usize],
    color: RGBColor,
) -> Result<()> {
    chart
        .draw_series(edges.windows(2).zip(counts).map(|(edge, count)| {
            Rectangle::new([(edge[0], 0.0), (edge[1], *count as f64)], color.mix(0.8).filled())
        }))
        .map_err(chart_err)?;
    chart
        .draw_series(edges.windows(2).zip(counts).map(|(edge, count)| {
            Rectangle::new([(edge[0], 0.0), (edge[1], *count as f64)], WHITE.stroke_width(1))
        }))
        .map_err(chart_err)?;
    Ok(())
}

fn build<'a, 'b>(
    root: &'a DrawingArea<SVGBackend<'b>, Shift>,
    title: &str,
    edges: &[f64],
    y_max: f64,
    x_desc: &str,
    y_desc: &str,
    style: &ChartStyle,
) -> Result<HistogramContext<'a, 'b>> {
    let x_min = edges[0];
    let x_max = edges[edges.len() - 1];

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, font_size(style) + 4.0))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0f64..headroom(y_max))
        .map_err(chart_err)?;

    chart.plotting_area().fill(&BACKGROUND).map_err(chart_err)?;
    chart
        .configure_mesh()
        .bold_line_style(WHITE)
        .light_line_style(BACKGROUND)
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style((FONT, font_size(style)))
        .axis_desc_style((FONT, font_size(style)))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()
        .map_err(chart_err)?;

    Ok(chart)
}

/// Histogram of pre-binned counts
///
/// `edges` has one more entry than `counts`. No counts gives an empty chart.
pub fn histogram_chart(
    path: &Path,
    title: &str,
    edges: &[f64],
    counts: &[usize],
    x_desc: &str,
    style: &ChartStyle,
) -> Result<()> {
    if counts.is_empty() {
        return empty_chart(path, title, style);
    }
    check_bins(edges, counts)?;

    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let y_max = counts.iter().copied().max().unwrap_or(0) as f64;
    let mut chart = build(&root, title, edges, y_max, x_desc, "Number of respondents", style)?;
    draw_bins(&mut chart, edges, counts, RGBColor(128, 0, 128))?;

    root.present().map_err(chart_err)?;
    log::debug!("Wrote histogram {}", path.display());
    Ok(())
}

/// Histogram of pre-binned counts overlaid with a Gaussian KDE of `values`
///
/// The density is scaled by `n * bin width` so that it follows the bars.
pub fn histogram_kde_chart(
    path: &Path,
    title: &str,
    edges: &[f64],
    counts: &[usize],
    values: &[f64],
    x_desc: &str,
    style: &ChartStyle,
) -> Result<()> {
    if counts.is_empty() || values.is_empty() {
        return empty_chart(path, title, style);
    }
    check_bins(edges, counts)?;

    let x_min = edges[0];
    let x_max = edges[edges.len() - 1];
    let bin_width = (x_max - x_min) / counts.len() as f64;
    let scale = values.len() as f64 * bin_width;

    let grid: Vec<f64> = (0..KDE_POINTS)
        .map(|i| x_min + (x_max - x_min) * i as f64 / (KDE_POINTS - 1) as f64)
        .collect();
    let curve: Vec<(f64, f64)> = grid
        .iter()
        .copied()
        .zip(gaussian_kde(values, &grid))
        .map(|(x, d)| (x, d * scale))
        .collect();

    let count_max = counts.iter().copied().max().unwrap_or(0) as f64;
    let curve_max = curve.iter().map(|(_, y)| *y).fold(0.0, f64::max);

    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let color = palette_color(0);
    let mut chart = build(&root, title, edges, count_max.max(curve_max), x_desc, "Count", style)?;
    draw_bins(&mut chart, edges, counts, color)?;
    chart
        .draw_series(LineSeries::new(curve, color.stroke_width(2)))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    log::debug!("Wrote histogram with density {}", path.display());
    Ok(())
}
