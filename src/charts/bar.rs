//! Categorical bar charts.

use std::path::Path;

use plotters::prelude::*;

use crate::charts::{
    BACKGROUND, FONT, chart_err, empty_chart, font_size, headroom, label_area, palette_color,
};
use crate::config::ChartStyle;
use crate::error::{Result, SurveyError};

/// Longest category label drawn before truncation
const MAX_LABEL_CHARS: usize = 60;

fn shorten(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut short: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    short.push('…');
    short
}

fn check_lengths(labels: &[String], values: &[f64]) -> Result<()> {
    if labels.len() != values.len() {
        return Err(SurveyError::LengthMismatch {
            expected: labels.len(),
            actual: values.len(),
        });
    }
    Ok(())
}

/// Vertical bars, one per category, labels rotated under the axis
pub fn bar_chart(
    path: &Path,
    title: &str,
    labels: &[String],
    values: &[f64],
    y_desc: &str,
    style: &ChartStyle,
) -> Result<()> {
    check_lengths(labels, values)?;
    if labels.is_empty() {
        return empty_chart(path, title, style);
    }

    let n = labels.len();
    let max = values.iter().copied().fold(0.0, f64::max);
    let shortened: Vec<String> = labels.iter().map(|l| shorten(l)).collect();

    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, font_size(style) + 4.0))
        .margin(15)
        .x_label_area_size(label_area(&shortened, style, style.height / 2))
        .y_label_area_size(70)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..headroom(max))
        .map_err(chart_err)?;

    chart.plotting_area().fill(&BACKGROUND).map_err(chart_err)?;

    let formatter = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) => shortened.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(WHITE)
        .light_line_style(BACKGROUND)
        .x_labels(n)
        .x_label_formatter(&formatter)
        .x_label_style(
            (FONT, font_size(style))
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_label_style((FONT, font_size(style)))
        .y_desc(y_desc)
        .axis_desc_style((FONT, font_size(style)))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, v)| {
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *v)],
                palette_color(i).filled(),
            );
            bar.set_margin(0, 0, 3, 3);
            bar
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    log::debug!("Wrote bar chart {}", path.display());
    Ok(())
}

/// Horizontal bars, first category on top
pub fn horizontal_bar_chart(
    path: &Path,
    title: &str,
    labels: &[String],
    values: &[f64],
    x_desc: &str,
    style: &ChartStyle,
) -> Result<()> {
    check_lengths(labels, values)?;
    if labels.is_empty() {
        return empty_chart(path, title, style);
    }

    let n = labels.len();
    let max = values.iter().copied().fold(0.0, f64::max);
    let shortened: Vec<String> = labels.iter().map(|l| shorten(l)).collect();

    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, font_size(style) + 4.0))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(label_area(&shortened, style, style.width / 2))
        .build_cartesian_2d(0f64..headroom(max), (0..n).into_segmented())
        .map_err(chart_err)?;

    chart.plotting_area().fill(&BACKGROUND).map_err(chart_err)?;

    // rows are drawn bottom-up, so row 0 holds the last category
    let formatter = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(row) if *row < n => shortened[n - 1 - *row].clone(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_y_mesh()
        .bold_line_style(WHITE)
        .light_line_style(BACKGROUND)
        .y_labels(n)
        .y_label_formatter(&formatter)
        .y_label_style((FONT, font_size(style)))
        .x_label_style((FONT, font_size(style)))
        .x_desc(x_desc)
        .axis_desc_style((FONT, font_size(style)))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, v)| {
            let row = n - 1 - i;
            let mut bar = Rectangle::new(
                [(0.0, SegmentValue::Exact(row)), (*v, SegmentValue::Exact(row + 1))],
                palette_color(i).filled(),
            );
            bar.set_margin(2, 2, 0, 0);
            bar
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    log::debug!("Wrote horizontal bar chart {}", path.display());
    Ok(())
}
