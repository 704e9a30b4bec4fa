//! Pie charts with percentage annotations.

use std::path::Path;

use plotters::element::Pie;
use plotters::prelude::*;

use crate::charts::{FONT, chart_err, empty_chart, font_size, palette_color};
use crate::config::ChartStyle;
use crate::error::{Result, SurveyError};

/// One slice per label, annotated with its share of the whole
///
/// `start_angle` is in degrees. Non-positive values are dropped since they
/// cannot be drawn as slices.
pub fn pie_chart(
    path: &Path,
    title: &str,
    labels: &[String],
    values: &[f64],
    start_angle: f64,
    style: &ChartStyle,
) -> Result<()> {
    if labels.len() != values.len() {
        return Err(SurveyError::LengthMismatch {
            expected: labels.len(),
            actual: values.len(),
        });
    }

    let (labels, sizes): (Vec<String>, Vec<f64>) = labels
        .iter()
        .zip(values)
        .filter(|(_, v)| **v > 0.0)
        .map(|(l, v)| (l.clone(), *v))
        .unzip();
    if sizes.is_empty() {
        return empty_chart(path, title, style);
    }
    let colors: Vec<RGBColor> = (0..sizes.len()).map(palette_color).collect();

    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let area = root
        .titled(title, (FONT, font_size(style) + 4.0))
        .map_err(chart_err)?;

    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.35;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(start_angle);
    pie.label_style((FONT, font_size(style)).into_font().color(&BLACK));
    pie.percentages((FONT, font_size(style) * 0.9).into_font().color(&WHITE));
    area.draw(&pie).map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    log::debug!("Wrote pie chart {}", path.display());
    Ok(())
}
