//! SVG chart rendering with plotters.
//!
//! Every function writes one self-contained SVG file and returns once the
//! file has been flushed.

pub mod bar;
pub mod histogram;
pub mod pie;
pub mod scatter;

use std::fmt::Display;
use std::path::Path;

use plotters::prelude::*;

use crate::config::ChartStyle;
use crate::error::SurveyError;

pub use bar::{bar_chart, horizontal_bar_chart};
pub use histogram::{histogram_chart, histogram_kde_chart};
pub use pie::pie_chart;
pub use scatter::{ScatterGroup, scatter_chart};

/// Font family used for all text
pub const FONT: &str = "sans-serif";

/// Categorical palette (seaborn "deep")
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(76, 114, 176),
    RGBColor(221, 132, 82),
    RGBColor(85, 168, 104),
    RGBColor(196, 78, 82),
    RGBColor(129, 114, 179),
    RGBColor(147, 120, 96),
    RGBColor(218, 139, 195),
    RGBColor(140, 140, 140),
    RGBColor(204, 185, 116),
    RGBColor(100, 181, 205),
];

/// Plot background, a light grey grid backdrop
pub const BACKGROUND: RGBColor = RGBColor(234, 234, 242);

/// Palette colour for the `i`-th category, cycling
#[must_use]
pub fn palette_color(i: usize) -> RGBColor {
    PALETTE[i % PALETTE.len()]
}

pub(crate) fn chart_err<E: Display>(err: E) -> SurveyError {
    SurveyError::Chart(err.to_string())
}

pub(crate) fn font_size(style: &ChartStyle) -> f64 {
    f64::from(style.font_size)
}

/// Pixels needed for the longest label at the style's font size
pub(crate) fn label_area(labels: &[String], style: &ChartStyle, cap: u32) -> u32 {
    let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
    (longest * style.font_size * 6 / 10 + 10).min(cap)
}

/// Upper axis bound with some headroom
pub(crate) fn headroom(max: f64) -> f64 {
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

/// Write a chart that only carries its title, used when there is nothing to plot
pub(crate) fn empty_chart(path: &Path, title: &str, style: &ChartStyle) -> Result<(), SurveyError> {
    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let root = root
        .titled(title, (FONT, font_size(style) + 4.0))
        .map_err(chart_err)?;
    let text_style: TextStyle = (FONT, font_size(style)).into_font().into();
    root.draw_text(
        "no data",
        &text_style,
        (style.width as i32 / 2 - 30, style.height as i32 / 2 - 30),
    )
    .map_err(chart_err)?;
    root.present().map_err(chart_err)?;
    log::warn!("Nothing to plot for '{title}', wrote empty chart {}", path.display());
    Ok(())
}
