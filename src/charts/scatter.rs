//! Scatter plots of one or more labelled point groups.

use std::path::Path;

use plotters::prelude::*;

use crate::charts::{BACKGROUND, FONT, chart_err, empty_chart, font_size, headroom, palette_color};
use crate::config::ChartStyle;
use crate::error::Result;

/// Points sharing a legend entry and colour
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl ScatterGroup {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }
}

fn bounds(groups: &[ScatterGroup]) -> Option<((f64, f64), (f64, f64))> {
    let mut points = groups.iter().flat_map(|g| g.points.iter().copied());
    let (x0, y0) = points.next()?;
    Some(points.fold(((x0, x0), (y0, y0)), |((xl, xh), (yl, yh)), (x, y)| {
        ((xl.min(x), xh.max(x)), (yl.min(y), yh.max(y)))
    }))
}

/// Scatter plot, one colour per group, with a legend in the upper right
pub fn scatter_chart(
    path: &Path,
    title: &str,
    groups: &[ScatterGroup],
    x_desc: &str,
    y_desc: &str,
    style: &ChartStyle,
) -> Result<()> {
    let Some(((x_min, x_max), (y_min, y_max))) = bounds(groups) else {
        return empty_chart(path, title, style);
    };

    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, font_size(style) + 4.0))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min.min(0.0)..headroom(x_max), y_min.min(0.0)..headroom(y_max))
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
        .draw()
        .map_err(chart_err)?;

    for (i, group) in groups.iter().enumerate() {
        let color = palette_color(i);
        chart
            .draw_series(
                group
                    .points
                    .iter()
                    .map(|(x, y)| Circle::new((*x, *y), 3, color.mix(0.6).filled())),
            )
            .map_err(chart_err)?
            .label(group.label.as_str())
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, font_size(style)))
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    log::debug!("Wrote scatter plot {}", path.display());
    Ok(())
}
