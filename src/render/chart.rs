use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use super::config::ChartConfig;
use crate::color::generate_palette;
use crate::data::model::MonthlySeries;

// ---------------------------------------------------------------------------
// Chart rendering
// ---------------------------------------------------------------------------

/// Render the filtered series as a PNG line chart with a dashed zero
/// reference line. The only side effect is the written file.
pub fn render_chart(series: &MonthlySeries, path: &Path, config: &ChartConfig) -> Result<()> {
    if series.len() < 2 {
        bail!(
            "need at least 2 observations to draw a chart, got {}",
            series.len()
        );
    }

    let first_date = series.first().map(|obs| obs.date).unwrap();
    let last_date = series.last().map(|obs| obs.date).unwrap();

    // Y range: include the zero line, then pad 5% each side.
    let y_min = series.values().fold(f64::INFINITY, f64::min).min(0.0);
    let y_max = series.values().fold(f64::NEG_INFINITY, f64::max).max(0.0);
    let y_pad = (y_max - y_min).max(f64::EPSILON) * 0.05;
    let y_range = (y_min - y_pad)..(y_max + y_pad);

    let family = config.font.family.as_str();
    let series_color = generate_palette(1)[0];

    let root =
        BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).context("clearing chart background")?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, (family, config.caption_font_size))
        .margin(12)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(first_date..last_date, y_range)
        .context("building chart axes")?;

    let year_formatter = |date: &NaiveDate| date.format("%Y").to_string();
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .x_label_formatter(&year_formatter)
        .label_style((family, config.label_font_size))
        .axis_desc_style((family, config.label_font_size + 4));
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw().context("drawing chart mesh")?;

    // Filtered cyclical component.
    let line = LineSeries::new(
        series.observations().iter().map(|obs| (obs.date, obs.value)),
        series_color.stroke_width(2),
    );
    chart
        .draw_series(line)
        .context("drawing cyclical component")?
        .label(&config.series_label)
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], series_color.stroke_width(2))
        });

    // Dashed zero reference line across the whole date range.
    chart
        .draw_series(DashedLineSeries::new(
            [(first_date, 0.0), (last_date, 0.0)],
            8,
            6,
            RED.stroke_width(1),
        ))
        .context("drawing zero reference line")?
        .label(&config.reference_label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(1)));

    if config.show_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((family, config.label_font_size))
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .context("drawing legend")?;
    }

    root.present()
        .with_context(|| format!("writing chart image to {}", path.display()))?;
    log::info!(
        "Rendered {} observations to {} ({}x{})",
        series.len(),
        path.display(),
        config.width,
        config.height
    );
    Ok(())
}
