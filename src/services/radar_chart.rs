use std::f64::consts::PI;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::domain::category_breakdown::CategoryBreakdown;
use crate::services::chart_style::{
    CHART_SIZE, ChartError, GRID_COLOR, render_error, series_color, text_style,
};

const RING_COUNT: usize = 4;

/// Polar to cartesian for one axis per value. The first axis points straight
/// up and the axes run clockwise. Radii are normalized by `max_value`.
pub fn radar_points(values: &[f64], max_value: f64) -> Vec<(f64, f64)> {
    let count = values.len();
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let radius = if max_value > 0.0 { value / max_value } else { 0.0 };
            let angle = PI / 2.0 - 2.0 * PI * index as f64 / count as f64;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

fn closed(mut points: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    points
}

pub fn write_radar_chart_png(
    output_path: &str,
    breakdown: &CategoryBreakdown,
) -> Result<(), ChartError> {
    if breakdown.categories.is_empty() || breakdown.series.is_empty() {
        return Err(ChartError::EmptyData("category breakdown"));
    }
    debug!(output_path, "rendering radar chart");

    let max_value = breakdown.max_value();
    let axis_count = breakdown.categories.len();

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Detailed Cost Categories", ("sans-serif", 30))
        .build_cartesian_2d(-2.0f64..2.0f64, -1.3f64..1.3f64)
        .map_err(render_error)?;

    let grid_style = ShapeStyle::from(&GRID_COLOR);
    chart
        .draw_series((1..=RING_COUNT).map(|ring| {
            let radius = ring as f64 / RING_COUNT as f64;
            PathElement::new(closed(radar_points(&vec![radius; axis_count], 1.0)), grid_style)
        }))
        .map_err(render_error)?;
    chart
        .draw_series(
            radar_points(&vec![1.0; axis_count], 1.0)
                .into_iter()
                .map(|point| PathElement::new(vec![(0.0, 0.0), point], grid_style)),
        )
        .map_err(render_error)?;

    let label_style = text_style(16.0).pos(Pos::new(HPos::Center, VPos::Center));
    chart
        .draw_series(
            radar_points(&vec![1.18; axis_count], 1.0)
                .into_iter()
                .zip(breakdown.categories.iter())
                .map(|(point, category)| Text::new(category.clone(), point, label_style.clone())),
        )
        .map_err(render_error)?;

    for (index, series) in breakdown.series.iter().enumerate() {
        let color = series_color(index);
        let points = radar_points(&series.values, max_value);
        chart
            .draw_series(std::iter::once(Polygon::new(
                points.clone(),
                color.mix(0.25).filled(),
            )))
            .map_err(render_error)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                closed(points),
                color.stroke_width(2),
            )))
            .map_err(render_error)?
            .label(series.chart_label.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 16, y + 6)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{canonical_datasets, output_path};
    use assert_fs::prelude::*;
    use predicates::prelude::*;

    #[test]
    fn radar_points_start_at_top_and_run_clockwise() {
        let points = radar_points(&[1.0, 1.0, 1.0, 1.0], 1.0);

        let expected = [(0.0, 1.0), (1.0, 0.0), (0.0, -1.0), (-1.0, 0.0)];
        for (point, expected) in points.iter().zip(expected.iter()) {
            assert!((point.0 - expected.0).abs() < 1e-9);
            assert!((point.1 - expected.1).abs() < 1e-9);
        }
    }

    #[test]
    fn radar_points_normalize_by_max_value() {
        let points = radar_points(&[20000.0, 0.0], 40000.0);
        assert!((points[0].1 - 0.5).abs() < 1e-9);
        assert_eq!(points[1], (0.0, 0.0));
        assert!(radar_points(&[5.0], 0.0).iter().all(|p| *p == (0.0, 0.0)));
    }

    #[test]
    fn write_radar_chart_png_writes_file() {
        let datasets = canonical_datasets();
        let dir = assert_fs::TempDir::new().unwrap();
        let path = output_path(&dir, "radar.png");

        write_radar_chart_png(&path, &datasets.category_breakdown).unwrap();

        dir.child("radar.png").assert(predicate::path::exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn write_radar_chart_png_rejects_empty_breakdown() {
        let breakdown = CategoryBreakdown {
            categories: vec![],
            series: vec![],
        };
        let error = write_radar_chart_png("unused.png", &breakdown).unwrap_err();
        assert!(matches!(error, ChartError::EmptyData(_)));
    }
}
