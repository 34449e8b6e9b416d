use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::domain::sample_set::SampleSet;
use crate::services::chart_style::{
    CHART_SIZE, ChartError, format_cost, render_error, series_color, text_style,
};
use crate::services::density::gaussian_kde;
use crate::services::percentiles::{SampleSummary, summarize};

const VIOLIN_HALF_WIDTH: f64 = 0.35;
const BOX_HALF_WIDTH: f64 = 0.05;
const JITTER_WIDTH: f64 = 0.3;
const DENSITY_STEPS: usize = 60;

/// Geometry of one treatment's violin, box and sample points. Each treatment
/// occupies one unit on the x axis and is centered at `index + 0.5`.
#[derive(Debug, Clone)]
pub struct ViolinShape {
    pub treatment: String,
    pub center: f64,
    pub outline: Vec<(f64, f64)>,
    pub summary: SampleSummary,
    pub points: Vec<(f64, f64)>,
}

pub fn violin_shapes(sample_set: &SampleSet) -> Vec<ViolinShape> {
    sample_set
        .treatments()
        .into_iter()
        .enumerate()
        .filter_map(|(index, treatment)| {
            let costs = sample_set.costs_for(treatment);
            let summary = summarize(&costs)?;
            let center = index as f64 + 0.5;
            Some(ViolinShape {
                treatment: treatment.to_string(),
                center,
                outline: violin_outline(&costs, &summary, center),
                points: jittered_points(&costs, center),
                summary,
            })
        })
        .collect()
}

/// Right edge from min to max, then the mirrored left edge back down, so the
/// points form a closed polygon.
fn violin_outline(costs: &[f64], summary: &SampleSummary, center: f64) -> Vec<(f64, f64)> {
    let density = gaussian_kde(costs, summary.min, summary.max, DENSITY_STEPS);
    let peak = density.iter().map(|(_, d)| *d).fold(0.0, f64::max);
    let scale = if peak > 0.0 { VIOLIN_HALF_WIDTH / peak } else { 0.0 };

    let mut outline: Vec<(f64, f64)> = density
        .iter()
        .map(|(y, d)| (center + d * scale, *y))
        .collect();
    outline.extend(density.iter().rev().map(|(y, d)| (center - d * scale, *y)));
    outline
}

// Deterministic spread so repeated renders are identical.
fn jittered_points(costs: &[f64], center: f64) -> Vec<(f64, f64)> {
    costs
        .iter()
        .enumerate()
        .map(|(index, cost)| {
            let offset = ((index * 37) % 100) as f64 / 100.0 - 0.5;
            (center + offset * JITTER_WIDTH, *cost)
        })
        .collect()
}

pub fn write_distribution_chart_png(
    output_path: &str,
    sample_set: &SampleSet,
) -> Result<(), ChartError> {
    if sample_set.is_empty() {
        return Err(ChartError::EmptyData("sample set"));
    }
    let shapes = violin_shapes(sample_set);
    if shapes.is_empty() {
        return Err(ChartError::EmptyData("finite samples"));
    }
    debug!(output_path, treatments = shapes.len(), "rendering distribution chart");

    let min_value = shapes
        .iter()
        .map(|shape| shape.summary.min)
        .fold(f64::INFINITY, f64::min);
    let max_value = shapes
        .iter()
        .map(|shape| shape.summary.max)
        .fold(f64::NEG_INFINITY, f64::max);
    let padding = ((max_value - min_value) * 0.08).max(1.0);
    let y_range = (min_value - padding)..(max_value + padding);

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Cost Distribution Across Patients", ("sans-serif", 30))
        .x_label_area_size(20)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..shapes.len() as f64, y_range.clone())
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_desc("Cost")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .y_label_formatter(&|value| format_cost(*value))
        .draw()
        .map_err(render_error)?;

    for (index, shape) in shapes.iter().enumerate() {
        let color = series_color(index);
        let summary = &shape.summary;
        let center = shape.center;

        chart
            .draw_series(std::iter::once(Polygon::new(
                shape.outline.clone(),
                color.mix(0.2).filled(),
            )))
            .map_err(render_error)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                shape.outline.clone(),
                color.stroke_width(1),
            )))
            .map_err(render_error)?;

        chart
            .draw_series(shape.points.iter().map(|point| {
                Circle::new(*point, 2, color.mix(0.6).filled())
            }))
            .map_err(render_error)?;

        chart
            .draw_series(vec![
                PathElement::new(vec![(center, summary.min), (center, summary.q1)], BLACK.stroke_width(1)),
                PathElement::new(vec![(center, summary.q3), (center, summary.max)], BLACK.stroke_width(1)),
            ])
            .map_err(render_error)?;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(center - BOX_HALF_WIDTH, summary.q1), (center + BOX_HALF_WIDTH, summary.q3)],
                color.filled(),
            )))
            .map_err(render_error)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![
                    (center - BOX_HALF_WIDTH, summary.median),
                    (center + BOX_HALF_WIDTH, summary.median),
                ],
                WHITE.stroke_width(2),
            )))
            .map_err(render_error)?;

        let label_style = text_style(18.0).pos(Pos::new(HPos::Center, VPos::Top));
        chart
            .draw_series(std::iter::once(Text::new(
                shape.treatment.clone(),
                (center, y_range.end),
                label_style,
            )))
            .map_err(render_error)?;
    }

    root.present().map_err(render_error)?;
    Ok(())
}
