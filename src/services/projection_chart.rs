use plotters::prelude::*;
use tracing::debug;

use crate::domain::timeline::Timeline;
use crate::services::chart_style::{CHART_SIZE, ChartError, format_cost, render_error, series_color};

pub fn write_projection_chart_png(output_path: &str, timeline: &Timeline) -> Result<(), ChartError> {
    let years = timeline.years();
    let (Some(first_year), Some(last_year)) = (years.first().copied(), years.last().copied()) else {
        return Err(ChartError::EmptyData("timeline"));
    };
    debug!(output_path, first_year, last_year, "rendering cost projection");

    let max_cost = timeline.max_cost();
    let max_y = if max_cost > 0.0 { max_cost * 1.15 } else { 1.0 };
    // A single year still needs a non-empty x range.
    let x_range = if first_year == last_year {
        (first_year - 1)..(last_year + 1)
    } else {
        first_year..last_year
    };

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Forecast of Cost Accumulation", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, 0.0..max_y)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Cost")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(years.len().clamp(2, 12))
        .x_label_formatter(&|year| year.to_string())
        .y_label_formatter(&|value| format_cost(*value))
        .draw()
        .map_err(render_error)?;

    for (index, treatment) in timeline.treatments().into_iter().enumerate() {
        let color = series_color(index);
        let points = timeline.series(treatment);
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(3)))
            .map_err(render_error)?
            .label(treatment.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3)));
        chart
            .draw_series(points.iter().map(|point| Circle::new(*point, 5, color.filled())))
            .map_err(render_error)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    Ok(())
}
