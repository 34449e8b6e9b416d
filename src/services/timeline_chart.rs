use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::domain::timeline::Timeline;
use crate::services::chart_style::{
    CHART_SIZE, ChartError, format_cost, render_error, series_color, text_style,
};

pub const FRAME_DELAY_MS: u32 = 1000;
const BAR_MARGIN: f64 = 0.15;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub treatment: String,
    pub x0: f64,
    pub x1: f64,
    pub cost: f64,
}

/// One animation frame: the grouped bars of a single year.
#[derive(Debug, Clone, PartialEq)]
pub struct BarFrame {
    pub year: i32,
    pub bars: Vec<Bar>,
}

pub fn bar_frames(timeline: &Timeline) -> Vec<BarFrame> {
    let treatments = timeline.treatments();
    timeline
        .years()
        .into_iter()
        .map(|year| BarFrame {
            year,
            bars: treatments
                .iter()
                .enumerate()
                .filter_map(|(slot, treatment)| {
                    let cost = timeline.cost(treatment, year)?;
                    Some(Bar {
                        treatment: treatment.to_string(),
                        x0: slot as f64 + BAR_MARGIN,
                        x1: slot as f64 + 1.0 - BAR_MARGIN,
                        cost,
                    })
                })
                .collect(),
        })
        .collect()
}

/// Writes an animated GIF with one frame per year. The y range is shared by
/// all frames so bar heights can be compared across the animation.
pub fn write_timeline_chart_gif(
    output_path: &str,
    timeline: &Timeline,
    frame_delay_ms: u32,
) -> Result<(), ChartError> {
    let frames = bar_frames(timeline);
    if frames.is_empty() {
        return Err(ChartError::EmptyData("timeline"));
    }
    debug!(output_path, frames = frames.len(), "rendering animated timeline");

    let slots = timeline.treatments().len().max(1) as f64;
    let max_cost = timeline.max_cost();
    let max_y = if max_cost > 0.0 { max_cost * 1.15 } else { 1.0 };

    let root = BitMapBackend::gif(output_path, CHART_SIZE, frame_delay_ms)
        .map_err(render_error)?
        .into_drawing_area();

    for frame in &frames {
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption(format!("Cost Over Time: {}", frame.year), ("sans-serif", 30))
            .x_label_area_size(20)
            .y_label_area_size(80)
            .build_cartesian_2d(0.0..slots, 0.0..max_y)
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

        for (index, bar) in frame.bars.iter().enumerate() {
            let color = series_color(index);
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(bar.x0, 0.0), (bar.x1, bar.cost)],
                    color.filled(),
                )))
                .map_err(render_error)?
                .label(bar.treatment.clone())
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 16, y + 6)], color.filled()));

            let style = text_style(16.0).pos(Pos::new(HPos::Center, VPos::Bottom));
            chart
                .draw_series(std::iter::once(Text::new(
                    format_cost(bar.cost),
                    ((bar.x0 + bar.x1) / 2.0, bar.cost + max_y * 0.01),
                    style,
                )))
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
    }
    Ok(())
}
