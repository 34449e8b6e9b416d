use plotters::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("failed to render chart: {0}")]
    Render(String),
    #[error("no data to plot: {0}")]
    EmptyData(&'static str),
    #[error("invalid flow graph: {0}")]
    InvalidFlow(String),
}

pub(crate) fn render_error<E: std::fmt::Display>(error: E) -> ChartError {
    ChartError::Render(error.to_string())
}

pub const CHART_SIZE: (u32, u32) = (900, 600);

pub const ONE_TIME_COLOR: RGBColor = RGBColor(0, 191, 255);
pub const RECURRING_COLOR: RGBColor = RGBColor(220, 20, 60);
pub const GRID_COLOR: RGBColor = RGBColor(210, 210, 210);

/// Series colors follow dataset order: one-time first, recurring second.
pub fn series_color(index: usize) -> RGBColor {
    if index == 0 {
        ONE_TIME_COLOR
    } else {
        RECURRING_COLOR
    }
}

pub fn text_style(size: f64) -> TextStyle<'static> {
    colored_text_style(size, BLACK)
}

pub fn colored_text_style(size: f64, color: RGBColor) -> TextStyle<'static> {
    FontDesc::new(FontFamily::SansSerif, size, FontStyle::Normal).color(&color)
}

/// Linear blend from a light to a dark blue for `value` within `[min, max]`.
pub fn value_color(value: f64, min: f64, max: f64) -> RGBColor {
    let light = (198.0, 219.0, 239.0);
    let dark = (8.0, 48.0, 107.0);
    let t = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(light.0, dark.0), lerp(light.1, dark.1), lerp(light.2, dark.2))
}

pub fn format_cost(value: f64) -> String {
    format!("{value:.0}")
}
