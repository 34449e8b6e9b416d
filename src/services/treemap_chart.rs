use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::domain::cost_tree::CostTree;
use crate::services::chart_style::{
    CHART_SIZE, ChartError, colored_text_style, format_cost, render_error, value_color,
};

const HEADER_SHARE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct TreemapTile {
    pub label: String,
    pub value: f64,
    pub depth: usize,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl TreemapTile {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// Slice-and-dice layout with y pointing up. Roots split the width in
/// proportion to their values. A root with children keeps a header band at its
/// top and stacks its children below it, top to bottom, in proportion to the
/// children's own values.
pub fn layout_treemap(tree: &CostTree, width: f64, height: f64) -> Vec<TreemapTile> {
    let roots: Vec<_> = tree.roots().filter(|node| node.value > 0.0).collect();
    let root_total: f64 = roots.iter().map(|node| node.value).sum();
    if root_total <= 0.0 {
        return Vec::new();
    }

    let mut tiles = Vec::new();
    let mut x = 0.0;
    for root in roots {
        let root_width = width * root.value / root_total;
        tiles.push(TreemapTile {
            label: root.label.clone(),
            value: root.value,
            depth: 0,
            x0: x,
            y0: 0.0,
            x1: x + root_width,
            y1: height,
        });

        let children: Vec<_> = tree
            .children_of(&root.label)
            .filter(|node| node.value > 0.0)
            .collect();
        let child_total: f64 = children.iter().map(|node| node.value).sum();
        if child_total > 0.0 {
            let body_height = height * (1.0 - HEADER_SHARE);
            let mut top = body_height;
            for child in children {
                let child_height = body_height * child.value / child_total;
                tiles.push(TreemapTile {
                    label: child.label.clone(),
                    value: child.value,
                    depth: 1,
                    x0: x,
                    y0: top - child_height,
                    x1: x + root_width,
                    y1: top,
                });
                top -= child_height;
            }
        }
        x += root_width;
    }
    tiles
}

pub fn write_treemap_chart_png(output_path: &str, tree: &CostTree) -> Result<(), ChartError> {
    let tiles = layout_treemap(tree, 1.0, 1.0);
    if tiles.is_empty() {
        return Err(ChartError::EmptyData("cost tree"));
    }
    debug!(output_path, tiles = tiles.len(), "rendering treemap");

    let min_value = tiles.iter().map(|tile| tile.value).fold(f64::INFINITY, f64::min);
    let max_value = tiles.iter().map(|tile| tile.value).fold(0.0, f64::max);

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Cost Breakdown Tree", ("sans-serif", 30))
        .build_cartesian_2d(0.0f64..1.0f64, 0.0f64..1.0f64)
        .map_err(render_error)?;

    chart
        .draw_series(tiles.iter().map(|tile| {
            Rectangle::new(
                [(tile.x0, tile.y0), (tile.x1, tile.y1)],
                value_color(tile.value, min_value, max_value).filled(),
            )
        }))
        .map_err(render_error)?;
    chart
        .draw_series(tiles.iter().map(|tile| {
            Rectangle::new(
                [(tile.x0, tile.y0), (tile.x1, tile.y1)],
                WHITE.stroke_width(2),
            )
        }))
        .map_err(render_error)?;

    let has_children = |label: &str| tree.children_of(label).any(|child| child.value > 0.0);
    chart
        .draw_series(tiles.iter().map(|tile| {
            let center_x = (tile.x0 + tile.x1) / 2.0;
            let (anchor_y, vpos) = if tile.depth == 0 && has_children(&tile.label) {
                (tile.y1 - 0.01, VPos::Top)
            } else {
                ((tile.y0 + tile.y1) / 2.0, VPos::Center)
            };
            let color = if tile.value > (min_value + max_value) / 2.0 { WHITE } else { BLACK };
            let style = colored_text_style(16.0, color).pos(Pos::new(HPos::Center, vpos));
            Text::new(
                format!("{} ({})", tile.label, format_cost(tile.value)),
                (center_x, anchor_y),
                style,
            )
        }))
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    Ok(())
}
