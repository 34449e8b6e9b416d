use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::domain::flow_graph::FlowGraph;
use crate::services::chart_style::{
    CHART_SIZE, ChartError, format_cost, render_error, text_style,
};

pub const NODE_PADDING: f64 = 15.0;
pub const NODE_THICKNESS: f64 = 20.0;
const CANVAS: (f64, f64) = (860.0, 500.0);
const CURVE_STEPS: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct SankeyNode {
    pub label: String,
    pub column: usize,
    pub value: f64,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

/// A link drawn as a band from the right edge of its source node to the left
/// edge of its target node. Spans are `(bottom, top)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SankeyBand {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    pub source_x: f64,
    pub target_x: f64,
    pub source_span: (f64, f64),
    pub target_span: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SankeyLayout {
    pub nodes: Vec<SankeyNode>,
    pub bands: Vec<SankeyBand>,
}

/// Places nodes in columns by their longest distance from a source node and
/// sizes them by throughput, with y pointing up. A single scale is shared by
/// all columns so that band widths are comparable.
pub fn layout_sankey(flow: &FlowGraph, width: f64, height: f64) -> Result<SankeyLayout, ChartError> {
    if flow.nodes.is_empty() || flow.links.is_empty() {
        return Err(ChartError::EmptyData("flow graph"));
    }

    let mut graph: DiGraph<usize, f64> = DiGraph::new();
    let indices: Vec<NodeIndex> = (0..flow.nodes.len()).map(|node| graph.add_node(node)).collect();
    for link in &flow.links {
        if link.source >= flow.nodes.len() || link.target >= flow.nodes.len() {
            return Err(ChartError::InvalidFlow(format!(
                "link {} -> {} references a missing node",
                link.source, link.target
            )));
        }
        if !link.value.is_finite() || link.value < 0.0 {
            return Err(ChartError::InvalidFlow(format!(
                "link {} -> {} has invalid value {}",
                link.source, link.target, link.value
            )));
        }
        graph.add_edge(indices[link.source], indices[link.target], link.value);
    }

    let sorted = toposort(&graph, None)
        .map_err(|_| ChartError::InvalidFlow("flow graph contains a cycle".to_string()))?;
    let mut columns = vec![0usize; flow.nodes.len()];
    for node in sorted {
        let column = columns[graph[node]];
        for next in graph.neighbors(node) {
            let next = graph[next];
            columns[next] = columns[next].max(column + 1);
        }
    }
    let column_count = columns.iter().copied().max().unwrap_or(0) + 1;

    let values: Vec<f64> = (0..flow.nodes.len())
        .map(|node| flow.inflow(node).max(flow.outflow(node)))
        .collect();

    let scale = (0..column_count)
        .filter_map(|column| {
            let members: Vec<usize> = (0..flow.nodes.len()).filter(|n| columns[*n] == column).collect();
            let total: f64 = members.iter().map(|n| values[*n]).sum();
            if total <= 0.0 {
                return None;
            }
            let available = height - NODE_PADDING * (members.len() as f64 - 1.0);
            Some(available / total)
        })
        .fold(f64::INFINITY, f64::min);
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 0.0 };

    let column_step = if column_count > 1 {
        (width - NODE_THICKNESS) / (column_count - 1) as f64
    } else {
        0.0
    };

    let mut nodes: Vec<Option<SankeyNode>> = vec![None; flow.nodes.len()];
    for column in 0..column_count {
        let members: Vec<usize> = (0..flow.nodes.len()).filter(|n| columns[*n] == column).collect();
        let used: f64 = members.iter().map(|n| values[*n] * scale).sum::<f64>()
            + NODE_PADDING * (members.len() as f64 - 1.0).max(0.0);
        let mut top = height - (height - used) / 2.0;
        let x0 = column_step * column as f64;
        for member in members {
            let node_height = values[member] * scale;
            nodes[member] = Some(SankeyNode {
                label: flow.nodes[member].clone(),
                column,
                value: values[member],
                x0,
                x1: x0 + NODE_THICKNESS,
                y0: top - node_height,
                y1: top,
            });
            top -= node_height + NODE_PADDING;
        }
    }
    let nodes: Vec<SankeyNode> = nodes.into_iter().flatten().collect();

    let mut out_cursor: Vec<f64> = nodes.iter().map(|node| node.y1).collect();
    let mut in_cursor: Vec<f64> = nodes.iter().map(|node| node.y1).collect();
    let bands = flow
        .links
        .iter()
        .map(|link| {
            let band_height = link.value * scale;
            let source_top = out_cursor[link.source];
            let target_top = in_cursor[link.target];
            out_cursor[link.source] -= band_height;
            in_cursor[link.target] -= band_height;
            SankeyBand {
                source: link.source,
                target: link.target,
                value: link.value,
                source_x: nodes[link.source].x1,
                target_x: nodes[link.target].x0,
                source_span: (source_top - band_height, source_top),
                target_span: (target_top - band_height, target_top),
            }
        })
        .collect();

    Ok(SankeyLayout { nodes, bands })
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Closed outline of a band: top edge left to right, bottom edge back.
pub fn band_outline(band: &SankeyBand) -> Vec<(f64, f64)> {
    let point = |t: f64, edge: fn(&(f64, f64)) -> f64| {
        let x = band.source_x + (band.target_x - band.source_x) * t;
        let from = edge(&band.source_span);
        let to = edge(&band.target_span);
        (x, from + (to - from) * smoothstep(t))
    };
    let steps: Vec<f64> = (0..=CURVE_STEPS).map(|i| i as f64 / CURVE_STEPS as f64).collect();

    let mut outline: Vec<(f64, f64)> = steps.iter().map(|t| point(*t, |span| span.1)).collect();
    outline.extend(steps.iter().rev().map(|t| point(*t, |span| span.0)));
    outline
}

pub fn write_sankey_chart_png(output_path: &str, flow: &FlowGraph) -> Result<(), ChartError> {
    let layout = layout_sankey(flow, CANVAS.0, CANVAS.1)?;
    debug!(output_path, nodes = layout.nodes.len(), "rendering sankey diagram");

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Cost Flow Across Stages", ("sans-serif", 30))
        .build_cartesian_2d(0.0..CANVAS.0, 0.0..CANVAS.1)
        .map_err(render_error)?;

    let band_color = RGBColor(120, 144, 156);
    chart
        .draw_series(
            layout
                .bands
                .iter()
                .map(|band| Polygon::new(band_outline(band), band_color.mix(0.4).filled())),
        )
        .map_err(render_error)?;

    let node_color = RGBColor(31, 119, 180);
    chart
        .draw_series(layout.nodes.iter().map(|node| {
            Rectangle::new([(node.x0, node.y0), (node.x1, node.y1)], node_color.filled())
        }))
        .map_err(render_error)?;
    chart
        .draw_series(layout.nodes.iter().map(|node| {
            Rectangle::new([(node.x0, node.y0), (node.x1, node.y1)], BLACK.stroke_width(1))
        }))
        .map_err(render_error)?;

    let last_column = layout.nodes.iter().map(|node| node.column).max().unwrap_or(0);
    chart
        .draw_series(layout.nodes.iter().map(|node| {
            let middle = (node.y0 + node.y1) / 2.0;
            let label = format!("{} ({})", node.label, format_cost(node.value));
            if node.column == last_column && last_column > 0 {
                let style = text_style(16.0).pos(Pos::new(HPos::Right, VPos::Center));
                Text::new(label, (node.x0 - 6.0, middle), style)
            } else {
                let style = text_style(16.0).pos(Pos::new(HPos::Left, VPos::Center));
                Text::new(label, (node.x1 + 6.0, middle), style)
            }
        }))
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    Ok(())
}
