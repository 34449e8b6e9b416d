use serde::Serialize;

use crate::domain::category_breakdown::CategoryBreakdown;
use crate::domain::cost_tree::CostTree;
use crate::domain::flow_graph::FlowGraph;
use crate::domain::sample_set::SampleSet;
use crate::domain::timeline::Timeline;

/// Everything the presentation layer consumes, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Datasets {
    pub sample_set: SampleSet,
    pub category_breakdown: CategoryBreakdown,
    pub cost_tree: CostTree,
    pub timeline: Timeline,
    pub flow_graph: FlowGraph,
}
