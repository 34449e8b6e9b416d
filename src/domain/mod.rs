pub mod category_breakdown;
pub mod cost_tree;
pub mod datasets;
pub mod flow_graph;
pub mod model_parameters;
pub mod sample_set;
pub mod timeline;
pub mod treatment;
