pub mod chart_style;
pub mod cost_model;
pub mod cost_report;
pub mod dashboard;
pub mod dataset_export;
pub mod density;
pub mod distribution_chart;
pub mod model_config_yaml;
pub mod normal_sampler;
pub mod percentiles;
pub mod projection_chart;
pub mod radar_chart;
pub mod sankey_chart;
pub mod timeline_chart;
pub mod treemap_chart;
