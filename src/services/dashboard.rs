use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::datasets::Datasets;
use crate::domain::model_parameters::PageCopy;
use crate::services::chart_style::ChartError;
use crate::services::distribution_chart::write_distribution_chart_png;
use crate::services::projection_chart::write_projection_chart_png;
use crate::services::radar_chart::write_radar_chart_png;
use crate::services::sankey_chart::write_sankey_chart_png;
use crate::services::timeline_chart::{FRAME_DELAY_MS, write_timeline_chart_gif};
use crate::services::treemap_chart::write_treemap_chart_png;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("failed to create dashboard directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write dashboard page: {0}")]
    WritePage(#[from] io::Error),
    #[error("failed to render {chart}: {source}")]
    Chart {
        chart: &'static str,
        source: ChartError,
    },
    #[error("output path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartKind {
    Radar,
    Distribution,
    Treemap,
    Timeline,
    Sankey,
    Projection,
}

struct DashboardSection {
    kind: ChartKind,
    title: &'static str,
    file_name: &'static str,
}

const SECTIONS: [DashboardSection; 6] = [
    DashboardSection {
        kind: ChartKind::Radar,
        title: "Detailed Cost Categories (Radar Chart)",
        file_name: "radar.png",
    },
    DashboardSection {
        kind: ChartKind::Distribution,
        title: "Cost Distribution Across Patients",
        file_name: "distribution.png",
    },
    DashboardSection {
        kind: ChartKind::Treemap,
        title: "Cost Breakdown Tree (Hierarchical Treemap)",
        file_name: "treemap.png",
    },
    DashboardSection {
        kind: ChartKind::Timeline,
        title: "Cost Over Time",
        file_name: "timeline.gif",
    },
    DashboardSection {
        kind: ChartKind::Sankey,
        title: "Cost Flow Across Stages (Sankey Diagram)",
        file_name: "sankey.png",
    },
    DashboardSection {
        kind: ChartKind::Projection,
        title: "Forecast of Cost Accumulation (Line Projection)",
        file_name: "projection.png",
    },
];

pub const PAGE_FILE_NAME: &str = "dashboard.md";

pub fn dashboard_file_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = SECTIONS.iter().map(|section| section.file_name).collect();
    names.push(PAGE_FILE_NAME);
    names
}

/// Renders every chart into `output_dir` and writes the Markdown page that
/// embeds them. Returns the path of the page.
pub fn write_dashboard(
    output_dir: &Path,
    datasets: &Datasets,
    page: &PageCopy,
) -> Result<PathBuf, DashboardError> {
    std::fs::create_dir_all(output_dir).map_err(|source| DashboardError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    info!(output_dir = %output_dir.display(), "rendering dashboard");

    for section in &SECTIONS {
        let path = output_dir.join(section.file_name);
        let path_str = path
            .to_str()
            .ok_or_else(|| DashboardError::InvalidPath(path.clone()))?;
        render_chart(section.kind, path_str, datasets).map_err(|source| DashboardError::Chart {
            chart: section.file_name,
            source,
        })?;
        debug!(chart = section.file_name, "chart written");
    }

    let page_path = output_dir.join(PAGE_FILE_NAME);
    std::fs::write(&page_path, generate_dashboard_markdown(page, datasets))?;
    Ok(page_path)
}

fn render_chart(kind: ChartKind, path: &str, datasets: &Datasets) -> Result<(), ChartError> {
    match kind {
        ChartKind::Radar => write_radar_chart_png(path, &datasets.category_breakdown),
        ChartKind::Distribution => write_distribution_chart_png(path, &datasets.sample_set),
        ChartKind::Treemap => write_treemap_chart_png(path, &datasets.cost_tree),
        ChartKind::Timeline => write_timeline_chart_gif(path, &datasets.timeline, FRAME_DELAY_MS),
        ChartKind::Sankey => write_sankey_chart_png(path, &datasets.flow_graph),
        ChartKind::Projection => write_projection_chart_png(path, &datasets.timeline),
    }
}

pub fn generate_dashboard_markdown(page: &PageCopy, datasets: &Datasets) -> String {
    let mut blocks = vec![
        format!("# {}", page.title),
        format!("## {}", page.heading),
        page.introduction.trim_end().to_string(),
    ];

    let years = datasets.timeline.years();
    for section in &SECTIONS {
        let title = match (section.kind, years.first(), years.last()) {
            (ChartKind::Timeline, Some(first), Some(last)) => {
                format!("{} ({first}–{last})", section.title)
            }
            _ => section.title.to_string(),
        };
        blocks.push(format!(
            "## {title}\n![{title}]({file})",
            file = section.file_name
        ));
    }

    blocks.push("---".to_string());
    blocks.push(format!("> {}", page.conclusion.trim_end()));
    if let Some(credit) = page.credit.as_deref() {
        blocks.push(format!("<p align=\"center\">{credit}</p>"));
    }

    format!("{}\n", blocks.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::canonical_datasets;
    use assert_fs::prelude::*;
    use predicates::prelude::*;

    #[test]
    fn generate_dashboard_markdown_lists_sections_in_order() {
        let datasets = canonical_datasets();
        let markdown = generate_dashboard_markdown(&PageCopy::default(), &datasets);

        assert!(markdown.starts_with("# NEUROWEAVE Cost Comparison\n"));
        let radar = markdown.find("![Detailed Cost Categories (Radar Chart)](radar.png)").unwrap();
        let distribution = markdown.find("(distribution.png)").unwrap();
        let treemap = markdown.find("(treemap.png)").unwrap();
        let timeline = markdown.find("## Cost Over Time (2023–2027)").unwrap();
        let sankey = markdown.find("(sankey.png)").unwrap();
        let projection = markdown.find("(projection.png)").unwrap();
        assert!(radar < distribution);
        assert!(distribution < treemap);
        assert!(treemap < timeline);
        assert!(timeline < sankey);
        assert!(sankey < projection);
        assert!(markdown.contains("\n---\n"));
        assert!(!markdown.contains("<p align"));
    }

    #[test]
    fn generate_dashboard_markdown_includes_credit_when_set() {
        let datasets = canonical_datasets();
        let page = PageCopy {
            credit: Some("Created by the research team".to_string()),
            ..PageCopy::default()
        };
        let markdown = generate_dashboard_markdown(&page, &datasets);
        assert!(markdown.contains("<p align=\"center\">Created by the research team</p>"));
    }

    #[test]
    fn write_dashboard_renders_every_file() {
        let datasets = canonical_datasets();
        let dir = assert_fs::TempDir::new().unwrap();
        let output_dir = dir.path().join("dashboard");

        let page_path = write_dashboard(&output_dir, &datasets, &PageCopy::default()).unwrap();

        assert_eq!(page_path, output_dir.join(PAGE_FILE_NAME));
        for file_name in dashboard_file_names() {
            dir.child("dashboard")
                .child(file_name)
                .assert(predicate::path::is_file());
        }
    }
}
