use crate::services::cost_report::CostReport;
use crate::services::percentiles::SampleSummary;

pub fn format_cost_report(report: &CostReport) -> String {
    let horizon = match (report.start_year, report.end_year) {
        (Some(start), Some(end)) => format!("{start}-{end}"),
        _ => "n/a".to_string(),
    };
    let samples_per_treatment = report
        .treatments
        .first()
        .map(|summary| summary.samples.count)
        .unwrap_or(0);
    let names: Vec<&str> = report
        .treatments
        .iter()
        .map(|summary| summary.treatment.as_str())
        .collect();

    let mut lines = Vec::new();
    lines.push("Cost Comparison Report".to_string());
    lines.push(format!("Seed: {}", report.seed));
    lines.push(format!("Samples per treatment: {samples_per_treatment}"));
    lines.push(format!("Horizon: {horizon}"));
    lines.push(String::new());

    lines.push("Per-patient costs:".to_string());
    lines.push("Treatment | Count | Mean | Min | P5 | P50 | P95 | Max".to_string());
    lines.push("----------|-------|------|-----|----|-----|-----|----".to_string());
    for summary in &report.treatments {
        lines.push(format_summary_row(&summary.treatment, &summary.samples));
    }
    lines.push(String::new());

    lines.push("Category breakdown:".to_string());
    lines.push(table_header("Category", &names));
    for (category, values) in report.categories.iter().zip(&report.breakdown) {
        lines.push(table_row(category, values));
    }
    lines.push(String::new());

    lines.push("Timeline:".to_string());
    lines.push(table_header("Year", &names));
    for (year, values) in report.years.iter().zip(&report.yearly_costs) {
        lines.push(table_row(&year.to_string(), values));
    }
    lines.push(String::new());

    let final_year = report
        .end_year
        .map(|year| year.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    for summary in &report.treatments {
        lines.push(format!(
            "Cost of {} in {final_year}: {:.2}",
            summary.treatment, summary.final_cost
        ));
    }
    lines.push(format!("Difference in {final_year}: {:.2}", report.final_difference));

    lines.join("\n")
}

fn format_summary_row(treatment: &str, summary: &SampleSummary) -> String {
    format!(
        "{treatment} | {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2}",
        summary.count, summary.mean, summary.min, summary.p5, summary.median, summary.p95, summary.max
    )
}

fn table_header(first: &str, names: &[&str]) -> String {
    let mut header = vec![first.to_string()];
    header.extend(names.iter().map(|name| name.to_string()));
    let separator: Vec<String> = header.iter().map(|cell| "-".repeat(cell.chars().count())).collect();
    format!("{}\n{}", header.join(" | "), separator.join("|"))
}

fn table_row(label: &str, values: &[f64]) -> String {
    let mut cells = vec![label.to_string()];
    cells.extend(values.iter().map(|value| format!("{value:.2}")));
    cells.join(" | ")
}
