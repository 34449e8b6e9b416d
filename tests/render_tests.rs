use assert_fs::prelude::*;
use predicates::prelude::*;

#[test]
fn render_writes_charts_and_dashboard_page() {
    let dir = assert_fs::TempDir::new().unwrap();
    let output = dir.child("dashboard");
    let output_arg = output.path().to_str().unwrap().to_string();

    let mut cmd = assert_cmd::cargo_bin_cmd!("costcompare");
    cmd.args(["render", "-o", &output_arg]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Dashboard written to"));

    for file_name in [
        "radar.png",
        "distribution.png",
        "treemap.png",
        "timeline.gif",
        "sankey.png",
        "projection.png",
        "dashboard.md",
    ] {
        output.child(file_name).assert(predicate::path::is_file());
    }
    output
        .child("dashboard.md")
        .assert(predicate::str::contains("![Cost Flow Across Stages (Sankey Diagram)](sankey.png)"));
}

#[test]
fn render_uses_page_copy_from_config() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = dir.child("model.yaml");
    config
        .write_str("page:\n  title: Shunt Economics\n  credit: Prepared for the review board\n")
        .unwrap();
    let config_arg = config.path().to_str().unwrap().to_string();
    let output = dir.child("out");
    let output_arg = output.path().to_str().unwrap().to_string();

    let mut cmd = assert_cmd::cargo_bin_cmd!("costcompare");
    cmd.args(["render", "-o", &output_arg, "-c", &config_arg, "--verbose"]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("rendering dashboard"));

    let page = output.child("dashboard.md");
    page.assert(predicate::str::starts_with("# Shunt Economics\n"));
    page.assert(predicate::str::contains("Prepared for the review board"));
}
