use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;

fn generate_json(dir: &assert_fs::TempDir, name: &str, extra_args: &[&str]) -> serde_json::Value {
    let output = dir.child(name);
    let output_arg = output.path().to_str().unwrap().to_string();

    let mut cmd = assert_cmd::cargo_bin_cmd!("costcompare");
    cmd.args(["generate", "-o", &output_arg, "-f", "json"]);
    cmd.args(extra_args);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Datasets written to"));

    serde_json::from_str(&fs::read_to_string(output.path()).unwrap()).unwrap()
}

#[test]
fn generate_writes_yaml_with_every_dataset() {
    let dir = assert_fs::TempDir::new().unwrap();
    let output = dir.child("datasets.yaml");
    let output_arg = output.path().to_str().unwrap().to_string();

    let mut cmd = assert_cmd::cargo_bin_cmd!("costcompare");
    cmd.args(["generate", "-o", &output_arg]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Datasets written to"));

    output.assert(predicate::str::contains("generator: costcompare"));
    output.assert(predicate::str::contains("sample_set:"));
    output.assert(predicate::str::contains("category_breakdown:"));
    output.assert(predicate::str::contains("cost_tree:"));
    output.assert(predicate::str::contains("timeline:"));
    output.assert(predicate::str::contains("flow_graph:"));
    output.assert(predicate::str::contains("seed: 42"));
}

#[test]
fn generate_json_uses_canonical_defaults() {
    let dir = assert_fs::TempDir::new().unwrap();
    let datasets = generate_json(&dir, "datasets.json", &[]);

    assert_eq!(datasets["sample_set"]["seed"], 42);
    assert_eq!(datasets["sample_set"]["samples"].as_array().unwrap().len(), 200);
    assert_eq!(datasets["timeline"]["rows"].as_array().unwrap().len(), 10);
    assert_eq!(datasets["cost_tree"]["nodes"].as_array().unwrap().len(), 6);
    assert_eq!(datasets["flow_graph"]["links"].as_array().unwrap().len(), 4);
    assert_eq!(datasets["flow_graph"]["nodes"][0], "Total VP Shunt");
}

#[test]
fn generate_is_deterministic_for_a_seed() {
    let dir = assert_fs::TempDir::new().unwrap();
    let first = generate_json(&dir, "first.json", &["--seed", "7"]);
    let second = generate_json(&dir, "second.json", &["--seed", "7"]);
    let other = generate_json(&dir, "other.json", &["--seed", "8"]);

    assert_eq!(first["sample_set"], second["sample_set"]);
    assert_ne!(first["sample_set"]["samples"], other["sample_set"]["samples"]);
}

#[test]
fn generate_reads_config_and_lets_flags_override_it() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = dir.child("model.yaml");
    config
        .write_str("seed: 3\nsamples_per_treatment: 10\ntimeline:\n  start_year: 2030\n  years: 3\n")
        .unwrap();
    let config_arg = config.path().to_str().unwrap().to_string();

    let datasets = generate_json(&dir, "datasets.json", &["-c", &config_arg, "--years", "2"]);

    assert_eq!(datasets["sample_set"]["seed"], 3);
    assert_eq!(datasets["sample_set"]["samples"].as_array().unwrap().len(), 20);
    let rows = datasets["timeline"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["year"], 2030);
}

#[test]
fn generate_fails_for_empty_timeline() {
    let dir = assert_fs::TempDir::new().unwrap();
    let output = dir.child("datasets.yaml");
    let output_arg = output.path().to_str().unwrap().to_string();

    let mut cmd = assert_cmd::cargo_bin_cmd!("costcompare");
    cmd.args(["generate", "-o", &output_arg, "--years", "0"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to generate datasets"));

    output.assert(predicate::path::missing());
}

#[test]
fn generate_fails_for_unknown_config_field() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = dir.child("model.yaml");
    config.write_str("iterations: 10\n").unwrap();
    let config_arg = config.path().to_str().unwrap().to_string();
    let output_arg = dir.child("datasets.yaml").path().to_str().unwrap().to_string();

    let mut cmd = assert_cmd::cargo_bin_cmd!("costcompare");
    cmd.args(["generate", "-o", &output_arg, "-c", &config_arg]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to generate datasets"));
}

#[test]
fn generate_logs_and_fails_when_output_cannot_be_written() {
    let dir = assert_fs::TempDir::new().unwrap();
    let output_arg = dir
        .child("missing-dir")
        .child("datasets.yaml")
        .path()
        .to_str()
        .unwrap()
        .to_string();

    let mut cmd = assert_cmd::cargo_bin_cmd!("costcompare");
    cmd.args(["generate", "-o", &output_arg]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("writing datasets failed"))
        .stderr(predicate::str::contains("Failed to write output file"));
}

#[test]
fn generate_fails_when_treatments_share_a_name() {
    let dir = assert_fs::TempDir::new().unwrap();
    let config = dir.child("model.yaml");
    config.write_str("one_time:\n  name: VP Shunt\n").unwrap();
    let config_arg = config.path().to_str().unwrap().to_string();
    let output = dir.child("datasets.yaml");
    let output_arg = output.path().to_str().unwrap().to_string();

    let mut cmd = assert_cmd::cargo_bin_cmd!("costcompare");
    cmd.args(["generate", "-o", &output_arg, "-c", &config_arg]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("both treatments are named VP Shunt"));

    output.assert(predicate::path::missing());
}
