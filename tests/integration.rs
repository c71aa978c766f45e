use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn seo_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("seo");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let out_dir = root.join("dist");
    fs::create_dir_all(&out_dir).unwrap();

    let config_content = format!(
        r#"[site]
base_url = "https://khadamat.example.sa"
brand_name = "Khadamat"
locale = "ar"

[generation]
ngram_size = 2
skip_distance = 1

[output]
dir = "{}/dist"

[[catalog.services]]
slug = "sofa-cleaning"
name_en = "Sofa Cleaning"
name_ar = "تنظيف كنب"
category = "cleaning"
"#,
        root.display()
    );

    let config_path = root.join("seo.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_seo(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = seo_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run seo binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_analyze_reports_entities() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_seo(
        &config_path,
        &["analyze", "Emergency AC Repair in Riyadh with upfront cost"],
    );
    assert!(success, "analyze failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("SERVICE"));
    assert!(stdout.contains("LOCATION"));
}

#[test]
fn test_analyze_json_output() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_seo(
        &config_path,
        &["analyze", "plumbing in Jeddah", "--json"],
    );
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["entities"].as_array().unwrap().len() >= 2);
    assert!(parsed["ngrams"].is_array());
    assert!(parsed["search_intents"].is_array());
}

#[test]
fn test_analyze_requires_input() {
    let (_tmp, config_path) = setup_test_env();
    let (_, _, success) = run_seo(&config_path, &["analyze"]);
    assert!(!success);
}

#[test]
fn test_generate_from_catalog() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_seo(
        &config_path,
        &["generate", "--service", "ac-repair", "--city", "riyadh"],
    );
    assert!(success, "generate failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("AC Repair"));
    assert!(stdout.contains("<h1>"));
    assert!(stdout.contains("authority:"));
}

#[test]
fn test_generate_json_has_metadata() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_seo(
        &config_path,
        &[
            "generate",
            "--service",
            "sofa-cleaning",
            "--city",
            "jeddah",
            "--json",
        ],
    );
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["title"].as_str().unwrap().contains("Sofa Cleaning"));
    assert!(parsed["content"].as_str().unwrap().contains("<h1>"));
    assert!(parsed["topical_coverage"]["coverage_score"].is_number());
}

#[test]
fn test_generate_unknown_service_fails() {
    let (_tmp, config_path) = setup_test_env();
    let (_, stderr, success) = run_seo(
        &config_path,
        &["generate", "--service", "no-such", "--city", "riyadh"],
    );
    assert!(!success);
    assert!(stderr.contains("Unknown service"));
}

#[test]
fn test_render_writes_pages_and_skips_unchanged() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_seo(
        &config_path,
        &["render", "sofa-cleaning", "--progress", "off"],
    );
    assert!(success, "render failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("written: 9"), "stdout: {}", stdout);

    let page = tmp.path().join("dist/services/sofa-cleaning/riyadh.html");
    let html = fs::read_to_string(&page).unwrap();
    assert!(html.contains("dir=\"rtl\""));
    assert!(html.contains("Khadamat"));

    // Second render: nothing changed, nothing written.
    let (stdout2, _, success2) = run_seo(
        &config_path,
        &["render", "sofa-cleaning", "--progress", "off"],
    );
    assert!(success2);
    assert!(stdout2.contains("written: 0"), "stdout: {}", stdout2);
    assert!(stdout2.contains("unchanged: 9"), "stdout: {}", stdout2);
}

#[test]
fn test_render_dry_run() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_seo(
        &config_path,
        &["render", "all", "--dry-run", "--limit", "3", "--progress", "off"],
    );
    assert!(success);
    assert!(stdout.contains("3 page(s) selected"));
    assert!(!tmp.path().join("dist/services").exists());
}

#[test]
fn test_catalog_lists_config_and_builtin() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_seo(&config_path, &["catalog"]);
    assert!(success);
    assert!(stdout.contains("sofa-cleaning"));
    assert!(stdout.contains("ac-repair"));
    assert!(stdout.contains("riyadh"));
    assert!(stdout.contains("config"));
    assert!(stdout.contains("built-in"));
}

#[test]
fn test_stats_after_render() {
    let (_tmp, config_path) = setup_test_env();

    run_seo(
        &config_path,
        &["render", "sofa-cleaning:riyadh", "--progress", "off"],
    );
    let (stdout, _, success) = run_seo(&config_path, &["stats"]);
    assert!(success);
    assert!(stdout.contains("sofa-cleaning"));
    assert!(stdout.contains("Pages:"));
}

#[test]
fn test_invalid_config_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("seo.toml");
    fs::write(&config_path, "[generation]\nngram_size = 0\n").unwrap();

    let (_, stderr, success) = run_seo(&config_path, &["catalog"]);
    assert!(!success);
    assert!(stderr.contains("ngram_size"));
}

#[test]
fn test_missing_config_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("does-not-exist.toml");

    let (stdout, stderr, success) = run_seo(&config_path, &["analyze", "pest control visit"]);
    assert!(success, "stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("SERVICE"));
}
