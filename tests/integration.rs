use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn cgx_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("cgx");
    path
}

/// Fixture texts mirror the kind of material the dashboard ingests:
/// a planning document, meeting notes, and an off-topic note.
fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let files_dir = root.join("files");
    fs::create_dir_all(&files_dir).unwrap();
    fs::write(
        files_dir.join("campaign.md"),
        "Project Planning Document\n\nObjective: Complete the quarterly marketing campaign\n\nKey components: market research and competitor analysis, creative asset development, campaign timeline and budget allocation.",
    )
    .unwrap();
    fs::write(
        files_dir.join("kickoff.txt"),
        "Meeting Notes - Project Kickoff\n\nAttendees: Sarah, Mike, Alex\n\nAgenda: project scope and deliverables, timeline and milestones.\n\nAction Items: finalize project requirements, set up development environment.",
    )
    .unwrap();
    fs::write(
        files_dir.join("recipe.txt"),
        "Sourdough starter: flour, water, salt. Feed twice daily.",
    )
    .unwrap();

    (tmp, files_dir)
}

fn run_cgx(cwd: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = cgx_binary();
    let output = Command::new(&binary)
        .current_dir(cwd)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run cgx binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_extract_reports_every_source() {
    let (tmp, files) = setup_test_env();

    let (stdout, stderr, success) =
        run_cgx(tmp.path(), &["extract", files.to_str().unwrap()]);
    assert!(success, "extract failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("campaign.md"));
    assert!(stdout.contains("kickoff.txt"));
    assert!(stdout.contains("extracted 3 / 3 sources"));
}

#[test]
fn test_analyze_assigns_categories() {
    let (tmp, files) = setup_test_env();

    let (stdout, _, success) = run_cgx(tmp.path(), &["analyze", files.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains("project-management"));
    assert!(stdout.contains("meeting-notes"));
    // The recipe matches nothing and falls back to the general tag.
    assert!(stdout.contains("general"));
    assert!(stdout.contains("analyzed 3 items"));
}

#[test]
fn test_analyze_json_output_is_parseable() {
    let (tmp, files) = setup_test_env();

    let (stdout, _, success) =
        run_cgx(tmp.path(), &["analyze", files.to_str().unwrap(), "--json"]);
    assert!(success);

    let items: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 3);
    for item in items {
        assert!(item["relevance_score"].as_f64().is_some());
        assert!(!item["categories"].as_array().unwrap().is_empty());
    }
}

#[test]
fn test_relate_finds_overlapping_documents() {
    let tmp = TempDir::new().unwrap();
    let files = tmp.path().join("files");
    fs::create_dir_all(&files).unwrap();
    // Near-identical bodies so the pair clears the similarity threshold.
    fs::write(
        files.join("a.md"),
        "project timeline milestone budget review",
    )
    .unwrap();
    fs::write(
        files.join("b.md"),
        "project timeline milestone budget planning",
    )
    .unwrap();

    let (stdout, _, success) = run_cgx(
        tmp.path(),
        &["relate", files.to_str().unwrap(), "--json"],
    );
    assert!(success);

    let rels: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let rels = rels.as_array().unwrap();
    assert_eq!(rels.len(), 1);
    assert!(rels[0]["similarity"].as_f64().unwrap() > 0.3);
    assert!(rels[0]["common_categories"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c == "project-management"));
}

#[test]
fn test_relate_reports_no_relationships_for_disjoint_content() {
    let tmp = TempDir::new().unwrap();
    let files = tmp.path().join("files");
    fs::create_dir_all(&files).unwrap();
    fs::write(files.join("a.md"), "alpha beta gamma delta").unwrap();
    fs::write(files.join("b.md"), "epsilon zeta eta theta").unwrap();

    let (stdout, _, success) = run_cgx(tmp.path(), &["relate", files.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains("No relationships above threshold."));
}

#[test]
fn test_plan_generates_expected_checklist() {
    let (tmp, files) = setup_test_env();

    let (stdout, _, success) = run_cgx(
        tmp.path(),
        &[
            "plan",
            files.to_str().unwrap(),
            "--goal",
            "Ship the campaign",
            "--json",
        ],
    );
    assert!(success);

    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let steps = plan["steps"].as_array().unwrap();
    let titles: Vec<&str> = steps.iter().map(|s| s["title"].as_str().unwrap()).collect();

    // Category-driven steps first in table order, then the goal step.
    assert_eq!(titles.first().unwrap(), &"Define Project Scope");
    assert_eq!(titles.last().unwrap(), &"Work towards: Ship the campaign");
    assert!(titles.contains(&"Follow Up on Action Items"));

    // 1 goal + 3 items → score 5 → medium.
    assert_eq!(plan["priority"], "medium");
    assert!(plan["estimated_duration"].as_str().is_some());
}

#[test]
fn test_plan_without_goals_or_matches_is_empty() {
    let tmp = TempDir::new().unwrap();
    let files = tmp.path().join("files");
    fs::create_dir_all(&files).unwrap();
    fs::write(files.join("a.md"), "nothing actionable here").unwrap();

    let (stdout, _, success) = run_cgx(
        tmp.path(),
        &["plan", files.to_str().unwrap(), "--json"],
    );
    assert!(success);

    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(plan["steps"].as_array().unwrap().len(), 0);
    assert_eq!(plan["priority"], "low");
    assert_eq!(plan["estimated_duration"], "1 week");
}

#[test]
fn test_suggest_honors_done_markers() {
    let (tmp, files) = setup_test_env();

    let (stdout, _, success) = run_cgx(tmp.path(), &["suggest", files.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains("Review and update project timelines"));
    assert!(stdout.contains("Schedule follow-up meetings"));

    let (stdout, _, success) = run_cgx(
        tmp.path(),
        &[
            "suggest",
            files.to_str().unwrap(),
            "--done",
            "timeline-review",
            "--done",
            "followup-complete",
            "--done",
            "analysis-complete",
        ],
    );
    assert!(success);
    assert!(stdout.contains("No suggestions."));
}

#[test]
fn test_export_writes_snapshot_file() {
    let (tmp, files) = setup_test_env();
    let out = tmp.path().join("snapshot.json");

    let (_, _, success) = run_cgx(
        tmp.path(),
        &[
            "export",
            files.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ],
    );
    assert!(success);

    let written = fs::read_to_string(&out).unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(snapshot["content_items"].as_array().unwrap().len(), 3);
    assert!(snapshot["export_date"].as_str().is_some());
}

#[test]
fn test_analytics_summarizes_categories() {
    let (tmp, files) = setup_test_env();

    let (stdout, _, success) = run_cgx(tmp.path(), &["analytics", files.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains("Library Analytics"));
    assert!(stdout.contains("project-management"));
    assert!(stdout.contains("general"));
}

#[test]
fn test_missing_input_fails() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, success) = run_cgx(tmp.path(), &["analyze", "/no/such/path"]);
    assert!(!success);
    assert!(stderr.contains("does not exist"));
}

#[test]
fn test_url_input_becomes_error_item() {
    let tmp = TempDir::new().unwrap();

    let (stdout, _, success) = run_cgx(
        tmp.path(),
        &["extract", "https://youtu.be/dQw4w9WgXcQ"],
    );
    assert!(success);
    assert!(stdout.contains("error"));
    assert!(stdout.contains("extracted 0 / 1 sources"));
}

#[test]
fn test_config_file_overrides_globs() {
    let (tmp, files) = setup_test_env();

    let config_dir = tmp.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("cognix.toml"),
        "[ingest]\ninclude_globs = [\"**/*.md\"]\n",
    )
    .unwrap();

    // Only campaign.md matches the narrowed globs.
    let (stdout, _, success) = run_cgx(tmp.path(), &["analyze", files.to_str().unwrap()]);
    assert!(success, "analyze with config failed: {}", stdout);
    assert!(stdout.contains("analyzed 1 items"));
}
