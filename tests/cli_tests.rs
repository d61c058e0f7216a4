mod common;

use regex::Regex;
use showdown::card::ShowdownCard;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    stats_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let stats_path = dir.path().join("stats.json");
        let lines = vec![common::shortstop(), common::ace(), common::reliever()];
        let mut file = File::create(&stats_path).unwrap();
        write!(file, "{}", serde_json::to_string_pretty(&lines).unwrap()).unwrap();
        Self { dir, stats_path }
    }

    fn stats(&self) -> &str {
        self.stats_path.to_str().unwrap()
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_showdown"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_build_prints_cards() {
    let ctx = TestContext::new();
    let output = run(&["build", "--stats", ctx.stats()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let text = stdout(&output);
    let points = Regex::new(r"Points: (\d+)0 \(raw").unwrap();
    assert_eq!(points.captures_iter(&text).count(), 3);
    assert!(text.contains("Test Shortstop"));
    assert!(Regex::new(r"On-Base \d+ \| Outs \d+").unwrap().is_match(&text));
    assert!(Regex::new(r"Control \d \| Outs \d+").unwrap().is_match(&text));
}

#[test]
fn test_cli_build_json() {
    let ctx = TestContext::new();
    let output = run(&["build", "--stats", ctx.stats(), "--json", "--edition", "2004"]);
    assert!(output.status.success());

    let cards: Vec<ShowdownCard> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(cards.len(), 3);
    assert!(cards.iter().all(|c| c.points.total % 10 == 0));
    assert_eq!(cards[0].edition.to_string(), "2004");
}

#[test]
fn test_cli_forced_chart() {
    let ctx = TestContext::new();
    let path = ctx.dir.path().join("one.json");
    let mut file = File::create(&path).unwrap();
    write!(file, "{}", serde_json::to_string(&common::shortstop()).unwrap()).unwrap();

    let output = run(&[
        "build",
        "--stats",
        path.to_str().unwrap(),
        "--command",
        "10",
        "--outs",
        "4",
        "--json",
    ]);
    assert!(output.status.success());
    let cards: Vec<ShowdownCard> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(cards[0].chart.key(), (10, 4));
    assert_eq!(cards[0].chart.accuracy, 1.0);
}

#[test]
fn test_cli_command_requires_outs() {
    let ctx = TestContext::new();
    let output = run(&["build", "--stats", ctx.stats(), "--command", "10"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_charts_lists_candidates() {
    let ctx = TestContext::new();
    let output = run(&["charts", "--stats", ctx.stats(), "-n", "3"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert_eq!(text.matches("Candidate charts for").count(), 3);
    assert!(text.contains("Accuracy"));
}

#[test]
fn test_cli_batch_writes_csv() {
    let ctx = TestContext::new();
    let out_path = ctx.dir.path().join("cards.csv");
    let output = run(&[
        "batch",
        "--stats",
        ctx.stats(),
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let mut reader = csv::Reader::from_path(&out_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "name");
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[1][0], "Test Ace");
    assert_eq!(&rows[1][2], "starting_pitcher");
    let points_col = headers.iter().position(|h| h == "points").unwrap();
    for row in &rows {
        assert!(Regex::new(r"^\d+0$").unwrap().is_match(&row[points_col]));
    }
}

#[test]
fn test_cli_min_points_flag_applies() {
    let ctx = TestContext::new();
    let output = run(&["build", "--stats", ctx.stats(), "--json", "--min-points", "990"]);
    assert!(output.status.success());
    let cards: Vec<ShowdownCard> = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(cards.iter().all(|c| c.points.total == 990));
}

#[test]
fn test_cli_missing_stats_file_fails() {
    let output = run(&["build", "--stats", "/nonexistent/stats.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("IO Error"));
}

#[test]
fn test_cli_bad_set_config_fails() {
    let ctx = TestContext::new();
    let set_path = ctx.dir.path().join("set.json");
    let mut file = File::create(&set_path).unwrap();
    writeln!(file, "{{\"edition\": \"expanded\"}}").unwrap();

    let output = run(&[
        "build",
        "--stats",
        ctx.stats(),
        "--set-config",
        set_path.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
}
