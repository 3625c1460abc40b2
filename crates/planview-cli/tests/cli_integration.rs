use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

fn planview() -> Command {
    let mut cmd = Command::cargo_bin("planview").unwrap();
    // point the per-user config lookup at a directory with no config in it
    let isolated = std::env::temp_dir().join("planview-cli-tests");
    cmd.env_remove("PLANVIEW_CONFIG")
        .env("XDG_CONFIG_HOME", &isolated)
        .env("HOME", &isolated);
    cmd
}

fn run_json(args: &[&str]) -> Value {
    let output = planview()
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_str(&String::from_utf8_lossy(&output)).expect("Failed to parse JSON output")
}

mod plan_tests {
    use super::*;

    #[test]
    fn test_plans_list() {
        let json = run_json(&["plans"]);
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["count"], 3);
        assert_eq!(json["data"]["items"][0]["title"], "Q1 2026 Strategy");
    }
}

mod objective_tests {
    use super::*;

    #[test]
    fn test_objectives_are_most_recent_first() {
        let json = run_json(&["objectives", "--plan", "1"]);
        assert_eq!(json["data"]["count"], 1500);
        assert_eq!(json["data"]["items"][0]["counter"], 1500);
        assert_eq!(json["data"]["items"][0]["id"], 11500);
    }

    #[test]
    fn test_objectives_query_filters_by_number() {
        let json = run_json(&["objectives", "--plan", "1", "--query", "1420"]);
        assert_eq!(json["data"]["count"], 1);
        assert_eq!(json["data"]["items"][0]["counter"], 1420);
    }

    #[test]
    fn test_objective_get_includes_sections() {
        let json = run_json(&["objective", "--plan", "2", "--id", "20007"]);
        assert_eq!(json["data"]["id"], 20007);
        assert_eq!(json["data"]["counter"], 7);
        assert!(json["data"]["task"].as_str().is_some());
    }

    #[test]
    fn test_objective_from_other_plan_fails() {
        planview()
            .args(["objective", "--plan", "1", "--id", "20007"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"success\":false"))
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn test_live_objective() {
        let json = run_json(&["live", "--plan", "1"]);
        assert!(json["data"]["live"]["title"].as_str().is_some());
    }
}

mod steps_tests {
    use super::*;

    #[test]
    fn test_steps_loads_pages_in_order() {
        let json = run_json(&["steps", "--objective", "10001", "--page", "5"]);
        let data = &json["data"];
        assert_eq!(data["page"], 5);
        assert_eq!(data["total"], 500);
        assert_eq!(data["total_pages"], 34);
        assert_eq!(data["pages_loaded"], 6);
        assert_eq!(data["items"].as_array().unwrap().len(), 15);
    }

    #[test]
    fn test_steps_last_page_is_short() {
        let json = run_json(&["steps", "--objective", "10001", "--page", "33"]);
        assert_eq!(json["data"]["items"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_steps_custom_page_size() {
        let json = run_json(&["steps", "--objective", "10001", "--page-size", "100"]);
        assert_eq!(json["data"]["total_pages"], 5);
        assert_eq!(json["data"]["items"].as_array().unwrap().len(), 100);
    }

    #[test]
    fn test_steps_page_out_of_range() {
        planview()
            .args(["steps", "--objective", "10001", "--page", "40"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("out of range"));
    }

    #[test]
    fn test_steps_far_out_of_range_reports_page_count() {
        planview()
            .args(["steps", "--objective", "10001", "--page", "999"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Page 999 is out of range (34 pages)"));
    }

    #[test]
    fn test_steps_unknown_objective() {
        planview()
            .args(["steps", "--objective", "99999999"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found"));
    }
}

mod window_tests {
    use super::*;

    #[test]
    fn test_window_adds_overscan() {
        let json = run_json(&["window", "--count", "1500", "--offset", "100", "--height", "20"]);
        let data = &json["data"];
        assert_eq!(data["start_index"], 90);
        assert_eq!(data["end_index"], 130);
        assert_eq!(data["realized"], 40);
        assert_eq!(data["total_extent"], 1500);
    }

    #[test]
    fn test_window_at_maximum_offset() {
        let offset = u64::MAX.to_string();
        let json = run_json(&["window", "--count", "10", "--offset", &offset, "--height", "10", "--overscan", "2"]);
        assert_eq!(json["data"]["start_index"], 8);
        assert_eq!(json["data"]["end_index"], 10);
    }

    #[test]
    fn test_window_empty_list() {
        let json = run_json(&["window", "--count", "0", "--height", "20"]);
        assert_eq!(json["data"]["realized"], 0);
        assert_eq!(json["data"]["first_offset"], Value::Null);
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(&file, "page_size = 50\noverscan = 4\n").unwrap();

        let output = planview()
            .args(["--config", file.to_str().unwrap(), "config"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let json: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["data"]["page_size"], 50);
        assert_eq!(json["data"]["overscan"], 4);
        assert_eq!(json["data"]["debounce_ms"], 300);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(&file, "page_size = 0\n").unwrap();

        planview()
            .args(["--config", file.to_str().unwrap(), "plans"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("page_size must be positive"));
    }
}

#[test]
fn test_completions() {
    planview()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("planview"));
}
