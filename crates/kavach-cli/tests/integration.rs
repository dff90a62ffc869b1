#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kavach(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kavach").unwrap();
    cmd.current_dir(dir.path()).env_remove("KAVACH_CONFIG");
    cmd
}

// ---------------------------------------------------------------------------
// kavach snapshot
// ---------------------------------------------------------------------------

#[test]
fn snapshot_json_is_initial_state() {
    let dir = TempDir::new().unwrap();
    let output = kavach(&dir)
        .args(["snapshot", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tick"], 0);
    assert_eq!(json["proximity"]["left"], 5.7);
    assert_eq!(json["subsystem_status"]["ai"], "Processing");
    assert_eq!(json["actions"][0]["action"], "Emergency stop triggered");
}

#[test]
fn snapshot_table_lists_sections() {
    let dir = TempDir::new().unwrap();
    kavach(&dir)
        .arg("snapshot")
        .assert()
        .success()
        .stdout(predicate::str::contains("subsystems 5/6 healthy"))
        .stdout(predicate::str::contains("TOO CLOSE"))
        .stdout(predicate::str::contains("Worker detected in blind spot"))
        .stdout(predicate::str::contains("Brake System"));
}

// ---------------------------------------------------------------------------
// kavach simulate
// ---------------------------------------------------------------------------

#[test]
fn simulate_emits_one_snapshot_per_tick() {
    let dir = TempDir::new().unwrap();
    let output = kavach(&dir)
        .args(["simulate", "--ticks", "25", "--seed", "9", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshots: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshots.len(), 25);
    for (i, s) in snapshots.iter().enumerate() {
        assert_eq!(s["tick"], (i + 1) as u64);
        assert!(s["alerts"].as_array().unwrap().len() <= 3);
        assert!(s["actions"].as_array().unwrap().len() <= 3);
        assert_eq!(s["subsystem_status"].as_object().unwrap().len(), 6);
        for key in [
            "collision_prevention",
            "geofence_compliance",
            "operator_alertness",
            "system_health",
        ] {
            let v = s["safety_metrics"][key].as_f64().unwrap();
            assert!((90.0..=100.0).contains(&v));
        }
    }
}

#[test]
fn simulate_with_seed_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let run = || {
        let output = kavach(&dir)
            .args(["simulate", "--ticks", "10", "--seed", "1234", "--json"])
            .output()
            .unwrap();
        let snapshots: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
        snapshots
            .into_iter()
            .map(|s| (s["proximity"].clone(), s["safety_metrics"].clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn simulate_realtime_prints_every_tick_once() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("kavach.yaml"), "tick_interval_ms: 5\n").unwrap();
    let output = kavach(&dir)
        .args(["simulate", "--realtime", "--ticks", "40", "--seed", "3", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshots: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let ticks: Vec<u64> = snapshots.iter().map(|s| s["tick"].as_u64().unwrap()).collect();
    assert_eq!(ticks, (1..=40).collect::<Vec<_>>());
}

#[test]
fn simulate_zero_ticks_prints_empty_array() {
    let dir = TempDir::new().unwrap();
    let output = kavach(&dir)
        .args(["simulate", "--ticks", "0", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let snapshots: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(snapshots.is_empty());
}

#[test]
fn simulate_respects_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("kavach.yaml"),
        "alert_probability: 1.0\nfeed_capacity: 2\n",
    )
    .unwrap();
    let output = kavach(&dir)
        .args(["simulate", "--ticks", "3", "--seed", "5", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshots: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let last = &snapshots[2];
    let ids: Vec<u64> = last["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![6, 5]);
}

#[test]
fn simulate_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "feed_capacity: 0\n").unwrap();
    kavach(&dir)
        .args(["simulate", "--ticks", "1", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("feed_capacity"));
}

// ---------------------------------------------------------------------------
// kavach config
// ---------------------------------------------------------------------------

#[test]
fn config_init_writes_defaults_once() {
    let dir = TempDir::new().unwrap();
    kavach(&dir).args(["config", "init"]).assert().success();

    let yaml = std::fs::read_to_string(dir.path().join("kavach.yaml")).unwrap();
    let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed["tick_interval_ms"].as_u64(), Some(1000));

    kavach(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    kavach(&dir)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn config_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("kavach.yaml"),
        "action_probability: 2.0\n",
    )
    .unwrap();
    kavach(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("action_probability"));
}

#[test]
fn config_validate_defaults_ok() {
    let dir = TempDir::new().unwrap();
    kavach(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid."));
}

#[test]
fn missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    kavach(&dir)
        .args(["snapshot", "--config", "nope.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
