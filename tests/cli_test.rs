use std::io::Write;
use std::process::{Command, Stdio};

fn run_decide(input: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_battleship-ai"))
        .arg("decide")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run decide");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_decide_prints_a_move() {
    let mut grid = vec![0; 100];
    grid[45] = 2;
    let input = serde_json::json!({ "grid": grid, "bombardment_available": true }).to_string();
    let output = run_decide(&input);
    assert!(output.status.success());
    let v: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid json");
    assert_eq!(v["ShotType"], 2);
    assert_eq!(v["Pattern"], "Bombardment");
    assert_eq!(v["Cells"].as_array().unwrap().len(), 5);
}

#[test]
fn test_decide_fails_without_unknown_cells() {
    let input = serde_json::json!({ "grid": vec![1; 100] }).to_string();
    let output = run_decide(&input);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_decide_rejects_garbage() {
    let output = run_decide("{ not json");
    assert!(!output.status.success());
}

#[test]
fn test_hit_weight_must_be_positive() {
    for bad in ["nan", "0", "-1.5", "inf"] {
        let output = Command::new(env!("CARGO_BIN_EXE_battleship-ai"))
            .arg(format!("--hit-weight={}", bad))
            .arg("decide")
            .stdin(Stdio::null())
            .output()
            .expect("failed to run decide");
        assert!(!output.status.success(), "accepted {}", bad);
        assert!(String::from_utf8_lossy(&output.stderr).contains("hit weight"));
    }
}
