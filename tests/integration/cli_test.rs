use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CORRIDOR: &str = "\
#######
#S..#G#
#.#.#.#
#.#...#
#######
";

const WALLED_OFF: &str = "\
#####
#S#G#
#####
";

fn write_maze(dir: &TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

fn amazed() -> Command {
    Command::cargo_bin("amazed").unwrap()
}

#[test]
fn test_solve_finds_path() {
    let dir = TempDir::new().unwrap();
    let maze = write_maze(&dir, "corridor.maze", CORRIDOR);

    amazed()
        .arg("solve")
        .arg(&maze)
        .arg("--workers")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Solving maze"))
        .stdout(predicate::str::contains("Path found (8 steps):"))
        .stdout(predicate::str::contains("8 -> 9 -> 10 -> 17 -> 24 -> 25 -> 26 -> 19 -> 12"))
        .stdout(predicate::str::contains("Search Statistics"));
}

#[test]
fn test_solve_render_inline() {
    let dir = TempDir::new().unwrap();
    let maze = write_maze(&dir, "corridor.maze", CORRIDOR);

    amazed()
        .args(["solve", "--scheduler", "inline", "--render"])
        .arg(&maze)
        .assert()
        .success()
        .stdout(predicate::str::contains("#Soo#G#"))
        .stdout(predicate::str::contains("#.#ooo#"))
        .stdout(predicate::str::contains("Scheduler: inline"));
}

#[test]
fn test_solve_without_path() {
    let dir = TempDir::new().unwrap();
    let maze = write_maze(&dir, "walled.maze", WALLED_OFF);

    amazed()
        .arg("solve")
        .arg(&maze)
        .assert()
        .success()
        .stdout(predicate::str::contains("No path found."));
}

#[test]
fn test_solve_trace_counts_events() {
    let dir = TempDir::new().unwrap();
    let maze = write_maze(&dir, "corridor.maze", CORRIDOR);

    amazed()
        .args(["solve", "--trace", "--fork-after", "0"])
        .arg(&maze)
        .assert()
        .success()
        .stdout(predicate::str::contains("Fork events: 0"))
        .stdout(predicate::str::contains("Tasks created: 1"));
}

#[test]
fn test_solve_missing_file() {
    amazed()
        .args(["solve", "/nonexistent/path.maze"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error solving maze"));
}

#[test]
fn test_solve_malformed_maze() {
    let dir = TempDir::new().unwrap();
    let maze = write_maze(&dir, "bad.maze", "#S?#\n");

    amazed()
        .arg("solve")
        .arg(&maze)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown maze cell '?'"));
}

#[test]
fn test_generate_then_solve() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("generated.maze");

    amazed()
        .args(["generate", "--width", "15", "--height", "8", "--seed", "11", "--loops", "5"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 31x17 maze"));

    amazed()
        .arg("solve")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Path found"));
}

#[test]
fn test_generate_to_stdout_is_deterministic() {
    let first = amazed()
        .args(["generate", "--width", "5", "--height", "5", "--seed", "3"])
        .output()
        .unwrap();
    let second = amazed()
        .args(["generate", "--width", "5", "--height", "5", "--seed", "3"])
        .output()
        .unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(String::from_utf8_lossy(&first.stdout).lines().count(), 11);
}

#[test]
fn test_requires_subcommand() {
    amazed().assert().failure();
}
