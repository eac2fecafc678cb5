//! End-to-end tests for the `mazebot` binary.
//!
//! Offline commands run against `docs/fixtures/mazes`; commands that talk to
//! the API run against a local stub server.

mod common;

use std::fs;

use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

use common::{cli, fixture_json, fixtures_dir, StubServer};

const FIXTURE_MAZE_PATH: &str = "/mazebot/mazes/q6IP1Cvq5bqqfJjs3qPXGg8s2RUTzvQ5s3cqbJBwYtY";

#[test]
fn solve_prints_directions_for_fixture() {
    cli()
        .arg("solve")
        .arg(fixtures_dir().join("1480.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Maze #1480 (5x5)"))
        .stdout(predicate::str::contains("Start (0, 1) -> goal (4, 4)"))
        .stdout(predicate::str::contains("Directions: ESSEESS"));
}

#[test]
fn solve_json_output_carries_path_and_directions() {
    let output = cli()
        .args(["--format", "json", "solve"])
        .arg(fixtures_dir().join("1480.json"))
        .output()
        .expect("run mazebot");
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["directions"], "ESSEESS");
    assert_eq!(value["queue"], "pairing_heap");
    assert_eq!(value["start"]["row"], 0);
    assert_eq!(value["start"]["col"], 1);
    assert_eq!(value["path"].as_array().map(Vec::len), Some(8));
    assert!(value["elapsed_ns"].is_u64());
}

#[test]
fn queue_choice_does_not_change_the_answer() {
    for args in [
        vec!["--queue", "binary-heap"],
        vec!["--queue", "pairing-heap", "--prune"],
    ] {
        cli()
            .args(&args)
            .arg("solve")
            .arg(fixtures_dir().join("1480.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Directions: ESSEESS"));
    }
}

#[test]
fn unreachable_goal_fails() {
    cli()
        .arg("solve")
        .arg(fixtures_dir().join("1481.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no path found"));
}

#[test]
fn missing_maze_file_fails() {
    let temp = tempdir().expect("create temp dir");
    cli()
        .arg("solve")
        .arg(temp.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read maze"));
}

#[test]
fn single_local_solves_cached_maze_offline() {
    cli()
        .arg("--maze-dir")
        .arg(fixtures_dir())
        .args(["single", "--local", "1480"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Directions: ESSEESS"))
        .stdout(predicate::str::contains("Elapsed: "))
        .stdout(predicate::str::contains("Saved to").not());
}

#[test]
fn single_local_reports_uncached_maze() {
    let temp = tempdir().expect("create temp dir");
    cli()
        .arg("--maze-dir")
        .arg(temp.path())
        .args(["single", "--local", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load cached maze 42"))
        .stderr(predicate::str::contains("not cached"));
}

#[test]
fn single_rejects_inverted_size_bounds() {
    let temp = tempdir().expect("create temp dir");
    cli()
        .arg("--maze-dir")
        .arg(temp.path())
        .args(["single", "--min-size", "50", "--max-size", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not exceed"));
}

#[test]
fn single_local_ignores_size_bounds() {
    cli()
        .arg("--maze-dir")
        .arg(fixtures_dir())
        .args(["single", "--local", "1480", "--min-size", "50", "--max-size", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Directions: ESSEESS"));
}

#[test]
fn single_fetches_caches_and_submits() {
    let server = StubServer::start(vec![
        ("200 OK", fixture_json(1480)),
        (
            "200 OK",
            r#"{"result":"success","message":"You solved it","shortestSolutionLength":7,"yourSolutionLength":7,"elapsed":2}"#
                .to_string(),
        ),
    ]);
    let temp = tempdir().expect("create temp dir");

    cli()
        .args(["--api-base", server.base.as_str(), "--maze-dir"])
        .arg(temp.path())
        .args(["single", "--min-size", "5", "--max-size", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Directions: ESSEESS"))
        .stdout(predicate::str::contains("Accepted: You solved it"))
        .stdout(predicate::str::contains("Shortest: 7, Yours: 7"));

    let requests = server.requests(2);
    assert_eq!(requests.len(), 2);
    assert!(
        requests[0].starts_with("GET /mazebot/random?minSize=5&maxSize=5 "),
        "{}",
        requests[0]
    );
    assert!(
        requests[1].starts_with(&format!("POST {FIXTURE_MAZE_PATH} ")),
        "{}",
        requests[1]
    );
    assert!(requests[1].contains(r#"{"directions":"ESSEESS"}"#));
    assert!(temp.path().join("1480.json").is_file());
}

#[test]
fn single_no_save_no_submit_only_fetches() {
    let server = StubServer::start(vec![("200 OK", fixture_json(1480))]);
    let temp = tempdir().expect("create temp dir");

    cli()
        .args(["--api-base", server.base.as_str(), "--maze-dir"])
        .arg(temp.path())
        .args(["single", "--no-save", "--no-submit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Directions: ESSEESS"));

    assert_eq!(server.requests(1).len(), 1);
    assert!(!temp.path().join("1480.json").exists());
}

#[test]
fn single_fails_when_solution_is_rejected() {
    let server = StubServer::start(vec![
        ("200 OK", fixture_json(1480)),
        (
            "400 Bad Request",
            r#"{"result":"failed","message":"Hit a wall at directions[0]"}"#.to_string(),
        ),
    ]);
    let temp = tempdir().expect("create temp dir");

    cli()
        .args(["--api-base", server.base.as_str(), "--maze-dir"])
        .arg(temp.path())
        .args(["single", "--no-save"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Rejected: Hit a wall at directions[0]"))
        .stderr(predicate::str::contains("rejected the solution"));
}

#[test]
fn race_runs_to_certificate_and_appends_log() {
    let server = StubServer::start(vec![
        (
            "200 OK",
            r#"{"message":"Start your engines!","nextMaze":"/mazebot/race/abc"}"#.to_string(),
        ),
        ("200 OK", fixture_json(1480)),
        (
            "200 OK",
            r#"{"result":"finished","message":"You finished the race!","certificate":"/mazebot/race/certificate/xyz"}"#
                .to_string(),
        ),
        (
            "200 OK",
            r#"{"message":"This certifies...","elapsed":42,"completed":"2019-09-04T15:35:01Z"}"#
                .to_string(),
        ),
    ]);
    let temp = tempdir().expect("create temp dir");
    let certs = temp.path().join("completion-certs.txt");
    let certificate_url = format!("{}/mazebot/race/certificate/xyz", server.base);

    cli()
        .args(["--api-base", server.base.as_str(), "race", "--login", "octocat", "--certs"])
        .arg(&certs)
        .assert()
        .success()
        .stdout(predicate::str::contains("Solved Maze #1480 (5x5) in 7 moves"))
        .stdout(predicate::str::contains("You finished the race!"))
        .stdout(predicate::str::contains(certificate_url.as_str()));

    let requests = server.requests(4);
    assert_eq!(requests.len(), 4);
    assert!(requests[0].contains(r#"{"login":"octocat"}"#));
    assert!(requests[1].starts_with("GET /mazebot/race/abc "));
    assert!(requests[3].starts_with("GET /mazebot/race/certificate/xyz "));

    let log = fs::read_to_string(&certs).expect("certificate log written");
    assert_eq!(log, format!("2019-09-04T15:35:01Z - 42:\n{certificate_url}\n"));
}

#[test]
fn race_stops_on_rejected_solution() {
    let server = StubServer::start(vec![
        ("200 OK", r#"{"nextMaze":"/mazebot/race/abc"}"#.to_string()),
        ("200 OK", fixture_json(1480)),
        (
            "400 Bad Request",
            r#"{"result":"failed","message":"Too slow"}"#.to_string(),
        ),
    ]);
    let temp = tempdir().expect("create temp dir");
    let certs = temp.path().join("completion-certs.txt");

    cli()
        .args(["--api-base", server.base.as_str(), "race", "--login", "octocat", "--certs"])
        .arg(&certs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("race stopped at Maze #1480 (5x5): Too slow"));

    assert!(!certs.exists());
}
