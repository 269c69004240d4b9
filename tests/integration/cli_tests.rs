//! Exit-code tests for the two binaries
//!
//! Each test runs a binary with a cleared environment from an empty working
//! directory, so neither the caller's variables nor a stray `.env` file leak
//! in. None of these cases gets as far as talking to a real broker.

use std::process::{Command, Output};
use tempfile::TempDir;

const PRODUCER: &str = env!("CARGO_BIN_EXE_crawl-producer");
const WORKER: &str = env!("CARGO_BIN_EXE_crawl-worker");

/// Nothing listens on port 1, so connecting is refused immediately
const UNREACHABLE_BROKER: &str = "amqp://127.0.0.1:1/";

fn run(bin: &str, args: &[&str], vars: &[(&str, &str)]) -> Output {
    let dir = TempDir::new().expect("Failed to create temp dir");
    Command::new(bin)
        .args(args)
        .env_clear()
        .envs(vars.iter().copied())
        .current_dir(dir.path())
        .output()
        .expect("Failed to run binary")
}

fn combined(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn test_producer_without_broker_url_exits_1() {
    let output = run(PRODUCER, &["https://example.com/"], &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("RABBITMQ_URL"));
}

#[test]
fn test_producer_without_seed_prints_usage_and_exits_1() {
    let output = run(PRODUCER, &[], &[("RABBITMQ_URL", UNREACHABLE_BROKER)]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_producer_with_relative_seed_exits_1() {
    let output = run(PRODUCER, &["/not/absolute"], &[("RABBITMQ_URL", UNREACHABLE_BROKER)]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_producer_with_unreachable_broker_exits_1() {
    let output = run(
        PRODUCER,
        &["https://example.com/"],
        &[("RABBITMQ_URL", UNREACHABLE_BROKER)],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("Failed to connect to the message broker"));
}

#[test]
fn test_producer_help_exits_0() {
    let output = run(PRODUCER, &["--help"], &[]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}

#[test]
fn test_worker_without_broker_url_exits_1() {
    let output = run(WORKER, &[], &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("RABBITMQ_URL"));
}

#[test]
fn test_worker_with_unreachable_broker_exits_1() {
    let output = run(WORKER, &[], &[("RABBITMQ_URL", UNREACHABLE_BROKER)]);

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("Failed to connect to the message broker"));
}

#[test]
fn test_worker_with_bad_timeout_exits_1() {
    let output = run(
        WORKER,
        &[],
        &[("RABBITMQ_URL", UNREACHABLE_BROKER), ("TIMEOUT", "soon")],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("TIMEOUT"));
}

#[test]
fn test_worker_rejects_unknown_argument_with_exit_1() {
    let output = run(WORKER, &["--bogus"], &[("RABBITMQ_URL", UNREACHABLE_BROKER)]);

    assert_eq!(output.status.code(), Some(1));
}
