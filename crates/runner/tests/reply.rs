//! Tests for the runner's reply mapping and argument parsing.

use assert_matches::assert_matches;
use clap::Parser;

use appdeck_core::error::CoreError;
use appdeck_core::scripting::report::ExecutionResult;
use appdeck_runner::cli::{Cli, Command};
use appdeck_runner::reply::{execution_reply, ReplyBody, ReplyStatus, NOT_FOUND_MESSAGE};

fn failed_result() -> ExecutionResult {
    ExecutionResult {
        success: false,
        output: "partial".to_string(),
        exit_code: 2,
        error: None,
        details: None,
        console_output: "执行命令: python3 /tmp/x.py\n\npartial".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Reply mapping
// ---------------------------------------------------------------------------

#[test]
fn executed_script_is_ok_even_when_it_failed() {
    let reply = execution_reply(Ok(failed_result()));

    assert_eq!(reply.status, ReplyStatus::Ok);
    assert_eq!(reply.exit_code(), 0);
    assert_matches!(&reply.body, ReplyBody::Executed(r) if r.exit_code == 2);

    let json = serde_json::to_value(&reply.body).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["exit_code"], 2);
    assert!(json.get("error").is_none());
}

#[test]
fn missing_script_is_not_found() {
    let reply = execution_reply(Err(CoreError::NotFound {
        entity: "script",
        id: 42,
    }));

    assert_eq!(reply.status, ReplyStatus::NotFound);
    assert_eq!(reply.exit_code(), 1);
    assert_eq!(
        serde_json::to_value(&reply.body).unwrap(),
        serde_json::json!({ "success": false, "message": NOT_FOUND_MESSAGE })
    );
}

#[test]
fn store_failure_is_an_error_reply() {
    let reply = execution_reply(Err(CoreError::Internal("disk I/O error".to_string())));

    assert_eq!(reply.status, ReplyStatus::Error);
    assert_eq!(reply.exit_code(), 2);
    assert_matches!(
        &reply.body,
        ReplyBody::Message { success: false, message } if message.contains("disk I/O error")
    );
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

#[test]
fn parses_run_subcommand() {
    let cli = Cli::try_parse_from(["appdeck-runner", "run", "7"]).unwrap();
    assert_eq!(cli.command, Command::Run { id: 7 });
}

#[test]
fn parses_add_with_options() {
    let cli = Cli::try_parse_from([
        "appdeck-runner",
        "add",
        "report",
        "report.py",
        "--params",
        r#"{"day": 1}"#,
        "--tags",
        "daily",
    ])
    .unwrap();

    assert_matches!(
        cli.command,
        Command::Add { name, file, params: Some(p), tags: Some(t), description: None }
            if name == "report"
                && file.to_str() == Some("report.py")
                && p == r#"{"day": 1}"#
                && t == "daily"
    );
}

#[test]
fn reorder_requires_ids() {
    assert!(Cli::try_parse_from(["appdeck-runner", "reorder"]).is_err());
    let cli = Cli::try_parse_from(["appdeck-runner", "reorder", "3", "1", "2"]).unwrap();
    assert_eq!(cli.command, Command::Reorder { ids: vec![3, 1, 2] });
}

#[test]
fn rejects_non_numeric_id() {
    assert!(Cli::try_parse_from(["appdeck-runner", "run", "abc"]).is_err());
}
