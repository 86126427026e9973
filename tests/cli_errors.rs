//! Exit codes and error reporting.

mod common;

use common::*;

#[test]
fn missing_settings_is_fatal() {
    let env = TestEnv::new();

    for command in ["apply", "remove", "status", "list"] {
        let result = env.run(&[command]);
        assert_eq!(result.exit_code, 1, "{command}: {}", result.combined_output());
        assert!(result.stderr.contains("ezproxy init"), "{command}: {}", result.stderr);
    }
}

#[test]
fn missing_settings_in_json_mode_emits_error_event() {
    let env = TestEnv::new();

    let result = env.run(&["apply", "--json"]);

    assert_eq!(result.exit_code, 1);
    let error = result.event("error");
    assert!(error["message"].as_str().unwrap().contains("cannot apply"));
}

#[test]
fn malformed_settings_is_fatal() {
    let env = TestEnv::initialized("proxy: [not, a, map\n");

    let result = env.run(&["apply"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("--force"), "{}", result.stderr);
}

#[test]
fn unknown_adapter_name() {
    let env = TestEnv::initialized(SETTINGS);

    let result = env.run(&["enable", "nonexistent"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("nonexistent"), "{}", result.stderr);
    assert_eq!(env.read_settings(), SETTINGS);
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let env = TestEnv::new();

    let result = env.run(&["frobnicate"]);

    assert_eq!(result.exit_code, 1);
}

#[test]
fn help_exits_zero() {
    let env = TestEnv::new();

    let result = env.run(&["--help"]);

    assert!(result.success);
    assert!(result.stdout.contains("apply"));
}

#[test]
fn unknown_keys_only_warn() {
    let env = TestEnv::initialized(&format!("{SETTINGS}colour: blue\n"));

    let result = env.run(&["list"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.combined_output().contains("colour"));
}
