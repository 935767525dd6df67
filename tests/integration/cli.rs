use std::fs;

use crate::common::{
    make_temp_dir, normalized_lines, read_log_contents, run, run_with_input, write_valid_config,
};

#[test]
fn init_writes_default_config_once() {
    let dir = make_temp_dir("cli");
    let first = run(&dir, &["init"]);
    assert!(first.status.success());
    assert!(dir.join("config.json").exists());
    let stdout = String::from_utf8_lossy(&first.stdout);
    assert!(stdout.contains("Wrote default configuration to config.json"));

    let second = run(&dir, &["init"]);
    assert!(!second.status.success());
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(
        stderr.contains("already exists"),
        "stderr was: {stderr}"
    );
}

#[test]
fn config_flag_redirects_init() {
    let dir = make_temp_dir("cli");
    let output = run(&dir, &["--config", "nested/holidaze.json", "init"]);
    assert!(output.status.success());
    assert!(dir.join("nested").join("holidaze.json").exists());
    assert!(!dir.join("config.json").exists());
}

#[test]
fn no_command_prints_general_manual() {
    let dir = make_temp_dir("cli");
    let output = run(&dir, &[]);
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert_eq!(lines[0], "NAME");
    assert!(lines
        .iter()
        .any(|l| l == "holidaze - Browse and book Holidaze venues."));
}

#[test]
fn help_works_without_config() {
    let dir = make_temp_dir("cli");
    let page = run(&dir, &["help", "calendar"]);
    assert!(page.status.success());
    let stdout = String::from_utf8_lossy(&page.stdout);
    assert!(stdout.contains("holidaze calendar <venue-id> [YYYY-MM]"));

    let usage = run(&dir, &["help", "-h"]);
    assert!(usage.status.success());
    assert_eq!(
        normalized_lines(&usage.stdout),
        vec!["Usage: holidaze help [command|topic]"]
    );
}

#[test]
fn commands_need_a_config_file() {
    let dir = make_temp_dir("cli");
    let output = run(&dir, &["venues"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Run 'holidaze init' to create one."),
        "stderr was: {stderr}"
    );
}

#[test]
fn unknown_command_and_flag_fail() {
    let dir = make_temp_dir("cli");
    let unknown = run(&dir, &["teleport"]);
    assert!(!unknown.status.success());
    assert_eq!(
        normalized_lines(&unknown.stderr),
        vec!["Unknown command: teleport"]
    );

    let flag = run(&dir, &["--verbose", "venues"]);
    assert!(!flag.status.success());
    assert_eq!(
        normalized_lines(&flag.stderr),
        vec!["Unknown argument: --verbose"]
    );
}

#[test]
fn config_shows_table_and_sets_values() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);

    let shown = run(&dir, &["config"]);
    assert!(shown.status.success());
    let lines = normalized_lines(&shown.stdout);
    assert!(lines.iter().any(|l| l == "CONFIG"));
    assert!(lines.iter().any(|l| l.contains("VENUES_PAGE_SIZE")));

    let set = run(&dir, &["config", "venues_page_size", "25"]);
    assert!(set.status.success());
    let stdout = String::from_utf8_lossy(&set.stdout);
    assert!(stdout.contains("Updated VENUES_PAGE_SIZE: 10 -> 25"));

    let saved = fs::read_to_string(dir.join("config.json")).unwrap();
    assert!(saved.contains("25"));
    let log = read_log_contents(&dir).expect("a log file should exist");
    assert!(log.contains("Updated VENUES_PAGE_SIZE: 10 -> 25"));
}

#[test]
fn invalid_config_value_is_rejected() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);
    let output = run(&dir, &["config", "VENUES_PAGE_SIZE", "0"]);
    assert!(!output.status.success());
    let saved = fs::read_to_string(dir.join("config.json")).unwrap();
    assert!(saved.contains("\"value\": 10"));
}

#[test]
fn logout_when_signed_out_is_harmless() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);
    let output = run(&dir, &["logout"]);
    assert!(output.status.success());
    assert_eq!(normalized_lines(&output.stdout), vec!["Not signed in."]);
}

#[test]
fn corrupt_session_counts_as_signed_out() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);
    fs::write(dir.join("session.json"), "{not json").unwrap();

    let output = run(&dir, &["whoami"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("You are not signed in."), "stderr was: {stderr}");

    let log = read_log_contents(&dir).expect("a log file should exist");
    assert!(log.contains("Ignoring stored session"));
}

#[test]
fn book_help_prints_usage_only() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);
    let output = run(&dir, &["book", "-h"]);
    assert!(output.status.success());
    assert_eq!(
        normalized_lines(&output.stdout),
        vec!["Usage: holidaze book <venue-id> <from> <to> <guests>"]
    );
}

#[test]
fn booking_checks_session_before_network() {
    let dir = make_temp_dir("cli");
    write_valid_config(&dir);
    let output = run_with_input(&dir, &["book", "v-1", "2099-01-01", "2099-01-03", "2"], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("You are not signed in."), "stderr was: {stderr}");
}
