use holidaze::config::{Config, ConfigKey};
use holidaze::errors::Error;

use crate::common::{make_temp_dir, run};

#[test]
fn init_output_loads_with_defaults() {
    let dir = make_temp_dir("config");
    let output = run(&dir, &["init"]);
    assert!(output.status.success());

    let cfg = Config::load_from(dir.join("config.json")).expect("config should load");
    assert!(cfg.api_base_url().starts_with("https://"));
    assert_eq!(cfg.api_key(), None);
    assert_eq!(cfg.venues_page_size(), 20);
    assert!(cfg.file_logging_enabled());
    assert_eq!(cfg.rows().len(), 5);
}

#[test]
fn edits_persist_across_processes() {
    let dir = make_temp_dir("config");
    assert!(run(&dir, &["init"]).status.success());
    assert!(run(&dir, &["config", "API_KEY", "abc-123"]).status.success());
    assert!(run(&dir, &["config", "file_logging_enabled", "off"]).status.success());

    let cfg = Config::load_from(dir.join("config.json")).unwrap();
    assert_eq!(cfg.api_key(), Some("abc-123"));
    assert!(!cfg.file_logging_enabled());

    let shown = run(&dir, &["config"]);
    let stdout = String::from_utf8_lossy(&shown.stdout);
    assert!(!stdout.contains("abc-123"), "API key should be masked");
}

#[test]
fn unknown_key_names_valid_keys() {
    let dir = make_temp_dir("config");
    let mut cfg = Config::write_default(dir.join("config.json")).unwrap();
    match cfg.set("colour", "blue") {
        Err(Error::Parse(msg)) => assert!(msg.contains(&ConfigKey::VenuesPageSize.to_string())),
        other => panic!("expected parse error, got {other:?}"),
    }
}
