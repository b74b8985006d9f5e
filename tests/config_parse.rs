use benchmark_to_sheet::{config::Config, error::ConfigError};
use std::path::Path;

#[test]
fn parse_example_json_config() {
    let raw = include_str!("../benchmark-to-sheet.example.json");
    let cfg = Config::from_json_str(raw).expect("parse JSON");
    assert_eq!(cfg.reports.len(), 2);
    assert_eq!(cfg.reports[0].name, "Master Node");
    assert_eq!(cfg.reports[1].path, Path::new("tests/fixtures/node.json"));
    assert!(!cfg.spreadsheet.id.is_empty());
    assert_eq!(cfg.spreadsheet.api_base_url, "https://sheets.googleapis.com/v4");
    cfg.validate().expect("example config is valid");
}

#[test]
fn parse_example_toml_config() {
    let raw = include_str!("../benchmark-to-sheet.example.toml");
    let cfg = Config::from_toml_str(raw).expect("parse TOML");
    assert_eq!(cfg.reports.len(), 2);
    assert!(cfg.spreadsheet.dry_run);
    assert!(cfg.logging.json);
    assert_eq!(cfg.spreadsheet.timeout_seconds, 30);
    cfg.validate().expect("dry run needs no spreadsheet id");
}

#[test]
fn minimal_config_gets_defaults() {
    let cfg = Config::from_json_str(r#"{"reports": [{"name": "a", "path": "a.json"}]}"#).unwrap();
    assert_eq!(cfg.logging.level, "info");
    assert!(!cfg.spreadsheet.dry_run);
    assert!(cfg.spreadsheet.print_summary);
    assert_eq!(cfg.spreadsheet.token_env, "GOOGLE_SHEETS_ACCESS_TOKEN");
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn validate_rejects_empty_inputs() {
    let cfg = Config::from_json_str(r#"{"reports": [], "spreadsheet": {"id": "x"}}"#).unwrap();
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

    let cfg = Config::from_json_str(
        r#"{"reports": [{"name": "a", "path": ""}], "spreadsheet": {"id": "x"}}"#,
    )
    .unwrap();
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("reports[0]"));
}

#[test]
fn load_resolves_report_paths_against_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(
        &path,
        r#"{"reports": [{"name": "a", "path": "reports/a.json"}, {"name": "b", "path": "/abs/b.json"}]}"#,
    )
    .unwrap();

    let cfg = Config::load(&path).unwrap();
    assert_eq!(cfg.reports[0].path, dir.path().join("reports/a.json"));
    assert_eq!(cfg.reports[1].path, Path::new("/abs/b.json"));
}

#[test]
fn load_reports_read_and_parse_failures() {
    let dir = tempfile::tempdir().unwrap();

    let missing = Config::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, ConfigError::Read { .. }));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ reports: ").unwrap();
    assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));

    let bad_toml = dir.path().join("bad.toml");
    std::fs::write(&bad_toml, "reports = 3").unwrap();
    assert!(matches!(Config::load(&bad_toml), Err(ConfigError::Parse { .. })));
}
