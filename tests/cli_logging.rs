use benchmark_to_sheet::{
    cli::{self, Args},
    error::ConfigError,
};
use std::fs;

// Both cases share one test: the global subscriber can only be installed once
// per process, and the second case relies on it already being taken.
#[test]
fn fatal_errors_reach_the_log_output() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("logs").join("run.log");
    let config_path = dir.path().join("config.json");
    let raw = serde_json::json!({
        "reports": [{"name": "Master", "path": "absent-report.json"}],
        "spreadsheet": {"dry_run": true, "print_summary": false},
        "logging": {
            "level": "info",
            "write_to_file": true,
            "file_path": log_path.to_string_lossy(),
        }
    });
    fs::write(&config_path, raw.to_string()).unwrap();

    let err = cli::dispatch(Args {
        config: config_path,
        log_level: None,
    })
    .unwrap_err();
    assert!(format!("{err:#}").contains("absent-report.json"));

    // the writer guard is dropped on return, so the file is flushed by now
    let logged = fs::read_to_string(&log_path).unwrap();
    assert!(logged.contains("ERROR"), "{logged}");
    assert!(logged.contains("reading report"), "{logged}");
    assert!(logged.contains("absent-report.json"), "{logged}");

    // logging is already installed; the config error must still come back intact
    let err = cli::dispatch(Args {
        config: dir.path().join("missing.json"),
        log_level: None,
    })
    .unwrap_err();
    assert!(
        matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::Read { .. })),
        "{err:?}"
    );
}
