use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reports: Vec<ReportEntry>,
    #[serde(default)]
    pub spreadsheet: Spreadsheet,
    #[serde(default)]
    pub logging: Logging,
}

/// One report to render: `name` becomes the block title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub name: String,
    pub path: PathBuf,
}

impl Config {
    /// Loads a config file. `.toml` files go through `toml`, anything else is JSON.
    /// Relative report paths are resolved against the config file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let mut cfg = if is_toml {
            Self::from_toml_str(&raw)
        } else {
            Self::from_json_str(&raw)
        }
        .map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        if let Some(base) = path.parent() {
            cfg.resolve_report_paths(base);
        }
        Ok(cfg)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| e.to_string())
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reports.is_empty() {
            return Err(ConfigError::Invalid("no reports configured".into()));
        }
        for (i, report) in self.reports.iter().enumerate() {
            if report.path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "reports[{i}] ({}) has an empty path",
                    report.name
                )));
            }
        }
        if !self.spreadsheet.dry_run && self.spreadsheet.id.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "spreadsheet.id must be set unless spreadsheet.dry_run is true".into(),
            ));
        }
        Ok(())
    }

    fn resolve_report_paths(&mut self, base: &Path) {
        for report in &mut self.reports {
            if report.path.is_relative() && !report.path.as_os_str().is_empty() {
                report.path = base.join(&report.path);
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Spreadsheet {
    pub id: String,
    pub api_base_url: String,
    pub token_env: String,
    pub timeout_seconds: u64,
    pub dry_run: bool,
    pub print_summary: bool,
}
impl Default for Spreadsheet {
    fn default() -> Self {
        Self {
            id: "".into(),
            api_base_url: "https://sheets.googleapis.com/v4".into(),
            token_env: "GOOGLE_SHEETS_ACCESS_TOKEN".into(),
            timeout_seconds: 30,
            dry_run: false,
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "benchmark-to-sheet.log".into(),
        }
    }
}
