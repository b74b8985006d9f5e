//! Typed model of one kube-bench JSON report.
//!
//! Unknown fields are ignored and missing (or `null`) fields fall back to
//! their zero value, so partially populated reports still render.

use crate::error::ParseError;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub version: String,
    #[serde(deserialize_with = "nullable")]
    pub text: String,
    #[serde(deserialize_with = "nullable")]
    pub node_type: String,
    #[serde(deserialize_with = "nullable")]
    pub tests: Vec<Section>,
    pub total_pass: u64,
    pub total_fail: u64,
    pub total_warn: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    #[serde(rename = "section", deserialize_with = "nullable")]
    pub name: String,
    pub pass: u64,
    pub fail: u64,
    pub warn: u64,
    #[serde(deserialize_with = "nullable")]
    pub desc: String,
    #[serde(deserialize_with = "nullable")]
    pub results: Vec<CheckResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckResult {
    #[serde(rename = "test_number", deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "test_desc", deserialize_with = "nullable")]
    pub description: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub test_info: Vec<String>,
    /// Free text. Usually PASS, FAIL, WARN or INFO but never matched exactly.
    #[serde(deserialize_with = "nullable")]
    pub status: String,
}

impl Report {
    pub fn load(path: &Path) -> Result<Self, ParseError> {
        let raw = std::fs::read(path).map_err(|source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let report = Self::from_slice(&raw).map_err(|source| ParseError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "parsed report {} id={} sections={} results={}",
            path.display(),
            report.id,
            report.tests.len(),
            report.result_count()
        );
        Ok(report)
    }

    pub fn from_slice(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw)
    }

    pub fn result_count(&self) -> usize {
        self.tests.iter().map(|s| s.results.len()).sum()
    }
}

fn nullable<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}
