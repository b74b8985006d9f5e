//! Google Sheets v4 REST backend.
//!
//! Only three endpoints are used: `spreadsheets.batchUpdate` (add sheet and
//! structural formatting) and `spreadsheets.values.update` (raw cell values).
//! Authentication is a pre-acquired OAuth bearer token read from the
//! environment.

use super::{BatchOp, GridRange, RangeWrite, SheetHandle, SheetSink};
use crate::{config::Spreadsheet, error::SinkError};
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

pub struct GoogleSheets {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
    token: String,
}

impl GoogleSheets {
    pub fn new(cfg: &Spreadsheet) -> Result<Self, SinkError> {
        let token = std::env::var(&cfg.token_env).map_err(|_| {
            SinkError::Credentials(format!("environment variable {} is not set", cfg.token_env))
        })?;
        Self::with_token(cfg, token)
    }

    pub fn with_token(cfg: &Spreadsheet, token: String) -> Result<Self, SinkError> {
        if token.trim().is_empty() {
            return Err(SinkError::Credentials("access token is empty".into()));
        }
        let base_url = Url::parse(&cfg.api_base_url).map_err(|e| {
            SinkError::Response(format!("invalid api_base_url {}: {e}", cfg.api_base_url))
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_seconds.max(1)))
            .build()?;
        Ok(Self {
            client,
            base_url,
            spreadsheet_id: cfg.id.clone(),
            token,
        })
    }

    /// `{base}/spreadsheets/{id}:batchUpdate`
    pub fn batch_update_url(&self) -> Result<Url, SinkError> {
        let tail = format!("{}:batchUpdate", self.spreadsheet_id);
        self.endpoint(&[tail.as_str()])
    }

    /// `{base}/spreadsheets/{id}/values/{range}?valueInputOption=RAW`
    pub fn values_update_url(&self, range: &str) -> Result<Url, SinkError> {
        let mut url = self.endpoint(&[self.spreadsheet_id.as_str(), "values", range])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        Ok(url)
    }

    fn endpoint(&self, tail: &[&str]) -> Result<Url, SinkError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                SinkError::Response(format!("base url cannot hold a path: {}", self.base_url))
            })?;
            segments.pop_if_empty().push("spreadsheets");
            for seg in tail {
                segments.push(seg);
            }
        }
        Ok(url)
    }

    fn batch_update(&self, requests: Vec<Value>) -> Result<Value, SinkError> {
        let url = self.batch_update_url()?;
        debug!("sheets batchUpdate requests={}", requests.len());
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&json!({ "requests": requests }))
            .send()?;
        read_json(resp)
    }
}

impl SheetSink for GoogleSheets {
    fn create_sheet(&mut self, title: &str) -> Result<SheetHandle, SinkError> {
        let reply = self.batch_update(vec![add_sheet_request(title)])?;
        parse_add_sheet_reply(&reply)
    }

    fn write_range(&mut self, write: &RangeWrite) -> Result<(), SinkError> {
        let range = write.range.to_string();
        let url = self.values_update_url(&range)?;
        debug!("sheets values.update {range}");
        let resp = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(&value_range_body(write))
            .send()?;
        read_json(resp).map(|_| ())
    }

    fn apply_batch(&mut self, ops: &[BatchOp]) -> Result<(), SinkError> {
        if ops.is_empty() {
            return Ok(());
        }
        self.batch_update(ops.iter().map(batch_request).collect())
            .map(|_| ())
    }
}

fn read_json(resp: Response) -> Result<Value, SinkError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(SinkError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp.json()?)
}

pub fn add_sheet_request(title: &str) -> Value {
    json!({ "addSheet": { "properties": { "title": title } } })
}

pub fn parse_add_sheet_reply(reply: &Value) -> Result<SheetHandle, SinkError> {
    let props = reply
        .pointer("/replies/0/addSheet/properties")
        .ok_or_else(|| SinkError::Response("addSheet reply has no properties".into()))?;
    let title = props
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(|| SinkError::Response("addSheet reply has no title".into()))?;
    // The API omits sheetId when it is 0.
    let sheet_id = props.get("sheetId").and_then(Value::as_i64).unwrap_or(0);
    Ok(SheetHandle {
        title: title.to_string(),
        sheet_id,
    })
}

pub fn value_range_body(write: &RangeWrite) -> Value {
    json!({
        "range": write.range.to_string(),
        "majorDimension": "ROWS",
        "values": write.values,
    })
}

pub fn batch_request(op: &BatchOp) -> Value {
    match op {
        BatchOp::MergeCells { range } => json!({
            "mergeCells": {
                "mergeType": "MERGE_ALL",
                "range": grid_range(range),
            }
        }),
        BatchOp::RepeatTextFormat { range, format } => json!({
            "repeatCell": {
                "range": grid_range(range),
                "cell": {
                    "userEnteredFormat": {
                        "textFormat": {
                            "bold": format.bold,
                            "fontSize": format.font_size,
                        }
                    }
                },
                "fields": "userEnteredFormat(textFormat)",
            }
        }),
        BatchOp::AddConditionalFormatRule { rule } => json!({
            "addConditionalFormatRule": {
                "index": 0,
                "rule": {
                    "ranges": [grid_range(&rule.range)],
                    "booleanRule": {
                        "condition": {
                            "type": "TEXT_CONTAINS",
                            "values": [{ "userEnteredValue": rule.keyword }],
                        },
                        "format": {
                            "backgroundColor": {
                                "red": rule.color.red,
                                "green": rule.color.green,
                                "blue": rule.color.blue,
                            }
                        }
                    }
                }
            }
        }),
    }
}

fn grid_range(r: &GridRange) -> Value {
    json!({
        "sheetId": r.sheet_id,
        "startRowIndex": r.start_row,
        "endRowIndex": r.end_row,
        "startColumnIndex": r.start_col,
        "endColumnIndex": r.end_col,
    })
}
