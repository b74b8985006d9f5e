use anyhow::{Context, Result};
use std::path::Path;
use time::{OffsetDateTime, macros::format_description};

pub fn ensure_dir(p: &Path) -> Result<()> {
    std::fs::create_dir_all(p).with_context(|| format!("create_dir_all {}", p.display()))
}

/// Local time as `YYYY-MM-DD HH:MM:SS`, falling back to UTC when the local offset is unknown.
pub fn sheet_title_now() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    sheet_title_at(now)
}

pub fn sheet_title_at(t: OffsetDateTime) -> String {
    t.format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        .unwrap_or_else(|_| "1970-01-01 00:00:00".to_string())
}
