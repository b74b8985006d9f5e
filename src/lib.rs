//! Renders kube-bench CIS benchmark reports into a spreadsheet tab.
//!
//! Each configured report becomes a block of rows: a merged bold title, a
//! totals row, then one `INFO` header per section followed by its check
//! results. Blocks are stacked without gaps and status keywords are
//! highlighted through conditional formatting.

pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod report;
pub mod sink;
pub mod util;

pub use error::{Error, Result};
