pub mod memory;
pub mod sheets;
pub mod types;

use crate::error::SinkError;

pub use memory::{MemorySink, SinkCall};
pub use sheets::GoogleSheets;
pub use types::{
    A1Range, BatchOp, Color, Column, FormatRule, GridRange, RangeWrite, SheetHandle, TextFormat,
    WriteOp,
};

/// The spreadsheet backend the layout output is applied to.
pub trait SheetSink {
    /// Adds a new tab. The assigned title may differ from the requested one.
    fn create_sheet(&mut self, title: &str) -> Result<SheetHandle, SinkError>;
    fn write_range(&mut self, write: &RangeWrite) -> Result<(), SinkError>;
    /// All-or-nothing from the caller's point of view.
    fn apply_batch(&mut self, ops: &[BatchOp]) -> Result<(), SinkError>;
}
