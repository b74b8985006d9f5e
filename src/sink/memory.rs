use super::{BatchOp, RangeWrite, SheetHandle, SheetSink};
use crate::error::SinkError;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum SinkCall {
    CreateSheet { title: String, sheet_id: i64 },
    WriteRange(RangeWrite),
    ApplyBatch { ops: Vec<BatchOp> },
}

/// Records calls in order instead of sending them anywhere.
#[derive(Debug, Default)]
pub struct MemorySink {
    calls: Vec<SinkCall>,
    next_sheet_id: i64,
    fail_at: Option<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the `call`-th call (0-based, counting every kind) fail.
    pub fn failing_at(call: usize) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<SinkCall> {
        self.calls
    }

    pub fn writes(&self) -> impl Iterator<Item = &RangeWrite> {
        self.calls.iter().filter_map(|c| match c {
            SinkCall::WriteRange(w) => Some(w),
            _ => None,
        })
    }

    pub fn batch_ops(&self) -> impl Iterator<Item = &BatchOp> {
        self.calls.iter().flat_map(|c| match c {
            SinkCall::ApplyBatch { ops } => ops.as_slice(),
            _ => &[],
        })
    }

    fn check(&self) -> Result<(), SinkError> {
        let call = self.calls.len();
        if self.fail_at == Some(call) {
            return Err(SinkError::Rejected {
                call,
                message: "injected failure".into(),
            });
        }
        Ok(())
    }
}

impl SheetSink for MemorySink {
    fn create_sheet(&mut self, title: &str) -> Result<SheetHandle, SinkError> {
        self.check()?;
        let sheet_id = self.next_sheet_id;
        self.next_sheet_id += 1;
        self.calls.push(SinkCall::CreateSheet {
            title: title.to_string(),
            sheet_id,
        });
        Ok(SheetHandle {
            title: title.to_string(),
            sheet_id,
        })
    }

    fn write_range(&mut self, write: &RangeWrite) -> Result<(), SinkError> {
        self.check()?;
        debug!("memory sink write {}", write.range);
        self.calls.push(SinkCall::WriteRange(write.clone()));
        Ok(())
    }

    fn apply_batch(&mut self, ops: &[BatchOp]) -> Result<(), SinkError> {
        self.check()?;
        self.calls.push(SinkCall::ApplyBatch { ops: ops.to_vec() });
        Ok(())
    }
}
