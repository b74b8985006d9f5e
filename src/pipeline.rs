use crate::{
    config::{Config, ReportEntry},
    error::Result,
    layout::{self, ReportLayout},
    report::Report,
    sink::{SheetHandle, SheetSink, WriteOp},
};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

pub struct Pipeline<S: SheetSink> {
    cfg: Config,
    sink: S,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub sheet_title: String,
    pub sheet_id: i64,
    pub reports: Vec<ReportSpan>,
    /// Last row written by the final report.
    pub last_row: u32,
    /// Where a further report would start.
    pub next_row: u32,
}

/// Rows a single report ended up on, both ends inclusive.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSpan {
    pub name: String,
    pub first_row: u32,
    pub last_row: u32,
    pub sections: usize,
    pub results: usize,
}

impl<S: SheetSink> Pipeline<S> {
    pub fn new(cfg: &Config, sink: S) -> Self {
        Self {
            cfg: cfg.clone(),
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Creates a tab named `sheet_title` and appends every configured report to it,
    /// in order. The first error stops the run; nothing already written is undone.
    pub fn run(&mut self, sheet_title: &str) -> Result<RunSummary> {
        let started = Instant::now();
        let sheet = self.sink.create_sheet(sheet_title)?;
        info!("created sheet {:?} id={}", sheet.title, sheet.sheet_id);

        let mut start_row = 0u32;
        let mut spans = Vec::with_capacity(self.cfg.reports.len());
        for entry in &self.cfg.reports {
            let (span, next_row) = insert_entry(&mut self.sink, &sheet, entry, start_row)?;
            start_row = next_row;
            spans.push(span);
        }
        let last_row = start_row.saturating_sub(1);

        info!(
            "inserted {} reports into {:?} rows=1-{} in {:?}",
            spans.len(),
            sheet.title,
            last_row,
            started.elapsed()
        );

        Ok(RunSummary {
            sheet_title: sheet.title,
            sheet_id: sheet.sheet_id,
            reports: spans,
            last_row,
            next_row: start_row,
        })
    }
}

fn insert_entry<S: SheetSink + ?Sized>(
    sink: &mut S,
    sheet: &SheetHandle,
    entry: &ReportEntry,
    start_row: u32,
) -> Result<(ReportSpan, u32)> {
    info!("parse report {} ({})", entry.name, entry.path.display());
    let report = Report::load(&entry.path)?;
    let next_row = insert_report(sink, sheet, &entry.name, &report, start_row)?;
    let span = ReportSpan {
        name: entry.name.clone(),
        first_row: start_row + 1,
        last_row: next_row - 1,
        sections: report.tests.len(),
        results: report.result_count(),
    };
    Ok((span, next_row))
}

/// Applies one report block below `start_row` and returns the row the next
/// block should start from.
///
/// Steps go out in a fixed order: title, totals, sections, then the
/// highlight rules. Any sink error aborts the rest of the block.
pub fn insert_report<S: SheetSink + ?Sized>(
    sink: &mut S,
    sheet: &SheetHandle,
    title: &str,
    report: &Report,
    start_row: u32,
) -> Result<u32> {
    let plan: ReportLayout =
        layout::layout_report(&sheet.title, sheet.sheet_id, title, report, start_row);

    apply(sink, &plan.title)?;
    apply(sink, &plan.totals)?;

    for (section, write) in report.tests.iter().zip(&plan.sections.writes) {
        debug!("Inserting section {} in {}", section.name, write.range);
        sink.write_range(write)?;
    }

    sink.apply_batch(&plan.rule_ops())?;

    debug!(
        "report {:?} title_row={} totals_row={} next_row={}",
        title, plan.rows.title, plan.rows.totals, plan.next_row
    );
    Ok(plan.next_row)
}

fn apply<S: SheetSink + ?Sized>(sink: &mut S, op: &WriteOp) -> Result<()> {
    for write in &op.writes {
        sink.write_range(write)?;
    }
    if !op.batch.is_empty() {
        sink.apply_batch(&op.batch)?;
    }
    Ok(())
}
