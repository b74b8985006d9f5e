//! Row/column layout for report blocks.
//!
//! Every function here is pure: it turns a report (or part of it) plus a row
//! position into the writes and structural ops a [`crate::sink::SheetSink`]
//! should apply. Rows are 1-based A1 rows throughout.
//!
//! A report block looks like this, one spacer row below the previous block:
//!
//! ```text
//! | A                         | B               | C       | D       |
//! | <title, merged A-D, bold>                                       |
//! |                           | 3 FAIL          | 5 WARN  | 40 PASS |
//! | INFO                      | 1.1 <section>   |         |         |
//! | PASS                      | 1.1.1 <desc>    |         |         |
//! | ...                       |                 |         |         |
//! ```

use crate::report::{Report, Section};
use crate::sink::{
    A1Range, BatchOp, Color, Column, FormatRule, GridRange, RangeWrite, TextFormat, WriteOp,
};

pub const SECTION_MARKER: &str = "INFO";
pub const TITLE_FONT_SIZE: u32 = 14;

/// Exclusive row bound of the conditional formatting rules.
pub const FORMAT_ROW_CEILING: u32 = 997;

/// Status keywords and their fills, in the order the rules are issued.
pub const STATUS_COLORS: [(&str, Color); 3] = [
    (
        "PASS",
        Color {
            red: 0.72,
            green: 0.88,
            blue: 0.8,
        },
    ),
    (
        "WARN",
        Color {
            red: 0.99,
            green: 0.91,
            blue: 0.70,
        },
    ),
    (
        "FAIL",
        Color {
            red: 0.96,
            green: 0.78,
            blue: 0.76,
        },
    ),
];

/// Title cell in column A of `row`, merged across A-D and set bold.
pub fn layout_title(sheet_name: &str, sheet_id: i64, title: &str, row: u32) -> WriteOp {
    let merged = GridRange::from_a1(sheet_id, row, row, Column::A, Column::D);
    WriteOp {
        writes: vec![RangeWrite {
            range: A1Range::new(sheet_name, Column::A, row, Column::A, row),
            values: vec![vec![title.to_string()]],
        }],
        batch: vec![
            BatchOp::MergeCells { range: merged },
            BatchOp::RepeatTextFormat {
                range: merged,
                format: TextFormat {
                    bold: true,
                    font_size: TITLE_FONT_SIZE,
                },
            },
        ],
    }
}

/// Report-level totals in B-D of `row`. Uses the report's own totals, not a sum over sections.
pub fn layout_totals(sheet_name: &str, report: &Report, row: u32) -> WriteOp {
    WriteOp {
        writes: vec![RangeWrite {
            range: A1Range::new(sheet_name, Column::B, row, Column::D, row),
            values: vec![vec![
                format!("{} FAIL", report.total_fail),
                format!("{} WARN", report.total_warn),
                format!("{} PASS", report.total_pass),
            ]],
        }],
        batch: Vec::new(),
    }
}

/// One A-B block per section starting at `start_row`, packed back to back.
///
/// Each block is an `INFO | <section>` header followed by one
/// `<status> | <id> <description>` row per result, so it spans exactly
/// `results.len() + 1` rows. Returns the ops and the first row after the
/// last block, which is `start_row` itself when there are no sections.
pub fn layout_sections(sheet_name: &str, sections: &[Section], start_row: u32) -> (WriteOp, u32) {
    let mut op = WriteOp::default();
    let mut section_start = start_row;

    for section in sections {
        let section_end = section_start + section.results.len() as u32;

        let mut rows = Vec::with_capacity(section.results.len() + 1);
        rows.push(vec![SECTION_MARKER.to_string(), section.name.clone()]);
        for r in &section.results {
            rows.push(vec![r.status.clone(), format!("{} {}", r.id, r.description)]);
        }

        op.writes.push(RangeWrite {
            range: A1Range::new(sheet_name, Column::A, section_start, Column::B, section_end),
            values: rows,
        });

        section_start = section_end + 1;
    }

    (op, section_start)
}

/// The three status highlight rules over A-D of the whole sheet.
pub fn conditional_formatting_rules(sheet_id: i64) -> Vec<FormatRule> {
    let range = GridRange {
        sheet_id,
        start_row: 0,
        end_row: FORMAT_ROW_CEILING,
        start_col: Column::A.index(),
        end_col: Column::D.index() + 1,
    };
    STATUS_COLORS
        .iter()
        .map(|(keyword, color)| FormatRule {
            keyword: keyword.to_string(),
            color: *color,
            range,
        })
        .collect()
}

/// Title, totals and first section row of a block placed below `start_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRows {
    pub title: u32,
    pub totals: u32,
    pub sections: u32,
}

impl BlockRows {
    /// The title goes one row below `start_row`, leaving a spacer row between
    /// consecutive blocks.
    pub fn below(start_row: u32) -> Self {
        Self {
            title: start_row + 1,
            totals: start_row + 2,
            sections: start_row + 3,
        }
    }
}

/// Every layout step for one report, in the order they must be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub rows: BlockRows,
    pub title: WriteOp,
    pub totals: WriteOp,
    pub sections: WriteOp,
    pub rules: Vec<FormatRule>,
    /// First row after the block; the next report's `start_row`.
    pub next_row: u32,
}

pub fn layout_report(
    sheet_name: &str,
    sheet_id: i64,
    title: &str,
    report: &Report,
    start_row: u32,
) -> ReportLayout {
    let rows = BlockRows::below(start_row);
    let (sections, next_row) = layout_sections(sheet_name, &report.tests, rows.sections);
    ReportLayout {
        rows,
        title: layout_title(sheet_name, sheet_id, title, rows.title),
        totals: layout_totals(sheet_name, report, rows.totals),
        sections,
        rules: conditional_formatting_rules(sheet_id),
        next_row,
    }
}

impl ReportLayout {
    pub fn rule_ops(&self) -> Vec<BatchOp> {
        self.rules
            .iter()
            .cloned()
            .map(|rule| BatchOp::AddConditionalFormatRule { rule })
            .collect()
    }
}
