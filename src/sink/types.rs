use serde::{Deserialize, Serialize};
use std::fmt;

/// The only columns a report block ever touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    A,
    B,
    C,
    D,
}

impl Column {
    pub fn letter(self) -> char {
        match self {
            Column::A => 'A',
            Column::B => 'B',
            Column::C => 'C',
            Column::D => 'D',
        }
    }

    /// 0-based grid index.
    pub fn index(self) -> u32 {
        match self {
            Column::A => 0,
            Column::B => 1,
            Column::C => 2,
            Column::D => 3,
        }
    }
}

/// `<sheet>!<col><row>:<col><row>` with 1-based rows, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct A1Range {
    pub sheet: String,
    pub start_col: Column,
    pub start_row: u32,
    pub end_col: Column,
    pub end_row: u32,
}

impl A1Range {
    pub fn new(
        sheet: &str,
        start_col: Column,
        start_row: u32,
        end_col: Column,
        end_row: u32,
    ) -> Self {
        Self {
            sheet: sheet.to_string(),
            start_col,
            start_row,
            end_col,
            end_row,
        }
    }

    pub fn row_count(&self) -> u32 {
        self.end_row + 1 - self.start_row
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}!{}{}:{}{}",
            quote_sheet_name(&self.sheet),
            self.start_col.letter(),
            self.start_row,
            self.end_col.letter(),
            self.end_row
        )
    }
}

/// Sheet names with anything beyond `[A-Za-z0-9_]` must be single-quoted in A1
/// notation, with embedded quotes doubled.
pub fn quote_sheet_name(name: &str) -> String {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return name.to_string();
    }
    format!("'{}'", name.replace('\'', "''"))
}

/// 0-based, end-exclusive grid coordinates used by structural requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRange {
    pub sheet_id: i64,
    pub start_row: u32,
    pub end_row: u32,
    pub start_col: u32,
    pub end_col: u32,
}

impl GridRange {
    /// Grid range covering the same cells as the 1-based inclusive A1 rows and columns.
    pub fn from_a1(
        sheet_id: i64,
        first_row: u32,
        last_row: u32,
        first: Column,
        last: Column,
    ) -> Self {
        Self {
            sheet_id,
            start_row: first_row - 1,
            end_row: last_row,
            start_col: first.index(),
            end_col: last.index() + 1,
        }
    }

    pub fn rows(&self) -> u32 {
        self.end_row - self.start_row
    }

    pub fn cols(&self) -> u32 {
        self.end_col - self.start_col
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFormat {
    pub bold: bool,
    pub font_size: u32,
}

/// Background fill for any cell in `range` whose text contains `keyword`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatRule {
    pub keyword: String,
    pub color: Color,
    pub range: GridRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BatchOp {
    MergeCells { range: GridRange },
    RepeatTextFormat { range: GridRange, format: TextFormat },
    AddConditionalFormatRule { rule: FormatRule },
}

/// A 2-D block of raw values anchored at the top-left of `range`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeWrite {
    pub range: A1Range,
    pub values: Vec<Vec<String>>,
}

/// Writes plus structural ops produced by one layout step, applied writes first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteOp {
    pub writes: Vec<RangeWrite>,
    pub batch: Vec<BatchOp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetHandle {
    pub title: String,
    pub sheet_id: i64,
}
