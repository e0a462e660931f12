use serde::Serialize;
use std::fmt;

pub const POLARITY_COLUMN: &str = "polarity";
pub const SUBJECTIVITY_COLUMN: &str = "subjectivity";

/// A single spreadsheet cell as read from an upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    String(String),
    Float(f64),
    Int(i64),
    Bool(bool),
    /// Excel serial date number.
    DateTime(f64),
    /// Spreadsheet error literal such as `#DIV/0!`.
    Error(String),
}

impl CellValue {
    /// Textual form of the cell, or `None` for cells that have no text form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => Some(String::new()),
            CellValue::Error(_) => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Float(v) | CellValue::DateTime(v) => write!(f, "{}", v),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

/// Parsed upload: a header plus rows aligned to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Builds a table, padding short rows with `Empty`. Readers reject rows
    /// wider than the header before they get here.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, CellValue::Empty);
                }
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Case-sensitive column lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<CellValue>>) {
        (self.columns, self.rows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sentiment {
    pub polarity: f64,
    pub subjectivity: f64,
}

impl Sentiment {
    pub const NEUTRAL: Sentiment = Sentiment {
        polarity: 0.0,
        subjectivity: 0.0,
    };

    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity,
            subjectivity,
        }
    }

    pub fn in_range(&self) -> bool {
        self.polarity.is_finite()
            && self.subjectivity.is_finite()
            && (-1.0..=1.0).contains(&self.polarity)
            && (0.0..=1.0).contains(&self.subjectivity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    cells: Vec<CellValue>,
    sentiment: Sentiment,
}

impl ScoredRow {
    pub fn new(cells: Vec<CellValue>, sentiment: Sentiment) -> Self {
        Self { cells, sentiment }
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }
}

/// Scored rows in upload order, with the original header.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTable {
    columns: Vec<String>,
    rows: Vec<ScoredRow>,
}

impl ScoredTable {
    pub fn new(columns: Vec<String>, rows: Vec<ScoredRow>) -> Self {
        Self { columns, rows }
    }

    pub fn rows(&self) -> &[ScoredRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header and cells as exported. Existing `polarity`/`subjectivity`
    /// columns are overwritten in place, otherwise both are appended.
    pub fn export_rows(&self) -> (Vec<String>, Vec<Vec<CellValue>>) {
        let mut columns = self.columns.clone();
        let polarity_idx = slot_for(&mut columns, POLARITY_COLUMN);
        let subjectivity_idx = slot_for(&mut columns, SUBJECTIVITY_COLUMN);

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cells = row.cells.clone();
                cells.resize(columns.len(), CellValue::Empty);
                cells[polarity_idx] = CellValue::Float(row.sentiment.polarity);
                cells[subjectivity_idx] = CellValue::Float(row.sentiment.subjectivity);
                cells
            })
            .collect();

        (columns, rows)
    }
}

fn slot_for(columns: &mut Vec<String>, name: &str) -> usize {
    match columns.iter().position(|c| c == name) {
        Some(idx) => idx,
        None => {
            columns.push(name.to_string());
            columns.len() - 1
        }
    }
}
