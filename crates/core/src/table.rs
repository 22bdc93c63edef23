//! Tabular input as rows of typed cells
//!
//! External readers (CSV, spreadsheets) hand the core a [`Table`]; the core
//! never looks at file formats.

use serde::{Deserialize, Serialize};

/// A single typed table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Classify a raw string cell.
    ///
    /// Blank strings and the usual missing-value placeholders (`nan`, `-`)
    /// become [`Cell::Empty`].
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() || s == "-" || s.eq_ignore_ascii_case("nan") {
            return Cell::Empty;
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_nan() => Cell::Empty,
            Ok(v) => Cell::Number(v),
            Err(_) => Cell::Text(s.to_string()),
        }
    }

    /// Whether the cell carries no value (empty or NaN)
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(v) => v.is_nan(),
            Cell::Text(_) => false,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    /// Cell content as text; numbers with no fractional part print as integers
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Number(v) if v.is_nan() => None,
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => Some(format!("{}", *v as i64)),
            Cell::Number(v) => Some(v.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// One table row
pub type Row = Vec<Cell>;

/// A header plus rows of typed cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        let headers = headers.into_iter().map(|h| h.trim().to_string()).collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    /// Index of a column by trimmed header name
    pub fn column(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.headers.iter().position(|h| h == name)
    }

    /// Same as [`Table::column`] but failing with [`crate::Error::MissingColumn`]
    pub fn require_column(&self, name: &str) -> crate::Result<usize> {
        self.column(name)
            .ok_or_else(|| crate::Error::MissingColumn(name.trim().to_string()))
    }
}
