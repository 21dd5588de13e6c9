use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single cell value with its semantic type preserved.
///
/// The serde representation is tagged, so serializing and deserializing a
/// cell round-trips both the type and the content (an integer never comes
/// back as a float or a string).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Null,
}

impl Value {
    /// Whether this value may live in a column of the given type.
    /// `Null` is accepted by every column.
    #[must_use]
    pub fn fits(&self, ty: ColumnType) -> bool {
        match self {
            Self::Null => true,
            Self::Int(_) => ty == ColumnType::Int,
            Self::Float(_) => ty == ColumnType::Float,
            Self::Text(_) => ty == ColumnType::Text,
            Self::Date(_) => ty == ColumnType::Date,
        }
    }

    /// Plain-text rendering for display and for the collaborator snapshot.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Null => String::new(),
        }
    }

    /// JSON rendering for the collaborator snapshot: numbers stay numbers,
    /// dates become ISO strings, nulls stay null.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Int(n) => serde_json::Value::from(*n),
            Self::Float(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Text(s) => serde_json::Value::from(s.as_str()),
            Self::Date(d) => serde_json::Value::from(d.format("%Y-%m-%d").to_string()),
            Self::Null => serde_json::Value::Null,
        }
    }
}

/// Column type established at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Float,
    Text,
    Date,
}

impl ColumnType {
    /// The narrowest type that can hold values of both `self` and `other`.
    /// `Int` and `Float` widen to `Float`; any other mix widens to `Text`.
    #[must_use]
    pub fn widen(self, other: Self) -> Self {
        match (self, other) {
            (a, b) if a == b => a,
            (Self::Int, Self::Float) | (Self::Float, Self::Int) => Self::Float,
            _ => Self::Text,
        }
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self { name: name.into(), ty }
    }
}

/// Errors from table construction and mutation.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
    #[error("empty column name at index {0}")]
    EmptyColumnName(usize),
    #[error("row has {got} cells, table has {expected} columns")]
    ArityMismatch { expected: usize, got: usize },
    #[error("value does not fit column '{column}' of type {ty:?}")]
    TypeMismatch { column: String, ty: ColumnType },
}

/// An in-memory table: ordered columns, rows in document order.
///
/// Invariant: every row has exactly `columns.len()` cells, and every
/// non-null cell fits its column's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Creates an empty table with the given columns.
    ///
    /// # Errors
    /// Fails if any column name is empty or repeated.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for (i, col) in columns.iter().enumerate() {
            if col.name.is_empty() {
                return Err(TableError::EmptyColumnName(i));
            }
            if !seen.insert(col.name.as_str()) {
                return Err(TableError::DuplicateColumn(col.name.clone()));
            }
        }
        Ok(Self { columns, rows: Vec::new() })
    }

    /// Appends a row, checking arity and per-column type fit.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::ArityMismatch {
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        for (cell, col) in row.iter().zip(&self.columns) {
            if !cell.fits(col.ty) {
                return Err(TableError::TypeMismatch { column: col.name.clone(), ty: col.ty });
            }
        }
        self.rows.push(row);
        Ok(())
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// JSON snapshot for the collaborator request: column names plus at most
    /// `max_rows` rows of plainly-typed JSON values, with the true row count
    /// alongside so the collaborator knows when the preview is truncated.
    #[must_use]
    pub fn snapshot_json(&self, max_rows: usize) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .rows
            .iter()
            .take(max_rows)
            .map(|row| serde_json::Value::Array(row.iter().map(Value::to_json).collect()))
            .collect();
        serde_json::json!({
            "columns": self.column_names(),
            "total_rows": self.rows.len(),
            "rows": rows,
        })
    }

    /// Pipe-separated plain-text rendering, used when a table answer is
    /// appended to the transcript.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = self.column_names().join(" | ");
        for row in &self.rows {
            out.push('\n');
            let cells: Vec<String> = row.iter().map(Value::render).collect();
            out.push_str(&cells.join(" | "));
        }
        out
    }
}
