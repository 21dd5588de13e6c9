use serde::Deserialize;
use tablechat_core::{Column, ColumnType, Table, Value, strip_markdown_fences};

/// What the answering engine produced: tabular data or free text.
///
/// The engine replies with plain chat content; a reply that is a JSON table
/// payload (`{"columns": [...], "rows": [[...], ...]}`) becomes
/// `Answer::Table`, anything else becomes `Answer::Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Table(Table),
    Text(String),
}

#[derive(Deserialize)]
struct TablePayload {
    columns: Vec<String>,
    rows: Vec<Vec<serde_json::Value>>,
}

impl Answer {
    /// Interprets a raw reply, stripping any markdown fence first.
    #[must_use]
    pub fn from_reply(content: &str) -> Self {
        let stripped = strip_markdown_fences(content);
        if let Ok(payload) = serde_json::from_str::<TablePayload>(stripped) {
            if let Some(table) = table_from_payload(&payload) {
                return Self::Table(table);
            }
            tracing::debug!("table-shaped reply did not form a valid table, keeping as text");
        }
        Self::Text(stripped.to_owned())
    }

    /// Plain-text rendering for the transcript.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Table(table) => table.render_text(),
            Self::Text(text) => text.clone(),
        }
    }
}

fn table_from_payload(payload: &TablePayload) -> Option<Table> {
    if payload.columns.is_empty() {
        return None;
    }
    if payload.rows.iter().any(|row| row.len() != payload.columns.len()) {
        return None;
    }

    let width = payload.columns.len();
    let mut types: Vec<Option<ColumnType>> = vec![None; width];
    for row in &payload.rows {
        for (i, cell) in row.iter().enumerate() {
            let ty = match json_cell_type(cell)? {
                None => continue,
                Some(ty) => ty,
            };
            types[i] = Some(match types[i] {
                Some(prev) => prev.widen(ty),
                None => ty,
            });
        }
    }

    let columns: Vec<Column> = payload
        .columns
        .iter()
        .zip(&types)
        .map(|(name, ty)| Column::new(name.clone(), ty.unwrap_or(ColumnType::Text)))
        .collect();
    let mut table = Table::new(columns).ok()?;
    for row in &payload.rows {
        let cells: Vec<Value> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| json_to_value(cell, types[i].unwrap_or(ColumnType::Text)))
            .collect();
        table.push_row(cells).ok()?;
    }
    Some(table)
}

/// `Ok(None)` for null cells, `None` (outer) for nested arrays/objects,
/// which disqualify the payload as a table.
fn json_cell_type(cell: &serde_json::Value) -> Option<Option<ColumnType>> {
    match cell {
        serde_json::Value::Null => Some(None),
        serde_json::Value::Number(n) => {
            if n.is_i64() {
                Some(Some(ColumnType::Int))
            } else {
                Some(Some(ColumnType::Float))
            }
        },
        serde_json::Value::String(_) | serde_json::Value::Bool(_) => Some(Some(ColumnType::Text)),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
    }
}

fn json_to_value(cell: &serde_json::Value, ty: ColumnType) -> Value {
    match cell {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Number(n) => match ty {
            ColumnType::Int => n.as_i64().map_or(Value::Null, Value::Int),
            ColumnType::Float => n.as_f64().map_or(Value::Null, Value::Float),
            _ => Value::Text(n.to_string()),
        },
        serde_json::Value::String(s) => Value::Text(s.clone()),
        serde_json::Value::Bool(b) => Value::Text(if *b { "TRUE" } else { "FALSE" }.to_owned()),
        _ => Value::Null,
    }
}
