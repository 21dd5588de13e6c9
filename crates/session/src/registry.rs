use tablechat_core::{Column, ColumnType, Table, Value};

use crate::error::SessionError;

/// One uploaded file and its loaded table. Lives for the whole session;
/// there is no deletion operation.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub table: Table,
}

/// Filename-keyed table registry with insertion-order iteration.
///
/// Re-registering an existing name replaces the table in place
/// (last-write-wins, position preserved, no versioning).
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    entries: Vec<FileEntry>,
}

impl TableRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry for `name`. Always succeeds.
    pub fn register(&mut self, name: impl Into<String>, table: Table) {
        let name = name.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                tracing::info!(file = %name, rows = table.row_count(), "replacing table");
                entry.table = table;
            },
            None => {
                tracing::info!(file = %name, rows = table.row_count(), "registering table");
                self.entries.push(FileEntry { name, table });
            },
        }
    }

    /// Returns the table registered under `name`.
    ///
    /// # Errors
    /// `NotFound` when the name was never registered; never a default table.
    pub fn select(&self, name: &str) -> Result<&Table, SessionError> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.table)
            .ok_or_else(|| SessionError::NotFound { name: name.to_owned() })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Concatenates all registered tables row-wise, in registration order.
    ///
    /// Column policy is union-with-null-fill: output columns are the union
    /// of all inputs in first-seen order, cells for columns a file lacks are
    /// null, and same-named columns with conflicting types widen
    /// (`Int`+`Float` to `Float`, any other mix to `Text`).
    ///
    /// A single entry merges to a copy of itself.
    ///
    /// # Errors
    /// `EmptyRegistry` when nothing has been registered.
    pub fn merge(&self) -> Result<Table, SessionError> {
        if self.entries.is_empty() {
            return Err(SessionError::EmptyRegistry);
        }

        let mut union: Vec<Column> = Vec::new();
        for entry in &self.entries {
            for col in entry.table.columns() {
                match union.iter_mut().find(|u| u.name == col.name) {
                    Some(existing) => existing.ty = existing.ty.widen(col.ty),
                    None => union.push(col.clone()),
                }
            }
        }

        let mut merged = Table::new(union.clone())?;
        for entry in &self.entries {
            // Union position and source position for each column of this file.
            let mapping: Vec<Option<usize>> = union
                .iter()
                .map(|u| entry.table.column_index(&u.name))
                .collect();
            for row in entry.table.rows() {
                let cells: Vec<Value> = union
                    .iter()
                    .zip(&mapping)
                    .map(|(target, src)| match src {
                        Some(i) => coerce(&row[*i], target.ty),
                        None => Value::Null,
                    })
                    .collect();
                merged.push_row(cells)?;
            }
        }

        tracing::info!(
            files = self.entries.len(),
            rows = merged.row_count(),
            columns = merged.columns().len(),
            "merged tables"
        );
        Ok(merged)
    }
}

/// Re-types a cell for its widened target column.
fn coerce(value: &Value, target: ColumnType) -> Value {
    if value.fits(target) {
        return value.clone();
    }
    match (value, target) {
        (Value::Int(n), ColumnType::Float) => Value::Float(*n as f64),
        (other, ColumnType::Text) => Value::Text(other.render()),
        // Remaining mismatches cannot appear after widening; drop to null
        // rather than corrupt the column.
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(cols: &[(&str, ColumnType)], rows: Vec<Vec<Value>>) -> Table {
        let columns = cols.iter().map(|(n, ty)| Column::new(*n, *ty)).collect();
        let mut t = Table::new(columns).unwrap();
        for row in rows {
            t.push_row(row).unwrap();
        }
        t
    }

    fn region_amount(rows: Vec<(&str, i64)>) -> Table {
        table(
            &[("Region", ColumnType::Text), ("Amount", ColumnType::Int)],
            rows.into_iter()
                .map(|(r, a)| vec![Value::Text(r.into()), Value::Int(a)])
                .collect(),
        )
    }

    #[test]
    fn test_select_missing_is_not_found() {
        let registry = TableRegistry::new();
        let err = registry.select("ghost.xlsx").unwrap_err();
        assert!(matches!(err, SessionError::NotFound { name } if name == "ghost.xlsx"));
    }

    #[test]
    fn test_reregister_replaces_entirely() {
        let mut registry = TableRegistry::new();
        registry.register("a.xlsx", region_amount(vec![("EMEA", 1), ("APAC", 2)]));
        registry.register("a.xlsx", region_amount(vec![("AMER", 9)]));
        let t = registry.select("a.xlsx").unwrap();
        assert_eq!(t.row_count(), 1);
        assert_eq!(t.rows()[0][0], Value::Text("AMER".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reregister_keeps_position() {
        let mut registry = TableRegistry::new();
        registry.register("a.xlsx", region_amount(vec![("EMEA", 1)]));
        registry.register("b.xlsx", region_amount(vec![("APAC", 2)]));
        registry.register("a.xlsx", region_amount(vec![("AMER", 3)]));
        assert_eq!(registry.names(), vec!["a.xlsx", "b.xlsx"]);
    }

    #[test]
    fn test_merge_empty_registry_fails() {
        let registry = TableRegistry::new();
        assert!(matches!(registry.merge(), Err(SessionError::EmptyRegistry)));
    }

    #[test]
    fn test_merge_single_entry_is_copy() {
        let mut registry = TableRegistry::new();
        let original = region_amount(vec![("EMEA", 1), ("APAC", 2)]);
        registry.register("a.xlsx", original.clone());
        let merged = registry.merge().unwrap();
        assert_eq!(merged, original);
    }

    #[test]
    fn test_merge_same_schema_concatenates_in_order() {
        let mut registry = TableRegistry::new();
        registry.register("fileA.xlsx", region_amount(vec![("EMEA", 1), ("APAC", 2), ("AMER", 3)]));
        registry.register("fileB.xlsx", region_amount(vec![("LATAM", 4), ("ANZ", 5)]));
        let merged = registry.merge().unwrap();
        assert_eq!(merged.row_count(), 5);
        assert_eq!(merged.column_names(), vec!["Region", "Amount"]);
        assert_eq!(merged.rows()[0][0], Value::Text("EMEA".into()));
        assert_eq!(merged.rows()[3][0], Value::Text("LATAM".into()));
    }

    #[test]
    fn test_merge_row_count_is_sum() {
        let mut registry = TableRegistry::new();
        for (name, n) in [("a.xlsx", 4), ("b.xlsx", 7), ("c.xlsx", 2)] {
            let rows = (0..n).map(|i| ("x", i)).collect();
            registry.register(name, region_amount(rows));
        }
        assert_eq!(registry.merge().unwrap().row_count(), 13);
    }

    #[test]
    fn test_merge_union_null_fills_missing_columns() {
        let mut registry = TableRegistry::new();
        registry.register("a.xlsx", region_amount(vec![("EMEA", 1)]));
        registry.register(
            "b.xlsx",
            table(
                &[("Region", ColumnType::Text), ("Grade", ColumnType::Int)],
                vec![vec![Value::Text("APAC".into()), Value::Int(7)]],
            ),
        );
        let merged = registry.merge().unwrap();
        assert_eq!(merged.column_names(), vec!["Region", "Amount", "Grade"]);
        assert_eq!(merged.rows()[0][2], Value::Null);
        assert_eq!(merged.rows()[1][1], Value::Null);
        assert_eq!(merged.rows()[1][2], Value::Int(7));
    }

    #[test]
    fn test_merge_widens_conflicting_column_types() {
        let mut registry = TableRegistry::new();
        registry.register(
            "ints.xlsx",
            table(&[("Score", ColumnType::Int)], vec![vec![Value::Int(3)]]),
        );
        registry.register(
            "floats.xlsx",
            table(&[("Score", ColumnType::Float)], vec![vec![Value::Float(1.5)]]),
        );
        let merged = registry.merge().unwrap();
        assert_eq!(merged.columns()[0].ty, ColumnType::Float);
        assert_eq!(merged.rows()[0][0], Value::Float(3.0));
    }

    #[test]
    fn test_merge_widens_to_text_re_renders_cells() {
        let mut registry = TableRegistry::new();
        registry.register(
            "ints.xlsx",
            table(&[("Code", ColumnType::Int)], vec![vec![Value::Int(42)]]),
        );
        registry.register(
            "texts.xlsx",
            table(&[("Code", ColumnType::Text)], vec![vec![Value::Text("A-1".into())]]),
        );
        let merged = registry.merge().unwrap();
        assert_eq!(merged.columns()[0].ty, ColumnType::Text);
        assert_eq!(merged.rows()[0][0], Value::Text("42".into()));
    }
}
