use crate::Value;

/// An ordered-column table; every row is aligned to the column order.
///
/// Transformations build new tables rather than mutating one another's
/// input, so each pipeline stage owns the table it passes forward.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Columns from `required` that this table does not have, in the order
    /// given. Empty means all present.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| (*name).to_string())
            .collect()
    }

    /// Push a row, padding with `Missing` or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        if row.len() < self.columns.len() {
            row.resize(self.columns.len(), Value::Missing);
        } else {
            row.truncate(self.columns.len());
        }
        self.rows.push(row);
    }

    /// Cell at (row, named column); `None` when either is out of range.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|cells| cells.get(index))
    }

    /// Insert a column at `index` with one value per existing row.
    ///
    /// `values` must match the current height.
    pub fn insert_column(&mut self, index: usize, name: impl Into<String>, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns.insert(index, name.into());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(index, value);
        }
    }

    /// Append a column with one value per existing row.
    pub fn append_column(&mut self, name: impl Into<String>, values: Vec<Value>) {
        let index = self.columns.len();
        self.insert_column(index, name, values);
    }

    /// Remove a column by name; returns whether it existed.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(index) = self.column_index(name) else {
            return false;
        };
        self.columns.remove(index);
        for row in &mut self.rows {
            if index < row.len() {
                row.remove(index);
            }
        }
        true
    }

    /// New table with the same columns containing the given rows, in order.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        let rows = indices
            .iter()
            .filter_map(|&index| self.rows.get(index).cloned())
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["a", "b"]);
        table.push_row(vec![Value::text("1"), Value::text("x")]);
        table.push_row(vec![Value::text("2")]);
        table
    }

    #[test]
    fn push_row_pads_to_width() {
        let table = sample();
        assert_eq!(table.value(1, "b"), Some(&Value::Missing));
    }

    #[test]
    fn column_queries() {
        let table = sample();
        assert!(table.has_column("a"));
        assert!(!table.has_column("c"));
        assert_eq!(table.missing_columns(&["a", "c", "d"]), vec!["c", "d"]);
    }

    #[test]
    fn insert_and_drop_column() {
        let mut table = sample();
        table.insert_column(0, "seq", vec![Value::Number(1.0), Value::Number(2.0)]);
        assert_eq!(table.columns, vec!["seq", "a", "b"]);
        assert_eq!(table.value(0, "seq"), Some(&Value::Number(1.0)));
        assert!(table.drop_column("a"));
        assert_eq!(table.columns, vec!["seq", "b"]);
        assert_eq!(table.value(0, "b"), Some(&Value::text("x")));
        assert!(!table.drop_column("a"));
    }

    #[test]
    fn select_rows_preserves_order() {
        let table = sample();
        let picked = table.select_rows(&[1, 0]);
        assert_eq!(picked.height(), 2);
        assert_eq!(picked.value(0, "a"), Some(&Value::text("2")));
        assert_eq!(picked.value(1, "a"), Some(&Value::text("1")));
    }
}
