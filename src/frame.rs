//! In-memory tabular record set: ordered columns, ordered rows, missing cells
//! as `None`. Construction validates shape (unique column names, rectangular
//! rows); everything after construction is total.

use thiserror::Error;

use crate::data::Value;

#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),
    #[error("Row carries {found} field(s) but the table has {expected} column(s)")]
    RowWidthMismatch { expected: usize, found: usize },
    #[error("Column '{name}' carries {found} value(s) but the table has {expected} row(s)")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Option<Value>>>,
}

impl Frame {
    pub fn new<I, S>(columns: I) -> Result<Self, FrameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: Vec<String> = Vec::new();
        for column in columns {
            let column = column.into();
            if seen.iter().any(|existing| *existing == column) {
                return Err(FrameError::DuplicateColumn(column));
            }
            seen.push(column);
        }
        Ok(Self {
            columns: seen,
            rows: Vec::new(),
        })
    }

    /// Builds a frame from named columns of equal length. Handy for tests and
    /// for callers that assemble tables column-wise.
    pub fn with_columns(columns: Vec<(String, Vec<Option<Value>>)>) -> Result<Self, FrameError> {
        let mut frame = Frame::new(columns.iter().map(|(name, _)| name.clone()))?;
        let expected = columns.first().map(|(_, cells)| cells.len()).unwrap_or(0);
        for (name, cells) in &columns {
            if cells.len() != expected {
                return Err(FrameError::ColumnLengthMismatch {
                    name: name.clone(),
                    expected,
                    found: cells.len(),
                });
            }
        }
        let mut iters: Vec<_> = columns
            .into_iter()
            .map(|(_, cells)| cells.into_iter())
            .collect();
        for _ in 0..expected {
            let row = iters.iter_mut().map(|cells| cells.next().flatten()).collect();
            frame.rows.push(row);
        }
        Ok(frame)
    }

    pub fn push_row(&mut self, row: Vec<Option<Value>>) -> Result<(), FrameError> {
        if row.len() != self.columns.len() {
            return Err(FrameError::RowWidthMismatch {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(|cell| cell.as_ref())
    }

    /// Overwrites one cell. Returns false when the coordinates fall outside
    /// the table.
    pub fn set_cell(&mut self, row: usize, column: usize, value: Option<Value>) -> bool {
        match self.rows.get_mut(row).and_then(|cells| cells.get_mut(column)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<Value>]> {
        self.rows.iter().map(|row| row.as_slice())
    }

    pub fn column_values(&self, column: usize) -> impl Iterator<Item = Option<&Value>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(column).and_then(|cell| cell.as_ref()))
    }

    /// Renames a column in place. Returns false when the source column is
    /// absent or the target name is already taken.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        if self.has_column(to) {
            return false;
        }
        match self.column_index(from) {
            Some(index) => {
                self.columns[index] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes a column and its cells from every row. Returns false when the
    /// column is absent.
    pub fn drop_column(&mut self, name: &str) -> bool {
        match self.column_index(name) {
            Some(index) => {
                self.columns.remove(index);
                for row in &mut self.rows {
                    row.remove(index);
                }
                true
            }
            None => false,
        }
    }

    /// Appends a column, asking `fill` for the cell of each existing row (by
    /// row index). Returns false when the name is already taken.
    pub fn push_column_with<F>(&mut self, name: &str, mut fill: F) -> bool
    where
        F: FnMut(usize) -> Option<Value>,
    {
        if self.has_column(name) {
            return false;
        }
        self.columns.push(name.to_string());
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.push(fill(index));
        }
        true
    }

    /// Rewrites every cell of one column through `apply`.
    pub fn map_column<F>(&mut self, column: usize, mut apply: F)
    where
        F: FnMut(Option<&Value>) -> Option<Value>,
    {
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(column) {
                *cell = apply(cell.as_ref());
            }
        }
    }
}
