//! Execution trace recording for the virtual machine.
//!
//! Records program execution as a list of rows, one per execution step, each
//! laid out in [`Column`] order.

use std::fmt;

use super::columns::{Column, NUM_COLUMNS};
use super::row::FullRow;
use crate::error::RelationError;

/// Execution trace: one [`FullRow`] per machine step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionTrace<F> {
    rows: Vec<FullRow<F>>,
}

impl<F> Default for ExecutionTrace<F> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<F> ExecutionTrace<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<FullRow<F>>) -> Self {
        Self { rows }
    }

    /// Splits a flat buffer of `height * NUM_COLUMNS` values into rows.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::RowWidthMismatch`] when the buffer length is
    /// not a multiple of the row width; `got` is the size of the trailing
    /// partial row.
    pub fn from_flat(values: Vec<F>) -> Result<Self, RelationError> {
        let remainder = values.len() % NUM_COLUMNS;
        if remainder != 0 {
            return Err(RelationError::RowWidthMismatch {
                expected: NUM_COLUMNS,
                got: remainder,
            });
        }

        let height = values.len() / NUM_COLUMNS;
        let mut rows = Vec::with_capacity(height);
        let mut values = values.into_iter();
        for _ in 0..height {
            rows.push(FullRow::from_values(values.by_ref().take(NUM_COLUMNS).collect())?);
        }
        Ok(Self { rows })
    }

    /// Appends the next execution step.
    pub fn push_row(&mut self, row: FullRow<F>) {
        self.rows.push(row);
    }

    pub fn row(&self, index: usize) -> Option<&FullRow<F>> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut FullRow<F>> {
        self.rows.get_mut(index)
    }

    pub fn rows(&self) -> &[FullRow<F>] {
        &self.rows
    }

    /// Number of execution steps.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<F: fmt::Display> ExecutionTrace<F> {
    /// Renders the selected columns as a table, one line per step.
    pub fn format_columns(&self, columns: &[Column]) -> String {
        let mut out = String::new();
        let header: Vec<&str> = columns.iter().map(|c| c.name()).collect();
        out.push_str(&header.join(" | "));
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = columns.iter().map(|&c| row[c].to_string()).collect();
            out.push_str(&cells.join(" | "));
            out.push('\n');
        }
        out
    }
}

impl<F: fmt::Display> fmt::Display for ExecutionTrace<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            writeln!(f, "row {i}: {row}")?;
        }
        Ok(())
    }
}
