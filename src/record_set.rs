use std::{collections::HashMap, fmt};

use crate::error::TableError;

/// A single value in a record set.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// Reads a CSV field: empty is missing, anything numeric is a number.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Missing;
        }
        match parse_number(trimmed) {
            Some(n) => Cell::Number(n),
            None => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => parse_number(s.trim()),
            Cell::Missing => None,
        }
    }

    /// Numeric coercion; anything unparsable becomes [`Cell::Missing`].
    pub fn to_numeric(&self) -> Cell {
        Cell::from(self.as_number())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Missing,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{n}"),
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Named columns over rows of equal length. Column names may repeat.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordSet {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowLength {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Index of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Result<Vec<&Cell>, TableError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    pub fn rename_column(&mut self, idx: usize, name: impl Into<String>) {
        self.columns[idx] = name.into();
    }

    pub fn rename_columns(&mut self, mut f: impl FnMut(usize, &str) -> String) {
        for (i, column) in self.columns.iter_mut().enumerate() {
            *column = f(i, column);
        }
    }

    /// A new record set holding `names` in the given order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<RecordSet, TableError> {
        let indices = names
            .iter()
            .map(|name| self.column_index(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RecordSet {
            columns: names.iter().map(|n| n.as_ref().to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        })
    }

    pub fn retain_rows(&mut self, f: impl FnMut(&Vec<Cell>) -> bool) {
        self.rows.retain(f);
    }

    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Cell>,
    ) -> Result<(), TableError> {
        if values.len() != self.rows.len() {
            return Err(TableError::RowLength {
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        self.columns.push(name.into());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    pub fn map_column(&mut self, idx: usize, mut f: impl FnMut(&Cell) -> Cell) {
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
    }

    /// Stacks record sets, aligning columns by name. The n-th occurrence of a
    /// repeated name lines up with the n-th occurrence in the other sets;
    /// columns absent from a set are filled with missing cells.
    pub fn concat(sets: Vec<RecordSet>) -> RecordSet {
        let mut columns: Vec<String> = Vec::new();
        let mut slots: HashMap<(String, usize), usize> = HashMap::new();
        let mut layouts = Vec::with_capacity(sets.len());

        for set in &sets {
            let mut seen: HashMap<&str, usize> = HashMap::new();
            let mut layout = Vec::with_capacity(set.width());
            for name in &set.columns {
                let occurrence = seen.entry(name.as_str()).or_insert(0);
                let key = (name.clone(), *occurrence);
                *occurrence += 1;
                let slot = *slots.entry(key).or_insert_with(|| {
                    columns.push(name.clone());
                    columns.len() - 1
                });
                layout.push(slot);
            }
            layouts.push(layout);
        }

        let mut rows = Vec::new();
        for (set, layout) in sets.into_iter().zip(layouts) {
            for row in set.rows {
                let mut out = vec![Cell::Missing; columns.len()];
                for (cell, &slot) in row.into_iter().zip(&layout) {
                    out[slot] = cell;
                }
                rows.push(out);
            }
        }
        RecordSet { columns, rows }
    }
}
