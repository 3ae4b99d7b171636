//! Header-addressed tables as read from a spreadsheet, and their conversion
//! into typed rooms and students.
//!
//! Cells are always text here. Readers are expected to render numeric cells
//! without losing leading zeros or adding a fractional part.

use crate::ValidationError;
use types::{Columns, Room, Student};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    fn require(&self, table: &'static str, names: &[&str]) -> Result<Vec<usize>, ValidationError> {
        let mut missing: Vec<String> = names
            .iter()
            .filter(|n| self.column(n).is_none())
            .map(|n| n.to_string())
            .collect();
        if !missing.is_empty() {
            missing.sort();
            return Err(ValidationError::MissingColumns {
                table,
                columns: missing,
            });
        }
        Ok(names.iter().filter_map(|n| self.column(n)).collect())
    }
}

fn cell(row: &[Option<String>], idx: usize) -> Option<&str> {
    row.get(idx)
        .and_then(|c| c.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Room labels in sheet order. Blank cells are dropped.
pub fn rooms_from_table(t: &RawTable, cols: &Columns) -> Result<Vec<Room>, ValidationError> {
    let idx = t.require("rooms", &[cols.room.as_str()])?[0];
    Ok(t.rows
        .iter()
        .filter_map(|row| cell(row, idx))
        .map(Room::new)
        .collect())
}

/// Students in sheet order. Rows without any of the four fields are skipped;
/// a partially filled row keeps empty strings for its blank cells.
pub fn students_from_table(t: &RawTable, cols: &Columns) -> Result<Vec<Student>, ValidationError> {
    let idx = t.require("students", &cols.student_columns())?;
    let (id, class, family, given) = (idx[0], idx[1], idx[2], idx[3]);

    Ok(t.rows
        .iter()
        .filter(|row| idx.iter().any(|&i| cell(row, i).is_some()))
        .map(|row| {
            let get = |i| cell(row, i).unwrap_or("");
            Student::new(get(id), get(class), get(family), get(given))
        })
        .collect())
}
