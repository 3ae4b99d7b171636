//! Blank input workbooks with a few sample rows, handed out so that users
//! start from the expected headers.

use crate::report::SheetTable;
use crate::{render, SheetError};
use serde::{Deserialize, Serialize};
use types::Columns;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Rooms,
    Students,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Rooms => "rooms",
            TemplateKind::Students => "students",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateKind::Rooms => "Шаблон_Кабинет.xlsx",
            TemplateKind::Students => "Шаблон_Оқушылар.xlsx",
        }
    }

    pub fn table(&self, cols: &Columns) -> SheetTable {
        match self {
            TemplateKind::Rooms => rooms_template(cols),
            TemplateKind::Students => students_template(cols),
        }
    }

    pub fn render(&self, cols: &Columns) -> Result<Vec<u8>, SheetError> {
        render(std::slice::from_ref(&self.table(cols)))
    }
}

pub fn rooms_template(cols: &Columns) -> SheetTable {
    SheetTable {
        name: "Sheet1".into(),
        title: None,
        headers: vec![cols.room.clone()],
        rows: ["A101", "A102", "D201"]
            .iter()
            .map(|r| vec![r.to_string()])
            .collect(),
        numbered: false,
    }
}

pub fn students_template(cols: &Columns) -> SheetTable {
    let sample = [
        ["123456789012", "7A", "Иванов", "Алексей"],
        ["234567890123", "7A", "Сейітов", "Нұржан"],
        ["345678901234", "8B", "Ахметова", "Алина"],
    ];
    SheetTable {
        name: "Sheet1".into(),
        title: None,
        headers: cols.student_columns().iter().map(|h| h.to_string()).collect(),
        rows: sample
            .iter()
            .map(|r| r.iter().map(|v| v.to_string()).collect())
            .collect(),
        numbered: false,
    }
}
