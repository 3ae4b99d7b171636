use serde::{Deserialize, Serialize};
use types::{BalanceResult, Columns, Student};

/// Added to the longest value of each column to get its width.
pub const WIDTH_MARGIN: usize = 5;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Ready,
    Reference,
    Unassigned,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Ready => "ready",
            ReportKind::Reference => "reference",
            ReportKind::Unassigned => "unassigned",
        }
    }
}

/// One worksheet worth of rendered values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetTable {
    pub name: String,
    /// Merged banner row above the headers.
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Column 0 holds 1-based row numbers and is written as numbers.
    pub numbered: bool,
}

impl SheetTable {
    /// Widths from the headers and values, title excluded. Empty values do
    /// not count.
    pub fn column_widths(&self) -> Vec<usize> {
        (0..self.headers.len())
            .map(|c| {
                let longest = std::iter::once(&self.headers[c])
                    .chain(self.rows.iter().filter_map(|r| r.get(c)))
                    .map(|v| v.chars().count())
                    .max()
                    .unwrap_or(0);
                longest + WIDTH_MARGIN
            })
            .collect()
    }
}

#[derive(Clone, Copy)]
enum Field {
    Id,
    Class,
    Family,
    Given,
}

impl Field {
    fn header<'a>(&self, cols: &'a Columns) -> &'a str {
        match self {
            Field::Id => &cols.id,
            Field::Class => &cols.class,
            Field::Family => &cols.family_name,
            Field::Given => &cols.given_name,
        }
    }

    fn value<'a>(&self, s: &'a Student) -> &'a str {
        match self {
            Field::Id => s.id.as_str(),
            Field::Class => s.class.as_str(),
            Field::Family => &s.family_name,
            Field::Given => &s.given_name,
        }
    }
}

const READY: [Field; 4] = [Field::Id, Field::Class, Field::Family, Field::Given];
const REFERENCE: [Field; 3] = [Field::Class, Field::Family, Field::Given];

fn room_table(room: &str, students: &[Student], cols: &Columns, fields: &[Field]) -> SheetTable {
    let mut sorted: Vec<&Student> = students.iter().collect();
    sorted.sort_by(|a, b| a.class.cmp(&b.class));

    let mut headers = vec![cols.index.clone()];
    headers.extend(fields.iter().map(|f| f.header(cols).to_string()));

    let rows = sorted
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let mut row = vec![(i + 1).to_string()];
            row.extend(fields.iter().map(|f| f.value(s).to_string()));
            row
        })
        .collect();

    SheetTable {
        name: room.to_string(),
        title: Some(format!("{}: {}", cols.room, room)),
        headers,
        rows,
        numbered: true,
    }
}

/// One sheet per room with identifier, class and names.
pub fn ready_sheets(result: &BalanceResult, cols: &Columns) -> Vec<SheetTable> {
    result
        .allocations
        .iter()
        .map(|a| room_table(a.room.as_str(), &a.students, cols, &READY))
        .collect()
}

/// The ready sheets without identifiers, for posting on the door.
pub fn reference_sheets(result: &BalanceResult, cols: &Columns) -> Vec<SheetTable> {
    result
        .allocations
        .iter()
        .map(|a| room_table(a.room.as_str(), &a.students, cols, &REFERENCE))
        .collect()
}

pub fn unassigned_sheet(result: &BalanceResult, cols: &Columns) -> Option<SheetTable> {
    if result.unassigned.is_empty() {
        return None;
    }
    Some(SheetTable {
        name: "Sheet1".into(),
        title: None,
        headers: READY.iter().map(|f| f.header(cols).to_string()).collect(),
        rows: result
            .unassigned
            .iter()
            .map(|s| READY.iter().map(|f| f.value(s).to_string()).collect())
            .collect(),
        numbered: false,
    })
}
