use crate::SheetError;
use calamine::{open_workbook, open_workbook_from_rs, Data, Range, Reader, Xlsx};
use seat_core::table::RawTable;
use std::io::Cursor;
use std::path::Path;
use tracing::warn;

/// Renders a cell as text. Whole floats lose their `.0` so that identifiers
/// stored as numbers come back as they were typed.
pub fn cell_text(d: &Data) -> Option<String> {
    match d {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some((*f as i64).to_string()),
        other => Some(other.to_string()),
    }
}

fn first_sheet<RS: std::io::Read + std::io::Seek>(
    wb: &mut Xlsx<RS>,
) -> Result<Range<Data>, SheetError> {
    Ok(wb.worksheet_range_at(0).ok_or(SheetError::NoWorksheet)??)
}

/// First row becomes the header line, every further row a record.
pub fn table_from_range(range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|r| r.iter().map(|c| cell_text(c).unwrap_or_default()).collect())
        .unwrap_or_default();
    let rows = rows.map(|r| r.iter().map(cell_text).collect()).collect();
    RawTable::new(headers, rows)
}

pub fn read_table(bytes: &[u8]) -> Result<RawTable, SheetError> {
    let read = || -> Result<RawTable, SheetError> {
        let mut wb: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
        Ok(table_from_range(&first_sheet(&mut wb)?))
    };
    read().map_err(|e| {
        warn!(bytes = bytes.len(), error = %e, "cannot read workbook");
        e
    })
}

pub fn read_table_path(path: impl AsRef<Path>) -> Result<RawTable, SheetError> {
    let path = path.as_ref();
    let read = || -> Result<RawTable, SheetError> {
        let mut wb: Xlsx<_> = open_workbook(path)?;
        Ok(table_from_range(&first_sheet(&mut wb)?))
    };
    read().map_err(|e| {
        warn!(path = %path.display(), error = %e, "cannot read workbook");
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_without_fraction() {
        assert_eq!(cell_text(&Data::Float(123456789012.0)).as_deref(), Some("123456789012"));
        assert_eq!(cell_text(&Data::Int(7)).as_deref(), Some("7"));
        assert_eq!(cell_text(&Data::Float(2.5)).as_deref(), Some("2.5"));
    }

    #[test]
    fn strings_are_kept_verbatim() {
        assert_eq!(
            cell_text(&Data::String("000123".into())).as_deref(),
            Some("000123")
        );
        assert_eq!(cell_text(&Data::Empty), None);
    }

    #[test]
    fn range_splits_header_and_rows() {
        let mut range: Range<Data> = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("Кабинет".into()));
        range.set_value((0, 1), Data::String("Этаж".into()));
        range.set_value((1, 0), Data::String("A101".into()));
        range.set_value((1, 1), Data::Int(1));
        range.set_value((2, 0), Data::Float(204.0));

        let t = table_from_range(&range);
        assert_eq!(t.headers, vec!["Кабинет", "Этаж"]);
        assert_eq!(
            t.rows,
            vec![
                vec![Some("A101".to_string()), Some("1".to_string())],
                vec![Some("204".to_string()), None],
            ]
        );
    }
}
