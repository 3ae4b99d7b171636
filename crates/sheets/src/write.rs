use crate::report::SheetTable;
use crate::SheetError;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};
use std::collections::HashSet;
use tracing::{debug, warn};

const FONT: &str = "Times New Roman";
const MAX_SHEET_NAME: usize = 31;

fn title_format() -> Format {
    Format::new()
        .set_font_name(FONT)
        .set_font_size(28)
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

fn cell_format() -> Format {
    Format::new()
        .set_font_name(FONT)
        .set_font_size(14)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
}

/// Cuts `s` to `max` chars. Excel refuses names that start or end with an
/// apostrophe, so those are trimmed after the cut.
fn clip(s: &str, max: usize) -> String {
    let cut: String = s.chars().take(max).collect();
    cut.trim_matches('\'').to_string()
}

/// Makes `name` acceptable to Excel and distinct (case-insensitively) from
/// every name in `used`.
pub fn sheet_name(name: &str, used: &mut HashSet<String>) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    let mut base = clip(cleaned.trim_matches('\''), MAX_SHEET_NAME);
    if base.is_empty() {
        base = "Sheet".into();
    }

    let mut candidate = base.clone();
    let mut n = 2;
    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!(" ({n})");
        let keep = MAX_SHEET_NAME - suffix.chars().count();
        candidate = clip(&base, keep) + &suffix;
        n += 1;
    }
    used.insert(candidate.to_lowercase());
    candidate
}

/// Writes every table to its own worksheet and returns the xlsx bytes.
pub fn render(tables: &[SheetTable]) -> Result<Vec<u8>, SheetError> {
    match write_workbook(tables) {
        Ok(bytes) => {
            debug!(sheets = tables.len(), bytes = bytes.len(), "workbook rendered");
            Ok(bytes)
        }
        Err(e) => {
            warn!(sheets = tables.len(), error = %e, "cannot render workbook");
            Err(e)
        }
    }
}

fn write_workbook(tables: &[SheetTable]) -> Result<Vec<u8>, SheetError> {
    let mut wb = Workbook::new();
    let title_fmt = title_format();
    let cell_fmt = cell_format();
    let mut used = HashSet::new();

    for t in tables {
        let ws = wb.add_worksheet();
        ws.set_name(sheet_name(&t.name, &mut used))?;

        let mut header_row: u32 = 0;
        if let Some(title) = &t.title {
            let last_col = t.headers.len().saturating_sub(1) as u16;
            if last_col == 0 {
                ws.write_string_with_format(0, 0, title, &title_fmt)?;
            } else {
                ws.merge_range(0, 0, 0, last_col, title, &title_fmt)?;
            }
            header_row = 1;
        }

        for (c, h) in t.headers.iter().enumerate() {
            ws.write_string_with_format(header_row, c as u16, h, &cell_fmt)?;
        }
        for (r, values) in t.rows.iter().enumerate() {
            let row = header_row + 1 + r as u32;
            for (c, v) in values.iter().enumerate() {
                if c == 0 && t.numbered {
                    ws.write_number_with_format(row, 0, (r + 1) as f64, &cell_fmt)?;
                } else {
                    ws.write_string_with_format(row, c as u16, v, &cell_fmt)?;
                }
            }
        }
        for (c, w) in t.column_widths().into_iter().enumerate() {
            ws.set_column_width(c as u16, w as f64)?;
        }
    }

    Ok(wb.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_names_follow_excel_rules() {
        let mut used = HashSet::new();
        assert_eq!(sheet_name("A/101", &mut used), "A_101");
        assert_eq!(sheet_name("a_101", &mut used), "a_101 (2)");
        assert_eq!(sheet_name("'quoted'", &mut used), "quoted");
        assert_eq!(sheet_name("", &mut used), "Sheet");
        let long = "x".repeat(40);
        assert_eq!(sheet_name(&long, &mut used).chars().count(), 31);
        let again = sheet_name(&long, &mut used);
        assert!(again.ends_with(" (2)"));
        assert_eq!(again.chars().count(), 31);
    }

    #[test]
    fn apostrophe_at_the_cut_is_dropped() {
        let mut used = HashSet::new();
        let label = format!("{}'y", "x".repeat(30));
        let first = sheet_name(&label, &mut used);
        assert_eq!(first, "x".repeat(30));

        // The dedup cut lands right after an apostrophe as well.
        let label = format!("{}'tail", "z".repeat(26));
        let a = sheet_name(&label, &mut used);
        let b = sheet_name(&label, &mut used);
        assert!(!a.ends_with('\''));
        assert_eq!(b, format!("{} (2)", "z".repeat(26)));
    }

    #[test]
    fn report_with_apostrophe_room_renders() {
        let table = SheetTable {
            name: format!("{}'y", "x".repeat(30)),
            title: Some("Кабинет".into()),
            headers: vec!["№".into(), "Аты".into()],
            rows: vec![vec!["1".into(), "Alina".into()]],
            numbered: true,
        };
        let bytes = render(&[table]).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
