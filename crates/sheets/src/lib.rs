//! Spreadsheet boundary: reading the rooms/students workbooks and writing the
//! seating reports.

pub mod names;
pub mod read;
pub mod report;
pub mod templates;
pub mod write;

use thiserror::Error;

pub use names::ReportNames;
pub use read::{read_table, read_table_path};
pub use report::{ReportKind, SheetTable};
pub use write::render;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("workbook has no worksheets")]
    NoWorksheet,
    #[error("cannot read workbook: {0}")]
    Read(#[from] calamine::XlsxError),
    #[error("cannot write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The three workbooks produced for one balancing run.
pub struct Reports {
    pub ready: Vec<u8>,
    pub reference: Vec<u8>,
    /// Only present when somebody could not be seated.
    pub unassigned: Option<Vec<u8>>,
}

pub fn build_reports(
    result: &types::BalanceResult,
    cols: &types::Columns,
) -> Result<Reports, SheetError> {
    Ok(Reports {
        ready: render(&report::ready_sheets(result, cols))?,
        reference: render(&report::reference_sheets(result, cols))?,
        unassigned: report::unassigned_sheet(result, cols)
            .map(|t| render(std::slice::from_ref(&t)))
            .transpose()?,
    })
}

/// Renders a single report, `None` for an unassigned report with nobody in it.
pub fn build_report(
    result: &types::BalanceResult,
    cols: &types::Columns,
    kind: ReportKind,
) -> Result<Option<Vec<u8>>, SheetError> {
    let tables = match kind {
        ReportKind::Ready => report::ready_sheets(result, cols),
        ReportKind::Reference => report::reference_sheets(result, cols),
        ReportKind::Unassigned => match report::unassigned_sheet(result, cols) {
            Some(t) => vec![t],
            None => return Ok(None),
        },
    };
    render(&tables).map(Some)
}
