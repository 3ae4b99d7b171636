use crate::report::ReportKind;
use chrono::NaiveDateTime;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// File name prefixes of the generated workbooks.
#[derive(Clone, Debug)]
pub struct ReportNames {
    pub ready: String,
    pub reference: String,
    pub unassigned: String,
}

impl Default for ReportNames {
    fn default() -> Self {
        Self {
            ready: "Дайын_тізім".into(),
            reference: "Анықтамаға_іліп_қою_үшін".into(),
            unassigned: "Орналастыру_мүмкін_болмады".into(),
        }
    }
}

impl ReportNames {
    pub fn file_name(&self, kind: ReportKind, at: NaiveDateTime) -> String {
        let prefix = match kind {
            ReportKind::Ready => &self.ready,
            ReportKind::Reference => &self.reference,
            ReportKind::Unassigned => &self.unassigned,
        };
        format!("{prefix}_{}.xlsx", at.format(TIMESTAMP_FORMAT))
    }
}
