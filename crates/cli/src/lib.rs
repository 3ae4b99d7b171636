use anyhow::Context;
use chrono::NaiveDateTime;
use seat_core::table::{rooms_from_table, students_from_table};
use sheets::templates::TemplateKind;
use sheets::{ReportKind, ReportNames};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use types::{BalanceEnvelope, BalanceParams, Columns, Counts, Student};

pub struct BalanceOpts {
    pub rooms: PathBuf,
    pub students: PathBuf,
    pub out: PathBuf,
    pub params: BalanceParams,
    pub columns: Columns,
    pub names: ReportNames,
}

#[derive(Debug)]
pub struct Written {
    pub counts: Counts,
    pub seed: u64,
    pub files: Vec<PathBuf>,
    pub unassigned: Vec<Student>,
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

/// Reads both workbooks, seats the students and writes the reports into
/// `opts.out`. Structural problems abort before anything is balanced.
pub fn run_balance(opts: &BalanceOpts, now: NaiveDateTime) -> anyhow::Result<Written> {
    let rooms = sheets::read_table_path(&opts.rooms)
        .with_context(|| format!("reading {}", opts.rooms.display()))?;
    let students = sheets::read_table_path(&opts.students)
        .with_context(|| format!("reading {}", opts.students.display()))?;

    let env = BalanceEnvelope {
        rooms: rooms_from_table(&rooms, &opts.columns)?,
        students: students_from_table(&students, &opts.columns)?,
        params: opts.params.clone(),
    };
    seat_core::validate(&env)?;
    info!(
        rooms = env.rooms.len(),
        students = env.students.len(),
        "loaded"
    );

    let result = balancer::balance(&env)?;
    for s in &result.unassigned {
        warn!(id = %s.id, class = %s.class, "could not seat {} {}", s.given_name, s.family_name);
    }

    let reports = sheets::build_reports(&result, &opts.columns)?;
    std::fs::create_dir_all(&opts.out)
        .with_context(|| format!("creating {}", opts.out.display()))?;

    let mut files = Vec::new();
    let mut emit = |kind: ReportKind, bytes: &[u8]| -> anyhow::Result<()> {
        let path = opts.out.join(opts.names.file_name(kind, now));
        write_file(&path, bytes)?;
        files.push(path);
        Ok(())
    };
    emit(ReportKind::Ready, &reports.ready)?;
    emit(ReportKind::Reference, &reports.reference)?;
    if let Some(bytes) = &reports.unassigned {
        emit(ReportKind::Unassigned, bytes)?;
    }

    Ok(Written {
        counts: result.counts,
        seed: result.stats.seed,
        files,
        unassigned: result.unassigned,
    })
}

/// Writes sample rooms and students workbooks to start from.
pub fn write_templates(out: &Path, cols: &Columns) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    let mut files = Vec::new();
    for kind in [TemplateKind::Rooms, TemplateKind::Students] {
        let path = out.join(kind.file_name());
        write_file(&path, &kind.render(cols)?)?;
        files.push(path);
    }
    Ok(files)
}
