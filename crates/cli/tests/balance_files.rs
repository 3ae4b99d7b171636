use chrono::{NaiveDate, NaiveDateTime};
use seatplan_cli::{run_balance, write_templates, BalanceOpts};
use sheets::{read_table_path, render, ReportNames, SheetTable};
use std::path::Path;
use types::{BalanceParams, Columns};

fn at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 14)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

fn sheet(headers: &[&str], rows: &[&[&str]]) -> SheetTable {
    SheetTable {
        name: "Sheet1".into(),
        title: None,
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|v| v.to_string()).collect())
            .collect(),
        numbered: false,
    }
}

fn save(path: &Path, table: SheetTable) {
    std::fs::write(path, render(&[table]).unwrap()).unwrap();
}

fn opts(dir: &Path, params: BalanceParams) -> BalanceOpts {
    BalanceOpts {
        rooms: dir.join("rooms.xlsx"),
        students: dir.join("students.xlsx"),
        out: dir.join("out"),
        params,
        columns: Columns::default(),
        names: ReportNames::default(),
    }
}

#[test]
fn templates_balance_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let files = write_templates(dir.path(), &Columns::default()).unwrap();
    assert_eq!(files.len(), 2);
    std::fs::rename(&files[0], dir.path().join("rooms.xlsx")).unwrap();
    std::fs::rename(&files[1], dir.path().join("students.xlsx")).unwrap();

    let params = BalanceParams {
        seed: Some(3),
        ..BalanceParams::default()
    };
    let written = run_balance(&opts(dir.path(), params), at()).unwrap();

    assert_eq!(written.counts.total, 3);
    assert_eq!(written.counts.unassigned, 0);
    assert_eq!(written.seed, 3);
    assert_eq!(written.files.len(), 2);
    assert!(written.files[0].ends_with("Дайын_тізім_2025-05-14_10-30.xlsx"));
    for f in &written.files {
        assert!(f.exists(), "{} missing", f.display());
    }

    let ready = read_table_path(&written.files[0]).unwrap();
    assert_eq!(ready.headers[0], "Кабинет: A101");
}

#[test]
fn leftovers_get_a_third_workbook() {
    let dir = tempfile::tempdir().unwrap();
    save(&dir.path().join("rooms.xlsx"), sheet(&["Кабинет"], &[&["A101"]]));
    save(
        &dir.path().join("students.xlsx"),
        sheet(
            &["ИИН", "Сыныбы", "Тегі", "Аты"],
            &[
                &["0001", "7A", "Ivanov", "Aleksei"],
                &["0002", "7A", "Seitov", "Nurzhan"],
            ],
        ),
    );

    let params = BalanceParams {
        max_per_room: 5,
        max_per_class_in_room: 1,
        attempts: 10,
        seed: Some(9),
    };
    let written = run_balance(&opts(dir.path(), params), at()).unwrap();

    assert_eq!(written.counts.assigned, 1);
    assert_eq!(written.unassigned.len(), 1);
    assert_eq!(written.files.len(), 3);

    let leftover = read_table_path(&written.files[2]).unwrap();
    assert_eq!(leftover.headers, vec!["ИИН", "Сыныбы", "Тегі", "Аты"]);
    assert_eq!(leftover.rows.len(), 1);
}

#[test]
fn missing_columns_abort_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    save(&dir.path().join("rooms.xlsx"), sheet(&["Кабинет"], &[&["A101"]]));
    save(
        &dir.path().join("students.xlsx"),
        sheet(&["ИИН", "Тегі"], &[&["0001", "Ivanov"]]),
    );

    let err = run_balance(&opts(dir.path(), BalanceParams::default()), at()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Аты"), "{msg}");
    assert!(msg.contains("Сыныбы"), "{msg}");
    assert!(!dir.path().join("out").exists());
}

#[test]
fn unreadable_workbook_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("rooms.xlsx"), b"not a workbook").unwrap();

    let err = run_balance(&opts(dir.path(), BalanceParams::default()), at()).unwrap_err();
    assert!(err.to_string().contains("rooms.xlsx"));
}
