use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use seat_core::table::{rooms_from_table, students_from_table};
use sheets::templates::{rooms_template, students_template};
use sheets::{build_reports, read_table, read_table_path, render, ReportKind, ReportNames};
use std::io::Cursor;
use types::{BalanceResult, BalanceStats, Columns, Counts, Room, RoomAllocation, Student};

#[test]
fn templates_read_back_into_typed_records() {
    let cols = Columns::default();
    let rooms = read_table(&render(&[rooms_template(&cols)]).unwrap()).unwrap();
    let students = read_table(&render(&[students_template(&cols)]).unwrap()).unwrap();

    let rooms = rooms_from_table(&rooms, &cols).unwrap();
    assert_eq!(
        rooms,
        vec![Room::new("A101"), Room::new("A102"), Room::new("D201")]
    );

    let students = students_from_table(&students, &cols).unwrap();
    assert_eq!(students.len(), 3);
    assert_eq!(
        students[2],
        Student::new("345678901234", "8B", "Ахметова", "Алина")
    );
}

#[test]
fn reports_have_one_sheet_per_room_and_keep_leading_zeros() {
    let result = BalanceResult {
        allocations: vec![
            RoomAllocation {
                room: "A101".into(),
                students: vec![Student::new("000123", "7A", "Ivanov", "Aleksei")],
            },
            RoomAllocation {
                room: "B:2".into(),
                students: vec![],
            },
        ],
        unassigned: vec![],
        counts: Counts {
            total: 1,
            assigned: 1,
            unassigned: 0,
        },
        stats: BalanceStats::default(),
    };
    let reports = build_reports(&result, &Columns::default()).unwrap();
    assert!(reports.unassigned.is_none());

    let mut wb: Xlsx<_> = open_workbook_from_rs(Cursor::new(reports.ready)).unwrap();
    assert_eq!(wb.sheet_names(), vec!["A101".to_string(), "B_2".to_string()]);

    let range = wb.worksheet_range("A101").unwrap();
    assert_eq!(
        range.get_value((0, 0)),
        Some(&Data::String("Кабинет: A101".into()))
    );
    assert_eq!(range.get_value((2, 1)), Some(&Data::String("000123".into())));
}

#[test]
fn reads_workbook_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(ReportNames::default().file_name(
        ReportKind::Reference,
        chrono::NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 0)
            .unwrap(),
    ));
    std::fs::write(&path, render(&[rooms_template(&Columns::default())]).unwrap()).unwrap();

    let t = read_table_path(&path).unwrap();
    assert_eq!(t.headers, vec!["Кабинет"]);
    assert_eq!(t.rows.len(), 3);
}
