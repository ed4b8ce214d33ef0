#[path = "../../ecrf-ingest/tests/common/mod.rs"]
mod common;

use std::fs;

use common::{build_xlsx, sheet};
use ecrf_core::{ExportOptions, ExportPolicy, LoadOutcome, Session, SessionError};
use ecrf_ingest::{CsvOptions, IngestError};
use ecrf_standards::Catalog;

const KELN_CATALOG: &str = r#"
[[study]]
id = "KELN-PH-002"

[[study.field]]
name = "Subject"
required = true

[[study.field]]
name = "Modality"

[[study.field]]
name = "VisitName"

[[study.field]]
name = "Scan Date"
type = "date"

[[correction]]
study = "KELN-PH-002"
field = "Modality"
values = [{ original = "平扫CT", corrected = "CT without contrast" }]

[[correction]]
study = "KELN-PH-002"
field = "VisitName"
values = [{ original = "筛选期", corrected = "Screening" }]
"#;

#[tokio::test]
async fn loads_csv_with_configured_delimiter() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("sign.csv");
    fs::write(&path, "STUDYID;SITENUM;SUBNUM\nSIGN-PH-002;101;101-001\n").expect("write");

    let mut session = Session::new(Catalog::embedded().expect("catalog"))
        .with_csv_options(CsvOptions::with_delimiter(';'));
    session.select_study("SIGN-PH-002").expect("study");

    let outcome = session.load_file(&path).await.expect("load");
    assert_eq!(outcome, LoadOutcome::Loaded { columns: 3, rows: 1 });
    assert!(session.mapping().is_complete());

    let result = session.validate_async().await.expect("validate");
    assert!(result.is_valid);
}

#[tokio::test]
async fn workbook_sheets_switch_without_reloading() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("keln.xlsx");
    fs::write(
        &path,
        build_xlsx(&[
            sheet("Summary", &[&["Report"], &["generated"]]),
            sheet(
                "Imaging",
                &[
                    &["Subject", "Modality", "Scan Date"],
                    &["S-001", "平扫CT", "2024-02-01"],
                    &["S-002", "MRI", "2024-02-03"],
                ],
            ),
        ]),
    )
    .expect("write xlsx");

    let catalog = Catalog::from_toml_str(KELN_CATALOG, "test").expect("catalog");
    let mut session = Session::new(catalog);
    session.load_file(&path).await.expect("load");

    assert_eq!(session.selected_sheet(), Some("Summary"));
    assert!(!session.mapping().is_complete());

    // The file is gone; the held workbook still serves the other sheet.
    fs::remove_file(&path).expect("remove");
    let outcome = session.select_sheet("Imaging").expect("sheet");
    assert_eq!(outcome, LoadOutcome::Loaded { columns: 3, rows: 2 });
    assert_eq!(session.sheet_names().map(<[String]>::len), Some(2));
    assert!(session.mapping().is_complete());

    let export = session
        .export(ExportOptions {
            policy: ExportPolicy::All,
            correct_values: true,
        })
        .expect("export");
    assert_eq!(
        export.csv,
        "Subject,Modality,Scan Date\nS-001,CT without contrast,2024-02-01\nS-002,MRI,2024-02-03\n"
    );

    let err = session.select_sheet("Missing").unwrap_err();
    assert!(matches!(
        err,
        SessionError::Ingest(IngestError::MissingSheet { .. })
    ));
    assert_eq!(session.selected_sheet(), Some("Imaging"));
}

#[tokio::test]
async fn named_sheet_loads_past_a_blank_first_sheet() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("keln.xlsx");
    fs::write(
        &path,
        build_xlsx(&[
            sheet("Cover", &[]),
            sheet("Data", &[&["Subject"], &["S-1"]]),
        ]),
    )
    .expect("write xlsx");

    let catalog = Catalog::from_toml_str(KELN_CATALOG, "test").expect("catalog");
    let mut session = Session::new(catalog);

    let err = session.load_file(&path).await.unwrap_err();
    assert!(matches!(err, SessionError::Ingest(IngestError::EmptyFile)));
    assert!(!session.is_loaded());

    let outcome = session
        .load_file_sheet(&path, Some("Data".to_string()))
        .await
        .expect("load named sheet");
    assert_eq!(outcome, LoadOutcome::Loaded { columns: 1, rows: 1 });
    assert_eq!(session.selected_sheet(), Some("Data"));
    assert_eq!(
        session.sheet_names().map(<[String]>::to_vec),
        Some(vec!["Cover".to_string(), "Data".to_string()])
    );
    assert!(session.mapping().is_complete());
}

#[tokio::test]
async fn unsupported_file_leaves_session_usable() {
    let mut session = Session::new(Catalog::embedded().expect("catalog"));
    session.load_text("Subject\n001\n").expect("load");

    let err = session.load_file("notes.txt").await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Ingest(IngestError::UnsupportedFormat { .. })
    ));
    assert_eq!(session.table().map(|t| t.row_count()), Some(1));
}

#[test]
fn custom_fields_flow_into_export() {
    let catalog = Catalog::from_toml_str(KELN_CATALOG, "test").expect("catalog");
    let mut session = Session::new(catalog);
    session
        .load_text("Subject,Reader,VisitName\nS-1,Dr A,筛选期\n")
        .expect("load");

    assert!(session.add_field("Reader").expect("add"));
    session.set_mapping("Reader", Some("Reader")).expect("map");
    session.remove_field("VisitName").expect("remove");

    let export = session.export(ExportOptions::default()).expect("export");
    assert_eq!(export.csv, "Subject,Reader\nS-1,Dr A\n");

    session.reset_schema();
    let export = session
        .export(ExportOptions {
            policy: ExportPolicy::Block,
            correct_values: true,
        })
        .expect("export");
    assert_eq!(export.csv, "Subject,VisitName\nS-1,Screening\n");
}
