#[path = "../../ecrf-ingest/tests/common/mod.rs"]
mod common;

use std::fs;
use std::path::{Path, PathBuf};

use ecrf_cli::workflow::{
    Assignment, Destination, MapRequest, MapStatus, load_catalog, run_map,
};
use common::{build_xlsx, sheet};
use ecrf_core::{ExportOptions, ExportPolicy};

const SIGN_EXPORT: &str = "\
studyid,sitenum,subnum,visdat,comment
SIGN-PH-002,101,101-001,2024-01-10,ok
SIGN-PH-002,101,,2024-01-11,missing subject
SIGN-PH-002,102,102-001,someday,bad date
";

fn write_input(dir: &Path) -> PathBuf {
    let path = dir.join("sign.csv");
    fs::write(&path, SIGN_EXPORT).expect("write input");
    path
}

fn request(input: PathBuf, policy: ExportPolicy, destination: Destination) -> MapRequest {
    MapRequest {
        input,
        study: Some("SIGN-PH-002".to_string()),
        sheet: None,
        delimiter: ',',
        add_fields: Vec::new(),
        remove_fields: Vec::new(),
        assignments: Vec::new(),
        validate: false,
        export: ExportOptions {
            policy,
            correct_values: false,
        },
        destination,
    }
}

#[tokio::test]
async fn valid_only_writes_clean_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_input(dir.path());
    let output = dir.path().join("out").join("mapped.csv");
    let request = request(
        input,
        ExportPolicy::ValidOnly,
        Destination::File(output.clone()),
    );

    let report = run_map(load_catalog(None).expect("catalog"), &request)
        .await
        .expect("map");

    assert_eq!(
        report.status,
        MapStatus::Exported {
            path: output.clone(),
            exported_rows: 1,
            skipped_rows: 2,
        }
    );
    assert_eq!(report.status.exit_code(), 0);
    let validation = report.validation.expect("validation ran");
    assert_eq!(validation.invalid_rows, 2);

    insta::assert_snapshot!(fs::read_to_string(&output).expect("read export"), @r"
    STUDYID,SITENUM,SUBNUM,VISDAT
    SIGN-PH-002,101,101-001,2024-01-10
    ");
}

#[tokio::test]
async fn block_policy_refuses_and_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_input(dir.path());
    let out_dir = dir.path().join("exports");
    let request = request(
        input,
        ExportPolicy::Block,
        Destination::Directory(out_dir.clone()),
    );

    let report = run_map(load_catalog(None).expect("catalog"), &request)
        .await
        .expect("map");

    assert_eq!(report.status, MapStatus::Blocked { invalid_rows: 2 });
    assert_eq!(report.status.exit_code(), 2);
    assert!(!out_dir.exists());
}

#[tokio::test]
async fn cleared_required_column_reports_incomplete() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_input(dir.path());
    let mut request = request(input, ExportPolicy::All, Destination::DryRun);
    request.validate = true;
    request.assignments = vec!["subnum=".parse::<Assignment>().expect("assignment")];

    let report = run_map(load_catalog(None).expect("catalog"), &request)
        .await
        .expect("map");

    assert_eq!(report.status, MapStatus::Incomplete);
    assert_eq!(report.missing_required, vec!["SUBNUM".to_string()]);
    assert!(report.validation.is_none());
    assert_eq!(report.summary.required_mapped, 2);
}

#[tokio::test]
async fn custom_field_is_mapped_and_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_input(dir.path());
    let mut request = request(input, ExportPolicy::All, Destination::DryRun);
    request.add_fields = vec!["Comment".to_string()];
    request.assignments = vec!["comment=Comment".parse().expect("assignment")];

    let report = run_map(load_catalog(None).expect("catalog"), &request)
        .await
        .expect("map");

    assert_eq!(report.added_fields, vec!["Comment".to_string()]);
    let comment = report
        .mappings
        .iter()
        .find(|row| row.column == "comment")
        .expect("comment row");
    assert_eq!(comment.field.as_deref(), Some("Comment"));
    assert_eq!(comment.label.as_deref(), Some("Comment"));

    let subnum = report
        .mappings
        .iter()
        .find(|row| row.column == "subnum")
        .expect("subnum row");
    assert_eq!(subnum.label.as_deref(), Some("SUBNUM"));
    assert!(!comment.required);

    let status = serde_json::to_value(&report.status).expect("json");
    assert_eq!(
        status,
        serde_json::json!({ "kind": "dry-run", "exported_rows": 3, "skipped_rows": 0 })
    );
}

#[tokio::test]
async fn unknown_study_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_input(dir.path());
    let mut request = request(input, ExportPolicy::All, Destination::DryRun);
    request.study = Some("NOPE-001".to_string());

    let error = run_map(load_catalog(None).expect("catalog"), &request)
        .await
        .expect_err("unknown study");
    assert!(error.to_string().contains("NOPE-001"));
}

#[tokio::test]
async fn named_sheet_is_read_even_when_the_first_is_blank() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("sign.xlsx");
    fs::write(
        &input,
        build_xlsx(&[
            sheet("Cover", &[]),
            sheet(
                "Data",
                &[
                    &["studyid", "sitenum", "subnum", "visdat"],
                    &["SIGN-PH-002", "S101", "101-001", "2024-01-10"],
                ],
            ),
        ]),
    )
    .expect("write xlsx");
    let mut request = request(input, ExportPolicy::All, Destination::DryRun);
    request.sheet = Some("Data".to_string());

    let report = run_map(load_catalog(None).expect("catalog"), &request)
        .await
        .expect("map");

    assert_eq!(report.format, "Excel");
    assert_eq!(report.sheet.as_deref(), Some("Data"));
    assert_eq!(report.sheets, vec!["Cover".to_string(), "Data".to_string()]);
    assert_eq!(report.rows, 1);
    assert_eq!(
        report.status,
        MapStatus::DryRun {
            exported_rows: 1,
            skipped_rows: 0,
        }
    );
}
