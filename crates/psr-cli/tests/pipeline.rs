//! Integration tests for the session pipeline.

use std::path::PathBuf;

use psr_cli::pipeline::{apply_edits, load_edits, run_submission, stage_session};
use psr_client::{FetchQuery, FilePolicyService};
use psr_model::{Attachment, ChangeSet, Gender, Title};
use psr_session::EditSession;
use psr_validate::UploadPolicy;

struct Fixture {
    _dir: tempfile::TempDir,
    service: FilePolicyService,
    output_dir: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("temp dir");
    let record_path = dir.path().join("policy.json");
    let record = psr_reference::load_demo_record().expect("demo record");
    std::fs::write(
        &record_path,
        serde_json::to_string_pretty(&record).expect("encode record"),
    )
    .expect("write record");
    let output_dir = dir.path().join("output");
    let service = FilePolicyService::new(&record_path, &output_dir);
    Fixture {
        _dir: dir,
        service,
        output_dir,
    }
}

fn query() -> FetchQuery {
    FetchQuery::new("POL001", "MEM001")
}

fn edits(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().cloned().expect("edits object")
}

fn pdf() -> Attachment {
    Attachment::new("proof.pdf", b"%PDF-1.4 minimal".to_vec())
}

#[test]
fn staging_applies_edits_and_attachments() {
    let fixture = fixture();
    let staged = stage_session(
        &fixture.service,
        &query(),
        &edits(serde_json::json!({
            "sumAssured": 2_000_000,
            "gender": "Female",
            "email": "new@example.com",
        })),
        vec![pdf()],
        &UploadPolicy::default(),
    )
    .expect("stage session");

    let session = &staged.session;
    assert!(staged.screening.rejected.is_empty());
    assert!(session.is_submittable());
    assert_eq!(session.working().member_details.gender, Gender::Female);
    // The derived title travels with the gender edit.
    assert_eq!(session.working().member_details.title, Title::Ms);

    let change_set = session.change_set();
    let fields: Vec<&str> = change_set
        .modified_fields
        .iter()
        .map(|entry| entry.field.as_str())
        .collect();
    assert_eq!(fields, ["sumAssured", "title", "gender", "email"]);
}

#[test]
fn change_set_payload_shape_is_stable() {
    let fixture = fixture();
    let staged = stage_session(
        &fixture.service,
        &query(),
        &edits(serde_json::json!({ "sumAssured": 2_000_000 })),
        vec![pdf()],
        &UploadPolicy::default(),
    )
    .expect("stage session");

    let json = serde_json::to_string(&staged.session.change_set()).expect("encode change set");
    insta::assert_snapshot!(
        json,
        @r#"{"policyNumber":"POL001","memberNumber":"MEM001","modifiedFields":[{"field":"sumAssured","oldValue":1800000,"newValue":2000000}]}"#
    );
}

#[test]
fn submission_writes_the_request_and_resets_the_session() {
    let fixture = fixture();
    let mut staged = stage_session(
        &fixture.service,
        &query(),
        &edits(serde_json::json!({ "sumAssured": 2_000_000 })),
        vec![pdf()],
        &UploadPolicy::default(),
    )
    .expect("stage session");

    let report = run_submission(&fixture.service, &mut staged.session).expect("submit");
    assert!(report.success);
    assert_eq!(report.notice, "Service request created successfully.");

    let request: ChangeSet = serde_json::from_str(
        &std::fs::read_to_string(fixture.output_dir.join("request.json")).expect("request.json"),
    )
    .expect("decode request");
    assert_eq!(request.modified_fields.len(), 1);
    assert_eq!(request.modified_fields[0].field, "sumAssured");
    assert!(fixture.output_dir.join("service-request.multipart").is_file());
    assert!(fixture.output_dir.join("uploadedDocuments/proof.pdf").is_file());

    // Success reset: the edit became the new baseline.
    assert!(staged.session.change_set().is_empty());
    assert!(!staged.session.has_attachment());
    assert_eq!(
        staged.session.working().loan_details.sum_assured,
        2_000_000
    );
}

#[test]
fn rejected_files_are_not_staged() {
    let fixture = fixture();
    let staged = stage_session(
        &fixture.service,
        &query(),
        &edits(serde_json::json!({})),
        vec![Attachment::new("malware.exe", vec![0u8; 16])],
        &UploadPolicy::default(),
    )
    .expect("stage session");

    assert_eq!(staged.screening.rejected.len(), 1);
    assert_eq!(
        staged.screening.last_error(),
        Some("File malware.exe is not an accepted file type.")
    );
    assert!(!staged.session.has_attachment());
    assert!(!staged.session.is_submittable());
}

#[test]
fn submission_without_attachments_is_refused() {
    let fixture = fixture();
    let mut staged = stage_session(
        &fixture.service,
        &query(),
        &edits(serde_json::json!({ "sumAssured": 2_000_000 })),
        Vec::new(),
        &UploadPolicy::default(),
    )
    .expect("stage session");

    let error = run_submission(&fixture.service, &mut staged.session).unwrap_err();
    assert!(error.to_string().contains("enter review"));
}

#[test]
fn unknown_edit_fields_are_reported() {
    let record = psr_reference::load_demo_record().expect("demo record");
    let mut session = EditSession::new(record);
    let error = apply_edits(
        &mut session,
        &edits(serde_json::json!({ "noSuchField": 1 })),
    )
    .unwrap_err();
    assert!(error.to_string().contains("unknown field in edits"));
}

#[test]
fn read_only_edits_are_reported() {
    let record = psr_reference::load_demo_record().expect("demo record");
    let mut session = EditSession::new(record);
    let error = apply_edits(
        &mut session,
        &edits(serde_json::json!({ "policyNumber": "POL999" })),
    )
    .unwrap_err();
    assert!(error.to_string().contains("apply edit for policyNumber"));
}

#[test]
fn edits_file_must_be_an_object() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("edits.json");
    std::fs::write(&path, "[1, 2, 3]").expect("write edits");
    let error = load_edits(&path).unwrap_err();
    assert!(error.to_string().contains("must be a JSON object"));

    std::fs::write(&path, r#"{"sumAssured": "2000000"}"#).expect("write edits");
    let map = load_edits(&path).expect("load edits");
    assert_eq!(map.len(), 1);
}
