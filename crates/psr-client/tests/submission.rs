//! Tests for the submission body encoding and the file-backed service.

use psr_model::{Attachment, ChangeEntry, ChangeSet};
use psr_client::{
    FetchQuery, FilePolicyService, PolicyService, SubmissionBody, is_success_status, sha256_hex,
};

fn change_set() -> ChangeSet {
    ChangeSet {
        policy_number: "POL001".to_string(),
        member_number: "MEM001".to_string(),
        modified_fields: vec![ChangeEntry {
            field: "sumAssured".to_string(),
            old_value: serde_json::json!(1_800_000),
            new_value: serde_json::json!(2_000_000),
        }],
    }
}

fn attachments() -> Vec<Attachment> {
    vec![
        Attachment::new("proof.pdf", b"pdf bytes".to_vec()),
        Attachment::new("photo.jpg", b"jpg bytes".to_vec()),
    ]
}

#[test]
fn request_part_round_trips_the_change_set() {
    let body = SubmissionBody::build(&change_set(), &attachments()).expect("build body");
    let round: ChangeSet = serde_json::from_str(body.request_json()).expect("request json");
    assert_eq!(round, change_set());
}

#[test]
fn body_carries_one_part_per_document_in_order() {
    let body = SubmissionBody::build(&change_set(), &attachments()).expect("build body");
    let text = String::from_utf8_lossy(body.bytes()).into_owned();

    assert!(text.contains("Content-Disposition: form-data; name=\"request\""));
    assert!(text.contains("Content-Type: application/json"));
    let first = text
        .find("name=\"uploadedDocuments\"; filename=\"proof.pdf\"")
        .expect("first document part");
    let second = text
        .find("name=\"uploadedDocuments\"; filename=\"photo.jpg\"")
        .expect("second document part");
    assert!(first < second);
    assert!(text.contains("pdf bytes"));
}

#[test]
fn boundary_frames_the_body_and_avoids_the_content() {
    let body = SubmissionBody::build(&change_set(), &attachments()).expect("build body");
    let boundary = body.boundary().to_string();
    assert_eq!(
        body.content_type(),
        format!("multipart/form-data; boundary={boundary}")
    );
    let text = String::from_utf8_lossy(body.bytes()).into_owned();
    assert!(text.starts_with(&format!("--{boundary}\r\n")));
    assert!(text.ends_with(&format!("--{boundary}--\r\n")));
    assert!(!body.request_json().contains(&boundary));
    for attachment in body.attachments() {
        assert!(!String::from_utf8_lossy(&attachment.bytes).contains(&boundary));
    }
}

#[test]
fn encoding_is_deterministic() {
    let first = SubmissionBody::build(&change_set(), &attachments()).expect("build body");
    let second = SubmissionBody::build(&change_set(), &attachments()).expect("build body");
    assert_eq!(first, second);
    assert_eq!(sha256_hex(first.bytes()), sha256_hex(second.bytes()));
}

#[test]
fn any_2xx_status_counts_as_success() {
    assert!(is_success_status(200));
    assert!(is_success_status(201));
    assert!(is_success_status(204));
    assert!(!is_success_status(199));
    assert!(!is_success_status(300));
    assert!(!is_success_status(404));
    assert!(!is_success_status(500));
}

#[test]
fn fetch_query_renders_wire_parameter_names() {
    let query = FetchQuery::new("POL001", "MEM001");
    assert_eq!(query.to_query_string(), "policyNumber=POL001&memberNo=MEM001");
}

#[test]
fn file_service_reads_the_record_and_writes_the_request() {
    let dir = tempfile::tempdir().expect("temp dir");
    let record_path = dir.path().join("policy.json");
    let record = psr_reference::load_demo_record().expect("demo record");
    std::fs::write(
        &record_path,
        serde_json::to_string_pretty(&record).expect("encode record"),
    )
    .expect("write record");

    let output_dir = dir.path().join("out");
    let service = FilePolicyService::new(&record_path, &output_dir);

    let fetched = service
        .fetch_policy_details(&FetchQuery::new("POL001", "MEM001"))
        .expect("fetch");
    assert_eq!(fetched, record);

    let body = SubmissionBody::build(&change_set(), &attachments()).expect("build body");
    service.create_service_request(&body).expect("submit");

    let request: ChangeSet = serde_json::from_str(
        &std::fs::read_to_string(output_dir.join("request.json")).expect("request.json"),
    )
    .expect("decode request");
    assert_eq!(request, change_set());
    assert_eq!(
        std::fs::read(output_dir.join("service-request.multipart")).expect("body file"),
        body.bytes()
    );
    assert!(output_dir.join("uploadedDocuments/proof.pdf").is_file());
    assert!(output_dir.join("uploadedDocuments/photo.jpg").is_file());
}

#[test]
fn fetch_surfaces_missing_file_as_an_error() {
    let service = FilePolicyService::new("/nonexistent/policy.json", "/tmp/unused");
    let err = service
        .fetch_policy_details(&FetchQuery::new("POL001", "MEM001"))
        .unwrap_err();
    assert!(err.to_string().contains("io error"));
}
