//! Policy service contract and the offline file binding.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use psr_model::ServiceRecord;

use crate::error::{FetchError, SubmitError};
use crate::multipart::{DOCUMENT_PART_NAME, SubmissionBody};

/// Path of the policy details endpoint.
pub const GET_POLICY_DETAILS_PATH: &str = "/api/v1/financialService/get-policy-details";

/// Path of the service request endpoint.
pub const CREATE_SERVICE_REQUEST_PATH: &str = "/api/v1/financialService/create-service-request";

/// Query parameters of the policy details endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchQuery {
    #[serde(rename = "policyNumber")]
    pub policy_number: String,
    #[serde(rename = "memberNo")]
    pub member_no: String,
}

impl FetchQuery {
    pub fn new(policy_number: impl Into<String>, member_no: impl Into<String>) -> Self {
        Self {
            policy_number: policy_number.into(),
            member_no: member_no.into(),
        }
    }

    /// Render the query string as it appears on the wire.
    pub fn to_query_string(&self) -> String {
        format!(
            "policyNumber={}&memberNo={}",
            self.policy_number, self.member_no
        )
    }
}

/// A successful submission is any 2xx response. The original client accepted
/// exactly 200; other 2xx statuses are deliberately normalized to success.
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// The two collaborator calls of an editing session.
///
/// Implementations own the transport; the session core never performs I/O.
pub trait PolicyService {
    fn fetch_policy_details(&self, query: &FetchQuery) -> Result<ServiceRecord, FetchError>;

    fn create_service_request(&self, body: &SubmissionBody) -> Result<(), SubmitError>;
}

/// File-backed service binding for offline runs and tests.
///
/// Fetch reads the record from a JSON file; submit writes the request JSON,
/// the raw multipart body, and the staged documents into an output directory.
#[derive(Debug, Clone)]
pub struct FilePolicyService {
    record_path: PathBuf,
    output_dir: PathBuf,
}

impl FilePolicyService {
    pub fn new(record_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            record_path: record_path.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl PolicyService for FilePolicyService {
    fn fetch_policy_details(&self, query: &FetchQuery) -> Result<ServiceRecord, FetchError> {
        debug!(
            path = %self.record_path.display(),
            query = %query.to_query_string(),
            "reading policy details"
        );
        let raw = fs::read_to_string(&self.record_path)?;
        let record: ServiceRecord = serde_json::from_str(&raw)?;
        let (policy_number, member_number) = record.identifiers();
        if policy_number != query.policy_number || member_number != query.member_no {
            warn!(
                policy_number,
                member_number, "record identifiers differ from the fetch query"
            );
        }
        Ok(record)
    }

    fn create_service_request(&self, body: &SubmissionBody) -> Result<(), SubmitError> {
        fs::create_dir_all(&self.output_dir)?;
        let request_path = self.output_dir.join("request.json");
        let pretty: serde_json::Value = serde_json::from_str(body.request_json())?;
        fs::write(&request_path, format!("{}\n", serde_json::to_string_pretty(&pretty)?))?;

        let body_path = self.output_dir.join("service-request.multipart");
        fs::write(&body_path, body.bytes())?;

        let documents_dir = self.output_dir.join(DOCUMENT_PART_NAME);
        if !body.attachments().is_empty() {
            fs::create_dir_all(&documents_dir)?;
        }
        for attachment in body.attachments() {
            let file_name = sanitize_file_name(&attachment.file_name);
            fs::write(documents_dir.join(file_name), &attachment.bytes)?;
        }
        debug!(
            output_dir = %self.output_dir.display(),
            files = body.attachments().len(),
            "service request written"
        );
        Ok(())
    }
}

/// Keep only the final path component of a client-supplied file name.
fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .filter(|part| !part.is_empty() && *part != "." && *part != "..")
        .unwrap_or("document");
    base.to_string()
}
