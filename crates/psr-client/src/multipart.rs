//! Multipart encoding of the outgoing service request.
//!
//! The wire body carries one `request` part holding the JSON change-set and
//! one `uploadedDocuments` part per staged attachment, in staging order. The
//! boundary is derived from the request JSON's digest, so the same submission
//! always encodes to the same bytes; if the derived boundary happens to occur
//! inside any part, it is re-derived with a counter until it does not.

use psr_model::{Attachment, ChangeSet};

use crate::digest::sha256_hex;
use crate::error::SubmitError;

/// Part name for the JSON-encoded change-set.
pub const REQUEST_PART_NAME: &str = "request";

/// Part name repeated for each staged document.
pub const DOCUMENT_PART_NAME: &str = "uploadedDocuments";

/// Encoded multipart/form-data submission body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionBody {
    request_json: String,
    boundary: String,
    bytes: Vec<u8>,
    attachments: Vec<Attachment>,
}

impl SubmissionBody {
    /// Encode a change-set plus attachments into the request body.
    pub fn build(change_set: &ChangeSet, attachments: &[Attachment]) -> Result<Self, SubmitError> {
        let request_json = serde_json::to_string(change_set)?;
        let boundary = derive_boundary(&request_json, attachments);
        let bytes = encode(&boundary, &request_json, attachments);
        Ok(Self {
            request_json,
            boundary,
            bytes,
            attachments: attachments.to_vec(),
        })
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn request_json(&self) -> &str {
        &self.request_json
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Documents in staging order, as they appear in the body.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}

/// Derive a boundary that collides with none of the part payloads.
fn derive_boundary(request_json: &str, attachments: &[Attachment]) -> String {
    let mut salt = 0u32;
    loop {
        let seed = format!("{request_json}\u{0}{salt}");
        let candidate = format!("psr-{}", &sha256_hex(seed.as_bytes())[..24]);
        let collides = request_json.contains(&candidate)
            || attachments.iter().any(|attachment| {
                attachment.file_name.contains(&candidate)
                    || contains_subslice(&attachment.bytes, candidate.as_bytes())
            });
        if !collides {
            return candidate;
        }
        salt += 1;
    }
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

fn encode(boundary: &str, request_json: &str, attachments: &[Attachment]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{REQUEST_PART_NAME}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/json\r\n\r\n");
    body.extend_from_slice(request_json.as_bytes());
    body.extend_from_slice(b"\r\n");
    for attachment in attachments {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{DOCUMENT_PART_NAME}\"; filename=\"{}\"\r\n",
                attachment.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(&attachment.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
