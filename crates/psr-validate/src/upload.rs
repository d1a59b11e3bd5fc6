//! Attachment screening against the upload policy.

use serde::Serialize;

use psr_model::Attachment;
use psr_reference::{DEFAULT_ACCEPTED_EXTENSIONS, DEFAULT_MAX_FILE_SIZE_MB};

const BYTES_PER_MB: u64 = 1_048_576;

/// Configured limits for supporting-document uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_file_size_mb: u64,
    /// Accepted file-name suffixes, matched case-sensitively.
    pub accepted_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            accepted_extensions: DEFAULT_ACCEPTED_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
        }
    }
}

impl UploadPolicy {
    pub fn max_bytes(&self) -> u64 {
        self.max_file_size_mb * BYTES_PER_MB
    }

    fn accepts_name(&self, file_name: &str) -> bool {
        self.accepted_extensions
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str()))
    }
}

/// One rejected candidate file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub file_name: String,
    pub message: String,
}

/// Outcome of screening a batch of candidate files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screening {
    pub accepted: Vec<Attachment>,
    pub rejected: Vec<Rejection>,
}

impl Screening {
    /// Message of the most recent rejection, for callers with a single
    /// error slot.
    pub fn last_error(&self) -> Option<&str> {
        self.rejected.last().map(|rejection| rejection.message.as_str())
    }
}

/// Screen candidate files against the policy.
///
/// Rules run per file and short-circuit: the size limit is checked before the
/// extension, so an oversized file with a bad extension reports only the size
/// message. Every rejected file is reported.
pub fn screen_files(policy: &UploadPolicy, candidates: Vec<Attachment>) -> Screening {
    let mut screening = Screening::default();
    for candidate in candidates {
        if candidate.size() > policy.max_bytes() {
            screening.rejected.push(Rejection {
                message: format!(
                    "File {} is too large. Maximum size is {}MB.",
                    candidate.file_name, policy.max_file_size_mb
                ),
                file_name: candidate.file_name,
            });
        } else if !policy.accepts_name(&candidate.file_name) {
            screening.rejected.push(Rejection {
                message: format!("File {} is not an accepted file type.", candidate.file_name),
                file_name: candidate.file_name,
            });
        } else {
            screening.accepted.push(candidate);
        }
    }
    screening
}
