mod digest;
mod error;
mod multipart;
mod service;

pub use digest::sha256_hex;
pub use error::{FetchError, SubmitError};
pub use multipart::{DOCUMENT_PART_NAME, REQUEST_PART_NAME, SubmissionBody};
pub use service::{
    CREATE_SERVICE_REQUEST_PATH, FetchQuery, FilePolicyService, GET_POLICY_DETAILS_PATH,
    PolicyService, is_success_status,
};
