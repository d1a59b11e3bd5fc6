mod rules;
mod upload;

pub use rules::{FieldFinding, field_errors, policy_term_error, sum_assured_error};
pub use upload::{Rejection, Screening, UploadPolicy, screen_files};
