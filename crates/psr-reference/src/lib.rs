//! Bundled read-only reference data.
//!
//! The bank panel is populated from fixed reference data rather than the
//! fetched record, upload limits have product-wide defaults, and a demo
//! policy record ships for offline runs and tests. Nothing here is ever part
//! of a change-set.

use psr_model::{BankDetails, ServiceRecord};
use thiserror::Error;

/// Bundled demo record, the same shape the policy details endpoint returns.
const DEMO_POLICY_JSON: &str = include_str!("../data/demo_policy.json");

/// Largest accepted upload, in megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 100;

/// File-name suffixes accepted for supporting documents. Matching is
/// case-sensitive.
pub const DEFAULT_ACCEPTED_EXTENSIONS: &[&str] = &[".pdf", ".jpg", ".jpeg", ".png"];

/// Default identifiers used when no query is supplied.
pub const DEMO_POLICY_NUMBER: &str = "POL001";
pub const DEMO_MEMBER_NUMBER: &str = "MEM001";

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("bundled record is invalid: {0}")]
    InvalidBundledRecord(#[from] serde_json::Error),
}

/// The fixed bank-details panel content.
pub fn bank_reference() -> BankDetails {
    BankDetails {
        member_bank_account: "1234567890".to_string(),
        member_ifsc: "ABCD0123456".to_string(),
        member_bank_address: "XYZ Bank, 456 Bank St, Anytown, AT 12345".to_string(),
        mph_bank_account: "0987654321".to_string(),
        mph_ifsc: "EFGH0987654".to_string(),
        mph_bank_address: "ABC Bank, 789 MPH St, Anytown, AT 12345".to_string(),
    }
}

/// Decode the bundled demo policy record.
pub fn load_demo_record() -> Result<ServiceRecord, ReferenceError> {
    Ok(serde_json::from_str(DEMO_POLICY_JSON)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_record_decodes() {
        let record = load_demo_record().expect("demo record");
        assert_eq!(record.identifiers(), (DEMO_POLICY_NUMBER, DEMO_MEMBER_NUMBER));
        assert!(record.loan_details.min_sum_assured <= record.loan_details.max_sum_assured);
    }

    #[test]
    fn bank_reference_is_fully_populated() {
        let bank = bank_reference();
        assert!(!bank.member_bank_account.is_empty());
        assert!(!bank.mph_ifsc.is_empty());
    }
}
