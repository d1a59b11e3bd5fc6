use serde::{Deserialize, Serialize};

use crate::enums::{Gender, Title};

/// Loan side of the service record.
///
/// Identifiers and bounds are read-only for the session; only `sum_assured`,
/// `policy_term`, and `risk_commencement_date` accept edits. Dates are carried
/// as ISO `yyyy-MM-dd` strings, the wire format of the policy API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    pub loan_type: String,
    pub lan: String,
    pub policy_number: String,
    pub plan_number: String,
    pub pan_number: String,
    pub original_loan_amount: u64,
    pub sum_assured: u64,
    pub min_sum_assured: u64,
    pub max_sum_assured: u64,
    pub min_term: u32,
    pub max_term: u32,
    pub policy_term: u32,
    pub risk_commencement_date: String,
}

/// Member side of the service record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetails {
    pub member_number: String,
    pub title: Title,
    pub name: String,
    pub gender: Gender,
    pub date_of_birth: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
}

/// The combined loan + member data for one policy/member pair, as fetched
/// from the policy details endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub loan_details: LoanDetails,
    pub member_details: MemberDetails,
}

impl ServiceRecord {
    /// Identifier pair used by both the fetch query and the outgoing payload.
    pub fn identifiers(&self) -> (&str, &str) {
        (
            self.loan_details.policy_number.as_str(),
            self.member_details.member_number.as_str(),
        )
    }
}

/// Read-only bank reference data shown alongside the form.
///
/// Never part of the change-set: the panel is populated from fixed reference
/// data, not from the fetched record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub member_bank_account: String,
    #[serde(rename = "memberIFSC")]
    pub member_ifsc: String,
    pub member_bank_address: String,
    pub mph_bank_account: String,
    #[serde(rename = "mphIFSC")]
    pub mph_ifsc: String,
    pub mph_bank_address: String,
}
