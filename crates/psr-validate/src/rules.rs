//! Field-level validation rules.
//!
//! Rules are pure functions of the working record; they return message
//! strings, never errors, and are recomputed whenever an input changes.

use serde::Serialize;

use psr_model::{FieldId, ServiceRecord};

/// A failed field rule, surfaced inline next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFinding {
    pub field: FieldId,
    pub message: String,
}

/// Bounds rule for the sum assured.
///
/// Fails when the amount is zero or outside the policy's limits. Zero also
/// covers cleared or unparseable input, which the form stores as zero.
pub fn sum_assured_error(sum_assured: u64, min: u64, max: u64) -> Option<String> {
    if sum_assured == 0 || sum_assured < min || sum_assured > max {
        Some(format!("Sum Assured must be between {min} and {max}"))
    } else {
        None
    }
}

/// Bounds rule for the policy term.
pub fn policy_term_error(term: u32, min: u32, max: u32) -> Option<String> {
    if term < min || term > max {
        Some(format!("Policy Term must be between {min} and {max}"))
    } else {
        None
    }
}

/// Evaluate every field rule against the working record.
pub fn field_errors(record: &ServiceRecord) -> Vec<FieldFinding> {
    let loan = &record.loan_details;
    let mut findings = Vec::new();
    if let Some(message) = sum_assured_error(loan.sum_assured, loan.min_sum_assured, loan.max_sum_assured)
    {
        findings.push(FieldFinding {
            field: FieldId::SumAssured,
            message,
        });
    }
    if let Some(message) = policy_term_error(loan.policy_term, loan.min_term, loan.max_term) {
        findings.push(FieldFinding {
            field: FieldId::PolicyTerm,
            message,
        });
    }
    findings
}
