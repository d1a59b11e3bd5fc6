//! Unit tests for field rules and attachment screening.

use proptest::prelude::*;

use psr_model::{Attachment, FieldId};
use psr_validate::{
    UploadPolicy, field_errors, policy_term_error, screen_files, sum_assured_error,
};

fn file(name: &str, size: usize) -> Attachment {
    Attachment::new(name, vec![0u8; size])
}

#[test]
fn sum_assured_in_range_passes() {
    assert_eq!(sum_assured_error(1_800_000, 500_000, 5_000_000), None);
    assert_eq!(sum_assured_error(500_000, 500_000, 5_000_000), None);
    assert_eq!(sum_assured_error(5_000_000, 500_000, 5_000_000), None);
}

#[test]
fn sum_assured_out_of_range_reports_bounds() {
    let message = sum_assured_error(400_000, 500_000, 5_000_000).expect("below min");
    assert_eq!(message, "Sum Assured must be between 500000 and 5000000");
    assert!(sum_assured_error(6_000_000, 500_000, 5_000_000).is_some());
}

#[test]
fn sum_assured_zero_always_fails() {
    assert!(sum_assured_error(0, 500_000, 5_000_000).is_some());
    // Zero fails even when the lower bound is zero.
    assert!(sum_assured_error(0, 0, 5_000_000).is_some());
}

proptest! {
    #[test]
    fn sum_assured_rule_matches_bounds(
        min in 0u64..10_000_000,
        span in 0u64..10_000_000,
        sum in 0u64..30_000_000,
    ) {
        let max = min + span;
        let in_range = sum != 0 && sum >= min && sum <= max;
        prop_assert_eq!(sum_assured_error(sum, min, max).is_none(), in_range);
    }
}

#[test]
fn policy_term_rule_mirrors_the_select_bounds() {
    assert_eq!(policy_term_error(20, 5, 30), None);
    assert_eq!(
        policy_term_error(3, 5, 30).expect("below min"),
        "Policy Term must be between 5 and 30"
    );
    assert!(policy_term_error(35, 5, 30).is_some());
}

#[test]
fn field_errors_collect_per_field() {
    let mut record = psr_reference::load_demo_record().expect("demo record");
    assert!(field_errors(&record).is_empty());

    record.loan_details.sum_assured = 0;
    record.loan_details.policy_term = 99;
    let findings = field_errors(&record);
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].field, FieldId::SumAssured);
    assert_eq!(findings[1].field, FieldId::PolicyTerm);
}

#[test]
fn oversized_file_is_rejected_with_limit_message() {
    let policy = UploadPolicy {
        max_file_size_mb: 1,
        ..UploadPolicy::default()
    };
    let screening = screen_files(&policy, vec![file("large.pdf", 2 * 1_048_576)]);
    assert!(screening.accepted.is_empty());
    assert_eq!(
        screening.last_error(),
        Some("File large.pdf is too large. Maximum size is 1MB.")
    );
}

#[test]
fn boundary_size_is_accepted() {
    let policy = UploadPolicy {
        max_file_size_mb: 1,
        ..UploadPolicy::default()
    };
    let screening = screen_files(&policy, vec![file("exact.pdf", 1_048_576)]);
    assert_eq!(screening.accepted.len(), 1);
    assert!(screening.rejected.is_empty());
}

#[test]
fn unknown_extension_is_rejected() {
    let screening = screen_files(&UploadPolicy::default(), vec![file("notes.txt", 10)]);
    assert!(screening.accepted.is_empty());
    assert_eq!(
        screening.last_error(),
        Some("File notes.txt is not an accepted file type.")
    );
}

#[test]
fn extension_match_is_case_sensitive() {
    let screening = screen_files(&UploadPolicy::default(), vec![file("SCAN.PDF", 10)]);
    assert!(screening.accepted.is_empty());
    assert_eq!(
        screening.last_error(),
        Some("File SCAN.PDF is not an accepted file type.")
    );
}

#[test]
fn size_rule_runs_before_extension_rule() {
    let policy = UploadPolicy {
        max_file_size_mb: 1,
        ..UploadPolicy::default()
    };
    let screening = screen_files(&policy, vec![file("huge.txt", 2 * 1_048_576)]);
    assert_eq!(
        screening.last_error(),
        Some("File huge.txt is too large. Maximum size is 1MB.")
    );
}

#[test]
fn every_rejection_is_reported() {
    let policy = UploadPolicy {
        max_file_size_mb: 1,
        ..UploadPolicy::default()
    };
    let screening = screen_files(
        &policy,
        vec![
            file("big.pdf", 3 * 1_048_576),
            file("ok.jpg", 100),
            file("odd.exe", 100),
        ],
    );
    assert_eq!(screening.accepted.len(), 1);
    assert_eq!(screening.accepted[0].file_name, "ok.jpg");
    assert_eq!(screening.rejected.len(), 2);
    assert_eq!(screening.rejected[0].file_name, "big.pdf");
    assert_eq!(screening.rejected[1].file_name, "odd.exe");
    // Single-slot callers see the most recent rejection.
    assert_eq!(
        screening.last_error(),
        Some("File odd.exe is not an accepted file type.")
    );
}
