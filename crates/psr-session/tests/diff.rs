//! Property tests for the change-set reducer.

use proptest::prelude::*;

use psr_model::{FieldId, FieldValue, Gender, ServiceRecord, all_fields};
use psr_session::{EditSession, compute_change_set};

fn record() -> ServiceRecord {
    psr_reference::load_demo_record().expect("demo record")
}

fn declared_position(name: &str) -> usize {
    all_fields()
        .position(|field| field.wire_name() == name)
        .expect("change-set fields come from the registry")
}

proptest! {
    #[test]
    fn reducer_is_idempotent_ordered_and_resettable(
        sum in prop::option::of(0u64..10_000_000u64),
        term in prop::option::of(0u32..60u32),
        phone in prop::option::of("[0-9]{10}"),
        email in prop::option::of("[a-z]{1,8}@example\\.com"),
        gender in prop::option::of(0usize..3),
    ) {
        let mut session = EditSession::new(record());
        if let Some(sum) = sum {
            session.set_field(FieldId::SumAssured, FieldValue::Amount(sum)).unwrap();
        }
        if let Some(term) = term {
            session.set_field(FieldId::PolicyTerm, FieldValue::Term(term)).unwrap();
        }
        if let Some(phone) = phone {
            session.set_field(FieldId::PhoneNumber, FieldValue::Text(phone)).unwrap();
        }
        if let Some(email) = email {
            session.set_field(FieldId::Email, FieldValue::Text(email)).unwrap();
        }
        if let Some(gender) = gender {
            let gender = [Gender::Male, Gender::Female, Gender::Other][gender];
            session.set_gender(gender).unwrap();
        }

        let first = session.change_set();
        let second = session.change_set();
        prop_assert_eq!(&first, &second);

        // Each field name appears at most once.
        let mut names: Vec<&str> = first
            .modified_fields
            .iter()
            .map(|entry| entry.field.as_str())
            .collect();
        let positions: Vec<usize> = names.iter().copied().map(declared_position).collect();
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), first.modified_fields.len());

        // Every entry reflects a real difference.
        for entry in &first.modified_fields {
            prop_assert_ne!(&entry.old_value, &entry.new_value);
        }

        // Re-initializing from the working record yields an empty diff.
        let reset = EditSession::new(session.working().clone());
        prop_assert!(reset.change_set().is_empty());
    }
}

#[test]
fn identifiers_are_read_from_the_working_record() {
    let original = record();
    let working = original.clone();
    let change_set = compute_change_set(&original, &working);
    assert_eq!(change_set.policy_number, "POL001");
    assert_eq!(change_set.member_number, "MEM001");
    assert!(change_set.is_empty());
}

#[test]
fn unchanged_equal_values_never_appear() {
    let original = record();
    let mut working = original.clone();
    working.loan_details.sum_assured = original.loan_details.sum_assured;
    let change_set = compute_change_set(&original, &working);
    assert!(change_set.entry("sumAssured").is_none());
}
