//! Change-set reduction: the minimal field-level diff between the original
//! and working records.

use std::collections::BTreeSet;

use psr_model::{ChangeEntry, ChangeSet, ServiceRecord, all_fields};

/// Compute the ordered change-set for a `(original, working)` pair.
///
/// Fields are walked loan group first, each group in its declared order.
/// A field is changed when its JSON value differs between the two records;
/// comparison is deep value equality (nested object keys order-insensitive,
/// arrays order-sensitive). A field name is emitted at most once: names are
/// recorded as entries are appended, and a later field carrying an
/// already-recorded name is skipped. Identifiers are read from the working
/// record.
///
/// Pure and idempotent; callers recompute on every use.
pub fn compute_change_set(original: &ServiceRecord, working: &ServiceRecord) -> ChangeSet {
    let mut recorded: BTreeSet<&'static str> = BTreeSet::new();
    let mut modified_fields = Vec::new();
    for field in all_fields() {
        let name = field.wire_name();
        if recorded.contains(name) {
            continue;
        }
        let old_value = field.value_of(original);
        let new_value = field.value_of(working);
        if old_value != new_value {
            modified_fields.push(ChangeEntry {
                field: name.to_string(),
                old_value,
                new_value,
            });
            recorded.insert(name);
        }
    }
    ChangeSet {
        policy_number: working.loan_details.policy_number.clone(),
        member_number: working.member_details.member_number.clone(),
        modified_fields,
    }
}
