use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One field whose working value differs from its original value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEntry {
    /// Wire name of the changed field.
    pub field: String,
    pub old_value: Value,
    pub new_value: Value,
}

/// The minimal field-level diff between original and working records,
/// JSON-encoded into the `request` part of the submission.
///
/// `policy_number` and `member_number` are read from the working record.
/// A field name appears at most once in `modified_fields`; loan entries come
/// first, each group in its declared field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    pub policy_number: String,
    pub member_number: String,
    pub modified_fields: Vec<ChangeEntry>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.modified_fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modified_fields.len()
    }

    /// Entry for a field, if that field changed.
    pub fn entry(&self, field: &str) -> Option<&ChangeEntry> {
        self.modified_fields.iter().find(|entry| entry.field == field)
    }
}
