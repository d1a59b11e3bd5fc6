use serde::{Deserialize, Serialize};

/// A user-selected file staged for upload.
///
/// Lives only for the editing session: created when screening accepts a
/// candidate file, destroyed on explicit removal or when a successful
/// submission resets the attachment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Size in bytes, the quantity the upload limit is checked against.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
