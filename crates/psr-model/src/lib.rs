pub mod attachment;
pub mod change;
pub mod dates;
pub mod enums;
pub mod error;
pub mod fields;
pub mod record;

pub use attachment::Attachment;
pub use change::{ChangeEntry, ChangeSet};
pub use dates::{ISO_DATE_FORMAT, format_iso_date, parse_iso_date};
pub use enums::{Gender, Title};
pub use error::{ModelError, Result};
pub use fields::{
    FieldAccess, FieldGroup, FieldId, FieldKind, FieldValue, LOAN_FIELDS, MEMBER_FIELDS,
    all_fields, apply,
};
pub use record::{BankDetails, LoanDetails, MemberDetails, ServiceRecord};
