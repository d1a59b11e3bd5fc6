//! Field registry for the service record.
//!
//! Every record field is declared here once, with its sub-group, wire name,
//! access class, and value kind. Mutation routes through this table instead of
//! writing a name into both sub-groups and relying on the absent key to no-op,
//! so an unknown or read-only write is an error rather than a silent miss.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::dates::parse_iso_date;
use crate::enums::{Gender, Title};
use crate::error::ModelError;
use crate::record::ServiceRecord;

/// Sub-group a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldGroup {
    Loan,
    Member,
}

impl FieldGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldGroup::Loan => "Loan",
            FieldGroup::Member => "Member",
        }
    }
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a session may write the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldAccess {
    ReadOnly,
    Editable,
}

/// Value kind accepted by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    /// Free-form text.
    Text,
    /// Monetary amount in whole currency units.
    Amount,
    /// Term length in years.
    Term,
    /// ISO `yyyy-MM-dd` date.
    Date,
    /// Gender select value.
    Gender,
    /// Title select value.
    Title,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldKind::Text => "text",
            FieldKind::Amount => "amount",
            FieldKind::Term => "term",
            FieldKind::Date => "date",
            FieldKind::Gender => "gender",
            FieldKind::Title => "title",
        };
        write!(f, "{label}")
    }
}

/// One field of the service record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldId {
    LoanType,
    Lan,
    PolicyNumber,
    PlanNumber,
    PanNumber,
    OriginalLoanAmount,
    SumAssured,
    MinSumAssured,
    MaxSumAssured,
    MinTerm,
    MaxTerm,
    PolicyTerm,
    RiskCommencementDate,
    MemberNumber,
    Title,
    Name,
    Gender,
    DateOfBirth,
    Address,
    PhoneNumber,
    Email,
}

/// Loan fields in their declared order. The change-set reducer walks this
/// list first, so loan changes always precede member changes in the output.
pub const LOAN_FIELDS: &[FieldId] = &[
    FieldId::LoanType,
    FieldId::Lan,
    FieldId::PolicyNumber,
    FieldId::PlanNumber,
    FieldId::PanNumber,
    FieldId::OriginalLoanAmount,
    FieldId::SumAssured,
    FieldId::MinSumAssured,
    FieldId::MaxSumAssured,
    FieldId::MinTerm,
    FieldId::MaxTerm,
    FieldId::PolicyTerm,
    FieldId::RiskCommencementDate,
];

/// Member fields in their declared order.
pub const MEMBER_FIELDS: &[FieldId] = &[
    FieldId::MemberNumber,
    FieldId::Title,
    FieldId::Name,
    FieldId::Gender,
    FieldId::DateOfBirth,
    FieldId::Address,
    FieldId::PhoneNumber,
    FieldId::Email,
];

/// All record fields, loan group first.
pub fn all_fields() -> impl Iterator<Item = FieldId> {
    LOAN_FIELDS.iter().chain(MEMBER_FIELDS.iter()).copied()
}

impl FieldId {
    /// Field name as it appears on the wire and in change-set entries.
    pub fn wire_name(&self) -> &'static str {
        match self {
            FieldId::LoanType => "loanType",
            FieldId::Lan => "lan",
            FieldId::PolicyNumber => "policyNumber",
            FieldId::PlanNumber => "planNumber",
            FieldId::PanNumber => "panNumber",
            FieldId::OriginalLoanAmount => "originalLoanAmount",
            FieldId::SumAssured => "sumAssured",
            FieldId::MinSumAssured => "minSumAssured",
            FieldId::MaxSumAssured => "maxSumAssured",
            FieldId::MinTerm => "minTerm",
            FieldId::MaxTerm => "maxTerm",
            FieldId::PolicyTerm => "policyTerm",
            FieldId::RiskCommencementDate => "riskCommencementDate",
            FieldId::MemberNumber => "memberNumber",
            FieldId::Title => "title",
            FieldId::Name => "name",
            FieldId::Gender => "gender",
            FieldId::DateOfBirth => "dateOfBirth",
            FieldId::Address => "address",
            FieldId::PhoneNumber => "phoneNumber",
            FieldId::Email => "email",
        }
    }

    pub fn group(&self) -> FieldGroup {
        if LOAN_FIELDS.contains(self) {
            FieldGroup::Loan
        } else {
            FieldGroup::Member
        }
    }

    pub fn access(&self) -> FieldAccess {
        match self {
            FieldId::SumAssured
            | FieldId::PolicyTerm
            | FieldId::RiskCommencementDate
            | FieldId::Title
            | FieldId::Gender
            | FieldId::DateOfBirth
            | FieldId::PhoneNumber
            | FieldId::Email => FieldAccess::Editable,
            _ => FieldAccess::ReadOnly,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.access() == FieldAccess::Editable
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldId::OriginalLoanAmount
            | FieldId::SumAssured
            | FieldId::MinSumAssured
            | FieldId::MaxSumAssured => FieldKind::Amount,
            FieldId::MinTerm | FieldId::MaxTerm | FieldId::PolicyTerm => FieldKind::Term,
            FieldId::RiskCommencementDate | FieldId::DateOfBirth => FieldKind::Date,
            FieldId::Gender => FieldKind::Gender,
            FieldId::Title => FieldKind::Title,
            _ => FieldKind::Text,
        }
    }

    /// Current value of the field as a JSON value, the representation the
    /// change-set reducer compares and ships.
    pub fn value_of(&self, record: &ServiceRecord) -> Value {
        let loan = &record.loan_details;
        let member = &record.member_details;
        match self {
            FieldId::LoanType => Value::from(loan.loan_type.clone()),
            FieldId::Lan => Value::from(loan.lan.clone()),
            FieldId::PolicyNumber => Value::from(loan.policy_number.clone()),
            FieldId::PlanNumber => Value::from(loan.plan_number.clone()),
            FieldId::PanNumber => Value::from(loan.pan_number.clone()),
            FieldId::OriginalLoanAmount => Value::from(loan.original_loan_amount),
            FieldId::SumAssured => Value::from(loan.sum_assured),
            FieldId::MinSumAssured => Value::from(loan.min_sum_assured),
            FieldId::MaxSumAssured => Value::from(loan.max_sum_assured),
            FieldId::MinTerm => Value::from(loan.min_term),
            FieldId::MaxTerm => Value::from(loan.max_term),
            FieldId::PolicyTerm => Value::from(loan.policy_term),
            FieldId::RiskCommencementDate => Value::from(loan.risk_commencement_date.clone()),
            FieldId::MemberNumber => Value::from(member.member_number.clone()),
            FieldId::Title => Value::from(member.title.as_str()),
            FieldId::Name => Value::from(member.name.clone()),
            FieldId::Gender => Value::from(member.gender.as_str()),
            FieldId::DateOfBirth => Value::from(member.date_of_birth.clone()),
            FieldId::Address => Value::from(member.address.clone()),
            FieldId::PhoneNumber => Value::from(member.phone_number.clone()),
            FieldId::Email => Value::from(member.email.clone()),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl FromStr for FieldId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_fields()
            .find(|field| field.wire_name() == s.trim())
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

/// A typed value destined for an editable field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Amount(u64),
    Term(u32),
    /// Canonical ISO `yyyy-MM-dd` string.
    Date(String),
    Gender(Gender),
    Title(Title),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Amount(_) => FieldKind::Amount,
            FieldValue::Term(_) => FieldKind::Term,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::Gender(_) => FieldKind::Gender,
            FieldValue::Title(_) => FieldKind::Title,
        }
    }

    /// Parse raw input text into the value kind a field expects.
    ///
    /// Amounts and terms accept decimal digits; empty or unparseable input
    /// maps to zero, which the sum-assured rule then reports instead of the
    /// form silently keeping a stale value. Dates must already be canonical
    /// ISO `yyyy-MM-dd`.
    pub fn from_text(kind: FieldKind, raw: &str) -> Result<Self, ModelError> {
        match kind {
            FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Amount => Ok(FieldValue::Amount(raw.trim().parse().unwrap_or(0))),
            FieldKind::Term => Ok(FieldValue::Term(raw.trim().parse().unwrap_or(0))),
            FieldKind::Date => {
                let date = parse_iso_date(raw)?;
                Ok(FieldValue::Date(crate::dates::format_iso_date(date)))
            }
            FieldKind::Gender => Ok(FieldValue::Gender(raw.parse()?)),
            FieldKind::Title => Ok(FieldValue::Title(raw.parse()?)),
        }
    }
}

/// Write `value` into the field, enforcing access and kind.
///
/// This is the single mutation path for record fields. The derived-title rule
/// for gender lives one level up in the session; this function writes exactly
/// the addressed field.
pub fn apply(record: &mut ServiceRecord, field: FieldId, value: &FieldValue) -> crate::Result<()> {
    if !field.is_editable() {
        return Err(ModelError::ReadOnlyField(field));
    }
    if value.kind() != field.kind() {
        return Err(ModelError::WrongKind {
            field,
            expected: field.kind(),
        });
    }
    let loan = &mut record.loan_details;
    let member = &mut record.member_details;
    match (field, value) {
        (FieldId::SumAssured, FieldValue::Amount(amount)) => loan.sum_assured = *amount,
        (FieldId::PolicyTerm, FieldValue::Term(term)) => loan.policy_term = *term,
        (FieldId::RiskCommencementDate, FieldValue::Date(date)) => {
            loan.risk_commencement_date = date.clone();
        }
        (FieldId::Title, FieldValue::Title(title)) => member.title = *title,
        (FieldId::Gender, FieldValue::Gender(gender)) => member.gender = *gender,
        (FieldId::DateOfBirth, FieldValue::Date(date)) => member.date_of_birth = date.clone(),
        (FieldId::PhoneNumber, FieldValue::Text(text)) => member.phone_number = text.clone(),
        (FieldId::Email, FieldValue::Text(text)) => member.email = text.clone(),
        // Access and kind were checked above; nothing else is reachable.
        _ => unreachable!("editable field/value pairs are exhaustive"),
    }
    Ok(())
}
