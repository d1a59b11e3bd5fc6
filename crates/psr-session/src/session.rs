//! Session state for the edit/review wizard.
//!
//! The store owns the original and working copies of the record plus the
//! staged attachments; every mutation flows through its operations. The
//! wizard position is a tagged state, not a string, and completions of the
//! two collaborator calls (fetch, submit) carry a generation so a completion
//! that arrives after the session moved on is ignored instead of written.

use chrono::NaiveDate;
use tracing::{debug, warn};

use psr_model::{
    Attachment, ChangeSet, FieldId, FieldValue, Gender, ServiceRecord, Title, apply,
    format_iso_date,
};
use psr_validate::{FieldFinding, field_errors, sum_assured_error};

use crate::diff::compute_change_set;
use crate::error::{Result, SessionError};

/// Fallback notice when the submission collaborator fails without a message.
const SUBMIT_FALLBACK_MESSAGE: &str = "Failed to submit changes";

/// Notice shown after submitting the service request.
const SUBMIT_SUCCESS_MESSAGE: &str = "Service request created successfully.";

/// Fallback shown when the initial fetch fails without a message.
const FETCH_FALLBACK_MESSAGE: &str = "An unexpected error occurred while fetching user details";

/// Position in the edit/review wizard, with the data each position owns.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    Edit,
    Review { change_set: ChangeSet },
    Submitting { change_set: ChangeSet },
}

impl WizardStep {
    pub fn name(&self) -> &'static str {
        match self {
            WizardStep::Edit => "edit",
            WizardStep::Review { .. } => "review",
            WizardStep::Submitting { .. } => "submitting",
        }
    }
}

/// Dismissible banner surfaced after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success,
    SubmitFailed(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success => SUBMIT_SUCCESS_MESSAGE,
            Notice::SubmitFailed(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::SubmitFailed(_))
    }
}

/// Failure reported by the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub message: Option<String>,
}

impl FetchFailure {
    fn screen_message(&self) -> String {
        match &self.message {
            Some(message) => format!("Failed to fetch user details: {message}"),
            None => FETCH_FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Failure reported by the submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFailure {
    pub message: Option<String>,
}

impl SubmitFailure {
    fn notice_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| SUBMIT_FALLBACK_MESSAGE.to_string())
    }
}

/// Matches a completion to the session state it was dispatched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    generation: u64,
}

/// Everything the submission collaborator needs for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub change_set: ChangeSet,
    pub attachments: Vec<Attachment>,
}

/// Session lifecycle around the editable form.
///
/// `Loading` resolves exactly once, into `Active` or the terminal `Failed`;
/// recovering from a failed fetch means starting a new session.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSession {
    Loading { generation: u64 },
    Active(EditSession),
    Failed { message: String },
}

impl FormSession {
    /// Begin a session; the returned ticket accompanies the fetch call.
    pub fn start() -> (Self, FetchTicket) {
        (
            FormSession::Loading { generation: 0 },
            FetchTicket { generation: 0 },
        )
    }

    /// Apply the fetch outcome. Returns false when the completion is stale
    /// (the session is no longer the loading state the ticket was issued
    /// for), in which case nothing is written.
    pub fn resolve_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: std::result::Result<ServiceRecord, FetchFailure>,
    ) -> bool {
        let FormSession::Loading { generation } = self else {
            warn!(step = self.name(), "stale fetch completion ignored");
            return false;
        };
        if *generation != ticket.generation {
            warn!("stale fetch completion ignored");
            return false;
        }
        *self = match outcome {
            Ok(record) => {
                debug!("policy details fetched");
                FormSession::Active(EditSession::new(record))
            }
            Err(failure) => FormSession::Failed {
                message: failure.screen_message(),
            },
        };
        true
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormSession::Loading { .. } => "loading",
            FormSession::Active(_) => "active",
            FormSession::Failed { .. } => "failed",
        }
    }

    pub fn session(&self) -> Option<&EditSession> {
        match self {
            FormSession::Active(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        match self {
            FormSession::Active(session) => Some(session),
            _ => None,
        }
    }
}

/// The form state store: original and working records, staged attachments,
/// wizard step, and the submission notice.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    original: ServiceRecord,
    working: ServiceRecord,
    attachments: Vec<Attachment>,
    step: WizardStep,
    notice: Option<Notice>,
    generation: u64,
}

impl EditSession {
    /// Initialize the store from a fetched record: both copies start equal,
    /// and this is the only way the original changes outside a successful
    /// submission reset.
    pub fn new(record: ServiceRecord) -> Self {
        Self {
            original: record.clone(),
            working: record,
            attachments: Vec::new(),
            step: WizardStep::Edit,
            notice: None,
            generation: 0,
        }
    }

    pub fn original(&self) -> &ServiceRecord {
        &self.original
    }

    pub fn working(&self) -> &ServiceRecord {
        &self.working
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn step(&self) -> &WizardStep {
        &self.step
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    fn require_edit_step(&self) -> Result<()> {
        match self.step {
            WizardStep::Edit => Ok(()),
            _ => Err(SessionError::WrongStep { expected: "edit" }),
        }
    }

    /// Write an editable field of the working record.
    ///
    /// Routing goes through the field registry, so read-only fields and
    /// mismatched value kinds are rejected. A gender write is forwarded to
    /// [`EditSession::set_gender`] to keep the derived title in step.
    pub fn set_field(&mut self, field: FieldId, value: FieldValue) -> Result<()> {
        self.require_edit_step()?;
        if field == FieldId::Gender {
            if let FieldValue::Gender(gender) = value {
                return self.set_gender(gender);
            }
        }
        apply(&mut self.working, field, &value)?;
        debug!(field = %field, "field updated");
        Ok(())
    }

    /// Parse raw input text for the field's kind, then write it.
    pub fn set_field_text(&mut self, field: FieldId, raw: &str) -> Result<()> {
        let value = FieldValue::from_text(field.kind(), raw)?;
        self.set_field(field, value)
    }

    /// Set the gender and derive the title: Male selects Mr, Female selects
    /// Ms, and any other gender leaves the title unchanged.
    pub fn set_gender(&mut self, gender: Gender) -> Result<()> {
        self.require_edit_step()?;
        apply(&mut self.working, FieldId::Gender, &FieldValue::Gender(gender))?;
        if let Some(title) = gender.derived_title() {
            apply(&mut self.working, FieldId::Title, &FieldValue::Title(title))?;
        }
        debug!(gender = %gender, "gender updated");
        Ok(())
    }

    pub fn set_title(&mut self, title: Title) -> Result<()> {
        self.set_field(FieldId::Title, FieldValue::Title(title))
    }

    /// Write a date field in canonical `yyyy-MM-dd` form. `None` is a no-op:
    /// clearing the picker does not clear the field.
    pub fn set_date(&mut self, field: FieldId, date: Option<NaiveDate>) -> Result<()> {
        let Some(date) = date else {
            return Ok(());
        };
        self.set_field(field, FieldValue::Date(format_iso_date(date)))
    }

    /// Stage screened attachments.
    pub fn add_attachments(&mut self, files: Vec<Attachment>) -> Result<()> {
        self.require_edit_step()?;
        debug!(count = files.len(), "attachments staged");
        self.attachments.extend(files);
        Ok(())
    }

    /// Remove one staged attachment; returns false when the index is out of
    /// range.
    pub fn remove_attachment(&mut self, index: usize) -> bool {
        if index < self.attachments.len() {
            let removed = self.attachments.remove(index);
            debug!(file_name = %removed.file_name, "attachment removed");
            true
        } else {
            false
        }
    }

    pub fn has_attachment(&self) -> bool {
        !self.attachments.is_empty()
    }

    /// Bounds rule for the sum assured, recomputed from the working record.
    pub fn sum_assured_error(&self) -> Option<String> {
        let loan = &self.working.loan_details;
        sum_assured_error(loan.sum_assured, loan.min_sum_assured, loan.max_sum_assured)
    }

    /// Every failed field rule for the working record.
    pub fn field_errors(&self) -> Vec<FieldFinding> {
        field_errors(&self.working)
    }

    /// The submit control is enabled only when the sum assured passes its
    /// rule, is non-zero, and at least one attachment is staged.
    pub fn is_submittable(&self) -> bool {
        self.sum_assured_error().is_none()
            && self.working.loan_details.sum_assured != 0
            && self.has_attachment()
    }

    /// Current diff of working against original.
    pub fn change_set(&self) -> ChangeSet {
        compute_change_set(&self.original, &self.working)
    }

    /// Move from edit to review, snapshotting the change-set the reviewer
    /// confirms.
    pub fn enter_review(&mut self) -> Result<()> {
        self.require_edit_step()?;
        if !self.is_submittable() {
            return Err(SessionError::NotSubmittable);
        }
        let change_set = self.change_set();
        debug!(changes = change_set.len(), "entering review");
        self.step = WizardStep::Review { change_set };
        Ok(())
    }

    /// Return from review to edit without losing any state.
    pub fn back_to_edit(&mut self) -> Result<()> {
        match self.step {
            WizardStep::Review { .. } => {
                self.step = WizardStep::Edit;
                Ok(())
            }
            _ => Err(SessionError::WrongStep { expected: "review" }),
        }
    }

    /// Confirm the review: moves to submitting and hands back the payload
    /// for the submission collaborator, plus the ticket its completion must
    /// present.
    pub fn begin_submit(&mut self) -> Result<(SubmitTicket, SubmissionRequest)> {
        let WizardStep::Review { change_set } = &self.step else {
            return Err(SessionError::WrongStep { expected: "review" });
        };
        let change_set = change_set.clone();
        let request = SubmissionRequest {
            change_set: change_set.clone(),
            attachments: self.attachments.clone(),
        };
        debug!(changes = change_set.len(), files = request.attachments.len(), "submitting");
        self.step = WizardStep::Submitting { change_set };
        Ok((SubmitTicket { generation: self.generation }, request))
    }

    /// Apply the submission outcome.
    ///
    /// Success resets the session: the working record becomes the new
    /// original, attachments are cleared, and the wizard returns to edit.
    /// Failure returns to review with a dismissible notice. A completion
    /// whose ticket no longer matches the session generation, or that
    /// arrives outside the submitting step, is ignored; the return value
    /// says whether the outcome was applied.
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        outcome: std::result::Result<(), SubmitFailure>,
    ) -> bool {
        if ticket.generation != self.generation {
            warn!("stale submit completion ignored");
            return false;
        }
        let WizardStep::Submitting { change_set } = &self.step else {
            warn!(step = self.step.name(), "submit completion outside submitting step ignored");
            return false;
        };
        let change_set = change_set.clone();
        self.generation += 1;
        match outcome {
            Ok(()) => {
                debug!("service request created");
                self.original = self.working.clone();
                self.attachments.clear();
                self.step = WizardStep::Edit;
                self.notice = Some(Notice::Success);
            }
            Err(failure) => {
                warn!("service request failed");
                self.step = WizardStep::Review { change_set };
                self.notice = Some(Notice::SubmitFailed(failure.notice_message()));
            }
        }
        true
    }
}
