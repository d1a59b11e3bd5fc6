//! Session pipeline shared by the CLI commands and integration tests.
//!
//! Stages an editing session the way the form does: fetch through the policy
//! service collaborator, apply edits through the store's operations, screen
//! candidate files, then optionally drive the review/submit flow.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{debug, info, trace};

use psr_client::{FetchQuery, PolicyService, SubmissionBody};
use psr_model::{Attachment, FieldId};
use psr_session::{EditSession, FetchFailure, FormSession, Notice, SubmitFailure};
use psr_validate::{Screening, UploadPolicy, screen_files};

use crate::logging::redact_value;

/// A staged session plus the screening outcome for its candidate files.
#[derive(Debug)]
pub struct StagedSession {
    pub session: EditSession,
    pub screening: Screening,
}

/// Outcome of driving the review/submit flow to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub success: bool,
    pub notice: String,
}

/// Read an edits file: a JSON object of wire field name to new value.
pub fn load_edits(path: &Path) -> Result<serde_json::Map<String, Value>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read edits file {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&raw).with_context(|| format!("parse edits file {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("edits file {} must be a JSON object", path.display()),
    }
}

/// Read candidate files for staging. The attachment name is the file name
/// component of the path, as a browser file input would report it.
pub fn load_candidates(paths: &[PathBuf]) -> Result<Vec<Attachment>> {
    let mut candidates = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes =
            fs::read(path).with_context(|| format!("read attachment {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        candidates.push(Attachment::new(file_name, bytes));
    }
    Ok(candidates)
}

/// Fetch the record and build the session, applying edits and staging the
/// screened candidate files.
pub fn stage_session<S: PolicyService>(
    service: &S,
    query: &FetchQuery,
    edits: &serde_json::Map<String, Value>,
    candidates: Vec<Attachment>,
    upload_policy: &UploadPolicy,
) -> Result<StagedSession> {
    let (mut form, ticket) = FormSession::start();
    let outcome = service
        .fetch_policy_details(query)
        .map_err(|error| FetchFailure {
            message: Some(error.to_string()),
        });
    form.resolve_fetch(ticket, outcome);
    let mut session = match form {
        FormSession::Active(session) => session,
        FormSession::Failed { message } => bail!(message),
        FormSession::Loading { .. } => bail!("policy details fetch did not resolve"),
    };
    info!(
        policy_number = %query.policy_number,
        member_no = %query.member_no,
        "session initialized"
    );

    apply_edits(&mut session, edits)?;

    let screening = screen_files(upload_policy, candidates);
    if !screening.accepted.is_empty() {
        session
            .add_attachments(screening.accepted.clone())
            .context("stage attachments")?;
    }
    debug!(
        accepted = screening.accepted.len(),
        rejected = screening.rejected.len(),
        "candidate files screened"
    );
    Ok(StagedSession { session, screening })
}

/// Apply an edits object through the store's operations, routed by field.
pub fn apply_edits(
    session: &mut EditSession,
    edits: &serde_json::Map<String, Value>,
) -> Result<()> {
    for (name, value) in edits {
        let field: FieldId = name
            .parse()
            .with_context(|| format!("unknown field in edits: {name}"))?;
        let rendered = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        trace!(field = %field, value = %redacted_for(field, &rendered), "applying edit");
        session
            .set_field_text(field, &rendered)
            .with_context(|| format!("apply edit for {name}"))?;
    }
    Ok(())
}

/// Drive review confirmation and the submission call, completing the session
/// transition for either outcome.
pub fn run_submission<S: PolicyService>(
    service: &S,
    session: &mut EditSession,
) -> Result<SubmissionReport> {
    session.enter_review().context("enter review")?;
    let (ticket, request) = session.begin_submit().context("confirm submission")?;
    let body = SubmissionBody::build(&request.change_set, &request.attachments)
        .context("encode service request")?;
    info!(
        changes = request.change_set.len(),
        files = request.attachments.len(),
        "submitting service request"
    );
    let outcome = service
        .create_service_request(&body)
        .map_err(|error| SubmitFailure {
            message: Some(error.to_string()),
        });
    if !session.complete_submit(ticket, outcome) {
        bail!("submission completion was not applied");
    }
    let notice = session
        .notice()
        .map(|notice| notice.message().to_string())
        .unwrap_or_default();
    Ok(SubmissionReport {
        success: matches!(session.notice(), Some(Notice::Success)),
        notice,
    })
}

/// Member PII is redacted from logs unless explicitly enabled.
fn redacted_for(field: FieldId, rendered: &str) -> &str {
    match field {
        FieldId::PhoneNumber | FieldId::Email | FieldId::DateOfBirth | FieldId::Name
        | FieldId::Address => redact_value(rendered),
        _ => rendered,
    }
}
