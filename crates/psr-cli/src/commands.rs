use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info_span;

use psr_cli::pipeline::{
    StagedSession, SubmissionReport, load_candidates, load_edits, run_submission, stage_session,
};
use psr_client::{FetchQuery, FilePolicyService};
use psr_validate::UploadPolicy;

use crate::cli::{SessionArgs, SubmitArgs};

/// Result of the review command.
pub struct ReviewRun {
    pub staged: StagedSession,
}

/// Result of the submit command.
pub struct SubmitRun {
    pub staged: StagedSession,
    pub report: SubmissionReport,
    pub output_dir: PathBuf,
}

pub fn run_review(args: &SessionArgs) -> Result<ReviewRun> {
    let span = info_span!("review", record = %args.record.display());
    let _guard = span.enter();
    let service = FilePolicyService::new(&args.record, default_output_dir(args));
    let staged = stage(&service, args)?;
    Ok(ReviewRun { staged })
}

pub fn run_submit(args: &SubmitArgs) -> Result<SubmitRun> {
    let span = info_span!("submit", record = %args.session.record.display());
    let _guard = span.enter();
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.session));
    let service = FilePolicyService::new(&args.session.record, output_dir.clone());
    let mut staged = stage(&service, &args.session)?;
    let report = run_submission(&service, &mut staged.session)?;
    Ok(SubmitRun {
        staged,
        report,
        output_dir,
    })
}

fn stage(service: &FilePolicyService, args: &SessionArgs) -> Result<StagedSession> {
    let query = FetchQuery::new(args.policy_number.clone(), args.member_no.clone());
    let edits = match &args.edits {
        Some(path) => load_edits(path)?,
        None => serde_json::Map::new(),
    };
    let candidates = load_candidates(&args.attach).context("load attachments")?;
    let upload_policy = match args.max_file_size_mb {
        Some(max_file_size_mb) => UploadPolicy {
            max_file_size_mb,
            ..UploadPolicy::default()
        },
        None => UploadPolicy::default(),
    };
    stage_session(service, &query, &edits, candidates, &upload_policy)
}

fn default_output_dir(args: &SessionArgs) -> PathBuf {
    args.record
        .parent()
        .map(|parent| parent.join("output"))
        .unwrap_or_else(|| PathBuf::from("output"))
}
