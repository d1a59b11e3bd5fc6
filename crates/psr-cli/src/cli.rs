//! CLI argument definitions for Policy Service Studio.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "psr",
    version,
    about = "Policy Service Studio - edit, review, and submit member detail changes",
    long_about = "Drive a policy service-request editing session from the command line.\n\n\
                  Loads a policy/member record, applies field edits, screens supporting\n\
                  documents, shows the change-set for review, and writes the outgoing\n\
                  service request."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow member values (phone, e-mail, date of birth) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply edits to a record and show the change-set for review.
    Review(SessionArgs),

    /// Review and write the outgoing service request.
    Submit(SubmitArgs),

    /// List the record fields, their group, kind, and access.
    Fields,
}

#[derive(Parser)]
pub struct SessionArgs {
    /// Path to the policy/member record JSON.
    #[arg(value_name = "RECORD_JSON")]
    pub record: PathBuf,

    /// JSON object of field name to new value.
    #[arg(long = "edits", value_name = "PATH")]
    pub edits: Option<PathBuf>,

    /// Supporting document to stage (repeatable).
    #[arg(long = "attach", value_name = "FILE")]
    pub attach: Vec<PathBuf>,

    /// Policy number of the fetch query.
    #[arg(long = "policy-number", default_value = psr_reference::DEMO_POLICY_NUMBER)]
    pub policy_number: String,

    /// Member number of the fetch query.
    #[arg(long = "member-no", default_value = psr_reference::DEMO_MEMBER_NUMBER)]
    pub member_no: String,

    /// Override the maximum accepted file size in MB.
    #[arg(long = "max-file-size-mb", value_name = "MB")]
    pub max_file_size_mb: Option<u64>,
}

#[derive(Parser)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Output directory for the service request (default: <RECORD_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
