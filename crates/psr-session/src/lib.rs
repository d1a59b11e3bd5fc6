mod diff;
mod error;
mod session;

pub use diff::compute_change_set;
pub use error::{Result, SessionError};
pub use session::{
    EditSession, FetchFailure, FetchTicket, FormSession, Notice, SubmissionRequest, SubmitFailure,
    SubmitTicket, WizardStep,
};
