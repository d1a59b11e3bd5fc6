use thiserror::Error;

/// Failure while fetching the policy details. Terminal for the editing
/// session: the caller renders the message and offers no retry.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status}")]
    Http { status: u16 },
    #[error("{0}")]
    Transport(String),
    #[error("invalid policy details payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while creating the service request. Recoverable: the session
/// stays on the review step and surfaces the message.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("HTTP {status}")]
    Http { status: u16 },
    #[error("{0}")]
    Transport(String),
    #[error("could not encode service request: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
