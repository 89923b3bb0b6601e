// src/error.rs
// =============================================================================
// The error taxonomy for the whole tool.
//
// Every module returns `Result<T>` from here, and `main` is the only place
// that turns an error into a message and an exit code.
//
// Exit codes:
//   1 = something outside our control failed (git, network, the store)
//   2 = the input or configuration we were given is wrong
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RbError {
    /// A local repository, links file or payload file does not exist
    #[error("Local path does not exist: {}", .0.display())]
    InvalidPath(PathBuf),

    /// `git clone` exited non-zero (or could not be started)
    #[error("Failed to clone repository {url}: {stderr}")]
    CloneFailure { url: String, stderr: String },

    #[error("No README file found in the repository")]
    NoReadme,

    /// The payload file is not valid JSON, or cannot carry `return`
    #[error("Invalid payload file {}: {reason}", .path.display())]
    InvalidPayload { path: PathBuf, reason: String },

    #[error("{0}")]
    InvalidLinksFile(String),

    /// A required secret (token, signing secret) was not supplied
    #[error("Missing credentials: set {0}")]
    MissingCredentials(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Transport-level failure: connection refused, timeout, DNS
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The store answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The importer could not be started or exited non-zero
    #[error("Error processing {identifier}: {reason}")]
    ImportFailed { identifier: String, reason: String },

    #[error("Token command failed: {0}")]
    TokenCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RbError {
    /// Maps an error to the process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            RbError::CloneFailure { .. }
            | RbError::RequestFailed(_)
            | RbError::Http { .. }
            | RbError::ImportFailed { .. }
            | RbError::TokenCommand(_)
            | RbError::Io(_)
            | RbError::Json(_) => 1,
            RbError::InvalidPath(_)
            | RbError::NoReadme
            | RbError::InvalidPayload { .. }
            | RbError::InvalidLinksFile(_)
            | RbError::MissingCredentials(_)
            | RbError::InvalidConfig(_) => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, RbError>;
