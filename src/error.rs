use thiserror::Error;

use crate::service::credit::RequestStatus;

/// Errors of the account, upload, scan and configuration layers.
///
/// The similarity search itself cannot fail and does not use this type.
#[derive(Error, Debug)]
pub enum DocMatchError {
    /// Query is empty or whitespace only
    #[error("search text is required")]
    EmptyQuery,

    #[error("account {0:?} not found")]
    UnknownAccount(String),

    #[error("account {0:?} already exists")]
    AccountExists(String),

    /// No scan credits left for today
    #[error("account {user_id:?} has no credits remaining")]
    InsufficientCredits { user_id: String },

    #[error("document {0:?} not found")]
    UnknownDocument(String),

    #[error("document {doc_id:?} is not owned by {user_id:?}")]
    NotOwner { user_id: String, doc_id: String },

    /// Uploads must be plain-text files
    #[error("unsupported file type: {0:?}")]
    UnsupportedFileType(String),

    #[error("credit amount must be positive, got {0}")]
    InvalidCreditAmount(u32),

    #[error("credit request {0:?} not found")]
    UnknownCreditRequest(String),

    #[error("credit request {id:?} was already {status}")]
    RequestAlreadyResolved { id: String, status: RequestStatus },

    /// Admin-only operation called by a regular account
    #[error("account {0:?} is not an admin")]
    PermissionDenied(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DocMatchError>;
