use sea_orm::DbErr;
use thiserror::Error;

/// Error type surfaced by every facade operation.
///
/// Validation errors are raised before any store call; `NotFound` is kept
/// distinct from `Store` so callers can render a "not found" page instead
/// of a retry prompt. Duplicate edge inserts never surface here; the
/// toggle mutations collapse them into the resulting state.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input rejected before reaching the store.
    #[error("{0}")]
    Validation(String),
    /// A single-row lookup matched zero rows.
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email is already registered")]
    EmailTaken,
    #[error("Username is already taken")]
    UsernameTaken,
    /// The underlying store call failed (network, permission, constraint).
    #[error("Store error: {0}")]
    Store(String),
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        tracing::error!("Store error: {}", err);
        Error::Store(err.to_string())
    }
}

impl Error {
    /// True when the error means the requested row does not exist, as
    /// opposed to a transient failure worth retrying.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
