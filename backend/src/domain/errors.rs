use thiserror::Error;

/// Failures surfaced by the domain services
///
/// The REST layer maps these onto status codes: `Validation` is a client
/// error, `NotFound` a missing resource, everything else a server error.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Input the service could not interpret (bad date, bad id)
    #[error("{0}")]
    Malformed(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
