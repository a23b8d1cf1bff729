use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Whether an external-call failure is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rate limiting or temporary unavailability; eligible for backoff.
    Transient,
    /// Auth failures, malformed requests, and everything else; propagate.
    Permanent,
}

const TRANSIENT_MARKERS: &[&str] = &[
    "429",
    "rate limit",
    "resource exhausted",
    "500",
    "503",
    "unavailable",
    "deadline exceeded",
];

/// Classify an external-call failure from its description. Done once per
/// failed attempt, at the retry boundary.
pub fn classify(err: &anyhow::Error) -> ErrorKind {
    let msg = format!("{err:#}").to_lowercase();
    if TRANSIENT_MARKERS.iter().any(|m| msg.contains(m)) {
        ErrorKind::Transient
    } else {
        ErrorKind::Permanent
    }
}
