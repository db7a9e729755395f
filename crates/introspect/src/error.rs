use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the endpoint client.
///
/// Failures are always local to the request that triggered them; callers
/// decide whether to degrade (introspection) or render the payload into the
/// results document (execution).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("invalid introspection response: {0}")]
    Invalid(String),
}
