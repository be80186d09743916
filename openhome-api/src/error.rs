use soap_client::SoapError;
use thiserror::Error;

/// Errors surfaced by typed action invocations
///
/// This is a deliberately small, closed set reused by every action on
/// every proxy, so callers can handle failures uniformly regardless of
/// which action they invoked.
#[derive(Debug, Error)]
pub enum ControlError {
    /// The exchange could not complete
    ///
    /// Network failure, HTTP error, a UPnP fault from the device, or an
    /// unparseable envelope. The underlying error is carried verbatim;
    /// nothing in this crate retries or reinterprets it.
    #[error("transport error: {0}")]
    Transport(#[from] SoapError),

    /// The exchange succeeded but a required response field is missing
    ///
    /// Distinct from [`ControlError::Transport`]: the service spoke, but
    /// its answer was malformed. Required fields are never defaulted.
    #[error("bad response to '{action}': missing or malformed '{field}'")]
    BadResponse {
        action: &'static str,
        field: &'static str,
    },
}

/// Type alias for results that can return a [`ControlError`]
pub type Result<T> = std::result::Result<T, ControlError>;
