//! Error types for the SOAP exchange

use thiserror::Error;

/// Errors that can occur during a SOAP action exchange
#[derive(Debug, Error)]
pub enum SoapError {
    /// Network or HTTP communication error
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// XML parsing error or malformed envelope
    #[error("XML parsing error: {0}")]
    Parse(String),

    /// UPnP fault returned by the device
    #[error("UPnP fault: error code {0}")]
    Fault(u16),
}
