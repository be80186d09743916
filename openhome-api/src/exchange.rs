//! Pluggable action-exchange seam
//!
//! The service base invokes actions through this trait rather than a
//! concrete SOAP client, so tests (and alternative transports) can stand
//! in for the network.

use soap_client::{SoapClient, SoapError, SoapResponse};

/// One request/response action exchange against a remote service
///
/// Implementations perform a single blocking exchange and report the
/// outcome; they must not retry. Thread safety of concurrent `invoke`
/// calls is a property of the implementation, not of the callers above
/// it.
pub trait ActionExchange: Send + Sync {
    /// Invoke `action` on the service at `control_url`
    fn invoke(
        &self,
        control_url: &str,
        service_type: &str,
        action: &str,
        args: &[(&str, String)],
    ) -> Result<SoapResponse, SoapError>;
}

impl ActionExchange for SoapClient {
    fn invoke(
        &self,
        control_url: &str,
        service_type: &str,
        action: &str,
        args: &[(&str, String)],
    ) -> Result<SoapResponse, SoapError> {
        self.call(control_url, service_type, action, args)
    }
}
