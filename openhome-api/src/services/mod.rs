//! Typed service proxies
//!
//! One module per OpenHome service. Every proxy follows the same shape:
//! an expected service-type constant with a version-insensitive matching
//! predicate, typed action wrappers over [`Service::run_action`], and an
//! [`EventSink`] implementation that classifies raw variable changes for
//! the registered observer.
//!
//! [`Service::run_action`]: crate::Service::run_action
//! [`EventSink`]: crate::EventSink

pub mod time;
pub mod volume;

use soap_client::SoapResponse;
use tracing::error;

use crate::error::{ControlError, Result};

/// Decode a required unsigned-integer response field
///
/// Missing or malformed required fields fail the whole call with a
/// bad-response error naming the action and field; they are never
/// defaulted.
pub(crate) fn required_u32(
    data: &SoapResponse,
    action: &'static str,
    field: &'static str,
) -> Result<u32> {
    data.get_u32(field).ok_or_else(|| {
        error!(action, field, "missing required field in response");
        ControlError::BadResponse { action, field }
    })
}

/// Decode a required boolean response field
pub(crate) fn required_bool(
    data: &SoapResponse,
    action: &'static str,
    field: &'static str,
) -> Result<bool> {
    data.get_bool(field).ok_or_else(|| {
        error!(action, field, "missing required field in response");
        ControlError::BadResponse { action, field }
    })
}
