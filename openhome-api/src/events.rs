//! Raw-event classification and service-type matching helpers
//!
//! Every typed proxy classifies incoming variable changes the same way;
//! the shared routine lives here so a proxy only declares its expected
//! service type and its set of known integer-valued variables.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::observer::ChangeObserver;

/// One delivered batch of changed state variables, name to raw value
///
/// Order between entries carries no meaning. A batch is consumed exactly
/// once by the classification routine and not retained.
pub type RawEventBatch = HashMap<String, String>;

/// Best-effort integer coercion: malformed input yields zero
///
/// This is the named leniency policy for event values. A malformed
/// numeric string is indistinguishable from a legitimate zero, which
/// matches the wire behavior devices have come to rely on; a stricter
/// variant would be a separate function, not a change to this one.
pub fn coerce_int_or_default(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

/// Check a candidate service type against an expected one
///
/// Service descriptions carry a version suffix (e.g. `:1`). Proxies
/// accept any version of their service rather than caring about the
/// exact minor revision, so the comparison covers everything but the
/// last two characters of the expected type. A candidate shorter than
/// that prefix, or an expected constant too short to carry a version
/// suffix, does not match.
pub fn matches_service_type(expected: &str, candidate: &str) -> bool {
    let Some(prefix_len) = expected.len().checked_sub(2) else {
        return false;
    };
    if prefix_len == 0 {
        return false;
    }
    candidate.len() >= prefix_len
        && expected.as_bytes()[..prefix_len] == candidate.as_bytes()[..prefix_len]
}

/// Classify one raw batch and notify the observer
///
/// Each pair is handled independently:
/// - no observer registered: log at debug and move on;
/// - `name` in `known_int_vars`: coerce the value with
///   [`coerce_int_or_default`] and deliver it as an integer change;
/// - otherwise: deliver the raw value as an opaque string change and log
///   the unrecognized variable. Unknown variables come from newer
///   service revisions and must never abort the rest of the batch.
///
/// Every pair is visited before this returns; a problem with one entry
/// never suppresses delivery of the others.
pub fn dispatch_classified(
    service_name: &str,
    known_int_vars: &[&str],
    batch: &RawEventBatch,
    observer: Option<&Arc<dyn ChangeObserver>>,
) {
    for (name, value) in batch {
        let Some(observer) = observer else {
            debug!(service = service_name, variable = %name, value = %value,
                   "event dropped, no observer registered");
            continue;
        };

        if known_int_vars.contains(&name.as_str()) {
            observer.on_int_change(name, coerce_int_or_default(value));
        } else {
            warn!(service = service_name, variable = %name, value = %value,
                  "event for unknown variable, forwarding as string");
            observer.on_string_change(name, value);
        }
    }
}
