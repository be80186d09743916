//! Observer interfaces for classified state-variable changes
//!
//! Applications register a [`ChangeObserver`] to receive typed change
//! notifications; proxies register an [`EventSink`] with their service
//! base to receive the raw batches they classify. Both are explicit
//! single-purpose interfaces rather than captured closures, which keeps
//! ownership and lifetime visible at the registration site.

use crate::events::RawEventBatch;

/// Application-supplied sink for classified state-variable changes
///
/// The proxy holds the observer weakly and checks for presence before
/// every notification; it never owns, copies or destroys the observer.
/// Variables the proxy knows arrive through [`on_int_change`]; variables
/// from newer service revisions arrive through [`on_string_change`] with
/// the raw value untouched.
///
/// [`on_int_change`]: ChangeObserver::on_int_change
/// [`on_string_change`]: ChangeObserver::on_string_change
pub trait ChangeObserver: Send + Sync {
    /// A known integer-valued variable changed
    fn on_int_change(&self, name: &str, value: i32);

    /// A variable unknown to this proxy changed; the value is opaque
    fn on_string_change(&self, name: &str, value: &str);
}

/// Sink for raw event batches, implemented by each typed proxy
///
/// The service base forwards every delivered batch to its registered
/// sink; the sink classifies the name/value pairs and notifies the
/// application observer.
pub trait EventSink: Send + Sync {
    /// Process one delivered batch of variable changes
    fn on_event_batch(&self, batch: &RawEventBatch);
}
