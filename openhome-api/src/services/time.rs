//! OpenHome Time service proxy
//!
//! Reports the playback position of a renderer: how many tracks have
//! been played, the duration of the current track and the elapsed
//! seconds within it. The same three counters arrive both as the `Time`
//! action response and as evented variable changes.

use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::events::{self, RawEventBatch};
use crate::observer::EventSink;
use crate::service::Service;
use crate::services::required_u32;

/// Expected service type for the Time service
pub const SERVICE_TYPE: &str = "urn:av-openhome-org:service:Time:1";

/// Integer-valued variables this proxy classifies from events
const KNOWN_INT_VARS: &[&str] = &["TrackCount", "Duration", "Seconds"];

/// Snapshot of the renderer's playback position
///
/// Returned fully populated or not at all; a partially decoded response
/// fails the call instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSnapshot {
    /// Number of tracks played since the renderer started
    pub track_count: u32,

    /// Duration of the current track in seconds
    pub duration: u32,

    /// Elapsed seconds within the current track
    pub seconds: u32,
}

/// Typed proxy for one bound Time service
pub struct TimeProxy {
    service: Arc<Service>,
}

impl TimeProxy {
    /// Attach a proxy to a bound service
    ///
    /// Registers the proxy's classification routine as the service's
    /// raw-event sink, so evented variable changes start flowing to the
    /// observer as soon as one is registered on the service.
    pub fn attach(service: Arc<Service>) -> Arc<Self> {
        let proxy = Arc::new(Self { service });
        proxy
            .service
            .register_callback(Arc::downgrade(&proxy) as Weak<dyn EventSink>);
        proxy
    }

    /// Does an advertised service type denote a Time service?
    ///
    /// Used while walking device descriptions to decide whether this
    /// proxy applies; version skew in the candidate is accepted.
    pub fn matches_service_type(candidate: &str) -> bool {
        events::matches_service_type(SERVICE_TYPE, candidate)
    }

    /// The underlying bound service
    pub fn service(&self) -> &Arc<Service> {
        &self.service
    }

    /// Fetch the current playback position
    ///
    /// Invokes the `Time` action. All three counters are required in the
    /// response; a response missing any of them fails with a
    /// bad-response error distinct from a transport failure.
    pub fn time(&self) -> Result<TimeSnapshot> {
        let data = self.service.run_action("Time", &[])?;
        Ok(TimeSnapshot {
            track_count: required_u32(&data, "Time", "TrackCount")?,
            duration: required_u32(&data, "Time", "Duration")?,
            seconds: required_u32(&data, "Time", "Seconds")?,
        })
    }
}

impl EventSink for TimeProxy {
    fn on_event_batch(&self, batch: &RawEventBatch) {
        let observer = self.service.observer();
        events::dispatch_classified("Time", KNOWN_INT_VARS, batch, observer.as_ref());
    }
}
