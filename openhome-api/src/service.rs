//! Service base: one bound remote service instance
//!
//! A [`Service`] ties together the identity of a service discovered on a
//! device (its declared type and control URL), the action-invocation
//! primitive every typed proxy builds on, and the hookup through which
//! raw event batches reach the proxy's classification routine.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::events::RawEventBatch;
use crate::exchange::ActionExchange;
use crate::observer::{ChangeObserver, EventSink};
use soap_client::SoapResponse;

/// Identity of a service bound from a device description
///
/// Produced by the device-description walker; this crate only consumes
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescription {
    /// Declared service type, e.g. `urn:av-openhome-org:service:Time:1`
    pub service_type: String,

    /// Absolute control URL for action invocation
    pub control_url: String,
}

/// One bound remote service instance
///
/// Holds the service identity, the exchange used for action invocation,
/// the single registered [`ChangeObserver`] slot and the raw-event sink
/// registered by the owning typed proxy.
///
/// Both slots are configuration: set them before concurrent use begins.
/// They are read on every dispatch but guarded only for memory safety,
/// not as a runtime-mutable hot path.
pub struct Service {
    description: ServiceDescription,
    exchange: Arc<dyn ActionExchange>,
    observer: RwLock<Option<Weak<dyn ChangeObserver>>>,
    sink: RwLock<Option<Weak<dyn EventSink>>>,
}

impl Service {
    /// Bind a service description to an exchange
    pub fn new(description: ServiceDescription, exchange: Arc<dyn ActionExchange>) -> Self {
        Self {
            description,
            exchange,
            observer: RwLock::new(None),
            sink: RwLock::new(None),
        }
    }

    /// Declared type of the bound service
    pub fn service_type(&self) -> &str {
        &self.description.service_type
    }

    /// Control URL of the bound service
    pub fn control_url(&self) -> &str {
        &self.description.control_url
    }

    /// Invoke an action on the remote service
    ///
    /// Blocks the calling thread until the exchange completes or errors.
    /// Exchange errors propagate unchanged; nothing here retries or
    /// reinterprets them. This method adds no synchronization of its
    /// own: concurrent invocations against one `Service` are safe only
    /// if the underlying [`ActionExchange`] is thread-safe.
    pub fn run_action(&self, action: &str, args: &[(&str, String)]) -> Result<SoapResponse> {
        let response = self.exchange.invoke(
            &self.description.control_url,
            &self.description.service_type,
            action,
            args,
        )?;
        Ok(response)
    }

    /// Register the application's change observer
    ///
    /// The observer is held weakly; the application keeps ownership. At
    /// most one observer is registered; registering again replaces the
    /// previous one.
    pub fn set_observer(&self, observer: &Arc<dyn ChangeObserver>) {
        *self.observer.write() = Some(Arc::downgrade(observer));
    }

    /// Current observer, if one is registered and still alive
    pub fn observer(&self) -> Option<Arc<dyn ChangeObserver>> {
        self.observer.read().as_ref().and_then(Weak::upgrade)
    }

    /// Bind a raw-event sink (the typed proxy's classification routine)
    ///
    /// Safe to call once at proxy attachment; calling again simply
    /// rebinds. There is no unregister at this layer; teardown is owned
    /// by the service lifecycle.
    pub fn register_callback(&self, sink: Weak<dyn EventSink>) {
        *self.sink.write() = Some(sink);
    }

    /// Transport entry point: deliver one raw event batch
    ///
    /// Forwards the batch to the registered sink. A batch arriving with
    /// no live sink is dropped; that is not an error.
    pub fn deliver_event(&self, batch: &RawEventBatch) {
        let sink = self.sink.read().as_ref().and_then(Weak::upgrade);
        match sink {
            Some(sink) => sink.on_event_batch(batch),
            None => debug!(
                service = %self.description.service_type,
                entries = batch.len(),
                "event batch dropped, no sink registered"
            ),
        }
    }
}
