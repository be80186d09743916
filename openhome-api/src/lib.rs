//! Typed OpenHome service proxies for UPnP control points
//!
//! This crate implements the client side of OpenHome media-renderer
//! control: typed proxies that invoke remote actions over SOAP and
//! republish evented state-variable changes to application code through
//! a typed observer interface.
//!
//! Each proxy pairs with one bound [`Service`]: the proxy declares its
//! expected service type (and a version-insensitive matching predicate
//! for the device-description walker), wraps the service's actions in
//! typed methods, and classifies raw variable-change batches for the
//! registered [`ChangeObserver`]. Variables unknown to a proxy — from
//! newer service revisions — are forwarded as opaque strings rather than
//! rejected.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use openhome_api::{Service, ServiceDescription};
//! use openhome_api::services::time::TimeProxy;
//! use soap_client::SoapClient;
//!
//! fn main() -> Result<(), openhome_api::ControlError> {
//!     let service = Arc::new(Service::new(
//!         ServiceDescription {
//!             service_type: "urn:av-openhome-org:service:Time:1".to_string(),
//!             control_url: "http://192.168.1.50:55178/ctl/Time".to_string(),
//!         },
//!         Arc::new(SoapClient::new()),
//!     ));
//!
//!     let proxy = TimeProxy::attach(service);
//!     let snapshot = proxy.time()?;
//!     println!("{} s into a {} s track", snapshot.seconds, snapshot.duration);
//!     Ok(())
//! }
//! ```
//!
//! # Threading
//!
//! Action invocation is blocking and adds no synchronization; concurrent
//! calls against one service are safe only if the underlying exchange
//! is thread-safe. Event-batch delivery to a given proxy is expected to
//! be serialized by the transport. Observer registration is
//! configuration: perform it before concurrent use begins.

pub mod error;
pub mod events;
pub mod exchange;
pub mod observer;
pub mod service;
pub mod services;

pub use error::{ControlError, Result};
pub use events::{coerce_int_or_default, matches_service_type, RawEventBatch};
pub use exchange::ActionExchange;
pub use observer::{ChangeObserver, EventSink};
pub use service::{Service, ServiceDescription};
