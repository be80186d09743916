//! OpenHome Volume service proxy
//!
//! Audio rendering control: volume, mute, balance and fade, plus the
//! static characteristics a renderer advertises about its volume range.

use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::events::{self, RawEventBatch};
use crate::observer::EventSink;
use crate::service::Service;
use crate::services::{required_bool, required_u32};

/// Expected service type for the Volume service
pub const SERVICE_TYPE: &str = "urn:av-openhome-org:service:Volume:1";

/// Integer-valued variables this proxy classifies from events
///
/// Mute events on the wire as `0`/`1` and is delivered as an integer
/// change like the rest.
const KNOWN_INT_VARS: &[&str] = &[
    "Volume",
    "Mute",
    "Balance",
    "Fade",
    "VolumeLimit",
    "VolumeMax",
    "VolumeUnity",
    "VolumeSteps",
    "VolumeMilliDbPerStep",
    "BalanceMax",
    "FadeMax",
];

/// Static volume characteristics advertised by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeCharacteristics {
    /// Maximum volume setting
    pub volume_max: u32,

    /// Volume setting corresponding to unity gain
    pub volume_unity: u32,

    /// Number of discrete volume steps
    pub volume_steps: u32,

    /// Gain change per step, in millidecibels
    pub volume_milli_db_per_step: u32,

    /// Maximum balance offset
    pub balance_max: u32,

    /// Maximum fade offset
    pub fade_max: u32,
}

/// Typed proxy for one bound Volume service
pub struct VolumeProxy {
    service: Arc<Service>,
}

impl VolumeProxy {
    /// Attach a proxy to a bound service and register its event sink
    pub fn attach(service: Arc<Service>) -> Arc<Self> {
        let proxy = Arc::new(Self { service });
        proxy
            .service
            .register_callback(Arc::downgrade(&proxy) as Weak<dyn EventSink>);
        proxy
    }

    /// Does an advertised service type denote a Volume service?
    pub fn matches_service_type(candidate: &str) -> bool {
        events::matches_service_type(SERVICE_TYPE, candidate)
    }

    /// The underlying bound service
    pub fn service(&self) -> &Arc<Service> {
        &self.service
    }

    /// Fetch the current volume setting
    pub fn volume(&self) -> Result<u32> {
        let data = self.service.run_action("Volume", &[])?;
        required_u32(&data, "Volume", "Value")
    }

    /// Set the volume
    pub fn set_volume(&self, value: u32) -> Result<()> {
        self.service
            .run_action("SetVolume", &[("Value", value.to_string())])?;
        Ok(())
    }

    /// Fetch the current mute state
    pub fn mute(&self) -> Result<bool> {
        let data = self.service.run_action("Mute", &[])?;
        required_bool(&data, "Mute", "Value")
    }

    /// Set the mute state
    pub fn set_mute(&self, muted: bool) -> Result<()> {
        let value = if muted { "1" } else { "0" };
        self.service
            .run_action("SetMute", &[("Value", value.to_string())])?;
        Ok(())
    }

    /// Fetch the renderer's volume characteristics
    ///
    /// All six fields are required; a response missing any of them fails
    /// with a bad-response error.
    pub fn characteristics(&self) -> Result<VolumeCharacteristics> {
        let data = self.service.run_action("Characteristics", &[])?;
        Ok(VolumeCharacteristics {
            volume_max: required_u32(&data, "Characteristics", "VolumeMax")?,
            volume_unity: required_u32(&data, "Characteristics", "VolumeUnity")?,
            volume_steps: required_u32(&data, "Characteristics", "VolumeSteps")?,
            volume_milli_db_per_step: required_u32(
                &data,
                "Characteristics",
                "VolumeMilliDbPerStep",
            )?,
            balance_max: required_u32(&data, "Characteristics", "BalanceMax")?,
            fade_max: required_u32(&data, "Characteristics", "FadeMax")?,
        })
    }
}

impl EventSink for VolumeProxy {
    fn on_event_batch(&self, batch: &RawEventBatch) {
        let observer = self.service.observer();
        events::dispatch_classified("Volume", KNOWN_INT_VARS, batch, observer.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ControlError;
    use crate::exchange::ActionExchange;
    use crate::service::ServiceDescription;
    use parking_lot::Mutex;
    use soap_client::{SoapError, SoapResponse};
    use xmltree::Element;

    struct StubExchange {
        response_xml: &'static str,
        args_seen: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl StubExchange {
        fn new(response_xml: &'static str) -> Self {
            Self {
                response_xml,
                args_seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl ActionExchange for StubExchange {
        fn invoke(
            &self,
            _control_url: &str,
            _service_type: &str,
            action: &str,
            args: &[(&str, String)],
        ) -> std::result::Result<SoapResponse, SoapError> {
            self.args_seen.lock().push((
                action.to_string(),
                args.iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            ));
            Ok(SoapResponse::from_element(
                Element::parse(self.response_xml.as_bytes()).unwrap(),
            ))
        }
    }

    fn proxy_with(exchange: Arc<StubExchange>) -> Arc<VolumeProxy> {
        let service = Arc::new(Service::new(
            ServiceDescription {
                service_type: SERVICE_TYPE.to_string(),
                control_url: "http://192.168.1.50:55178/ctl/Volume".to_string(),
            },
            exchange,
        ));
        VolumeProxy::attach(service)
    }

    #[test]
    fn test_matches_service_type() {
        assert!(VolumeProxy::matches_service_type(
            "urn:av-openhome-org:service:Volume:2"
        ));
        assert!(!VolumeProxy::matches_service_type(
            "urn:av-openhome-org:service:Time:1"
        ));
    }

    #[test]
    fn test_volume_decodes_value() {
        let exchange = Arc::new(StubExchange::new(
            "<VolumeResponse><Value>37</Value></VolumeResponse>",
        ));
        let proxy = proxy_with(exchange);
        assert_eq!(proxy.volume().unwrap(), 37);
    }

    #[test]
    fn test_set_volume_sends_value_argument() {
        let exchange = Arc::new(StubExchange::new("<SetVolumeResponse></SetVolumeResponse>"));
        let proxy = proxy_with(exchange.clone());

        proxy.set_volume(42).unwrap();

        let calls = exchange.args_seen.lock();
        assert_eq!(
            calls.as_slice(),
            &[(
                "SetVolume".to_string(),
                vec![("Value".to_string(), "42".to_string())],
            )]
        );
    }

    #[test]
    fn test_mute_decodes_bool() {
        let exchange = Arc::new(StubExchange::new(
            "<MuteResponse><Value>1</Value></MuteResponse>",
        ));
        let proxy = proxy_with(exchange);
        assert!(proxy.mute().unwrap());
    }

    #[test]
    fn test_set_mute_formats_bool_as_digit() {
        let exchange = Arc::new(StubExchange::new("<SetMuteResponse></SetMuteResponse>"));
        let proxy = proxy_with(exchange.clone());

        proxy.set_mute(false).unwrap();

        let calls = exchange.args_seen.lock();
        assert_eq!(calls[0].1, vec![("Value".to_string(), "0".to_string())]);
    }

    #[test]
    fn test_characteristics_decodes_all_six_fields() {
        let exchange = Arc::new(StubExchange::new(
            r#"<CharacteristicsResponse>
                <VolumeMax>100</VolumeMax>
                <VolumeUnity>80</VolumeUnity>
                <VolumeSteps>100</VolumeSteps>
                <VolumeMilliDbPerStep>1024</VolumeMilliDbPerStep>
                <BalanceMax>10</BalanceMax>
                <FadeMax>10</FadeMax>
            </CharacteristicsResponse>"#,
        ));
        let proxy = proxy_with(exchange);

        let characteristics = proxy.characteristics().unwrap();
        assert_eq!(
            characteristics,
            VolumeCharacteristics {
                volume_max: 100,
                volume_unity: 80,
                volume_steps: 100,
                volume_milli_db_per_step: 1024,
                balance_max: 10,
                fade_max: 10,
            }
        );
    }

    #[test]
    fn test_characteristics_missing_field_is_bad_response() {
        let exchange = Arc::new(StubExchange::new(
            r#"<CharacteristicsResponse>
                <VolumeMax>100</VolumeMax>
                <VolumeUnity>80</VolumeUnity>
                <VolumeSteps>100</VolumeSteps>
                <BalanceMax>10</BalanceMax>
                <FadeMax>10</FadeMax>
            </CharacteristicsResponse>"#,
        ));
        let proxy = proxy_with(exchange);

        match proxy.characteristics().unwrap_err() {
            ControlError::BadResponse { action, field } => {
                assert_eq!(action, "Characteristics");
                assert_eq!(field, "VolumeMilliDbPerStep");
            }
            other => panic!("Expected BadResponse, got {:?}", other),
        }
    }
}
