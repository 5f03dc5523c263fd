//! The seam between the state engine and the UPnP control point.
//!
//! Device discovery, subscription renewal and the request transport all
//! live outside this workspace. The engine talks to them exclusively
//! through [`ControlPoint`], and refers to physical devices through
//! cheap, clonable [`DeviceHandle`]s it never owns the lifetime of.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Result, UpnpError};

/// Lookup-only reference to a physical device on the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceHandle {
    uuid: String,
    location: String,
}

impl DeviceHandle {
    pub fn new(uuid: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            location: location.into(),
        }
    }

    /// The device's unique name, identical to the player uuid it backs.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// URL of the device description document.
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Services the engine addresses on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    /// Transport and queue control on the media renderer.
    AvTransport,
    /// Browsing of queue and library content.
    ContentDirectory,
    /// Household-wide zone grouping.
    ZoneGroupTopology,
}

impl ServiceId {
    /// The serviceId URN used on the wire.
    pub fn urn(&self) -> &'static str {
        match self {
            ServiceId::AvTransport => "urn:upnp-org:serviceId:AVTransport",
            ServiceId::ContentDirectory => "urn:upnp-org:serviceId:ContentDirectory",
            ServiceId::ZoneGroupTopology => "urn:upnp-org:serviceId:ZoneGroupTopology",
        }
    }
}

/// Out-arguments of a completed action, keyed by argument name.
#[derive(Debug, Clone, Default)]
pub struct ActionResponse {
    values: HashMap<String, String>,
}

impl ActionResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a response from name/value pairs, mainly for control-point
    /// implementations and tests.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Like [`get`](Self::get), but a missing argument is a malformed
    /// response.
    pub fn required(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| UpnpError::Response(format!("missing out argument {name}")))
    }
}

/// The external control-point subsystem, as consumed by the engine.
///
/// Implementations invoke callbacks (device arrival, state-variable
/// changes) on their own worker threads; nothing here assumes a
/// particular thread or ordering. `invoke` blocks until the device
/// answers; timeout policy belongs to the implementation.
pub trait ControlPoint: Send + Sync {
    /// Invoke an action and wait for its out-arguments.
    fn invoke(
        &self,
        device: &DeviceHandle,
        service: ServiceId,
        action: &str,
        args: &[(&str, String)],
    ) -> Result<ActionResponse>;

    /// Invoke an action without waiting for the result.
    fn invoke_async(
        &self,
        device: &DeviceHandle,
        service: ServiceId,
        action: &str,
        args: &[(&str, String)],
    ) -> Result<()>;

    /// Subscribe to change notifications for one state variable on one
    /// device. Renewal is the implementation's concern.
    fn subscribe(
        &self,
        device: &DeviceHandle,
        service: ServiceId,
        variable: &str,
        timeout: Duration,
    ) -> Result<()>;
}
