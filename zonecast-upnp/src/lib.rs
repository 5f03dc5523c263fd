//! # zonecast-upnp
//!
//! The boundary between the zone state engine and the UPnP control-point
//! subsystem that does discovery, eventing and SOAP for it. The engine
//! depends on the [`ControlPoint`] trait only; concrete control points
//! live outside this workspace and implementations plug in from there.
//!
//! Also provides the typed AVTransport and ContentDirectory actions
//! ([`avtransport`], [`content_directory`]) the engine and the command
//! layer issue against a device.

pub mod avtransport;
pub mod content_directory;
pub mod control_point;
pub mod error;

pub use avtransport::{MediaInfo, PositionInfo, TransportInfo};
pub use content_directory::QueuePage;
pub use control_point::{ActionResponse, ControlPoint, DeviceHandle, ServiceId};
pub use error::{Result, UpnpError};
