//! # zonecast-parser
//!
//! Serde-based parsing for the wire documents the zone state engine
//! consumes: the zone-group topology state variable, the AVTransport
//! `LastChange` variable, and the DIDL-Lite metadata carried by queue
//! browses. The state variables arrive as the raw value, already
//! unwrapped from the eventing envelope by the control point.
//!
//! ```rust,ignore
//! use zonecast_parser::{LastChangeDocument, TopologyDocument};
//!
//! let topology = TopologyDocument::from_xml(raw_topology)?;
//! let change = LastChangeDocument::from_xml(raw_last_change)?;
//! ```

pub mod avtransport;
pub mod didl;
pub mod error;
pub mod topology;
pub mod xml;

pub use avtransport::{parse_duration, Instance, LastChangeDocument};
pub use didl::{DidlDocument, DidlItem, DidlResource};
pub use error::{ParseError, ParseResult};
pub use topology::{GroupDescriptor, MemberDescriptor, TopologyDocument};
pub use xml::ValAttr;
