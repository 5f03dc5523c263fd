//! AVTransport LastChange document parser.
//!
//! Players push transport changes through a single LastChange variable:
//!
//! ```xml
//! <Event xmlns="urn:schemas-upnp-org:metadata-1-0/AVT/">
//!   <InstanceID val="0">
//!     <TransportState val="PLAYING"/>
//!     <NumberOfTracks val="12"/>
//!     <CurrentTrack val="3"/>
//!     <CurrentTrackDuration val="0:03:57"/>
//!     <CurrentTrackMetaData val="&lt;DIDL-Lite ...&gt;"/>
//!   </InstanceID>
//! </Event>
//! ```
//!
//! The same variable also delivers events that have nothing to do with
//! playback; those lack `TransportState`, so every field here is optional
//! and the caller decides whether the document is relevant.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ParseResult;
use crate::xml::{self, ValAttr};

/// Root of a LastChange document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "Event")]
pub struct LastChangeDocument {
    /// The instance section holding the state variables.
    #[serde(rename = "InstanceID")]
    pub instance: Instance,
}

/// State variables reported for one transport instance.
#[derive(Debug, Clone, Deserialize)]
pub struct Instance {
    /// Instance identifier, normally "0".
    #[serde(rename = "@val", default)]
    pub id: String,

    /// Transport state; absent for non-playback events on this channel.
    #[serde(rename = "TransportState", default)]
    pub transport_state: Option<ValAttr>,

    /// Queue length.
    #[serde(rename = "NumberOfTracks", default)]
    pub number_of_tracks: Option<ValAttr>,

    /// One-based index of the current track.
    #[serde(rename = "CurrentTrack", default)]
    pub current_track: Option<ValAttr>,

    /// Duration of the current track as `H:MM:SS` text.
    #[serde(rename = "CurrentTrackDuration", default)]
    pub current_track_duration: Option<ValAttr>,

    /// Escaped DIDL-Lite metadata for the current track.
    #[serde(rename = "CurrentTrackMetaData", default)]
    pub current_track_metadata: Option<ValAttr>,

    /// Escaped DIDL-Lite metadata for the upcoming track.
    #[serde(rename = "NextTrackMetaData", default)]
    pub next_track_metadata: Option<ValAttr>,
}

impl LastChangeDocument {
    /// Parse a LastChange state-variable value.
    pub fn from_xml(xml: &str) -> ParseResult<Self> {
        xml::parse(xml)
    }

    /// The transport state string, when this is a playback event.
    pub fn transport_state(&self) -> Option<&str> {
        self.instance
            .transport_state
            .as_ref()
            .map(|v| v.val.as_str())
    }
}

/// Parse a `H:MM:SS` (or `MM:SS`) duration string.
///
/// Devices report an empty duration for streams and between tracks;
/// that, and anything else unparseable, maps to a zero duration rather
/// than an error.
pub fn parse_duration(value: &str) -> Duration {
    let mut seconds: u64 = 0;
    for part in value.split(':') {
        let Ok(n) = part.parse::<u64>() else {
            return Duration::ZERO;
        };
        // The fields come off the network; an absurdly large one must
        // not overflow the accumulator.
        let Some(total) = seconds.checked_mul(60).and_then(|s| s.checked_add(n)) else {
            return Duration::ZERO;
        };
        seconds = total;
    }
    Duration::from_secs(seconds)
}
