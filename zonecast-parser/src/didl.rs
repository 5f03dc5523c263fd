//! DIDL-Lite metadata parser.
//!
//! Queue browses and track metadata carry DIDL-Lite documents:
//!
//! ```xml
//! <DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" ...>
//!   <item id="Q:0/1" parentID="Q:0">
//!     <dc:title>Song Title</dc:title>
//!     <dc:creator>Artist Name</dc:creator>
//!     <upnp:album>Album Name</upnp:album>
//!     <upnp:albumArtURI>/getaa?u=...</upnp:albumArtURI>
//!     <res duration="0:03:58">x-file-cifs://nas/song.flac</res>
//!   </item>
//! </DIDL-Lite>
//! ```
//!
//! Devices are inconsistent about which child elements they include, so
//! every field is optional.

use serde::Deserialize;

use crate::error::ParseResult;
use crate::xml;

/// Root of a DIDL-Lite document; holds the items in document order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename = "DIDL-Lite")]
pub struct DidlDocument {
    #[serde(rename = "item", default)]
    pub items: Vec<DidlItem>,
}

impl DidlDocument {
    /// Parse a DIDL-Lite document.
    pub fn from_xml(xml: &str) -> ParseResult<Self> {
        xml::parse(xml)
    }
}

/// One item entry: a track or stream description.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DidlItem {
    /// Object identifier, e.g. `Q:0/3` for the third queue entry.
    #[serde(rename = "@id", default)]
    pub id: String,

    /// Identifier of the containing object.
    #[serde(rename = "@parentID", default)]
    pub parent_id: String,

    /// Track title.
    #[serde(rename = "title", default)]
    pub title: Option<String>,

    /// Artist.
    #[serde(rename = "creator", default)]
    pub creator: Option<String>,

    /// Album name.
    #[serde(rename = "album", default)]
    pub album: Option<String>,

    /// Album art URL, usually relative to the device.
    #[serde(rename = "albumArtURI", default)]
    pub album_art_uri: Option<String>,

    /// Upnp object class, e.g. `object.item.audioItem.musicTrack`.
    #[serde(rename = "class", default)]
    pub class: Option<String>,

    /// Free-form description, present on radio stream entries.
    #[serde(rename = "description", default)]
    pub description: Option<String>,

    /// Playable resource.
    #[serde(rename = "res", default)]
    pub res: Option<DidlResource>,
}

impl DidlItem {
    /// The resource URI, when the item carries one.
    pub fn uri(&self) -> Option<&str> {
        self.res.as_ref().and_then(|r| r.uri.as_deref())
    }
}

/// The `res` element: the URI plus transport attributes.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DidlResource {
    /// Duration as `H:MM:SS` text, when reported.
    #[serde(rename = "@duration", default)]
    pub duration: Option<String>,

    /// Protocol descriptor of the resource.
    #[serde(rename = "@protocolInfo", default)]
    pub protocol_info: Option<String>,

    /// The resource URI itself.
    #[serde(rename = "$text", default)]
    pub uri: Option<String>,
}
