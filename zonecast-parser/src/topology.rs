//! Zone-group topology document parser.
//!
//! The topology state variable carries the complete grouping of every
//! player in the household:
//!
//! ```xml
//! <ZoneGroupState>
//!   <ZoneGroups>
//!     <ZoneGroup Coordinator="RINCON_A" ID="RINCON_A:12">
//!       <ZoneGroupMember UUID="RINCON_A" ZoneName="Kitchen" .../>
//!       <ZoneGroupMember UUID="RINCON_B" ZoneName="Kitchen" Invisible="1" .../>
//!     </ZoneGroup>
//!   </ZoneGroups>
//! </ZoneGroupState>
//! ```
//!
//! Only the fields the reconciliation path consumes are modeled; the
//! deserializer ignores the rest of the member attributes.

use serde::Deserialize;

use crate::error::ParseResult;
use crate::xml;

/// Root of a topology document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "ZoneGroupState")]
pub struct TopologyDocument {
    /// Container for the ordered group list.
    #[serde(rename = "ZoneGroups", default)]
    pub zone_groups: ZoneGroups,
}

/// Ordered list of zone groups, in document order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZoneGroups {
    #[serde(rename = "ZoneGroup", default)]
    pub groups: Vec<GroupDescriptor>,
}

/// One group of players playing in sync, led by a coordinator.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupDescriptor {
    /// UUID of the coordinating member.
    #[serde(rename = "@Coordinator")]
    pub coordinator: String,

    /// Group identifier assigned by the device, when present.
    #[serde(rename = "@ID", default)]
    pub id: Option<String>,

    /// Member entries in document order.
    #[serde(rename = "ZoneGroupMember", default)]
    pub members: Vec<MemberDescriptor>,
}

/// One member entry of a group.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberDescriptor {
    /// Stable identity assigned by the network.
    #[serde(rename = "@UUID")]
    pub uuid: String,

    /// Display label for the room.
    #[serde(rename = "@ZoneName", default)]
    pub zone_name: String,

    /// Device description URL, when present.
    #[serde(rename = "@Location", default)]
    pub location: Option<String>,

    /// Set on satellite devices that are not independently addressable.
    /// The attribute being present at all marks the member invisible.
    #[serde(rename = "@Invisible", default)]
    pub invisible: Option<String>,
}

impl TopologyDocument {
    /// Parse a topology state-variable value.
    pub fn from_xml(xml: &str) -> ParseResult<Self> {
        xml::parse(xml)
    }

    /// The ordered group descriptors.
    pub fn groups(&self) -> &[GroupDescriptor] {
        &self.zone_groups.groups
    }
}

impl GroupDescriptor {
    /// Members that may appear as standalone players.
    pub fn visible_members(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.members.iter().filter(|m| m.is_visible())
    }
}

impl MemberDescriptor {
    /// Whether this member is independently addressable.
    pub fn is_visible(&self) -> bool {
        self.invisible.is_none()
    }
}
