//! A coordinated group of players.

use std::sync::Arc;

use tracing::warn;

use super::{Player, PlayerUuid};

/// An ordered group of players playing in sync, led by a coordinator.
///
/// Zones are transient: every accepted topology update rebuilds them from
/// scratch. A zone is only constructed with at least one visible member.
pub struct Zone {
    coordinator_uuid: PlayerUuid,
    members: Vec<Arc<Player>>,
    /// Index into `members`; the coordinator is always itself a member.
    coordinator: usize,
}

impl Zone {
    /// Build a zone from its declared coordinator and members in document
    /// order. `members` must be non-empty.
    ///
    /// The topology document guarantees the coordinator appears among the
    /// members; if a document ever violates that, the first member stands
    /// in so the zone still has a usable coordinator.
    pub(crate) fn new(coordinator_uuid: PlayerUuid, members: Vec<Arc<Player>>) -> Self {
        debug_assert!(!members.is_empty());
        let coordinator = members
            .iter()
            .position(|p| p.uuid() == &coordinator_uuid)
            .unwrap_or_else(|| {
                warn!(coordinator = %coordinator_uuid, "declared coordinator is not a member");
                0
            });
        Self {
            coordinator_uuid,
            members,
            coordinator,
        }
    }

    /// UUID of the declared coordinator.
    pub fn coordinator_uuid(&self) -> &PlayerUuid {
        &self.coordinator_uuid
    }

    /// The member driving playback for this zone.
    pub fn coordinator(&self) -> &Arc<Player> {
        &self.members[self.coordinator]
    }

    /// Members in document order.
    pub fn members(&self) -> &[Arc<Player>] {
        &self.members
    }

    /// Display name, computed from current membership on every read.
    pub fn name(&self) -> String {
        self.members
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(" + ")
    }

    pub fn contains(&self, uuid: &PlayerUuid) -> bool {
        self.members.iter().any(|p| p.uuid() == uuid)
    }
}

impl std::fmt::Debug for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Zone")
            .field("coordinator_uuid", &self.coordinator_uuid)
            .field("name", &self.name())
            .field("members", &self.members.len())
            .finish()
    }
}
