//! Device registry: uuid → device handle.

use std::collections::HashMap;

use parking_lot::RwLock;

use zonecast_upnp::DeviceHandle;

use crate::model::PlayerUuid;

/// Maps player uuids to the device handles seen for them.
///
/// Insert-or-overwrite only; entries are never removed. Handles are cheap
/// lookup references, and keeping stale ones around lets a player
/// constructed by a later topology rebuild bind immediately even if the
/// device arrival predates it by a long time.
#[derive(Default)]
pub(crate) struct DeviceRegistry {
    devices: RwLock<HashMap<PlayerUuid, DeviceHandle>>,
}

impl DeviceRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, uuid: PlayerUuid, handle: DeviceHandle) {
        self.devices.write().insert(uuid, handle);
    }

    pub(crate) fn get(&self, uuid: &PlayerUuid) -> Option<DeviceHandle> {
        self.devices.read().get(uuid).cloned()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.devices.read().len()
    }
}
