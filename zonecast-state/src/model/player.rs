//! A networked playback device as the engine sees it.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};
use zonecast_upnp::{
    avtransport, content_directory, ControlPoint, DeviceHandle, MediaInfo, QueuePage, ServiceId,
};

use crate::config::Config;
use crate::error::{Result, StateError};
use crate::events::EventBus;
use crate::playback::PositionPoller;

use super::{PlayerState, PlayerUuid};

/// One player in the live topology.
///
/// Identity (`uuid`, `name`) is fixed at construction; the device binding
/// and the playback state are interior-mutable because notifications for
/// them arrive on arbitrary threads. At most one live `Player` exists per
/// uuid at a time; a topology rebuild constructs replacements and
/// discards the old instances.
pub struct Player {
    uuid: PlayerUuid,
    name: String,
    pub(crate) control_point: Arc<dyn ControlPoint>,
    pub(crate) events: Arc<EventBus>,
    pub(crate) config: Config,
    /// Lookup-only back-reference; the engine never owns device lifetime.
    device: RwLock<Option<DeviceHandle>>,
    pub(crate) state: Mutex<PlayerState>,
    pub(crate) poller: Mutex<Option<PositionPoller>>,
}

impl Player {
    pub(crate) fn new(
        uuid: PlayerUuid,
        name: impl Into<String>,
        control_point: Arc<dyn ControlPoint>,
        events: Arc<EventBus>,
        config: Config,
    ) -> Self {
        Self {
            uuid,
            name: name.into(),
            control_point,
            events,
            config,
            device: RwLock::new(None),
            state: Mutex::new(PlayerState::default()),
            poller: Mutex::new(None),
        }
    }

    pub fn uuid(&self) -> &PlayerUuid {
        &self.uuid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bound device handle, if the device has been seen yet.
    pub fn device(&self) -> Option<DeviceHandle> {
        self.device.read().clone()
    }

    /// A copy of the current playback snapshot.
    pub fn current_state(&self) -> PlayerState {
        self.state.lock().clone()
    }

    /// Bind the physical device and subscribe to its transport events.
    ///
    /// Idempotent: rebinding the same handle is a no-op, so it does not
    /// matter whether the device or the topology was seen first.
    pub(crate) fn bind_device(&self, handle: DeviceHandle) {
        {
            let mut device = self.device.write();
            if device.as_ref() == Some(&handle) {
                return;
            }
            *device = Some(handle.clone());
        }
        debug!(player = %self.uuid, "bound device");

        if let Err(error) = self.control_point.subscribe(
            &handle,
            ServiceId::AvTransport,
            "LastChange",
            self.config.subscription_timeout,
        ) {
            warn!(player = %self.uuid, %error, "transport event subscription failed");
        }
    }

    fn bound_device(&self) -> Result<DeviceHandle> {
        self.device
            .read()
            .clone()
            .ok_or_else(|| StateError::DeviceNotBound(self.uuid.to_string()))
    }

    /// Start playback.
    pub fn play(&self) -> Result<()> {
        let device = self.bound_device()?;
        avtransport::play(&*self.control_point, &device)?;
        Ok(())
    }

    /// Pause playback.
    pub fn pause(&self) -> Result<()> {
        let device = self.bound_device()?;
        avtransport::pause(&*self.control_point, &device)?;
        Ok(())
    }

    /// Jump to a track number in the queue.
    pub fn seek(&self, track: u32) -> Result<()> {
        let device = self.bound_device()?;
        avtransport::seek_track(&*self.control_point, &device, track)?;
        Ok(())
    }

    /// Append a URI to the queue; returns the assigned queue position.
    pub fn enqueue(&self, uri: &str, metadata: &str, as_next: bool) -> Result<u32> {
        let device = self.bound_device()?;
        Ok(avtransport::enqueue(
            &*self.control_point,
            &device,
            uri,
            metadata,
            as_next,
        )?)
    }

    /// Point the transport at a URI directly.
    pub fn set_transport_uri(&self, uri: &str, metadata: &str) -> Result<()> {
        let device = self.bound_device()?;
        avtransport::set_transport_uri(&*self.control_point, &device, uri, metadata)?;
        Ok(())
    }

    /// Browse a page of this player's play queue.
    pub fn queue(&self, starting_index: u32, requested_count: u32) -> Result<QueuePage> {
        let device = self.bound_device()?;
        Ok(content_directory::browse_queue(
            &*self.control_point,
            &device,
            starting_index,
            requested_count,
        )?)
    }

    /// Query what the transport is playing from.
    pub fn media_info(&self) -> Result<MediaInfo> {
        let device = self.bound_device()?;
        Ok(avtransport::media_info(&*self.control_point, &device)?)
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("uuid", &self.uuid)
            .field("name", &self.name)
            .field("device", &*self.device.read())
            .finish_non_exhaustive()
    }
}
