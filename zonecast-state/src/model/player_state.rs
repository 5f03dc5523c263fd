//! Per-player playback snapshot

use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use super::TransportState;

/// Snapshot of one player's playback status.
///
/// Replaced as a whole on every accepted change notification; a position
/// poll refreshes `relative_time` and `last_updated` in place.
///
/// `relative_time <= track_duration` is not guaranteed, because the
/// position query and the change notification race on the network.
/// Consumers must tolerate a position past the reported duration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Current transport state.
    pub transport_state: TransportState,
    /// One-based index of the current track in the queue; 0 when unknown.
    pub track_index: u32,
    /// Duration of the current track; zero when the device reports none.
    pub track_duration: Duration,
    /// Playback position within the current track.
    pub relative_time: Duration,
    /// Raw DIDL metadata of the current track.
    pub current_track_metadata: Option<String>,
    /// Raw DIDL metadata of the upcoming track.
    pub next_track_metadata: Option<String>,
    /// When the last successful merge happened; `None` until the first
    /// notification is accepted.
    pub last_updated: Option<SystemTime>,
}

impl PlayerState {
    pub fn is_playing(&self) -> bool {
        self.transport_state.is_playing()
    }
}
