//! Transport state enumeration

use serde::{Deserialize, Serialize};

/// Transport state of one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// Playback is stopped.
    Stopped,
    /// Currently playing audio.
    Playing,
    /// Playback is paused.
    Paused,
    /// No successful observation yet, or the reported state was not
    /// recognized.
    Unknown,
}

impl TransportState {
    /// Map a transport-state string from a change notification.
    ///
    /// Recognizes `PLAYING`, `PAUSED_PLAYBACK`/`PAUSED` and `STOPPED`;
    /// anything else (e.g. `TRANSITIONING`) maps to
    /// [`Unknown`](TransportState::Unknown).
    pub fn from_wire(value: &str) -> Self {
        match value {
            "PLAYING" => TransportState::Playing,
            "PAUSED_PLAYBACK" | "PAUSED" => TransportState::Paused,
            "STOPPED" => TransportState::Stopped,
            _ => TransportState::Unknown,
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, TransportState::Playing)
    }
}

impl Default for TransportState {
    fn default() -> Self {
        TransportState::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_mapping() {
        assert_eq!(TransportState::from_wire("PLAYING"), TransportState::Playing);
        assert_eq!(
            TransportState::from_wire("PAUSED_PLAYBACK"),
            TransportState::Paused
        );
        assert_eq!(TransportState::from_wire("PAUSED"), TransportState::Paused);
        assert_eq!(TransportState::from_wire("STOPPED"), TransportState::Stopped);
        assert_eq!(
            TransportState::from_wire("TRANSITIONING"),
            TransportState::Unknown
        );
        assert_eq!(TransportState::from_wire(""), TransportState::Unknown);
    }

    #[test]
    fn default_is_unknown() {
        assert_eq!(TransportState::default(), TransportState::Unknown);
    }
}
