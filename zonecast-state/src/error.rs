//! Error types for the state engine

use thiserror::Error;
use zonecast_upnp::UpnpError;

/// Result type for state-engine operations
pub type Result<T> = std::result::Result<T, StateError>;

/// Errors surfaced by the state engine's public operations.
///
/// Notification handling never returns these: malformed or irrelevant
/// notifications degrade to the last known good state. Errors appear
/// only on the command/query paths callers invoke directly.
#[derive(Debug, Error)]
pub enum StateError {
    /// The player has not been bound to a physical device yet.
    #[error("player {0} has no bound device")]
    DeviceNotBound(String),

    /// A control-point call failed.
    #[error(transparent)]
    Upnp(#[from] UpnpError),
}
