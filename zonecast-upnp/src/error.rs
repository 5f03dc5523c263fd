//! Error taxonomy for control-point calls

use thiserror::Error;

/// Failures surfaced by the underlying control point or by decoding its
/// responses.
#[derive(Debug, Error)]
pub enum UpnpError {
    /// The device could not be reached or the request did not complete.
    #[error("transport error: {0}")]
    Transport(String),

    /// The device answered with a fault code.
    #[error("device fault: error code {0}")]
    Fault(u16),

    /// The device answered, but the response was missing expected data.
    #[error("malformed response: {0}")]
    Response(String),

    /// Event subscription could not be established.
    #[error("subscription failed: {0}")]
    Subscription(String),
}

/// Result type alias for control-point operations
pub type Result<T> = std::result::Result<T, UpnpError>;
