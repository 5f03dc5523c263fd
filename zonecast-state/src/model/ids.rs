//! Player identity newtype

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable player identity assigned by the network (the device's unique
/// name). Immutable once a player is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerUuid(String);

impl PlayerUuid {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self(uuid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerUuid {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
