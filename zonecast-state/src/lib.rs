//! Multi-room topology and playback state engine.
//!
//! Maintains a live model of a household of networked players: which
//! zones exist, which players belong to them, and what each player is
//! doing. Input arrives as raw UPnP state-variable notifications and
//! device arrivals from an external control point; output is a
//! consistent, thread-safe snapshot plus change notifications.
//!
//! # Architecture
//!
//! ```text
//! control point ─ device arrivals ──► DeviceRegistry ─┐
//!               ─ ZoneGroupState ───► debounce worker ─► zones/players
//!               ─ LastChange ───────► per-player state machine
//! ```
//!
//! Topology notifications arrive in bursts; a quiet-period debounce
//! (700 ms by default) coalesces each burst and rebuilds the topology
//! from its last document only. Transport notifications feed each
//! player's state machine directly, enriched with an on-demand position
//! query.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use zonecast_state::{StateEvent, ZoneSystem};
//!
//! let system = Arc::new(ZoneSystem::new(control_point));
//! system.on_event(|event| match event {
//!     StateEvent::TopologyChanged => refresh_zone_list(),
//!     StateEvent::PlayerStateChanged(uuid) => refresh_player(uuid),
//! });
//!
//! // Wire the control point's callbacks:
//! // on device arrival:      system.device_arrived(handle)
//! // on state-variable change: system.service_change(uuid, service, var, value)
//!
//! for zone in system.zones() {
//!     println!("{}: {:?}", zone.name(), zone.coordinator().current_state());
//! }
//! ```

pub mod config;
pub mod error;
mod events;
pub mod logging;
pub mod model;
mod playback;
mod reconciler;
mod registry;
mod system;
#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use error::{Result, StateError};
pub use events::StateEvent;
pub use model::{Player, PlayerState, PlayerUuid, TransportState, Zone};
pub use system::ZoneSystem;
