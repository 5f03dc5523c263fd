//! Data model: players, zones and their state types.

mod ids;
mod player;
mod player_state;
mod transport_state;
mod zone;

pub use ids::PlayerUuid;
pub use player::Player;
pub use player_state::PlayerState;
pub use transport_state::TransportState;
pub use zone::Zone;
