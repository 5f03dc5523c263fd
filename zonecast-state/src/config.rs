//! Engine configuration

use std::time::Duration;

/// Tunables for the state engine.
///
/// The defaults match the timing the devices were designed around and
/// rarely need changing outside of tests.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Quiet period after the most recent topology notification before a
    /// reconciliation runs. Devices emit several near-duplicate topology
    /// notifications per user-visible change; the burst is coalesced and
    /// only the last document is reconciled.
    pub topology_quiet_period: Duration,

    /// Interval of the optional position poller that keeps
    /// `relative_time` fresh while a player is playing.
    pub position_poll_interval: Duration,

    /// Timeout requested when subscribing to state-variable events;
    /// renewal is the control point's concern.
    pub subscription_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topology_quiet_period: Duration::from_millis(700),
            position_poll_interval: Duration::from_secs(30),
            subscription_timeout: Duration::from_secs(600),
        }
    }
}
