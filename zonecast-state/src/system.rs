//! Public entry point of the state engine.

use std::sync::Arc;

use tracing::{debug, trace};
use zonecast_upnp::{ControlPoint, DeviceHandle, ServiceId};

use crate::config::Config;
use crate::events::{EventBus, StateEvent};
use crate::model::{Player, PlayerUuid, Zone};
use crate::reconciler::TopologyReconciler;

/// Live view of a household: its zones, players and their playback state.
///
/// Construct one per household, wire the control point's callbacks to
/// [`device_arrived`](Self::device_arrived) and
/// [`service_change`](Self::service_change), and read the topology through
/// the accessor methods. All methods are safe to call from any thread.
pub struct ZoneSystem {
    reconciler: TopologyReconciler,
    events: Arc<EventBus>,
}

impl ZoneSystem {
    pub fn new(control_point: Arc<dyn ControlPoint>) -> Self {
        Self::with_config(control_point, Config::default())
    }

    pub fn with_config(control_point: Arc<dyn ControlPoint>, config: Config) -> Self {
        let events = Arc::new(EventBus::new());
        let reconciler = TopologyReconciler::new(control_point, config, Arc::clone(&events));
        Self { reconciler, events }
    }

    /// Report a device the control point found on the network.
    pub fn device_arrived(&self, handle: DeviceHandle) {
        self.reconciler.device_arrived(handle);
    }

    /// Report a state-variable change notification.
    ///
    /// Topology documents are queued for debounced reconciliation;
    /// transport events go straight to the named player's state machine.
    /// Changes for unknown players or unrouted variables are dropped.
    pub fn service_change(&self, player: &PlayerUuid, service: ServiceId, variable: &str, value: &str) {
        match (service, variable) {
            (ServiceId::ZoneGroupTopology, "ZoneGroupState") => {
                self.reconciler.topology_event(value)
            }
            (ServiceId::AvTransport, "LastChange") => match self.reconciler.player(player) {
                Some(target) => target.change_event(value),
                None => debug!(%player, "transport event for unknown player dropped"),
            },
            _ => trace!(%player, ?service, variable, "unrouted state variable change"),
        }
    }

    /// Zones from the most recent reconciliation.
    pub fn zones(&self) -> Vec<Arc<Zone>> {
        self.reconciler.zones()
    }

    /// Players from the most recent reconciliation, in zone order.
    pub fn players(&self) -> Vec<Arc<Player>> {
        self.reconciler.players()
    }

    /// Zones and players read atomically from the same reconciliation.
    pub fn snapshot(&self) -> (Vec<Arc<Zone>>, Vec<Arc<Player>>) {
        self.reconciler.snapshot()
    }

    pub fn player(&self, uuid: &PlayerUuid) -> Option<Arc<Player>> {
        self.reconciler.player(uuid)
    }

    /// Register a listener for topology and player-state changes.
    ///
    /// Listeners run on engine threads after the change has been
    /// published and must not block.
    pub fn on_event(&self, listener: impl Fn(&StateEvent) + Send + Sync + 'static) {
        self.events.subscribe(listener);
    }

    /// Stop the topology worker and every position poller.
    pub fn shutdown(&self) {
        self.reconciler.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockControlPoint;
    use std::time::Duration;

    fn system() -> (ZoneSystem, Arc<MockControlPoint>) {
        let cp = Arc::new(MockControlPoint::new());
        let config = Config {
            topology_quiet_period: Duration::from_millis(30),
            ..Config::default()
        };
        (
            ZoneSystem::with_config(Arc::clone(&cp) as Arc<dyn ControlPoint>, config),
            cp,
        )
    }

    const ONE_ZONE: &str = r#"<ZoneGroupState><ZoneGroups>
        <ZoneGroup Coordinator="RINCON_A">
            <ZoneGroupMember UUID="RINCON_A" ZoneName="Kitchen"/>
        </ZoneGroup>
    </ZoneGroups></ZoneGroupState>"#;

    fn settle(system: &ZoneSystem) {
        for _ in 0..50 {
            if !system.zones().is_empty() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("topology never reconciled");
    }

    #[test]
    fn topology_changes_route_to_the_reconciler() {
        let (system, _cp) = system();
        system.service_change(
            &PlayerUuid::new("RINCON_A"),
            ServiceId::ZoneGroupTopology,
            "ZoneGroupState",
            ONE_ZONE,
        );
        settle(&system);
        assert_eq!(system.zones()[0].name(), "Kitchen");
        system.shutdown();
    }

    #[test]
    fn transport_changes_route_to_the_player() {
        let (system, _cp) = system();
        system.service_change(
            &PlayerUuid::new("RINCON_A"),
            ServiceId::ZoneGroupTopology,
            "ZoneGroupState",
            ONE_ZONE,
        );
        settle(&system);

        system.service_change(
            &PlayerUuid::new("RINCON_A"),
            ServiceId::AvTransport,
            "LastChange",
            r#"<Event><InstanceID val="0"><TransportState val="PLAYING"/></InstanceID></Event>"#,
        );
        let player = system.player(&PlayerUuid::new("RINCON_A")).unwrap();
        assert!(player.current_state().transport_state.is_playing());
        system.shutdown();
    }

    #[test]
    fn changes_for_unknown_players_or_variables_are_dropped() {
        let (system, _cp) = system();
        system.service_change(
            &PlayerUuid::new("RINCON_Z"),
            ServiceId::AvTransport,
            "LastChange",
            r#"<Event><InstanceID val="0"><TransportState val="PLAYING"/></InstanceID></Event>"#,
        );
        system.service_change(
            &PlayerUuid::new("RINCON_Z"),
            ServiceId::AvTransport,
            "SinkProtocolInfo",
            "ignored",
        );
        assert!(system.players().is_empty());
        system.shutdown();
    }
}
