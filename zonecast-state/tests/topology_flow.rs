//! End-to-end flow through the public API: device arrival, topology
//! notification, debounced reconciliation, then transport events.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use zonecast_state::{Config, PlayerUuid, StateEvent, TransportState, ZoneSystem};
use zonecast_upnp::{ActionResponse, ControlPoint, DeviceHandle, Result, ServiceId, UpnpError};

/// Control point standing in for the household network.
#[derive(Default)]
struct FakeNetwork {
    position: Mutex<Option<ActionResponse>>,
    subscriptions: Mutex<Vec<(String, String)>>,
}

impl ControlPoint for FakeNetwork {
    fn invoke(
        &self,
        _device: &DeviceHandle,
        _service: ServiceId,
        action: &str,
        _args: &[(&str, String)],
    ) -> Result<ActionResponse> {
        if action == "GetPositionInfo" {
            if let Some(response) = self.position.lock().clone() {
                return Ok(response);
            }
            return Err(UpnpError::Transport("position unavailable".into()));
        }
        Ok(ActionResponse::new())
    }

    fn invoke_async(
        &self,
        device: &DeviceHandle,
        service: ServiceId,
        action: &str,
        args: &[(&str, String)],
    ) -> Result<()> {
        self.invoke(device, service, action, args).map(|_| ())
    }

    fn subscribe(
        &self,
        device: &DeviceHandle,
        _service: ServiceId,
        variable: &str,
        _timeout: Duration,
    ) -> Result<()> {
        self.subscriptions
            .lock()
            .push((device.uuid().to_string(), variable.to_string()));
        Ok(())
    }
}

const HOUSEHOLD: &str = r#"<ZoneGroupState>
    <ZoneGroups>
        <ZoneGroup Coordinator="RINCON_KITCHEN" ID="RINCON_KITCHEN:12">
            <ZoneGroupMember UUID="RINCON_KITCHEN" ZoneName="Kitchen"
                Location="http://10.0.0.2:1400/xml/device_description.xml"/>
            <ZoneGroupMember UUID="RINCON_DINING" ZoneName="Dining Room"
                Location="http://10.0.0.3:1400/xml/device_description.xml"/>
            <ZoneGroupMember UUID="RINCON_BRIDGE" ZoneName="BRIDGE" Invisible="1"/>
        </ZoneGroup>
        <ZoneGroup Coordinator="RINCON_OFFICE" ID="RINCON_OFFICE:4">
            <ZoneGroupMember UUID="RINCON_OFFICE" ZoneName="Office"
                Location="http://10.0.0.4:1400/xml/device_description.xml"/>
        </ZoneGroup>
    </ZoneGroups>
</ZoneGroupState>"#;

const OFFICE_PLAYING: &str = r#"<Event xmlns="urn:schemas-upnp-org:metadata-1-0/AVT/">
    <InstanceID val="0">
        <TransportState val="PLAYING"/>
        <CurrentTrack val="5"/>
        <CurrentTrackDuration val="0:03:57"/>
    </InstanceID>
</Event>"#;

fn wait_for(mut done: impl FnMut() -> bool) {
    for _ in 0..100 {
        if done() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("condition never became true");
}

#[test]
fn household_lifecycle() {
    let network = Arc::new(FakeNetwork::default());
    let config = Config {
        topology_quiet_period: Duration::from_millis(40),
        ..Config::default()
    };
    let system = ZoneSystem::with_config(
        Arc::clone(&network) as Arc<dyn ControlPoint>,
        config,
    );

    let events = Arc::new(Mutex::new(Vec::new()));
    {
        let events = Arc::clone(&events);
        system.on_event(move |event| events.lock().push(event.clone()));
    }

    // Devices appear before any topology document names them.
    let office = PlayerUuid::new("RINCON_OFFICE");
    system.device_arrived(DeviceHandle::new(
        "RINCON_OFFICE",
        "http://10.0.0.4:1400/xml/device_description.xml",
    ));
    system.device_arrived(DeviceHandle::new(
        "RINCON_KITCHEN",
        "http://10.0.0.2:1400/xml/device_description.xml",
    ));
    assert!(system.zones().is_empty());

    // A burst of topology notifications coalesces into one rebuild.
    system.service_change(&office, ServiceId::ZoneGroupTopology, "ZoneGroupState", HOUSEHOLD);
    system.service_change(&office, ServiceId::ZoneGroupTopology, "ZoneGroupState", HOUSEHOLD);
    wait_for(|| !system.zones().is_empty());

    let (zones, players) = system.snapshot();
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0].name(), "Kitchen + Dining Room");
    assert_eq!(zones[0].coordinator().uuid().as_str(), "RINCON_KITCHEN");
    assert_eq!(zones[1].name(), "Office");
    assert_eq!(players.len(), 3);
    assert_eq!(
        events.lock().iter().filter(|e| **e == StateEvent::TopologyChanged).count(),
        1
    );

    // Players whose devices were seen are bound and subscribed; the one
    // whose device has not arrived yet is not.
    let kitchen = system.player(&PlayerUuid::new("RINCON_KITCHEN")).unwrap();
    assert!(kitchen.device().is_some());
    let dining = system.player(&PlayerUuid::new("RINCON_DINING")).unwrap();
    assert!(dining.device().is_none());
    assert!(network
        .subscriptions
        .lock()
        .contains(&("RINCON_OFFICE".to_string(), "LastChange".to_string())));

    // Late arrival binds against the already-published topology.
    system.device_arrived(DeviceHandle::new(
        "RINCON_DINING",
        "http://10.0.0.3:1400/xml/device_description.xml",
    ));
    assert!(dining.device().is_some());

    // A transport notification replaces the office player's snapshot.
    *network.position.lock() = Some(ActionResponse::from_pairs([("RelTime", "0:00:21")]));
    system.service_change(&office, ServiceId::AvTransport, "LastChange", OFFICE_PLAYING);

    let player = system.player(&office).unwrap();
    let state = player.current_state();
    assert_eq!(state.transport_state, TransportState::Playing);
    assert_eq!(state.track_index, 5);
    assert_eq!(state.track_duration, Duration::from_secs(237));
    assert_eq!(state.relative_time, Duration::from_secs(21));
    assert!(events.lock().contains(&StateEvent::PlayerStateChanged(office.clone())));

    // A new topology document replaces the pair wholesale.
    system.service_change(
        &office,
        ServiceId::ZoneGroupTopology,
        "ZoneGroupState",
        r#"<ZoneGroupState><ZoneGroups>
            <ZoneGroup Coordinator="RINCON_OFFICE">
                <ZoneGroupMember UUID="RINCON_OFFICE" ZoneName="Office"/>
            </ZoneGroup>
        </ZoneGroups></ZoneGroupState>"#,
    );
    wait_for(|| system.zones().len() == 1);
    let (zones, players) = system.snapshot();
    assert_eq!(zones[0].name(), "Office");
    assert_eq!(players.len(), 1);

    // The replacement starts unobserved; continuity is not carried over.
    assert_eq!(
        system.player(&office).unwrap().current_state().transport_state,
        TransportState::Unknown
    );

    system.shutdown();
}
