//! Topology reconciliation.
//!
//! All topology writes happen on one worker thread fed by a channel.
//! Notifications arriving within the quiet period coalesce: each one
//! replaces the pending document and restarts the window, and only the
//! last document of a burst is reconciled. Reconciliation rebuilds the
//! zones/players pair from scratch and publishes it with a single swap,
//! so readers always see zones and players from the same document.

use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};
use zonecast_parser::TopologyDocument;
use zonecast_upnp::{ControlPoint, DeviceHandle, ServiceId};

use crate::config::Config;
use crate::events::{EventBus, StateEvent};
use crate::model::{Player, PlayerUuid, Zone};
use crate::registry::DeviceRegistry;

enum WorkerMessage {
    Topology(String),
    Shutdown,
}

/// The current zones/players pair, always replaced as a unit.
#[derive(Default)]
struct TopologySnapshot {
    zones: Vec<Arc<Zone>>,
    players: Vec<Arc<Player>>,
}

/// State shared between the reconciler handle and its worker thread.
pub(crate) struct Shared {
    control_point: Arc<dyn ControlPoint>,
    config: Config,
    events: Arc<EventBus>,
    devices: DeviceRegistry,
    topology: RwLock<TopologySnapshot>,
}

/// Owns the topology worker and the live zones/players snapshot.
pub(crate) struct TopologyReconciler {
    shared: Arc<Shared>,
    tx: mpsc::Sender<WorkerMessage>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl TopologyReconciler {
    pub(crate) fn new(
        control_point: Arc<dyn ControlPoint>,
        config: Config,
        events: Arc<EventBus>,
    ) -> Self {
        let shared = Arc::new(Shared {
            control_point,
            config,
            events,
            devices: DeviceRegistry::new(),
            topology: RwLock::new(TopologySnapshot::default()),
        });
        let (tx, rx) = mpsc::channel();
        let worker = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || run_worker(shared, rx))
        };
        Self {
            shared,
            tx,
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Record a device that appeared on the network.
    pub(crate) fn device_arrived(&self, handle: DeviceHandle) {
        device_arrived(&self.shared, handle);
    }

    /// Queue a raw topology document for debounced reconciliation.
    pub(crate) fn topology_event(&self, raw: &str) {
        debug!(bytes = raw.len(), "topology notification queued");
        if self.tx.send(WorkerMessage::Topology(raw.to_owned())).is_err() {
            warn!("topology worker gone, notification dropped");
        }
    }

    pub(crate) fn zones(&self) -> Vec<Arc<Zone>> {
        self.shared.topology.read().zones.clone()
    }

    pub(crate) fn players(&self) -> Vec<Arc<Player>> {
        self.shared.topology.read().players.clone()
    }

    /// Zones and players from the same reconciliation, read atomically.
    pub(crate) fn snapshot(&self) -> (Vec<Arc<Zone>>, Vec<Arc<Player>>) {
        let topology = self.shared.topology.read();
        (topology.zones.clone(), topology.players.clone())
    }

    pub(crate) fn player(&self, uuid: &PlayerUuid) -> Option<Arc<Player>> {
        self.shared
            .topology
            .read()
            .players
            .iter()
            .find(|p| p.uuid() == uuid)
            .cloned()
    }

    /// Stop the worker and every armed position poller.
    pub(crate) fn shutdown(&self) {
        let _ = self.tx.send(WorkerMessage::Shutdown);
        let worker = self.worker.lock().take();
        if let Some(worker) = worker {
            let _ = worker.join();
        }
        for player in self.players() {
            player.stop_polling();
        }
    }
}

impl Drop for TopologyReconciler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(shared: Arc<Shared>, rx: mpsc::Receiver<WorkerMessage>) {
    info!("topology worker started");
    let quiet = shared.config.topology_quiet_period;
    let mut pending: Option<String> = None;
    loop {
        let message = if pending.is_some() {
            match rx.recv_timeout(quiet) {
                Ok(message) => Some(message),
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if let Some(document) = pending.take() {
                        reconcile(&shared, &document);
                    }
                    continue;
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => None,
            }
        } else {
            rx.recv().ok()
        };
        match message {
            // A newer document supersedes the pending one and restarts
            // the quiet period.
            Some(WorkerMessage::Topology(document)) => pending = Some(document),
            Some(WorkerMessage::Shutdown) | None => break,
        }
    }
    info!("topology worker stopped");
}

/// Register the handle and bind it wherever the uuid is already live.
pub(crate) fn device_arrived(shared: &Shared, handle: DeviceHandle) {
    let uuid = PlayerUuid::new(handle.uuid());
    info!(%uuid, location = handle.location(), "device arrived");
    shared.devices.insert(uuid.clone(), handle.clone());

    // Binding subscribes over the network, so it runs outside any lock.
    let player = shared
        .topology
        .read()
        .players
        .iter()
        .find(|p| p.uuid() == &uuid)
        .cloned();
    if let Some(player) = player {
        player.bind_device(handle.clone());
    }

    if let Err(error) = shared.control_point.subscribe(
        &handle,
        ServiceId::ZoneGroupTopology,
        "ZoneGroupState",
        shared.config.subscription_timeout,
    ) {
        warn!(%uuid, %error, "topology subscription failed");
    }
}

/// Rebuild and publish the zones/players pair from one document.
///
/// A document that does not decode leaves the previous topology in
/// place; devices re-notify on the next membership change.
pub(crate) fn reconcile(shared: &Shared, raw: &str) {
    let document = match TopologyDocument::from_xml(raw) {
        Ok(document) => document,
        Err(error) => {
            warn!(%error, "malformed topology document ignored");
            return;
        }
    };

    let mut zones = Vec::new();
    for group in document.groups() {
        let visible: Vec<_> = group.visible_members().collect();
        if visible.is_empty() {
            debug!(coordinator = %group.coordinator, "group with no visible members skipped");
            continue;
        }
        let members: Vec<Arc<Player>> = visible
            .into_iter()
            .map(|member| {
                let uuid = PlayerUuid::new(member.uuid.as_str());
                let player = Arc::new(Player::new(
                    uuid.clone(),
                    member.zone_name.as_str(),
                    Arc::clone(&shared.control_point),
                    Arc::clone(&shared.events),
                    shared.config,
                ));
                // The device may have arrived before this document named
                // the player; bind it now if so.
                if let Some(handle) = shared.devices.get(&uuid) {
                    player.bind_device(handle);
                }
                player
            })
            .collect();
        zones.push(Arc::new(Zone::new(
            PlayerUuid::new(group.coordinator.as_str()),
            members,
        )));
    }

    let players: Vec<Arc<Player>> = zones
        .iter()
        .flat_map(|zone| zone.members().iter().cloned())
        .collect();
    info!(zones = zones.len(), players = players.len(), "topology reconciled");

    let superseded = {
        let mut topology = shared.topology.write();
        std::mem::replace(&mut *topology, TopologySnapshot { zones, players })
    };
    // Superseded players must not keep polling; stopping joins threads,
    // so it happens after the write lock is released.
    for player in superseded.players {
        player.stop_polling();
    }

    shared.events.emit(&StateEvent::TopologyChanged);
}
