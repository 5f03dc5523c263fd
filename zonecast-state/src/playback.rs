//! Per-player playback state machine.
//!
//! Change notifications and on-demand queries are merged into the single
//! [`PlayerState`] snapshot a player carries. Every accepted notification
//! builds a complete replacement state and publishes it with one swap, so
//! a concurrent reader never observes a half-written update.

use std::sync::{mpsc, Arc, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};

use tracing::{debug, trace};
use zonecast_parser::{parse_duration, LastChangeDocument};
use zonecast_upnp::avtransport;

use crate::events::StateEvent;
use crate::model::{Player, PlayerState, TransportState};

impl Player {
    /// Feed one raw LastChange document into the state machine.
    ///
    /// The LastChange channel also delivers events that have nothing to
    /// do with playback; documents without a transport-state field, and
    /// documents that do not decode at all, are dropped without touching
    /// the snapshot or notifying anyone.
    pub fn change_event(&self, raw: &str) {
        let document = match LastChangeDocument::from_xml(raw) {
            Ok(document) => document,
            Err(error) => {
                trace!(player = %self.uuid(), %error, "undecodable transport event ignored");
                return;
            }
        };
        let instance = document.instance;
        let Some(transport) = instance.transport_state else {
            trace!(player = %self.uuid(), "transport event without state ignored");
            return;
        };

        let mut next = PlayerState {
            transport_state: TransportState::from_wire(&transport.val),
            track_index: instance
                .current_track
                .as_ref()
                .and_then(|v| v.val.parse().ok())
                .unwrap_or(0),
            track_duration: parse_duration(
                instance
                    .current_track_duration
                    .as_ref()
                    .map(|v| v.val.as_str())
                    .unwrap_or(""),
            ),
            relative_time: Duration::ZERO,
            current_track_metadata: instance
                .current_track_metadata
                .and_then(|v| v.non_empty().map(str::to_string)),
            next_track_metadata: instance
                .next_track_metadata
                .and_then(|v| v.non_empty().map(str::to_string)),
            last_updated: None,
        };

        // The notification itself carries no position; enrich with one
        // on-demand query. Failure leaves the default, never rejects the
        // update.
        if let Some(device) = self.device() {
            match avtransport::position_info(&*self.control_point, &device) {
                Ok(info) => next.relative_time = info.rel_time,
                Err(error) => {
                    debug!(player = %self.uuid(), %error, "position query failed")
                }
            }
        }
        next.last_updated = Some(SystemTime::now());

        *self.state.lock() = next;
        self.events
            .emit(&StateEvent::PlayerStateChanged(self.uuid().clone()));
    }

    /// Refresh `relative_time` with one on-demand position query.
    ///
    /// Used by the periodic poller and available standalone. Emits the
    /// same state-changed notification as a change event; a failed query
    /// leaves the snapshot untouched.
    pub fn poll_position_once(&self) {
        let Some(device) = self.device() else {
            return;
        };
        match avtransport::position_info(&*self.control_point, &device) {
            Ok(info) => {
                {
                    let mut state = self.state.lock();
                    state.relative_time = info.rel_time;
                    state.last_updated = Some(SystemTime::now());
                }
                self.events
                    .emit(&StateEvent::PlayerStateChanged(self.uuid().clone()));
            }
            Err(error) => debug!(player = %self.uuid(), %error, "position poll failed"),
        }
    }

    /// Arm the periodic position poller.
    ///
    /// Idempotent, and refused unless the player is currently playing.
    /// Once armed the poller stays armed; it skips the query whenever the
    /// cached state says the player is not playing.
    pub fn start_polling(self: &Arc<Self>) {
        let mut slot = self.poller.lock();
        if slot.is_some() {
            return;
        }
        if !self.current_state().is_playing() {
            return;
        }
        debug!(player = %self.uuid(), "position poller armed");
        *slot = Some(PositionPoller::spawn(
            Arc::downgrade(self),
            self.config.position_poll_interval,
        ));
    }

    /// Stop the periodic poller, joining its thread.
    pub fn stop_polling(&self) {
        let poller = self.poller.lock().take();
        if let Some(poller) = poller {
            poller.stop();
            debug!(player = %self.uuid(), "position poller stopped");
        }
    }

    /// Query the device for its transport state right now.
    ///
    /// Safe-default semantics: an unbound device, a transport failure or
    /// an unrecognized answer all degrade to [`TransportState::Stopped`].
    pub fn status(&self) -> TransportState {
        let Some(device) = self.device() else {
            return TransportState::Stopped;
        };
        match avtransport::transport_info(&*self.control_point, &device) {
            Ok(info) => match info.state.as_str() {
                "PLAYING" => TransportState::Playing,
                "PAUSED_PLAYBACK" | "PAUSED" => TransportState::Paused,
                _ => TransportState::Stopped,
            },
            Err(error) => {
                debug!(player = %self.uuid(), %error, "status query failed");
                TransportState::Stopped
            }
        }
    }
}

/// Handle to a player's polling thread.
pub(crate) struct PositionPoller {
    stop_tx: mpsc::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl PositionPoller {
    fn spawn(player: Weak<Player>, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel();
        let handle = thread::spawn(move || poll_loop(player, interval, stop_rx));
        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    fn stop(mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn poll_loop(player: Weak<Player>, interval: Duration, stop_rx: mpsc::Receiver<()>) {
    // First poll happens immediately, then once per interval. The weak
    // reference lets a superseded player die even if its poller handle
    // leaked; channel disconnect covers the handle being dropped.
    loop {
        let Some(player) = player.upgrade() else {
            break;
        };
        if player.current_state().is_playing() {
            player.poll_position_once();
        }
        drop(player);

        match stop_rx.recv_timeout(interval) {
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            _ => break,
        }
    }
}
