//! Typed AVTransport actions.
//!
//! Thin request/response wrappers over [`ControlPoint::invoke`]; every
//! action targets instance 0, the only instance the devices expose.

use std::time::Duration;

use zonecast_parser::parse_duration;

use crate::control_point::{ActionResponse, ControlPoint, DeviceHandle, ServiceId};
use crate::error::Result;

const INSTANCE_ID: &str = "0";

/// Result of a GetPositionInfo query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionInfo {
    /// One-based index of the current track.
    pub track: u32,
    /// Duration of the current track.
    pub track_duration: Duration,
    /// Playback position within the current track.
    pub rel_time: Duration,
    /// URI of the current track, when reported.
    pub track_uri: Option<String>,
    /// Raw DIDL metadata of the current track, when reported.
    pub track_metadata: Option<String>,
}

/// Result of a GetTransportInfo query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportInfo {
    /// Transport state string as reported, e.g. `PLAYING`.
    pub state: String,
    /// Transport status, `OK` unless the device reports trouble.
    pub status: String,
}

/// Result of a GetMediaInfo query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaInfo {
    /// Number of tracks on the current medium (the queue, usually).
    pub nr_of_tracks: u32,
    /// URI the transport is currently pointed at, when reported.
    pub current_uri: Option<String>,
    /// URI queued to play next, when reported.
    pub next_uri: Option<String>,
}

/// Query the playback position of the current track.
pub fn position_info(cp: &dyn ControlPoint, device: &DeviceHandle) -> Result<PositionInfo> {
    let response = cp.invoke(
        device,
        ServiceId::AvTransport,
        "GetPositionInfo",
        &[("InstanceID", INSTANCE_ID.into())],
    )?;
    Ok(PositionInfo {
        track: parse_u32(&response, "Track"),
        track_duration: parse_duration(response.get("TrackDuration").unwrap_or_default()),
        rel_time: parse_duration(response.get("RelTime").unwrap_or_default()),
        track_uri: owned_non_empty(&response, "TrackURI"),
        track_metadata: owned_non_empty(&response, "TrackMetaData"),
    })
}

/// Query the current transport state.
pub fn transport_info(cp: &dyn ControlPoint, device: &DeviceHandle) -> Result<TransportInfo> {
    let response = cp.invoke(
        device,
        ServiceId::AvTransport,
        "GetTransportInfo",
        &[("InstanceID", INSTANCE_ID.into())],
    )?;
    Ok(TransportInfo {
        state: response.required("CurrentTransportState")?.to_string(),
        status: response
            .get("CurrentTransportStatus")
            .unwrap_or("OK")
            .to_string(),
    })
}

/// Query what the transport is playing from.
pub fn media_info(cp: &dyn ControlPoint, device: &DeviceHandle) -> Result<MediaInfo> {
    let response = cp.invoke(
        device,
        ServiceId::AvTransport,
        "GetMediaInfo",
        &[("InstanceID", INSTANCE_ID.into())],
    )?;
    Ok(MediaInfo {
        nr_of_tracks: parse_u32(&response, "NrTracks"),
        current_uri: owned_non_empty(&response, "CurrentURI"),
        next_uri: owned_non_empty(&response, "NextURI"),
    })
}

/// Start playback at normal speed.
pub fn play(cp: &dyn ControlPoint, device: &DeviceHandle) -> Result<()> {
    cp.invoke_async(
        device,
        ServiceId::AvTransport,
        "Play",
        &[("InstanceID", INSTANCE_ID.into()), ("Speed", "1".into())],
    )
}

/// Pause playback.
pub fn pause(cp: &dyn ControlPoint, device: &DeviceHandle) -> Result<()> {
    cp.invoke_async(
        device,
        ServiceId::AvTransport,
        "Pause",
        &[("InstanceID", INSTANCE_ID.into())],
    )
}

/// Jump to a track number in the queue.
pub fn seek_track(cp: &dyn ControlPoint, device: &DeviceHandle, track: u32) -> Result<()> {
    cp.invoke_async(
        device,
        ServiceId::AvTransport,
        "Seek",
        &[
            ("InstanceID", INSTANCE_ID.into()),
            ("Unit", "TRACK_NR".into()),
            ("Target", track.to_string()),
        ],
    )
}

/// Point the transport at a URI directly (bypassing the queue).
pub fn set_transport_uri(
    cp: &dyn ControlPoint,
    device: &DeviceHandle,
    uri: &str,
    metadata: &str,
) -> Result<()> {
    cp.invoke_async(
        device,
        ServiceId::AvTransport,
        "SetAVTransportURI",
        &[
            ("InstanceID", INSTANCE_ID.into()),
            ("CurrentURI", uri.to_string()),
            ("CurrentURIMetaData", metadata.to_string()),
        ],
    )
}

/// Append a URI to the queue; returns the queue position it was given.
pub fn enqueue(
    cp: &dyn ControlPoint,
    device: &DeviceHandle,
    uri: &str,
    metadata: &str,
    as_next: bool,
) -> Result<u32> {
    let response = cp.invoke(
        device,
        ServiceId::AvTransport,
        "AddURIToQueue",
        &[
            ("InstanceID", INSTANCE_ID.into()),
            ("EnqueuedURI", uri.to_string()),
            ("EnqueuedURIMetaData", metadata.to_string()),
            ("DesiredFirstTrackNumberEnqueued", "0".into()),
            ("EnqueueAsNext", if as_next { "1" } else { "0" }.into()),
        ],
    )?;
    Ok(parse_u32(&response, "FirstTrackNumberEnqueued"))
}

pub(crate) fn parse_u32(response: &ActionResponse, name: &str) -> u32 {
    response
        .get(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

pub(crate) fn owned_non_empty(response: &ActionResponse, name: &str) -> Option<String> {
    response
        .get(name)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
