//! Shared test double for the control-point seam.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use zonecast_upnp::{ActionResponse, ControlPoint, DeviceHandle, Result, ServiceId, UpnpError};

enum Script {
    Answer(ActionResponse),
    Fail(String),
}

/// Control point that replays scripted per-action responses and records
/// everything it was asked to do. Unscripted actions answer with an empty
/// response, which most action wrappers tolerate.
#[derive(Default)]
pub(crate) struct MockControlPoint {
    scripts: Mutex<HashMap<String, Script>>,
    invocations: Mutex<Vec<String>>,
    subscriptions: Mutex<Vec<(String, ServiceId, String)>>,
    subscribe_failure: Mutex<Option<String>>,
}

impl MockControlPoint {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Script a response for every subsequent invocation of `action`.
    pub(crate) fn respond(&self, action: &str, response: ActionResponse) {
        self.scripts
            .lock()
            .insert(action.to_string(), Script::Answer(response));
    }

    /// Make every subsequent invocation of `action` fail with a transport
    /// error.
    pub(crate) fn fail(&self, action: &str, message: &str) {
        self.scripts
            .lock()
            .insert(action.to_string(), Script::Fail(message.to_string()));
    }

    /// Make every subsequent subscribe call fail.
    pub(crate) fn fail_subscriptions(&self, message: &str) {
        *self.subscribe_failure.lock() = Some(message.to_string());
    }

    /// Action names in invocation order.
    pub(crate) fn actions(&self) -> Vec<String> {
        self.invocations.lock().clone()
    }

    pub(crate) fn invocations_of(&self, action: &str) -> usize {
        self.invocations.lock().iter().filter(|a| *a == action).count()
    }

    /// Recorded subscriptions as (device uuid, service, variable).
    pub(crate) fn subscriptions(&self) -> Vec<(String, ServiceId, String)> {
        self.subscriptions.lock().clone()
    }
}

impl ControlPoint for MockControlPoint {
    fn invoke(
        &self,
        _device: &DeviceHandle,
        _service: ServiceId,
        action: &str,
        _args: &[(&str, String)],
    ) -> Result<ActionResponse> {
        self.invocations.lock().push(action.to_string());
        match self.scripts.lock().get(action) {
            Some(Script::Answer(response)) => Ok(response.clone()),
            Some(Script::Fail(message)) => Err(UpnpError::Transport(message.clone())),
            None => Ok(ActionResponse::new()),
        }
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
        service: ServiceId,
        variable: &str,
        _timeout: Duration,
    ) -> Result<()> {
        if let Some(message) = self.subscribe_failure.lock().clone() {
            return Err(UpnpError::Subscription(message));
        }
        self.subscriptions
            .lock()
            .push((device.uuid().to_string(), service, variable.to_string()));
        Ok(())
    }
}
