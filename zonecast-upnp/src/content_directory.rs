//! Typed ContentDirectory actions.
//!
//! The engine uses one: browsing the play queue. The queue lives under
//! object `Q:0` and comes back as an escaped DIDL-Lite document in the
//! `Result` out-argument.

use zonecast_parser::{DidlDocument, DidlItem};

use crate::avtransport::parse_u32;
use crate::control_point::{ControlPoint, DeviceHandle, ServiceId};
use crate::error::{Result, UpnpError};

/// One page of a queue browse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueuePage {
    /// Queue entries in queue order.
    pub items: Vec<DidlItem>,
    /// Entries in this page.
    pub number_returned: u32,
    /// Total entries in the queue.
    pub total_matches: u32,
}

/// Browse a page of the device's play queue.
///
/// `starting_index` is zero-based; `requested_count` of 0 asks for
/// everything the device is willing to return in one page.
pub fn browse_queue(
    cp: &dyn ControlPoint,
    device: &DeviceHandle,
    starting_index: u32,
    requested_count: u32,
) -> Result<QueuePage> {
    let response = cp.invoke(
        device,
        ServiceId::ContentDirectory,
        "Browse",
        &[
            ("ObjectID", "Q:0".into()),
            ("BrowseFlag", "BrowseDirectChildren".into()),
            ("Filter", String::new()),
            ("StartingIndex", starting_index.to_string()),
            ("RequestedCount", requested_count.to_string()),
            ("SortCriteria", String::new()),
        ],
    )?;
    let result = response.required("Result")?;
    let didl = DidlDocument::from_xml(result)
        .map_err(|e| UpnpError::Response(format!("queue browse result: {e}")))?;
    Ok(QueuePage {
        items: didl.items,
        number_returned: parse_u32(&response, "NumberReturned"),
        total_matches: parse_u32(&response, "TotalMatches"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_point::ActionResponse;
    use std::sync::Mutex;
    use std::time::Duration;

    struct Scripted {
        response: ActionResponse,
        calls: Mutex<Vec<(ServiceId, String, Vec<(String, String)>)>>,
    }

    impl ControlPoint for Scripted {
        fn invoke(
            &self,
            _device: &DeviceHandle,
            service: ServiceId,
            action: &str,
            args: &[(&str, String)],
        ) -> Result<ActionResponse> {
            self.calls.lock().unwrap().push((
                service,
                action.to_string(),
                args.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            ));
            Ok(self.response.clone())
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
            _device: &DeviceHandle,
            _service: ServiceId,
            _variable: &str,
            _timeout: Duration,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn device() -> DeviceHandle {
        DeviceHandle::new("RINCON_A", "http://192.168.1.10:1400/xml/device_description.xml")
    }

    const QUEUE_DIDL: &str = r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/"><item id="Q:0/1" parentID="Q:0"><dc:title>One</dc:title></item><item id="Q:0/2" parentID="Q:0"><dc:title>Two</dc:title></item></DIDL-Lite>"#;

    #[test]
    fn browse_targets_the_queue_object() {
        let cp = Scripted {
            response: ActionResponse::from_pairs([
                ("Result", QUEUE_DIDL),
                ("NumberReturned", "2"),
                ("TotalMatches", "2"),
            ]),
            calls: Mutex::new(Vec::new()),
        };
        let page = browse_queue(&cp, &device(), 0, 0).unwrap();
        assert_eq!(page.number_returned, 2);
        assert_eq!(page.total_matches, 2);
        assert_eq!(page.items[0].title.as_deref(), Some("One"));
        assert_eq!(page.items[1].title.as_deref(), Some("Two"));

        let calls = cp.calls.lock().unwrap();
        let (service, action, args) = &calls[0];
        assert_eq!(*service, ServiceId::ContentDirectory);
        assert_eq!(action, "Browse");
        assert!(args.contains(&("ObjectID".to_string(), "Q:0".to_string())));
        assert!(args.contains(&("StartingIndex".to_string(), "0".to_string())));
    }

    #[test]
    fn browse_without_result_is_a_malformed_response() {
        let cp = Scripted {
            response: ActionResponse::from_pairs([("NumberReturned", "0")]),
            calls: Mutex::new(Vec::new()),
        };
        assert!(matches!(
            browse_queue(&cp, &device(), 0, 0),
            Err(UpnpError::Response(_))
        ));
    }

    #[test]
    fn undecodable_result_is_a_malformed_response() {
        let cp = Scripted {
            response: ActionResponse::from_pairs([("Result", "<DIDL-Lite><item>")]),
            calls: Mutex::new(Vec::new()),
        };
        assert!(matches!(
            browse_queue(&cp, &device(), 0, 0),
            Err(UpnpError::Response(_))
        ));
    }
}
