//! Outbound bridge: relays overlay events to the host as JSON POSTs.
//!
//! Delivery is fire-and-forget. A failed request is logged and dropped,
//! never retried.

use crate::error::{HudError, Result};
use crate::models::settings::BridgeSettings;
use crate::shared::messages::OutboundEvent;
use crate::system::bus::SystemBus;
use serde_json::Value;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Delivers one event payload to a host endpoint.
pub trait Transport: Send {
    fn post(&self, url: &str, payload: &Value) -> Result<()>;
}

pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(settings: &BridgeSettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build();
        Self { agent }
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &str, payload: &Value) -> Result<()> {
        self.agent
            .post(url)
            .set("Content-Type", "application/json; charset=UTF-8")
            .send_json(payload)
            .map_err(|source| HudError::Bridge {
                url: url.to_string(),
                source: Box::new(source),
            })?;
        Ok(())
    }
}

/// `{scheme}://{resource_name}/{event}`
pub fn endpoint(settings: &BridgeSettings, event: &str) -> String {
    format!("{}://{}/{}", settings.scheme, settings.resource_name, event)
}

pub struct Bridge<T: Transport> {
    settings: BridgeSettings,
    transport: T,
}

impl<T: Transport> Bridge<T> {
    pub fn new(settings: BridgeSettings, transport: T) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Sends `event`, swallowing any failure. Returns whether it was delivered.
    pub fn deliver(&self, event: &OutboundEvent) -> bool {
        let url = endpoint(&self.settings, &event.name);
        match self.transport.post(&url, &event.payload) {
            Ok(()) => {
                log::debug!("BRIDGE: {} delivered", event.name);
                true
            }
            Err(e) => {
                log::debug!("BRIDGE: dropping {}: {}", event.name, e);
                false
            }
        }
    }
}

pub fn start_thread<T: Transport + 'static>(
    bus: SystemBus,
    bridge: Bridge<T>,
) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("Bridge Thread".to_string())
        .spawn(move || {
            log::info!("BRIDGE: Thread started");
            while let Ok(event) = bus.outbound_rx.recv() {
                bridge.deliver(&event);
            }
            log::info!("BRIDGE: Thread stopped");
        })
        .map_err(|source| HudError::Spawn {
            name: "bridge",
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recording {
        sent: Arc<Mutex<Vec<(String, Value)>>>,
        fail: bool,
    }

    impl Transport for Recording {
        fn post(&self, url: &str, payload: &Value) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((url.to_string(), payload.clone()));
            if self.fail {
                let response = ureq::Response::new(503, "Service Unavailable", "").unwrap();
                return Err(HudError::Bridge {
                    url: url.to_string(),
                    source: Box::new(ureq::Error::Status(503, response)),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn endpoint_follows_resource_convention() {
        let settings = BridgeSettings::default();
        assert_eq!(endpoint(&settings, "giveUp"), "https://mrp_gamemode/giveUp");
    }

    #[test]
    fn give_up_is_posted_with_empty_object() {
        let transport = Recording::default();
        let bridge = Bridge::new(BridgeSettings::default(), transport.clone());
        assert!(bridge.deliver(&OutboundEvent::give_up()));
        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "https://mrp_gamemode/giveUp");
        assert_eq!(sent[0].1, serde_json::json!({}));
    }

    #[test]
    fn failures_are_swallowed_and_not_retried() {
        let transport = Recording {
            fail: true,
            ..Recording::default()
        };
        let bridge = Bridge::new(BridgeSettings::default(), transport.clone());
        assert!(!bridge.deliver(&OutboundEvent::give_up()));
        assert_eq!(transport.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn thread_drains_the_outbound_channel() {
        let bus = SystemBus::new();
        let transport = Recording::default();
        let bridge = Bridge::new(BridgeSettings::default(), transport.clone());
        let tx = bus.outbound_tx.clone();
        start_thread(bus, bridge).unwrap();
        tx.send(OutboundEvent::new("ping", serde_json::json!({"n": 1})))
            .unwrap();
        for _ in 0..200 {
            if !transport.sent.lock().unwrap().is_empty() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent[0].0, "https://mrp_gamemode/ping");
        assert_eq!(sent[0].1["n"], 1);
    }
}
