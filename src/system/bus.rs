//! Shared channel infrastructure between the overlay threads.

use crate::input::events::KeyEvent;
use crate::shared::messages::{InboundMessage, OutboundEvent};
use crate::shared::snapshot::RenderFrame;
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

/// Process-level events broadcast to the worker threads.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Host closed the input stream.
    Quit,
}

/// Aggregates the cross-thread communication channels.
#[derive(Clone)]
pub struct SystemBus {
    /// Input → Logic: decoded host messages.
    pub inbound_tx: Sender<InboundMessage>,
    pub inbound_rx: Receiver<InboundMessage>,

    /// Input → Logic: key presses.
    pub key_tx: Sender<KeyEvent>,
    pub key_rx: Receiver<KeyEvent>,

    /// Logic → Bridge: events for the host.
    pub outbound_tx: Sender<OutboundEvent>,
    pub outbound_rx: Receiver<OutboundEvent>,

    /// Logic → Render: rendered overlay.
    pub render_tx: Sender<RenderFrame>,
    pub render_rx: Receiver<RenderFrame>,

    pub sys_tx: Sender<SystemEvent>,
    pub sys_rx: Receiver<SystemEvent>,
}

impl SystemBus {
    pub fn new() -> Self {
        let (inbound_tx, inbound_rx) = unbounded();
        let (key_tx, key_rx) = unbounded();
        let (outbound_tx, outbound_rx) = unbounded();

        // Only the newest frames matter to the sink.
        let (render_tx, render_rx) = bounded(2);

        let (sys_tx, sys_rx) = unbounded();

        Self {
            inbound_tx,
            inbound_rx,
            key_tx,
            key_rx,
            outbound_tx,
            outbound_rx,
            render_tx,
            render_rx,
            sys_tx,
            sys_rx,
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
