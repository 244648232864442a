//! Input thread: decodes host frames from stdin and routes them to the logic thread.

pub mod events;

use crate::error::{HudError, Result};
use crate::input::events::{HostFrame, parse_frame};
use crate::system::bus::{SystemBus, SystemEvent};
use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

/// Routes every frame of `reader` until EOF. Malformed lines are logged and skipped.
/// Returns the number of frames routed.
pub fn read_frames<R: BufRead>(reader: R, bus: &SystemBus) -> usize {
    let mut routed = 0;
    for (n, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("INPUT: Failed to read host stream: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let sent = match parse_frame(&line) {
            Ok(HostFrame::Key(key)) => bus.key_tx.send(key).is_ok(),
            Ok(HostFrame::Message(msg)) => bus.inbound_tx.send(msg).is_ok(),
            Err(e) => {
                log::warn!("INPUT: line {}: {}", n + 1, e);
                continue;
            }
        };
        if !sent {
            log::error!("INPUT: Failed to route frame (Logic thread died?)");
            break;
        }
        routed += 1;
    }
    routed
}

pub fn start_thread(bus: SystemBus) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("Input Thread".to_string())
        .spawn(move || {
            log::info!("INPUT: Thread started");
            let routed = read_frames(io::stdin().lock(), &bus);
            log::info!("INPUT: Host stream closed after {} frames", routed);
            let _ = bus.sys_tx.send(SystemEvent::Quit);
        })
        .map_err(|source| HudError::Spawn {
            name: "input",
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::messages::InboundMessage;
    use std::io::Cursor;

    #[test]
    fn routes_keys_and_messages_and_skips_noise() {
        let bus = SystemBus::new();
        let input = "{\"type\":\"showHUD\"}\n\n{\"key\":\"e\"}\nnot json\n{\"type\":\"hideCompass\"}\n";
        assert_eq!(read_frames(Cursor::new(input), &bus), 3);

        assert!(matches!(bus.inbound_rx.try_recv(), Ok(InboundMessage::ShowHud)));
        assert!(matches!(bus.inbound_rx.try_recv(), Ok(InboundMessage::HideCompass)));
        assert!(bus.inbound_rx.try_recv().is_err());
        assert_eq!(bus.key_rx.try_recv().unwrap().key, "e");
    }
}
