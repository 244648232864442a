//! Logic thread: owns the [`hud::Hud`], applies host messages and key presses,
//! fires timers and publishes a fresh [`RenderFrame`] after every change.

pub mod hud;
pub mod timers;

use crate::error::{HudError, Result};
use crate::logic::hud::Hud;
use crate::models::HudSettings;
use crate::shared::snapshot::RenderFrame;
use crate::system::bus::{SystemBus, SystemEvent};
use crossbeam_channel::{TrySendError, select};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Longest wait between loop iterations when no timer is pending.
const IDLE_WAIT: Duration = Duration::from_secs(1);

/// Queues `frame`, replacing the oldest pending one when the sink lags behind.
fn publish(bus: &SystemBus, frame: RenderFrame) {
    if let Err(TrySendError::Full(frame)) = bus.render_tx.try_send(frame) {
        let _ = bus.render_rx.try_recv();
        let _ = bus.render_tx.try_send(frame);
    }
}

/// Applies everything already queued. Used on shutdown so no frame is lost.
fn drain(hud: &mut Hud, bus: &SystemBus) -> bool {
    let mut changed = false;
    while let Ok(msg) = bus.inbound_rx.try_recv() {
        changed |= hud.dispatch(msg, Instant::now());
    }
    while let Ok(key) = bus.key_rx.try_recv() {
        hud.key_pressed(&key.key);
    }
    changed
}

pub fn start_thread(bus: SystemBus, settings: HudSettings) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("Logic Thread".to_string())
        .spawn(move || {
            log::info!("LOGIC: Thread started");
            let mut hud = Hud::new(&settings, bus.outbound_tx.clone());
            publish(&bus, hud.render_frame());

            loop {
                let wait = hud
                    .next_deadline()
                    .map(|at| at.saturating_duration_since(Instant::now()))
                    .unwrap_or(IDLE_WAIT);

                let mut changed = false;
                let mut quit = false;
                select! {
                    recv(bus.inbound_rx) -> msg => match msg {
                        Ok(msg) => changed = hud.dispatch(msg, Instant::now()),
                        Err(_) => quit = true,
                    },
                    recv(bus.key_rx) -> key => match key {
                        Ok(key) => {
                            hud.key_pressed(&key.key);
                        }
                        Err(_) => quit = true,
                    },
                    recv(bus.sys_rx) -> evt => match evt {
                        Ok(SystemEvent::Quit) | Err(_) => {
                            log::info!("LOGIC: Quit received...");
                            changed = drain(&mut hud, &bus);
                            quit = true;
                        }
                    },
                    default(wait) => {}
                }

                changed |= hud.tick(Instant::now());
                if changed {
                    publish(&bus, hud.render_frame());
                }
                if quit {
                    break;
                }
            }

            log::info!("LOGIC: Thread stopped");
        })
        .map_err(|source| HudError::Spawn {
            name: "logic",
            source,
        })
}
