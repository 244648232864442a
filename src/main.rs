//! Overlay entry point and thread bootstrapper.

mod bridge;
mod dom;
mod error;
mod input;
mod logic;
mod models;
mod render;
mod shared;
mod system;
mod views;

use crate::bridge::{Bridge, HttpTransport};
use crate::error::Result;
use crate::models::HudSettings;
use crate::render::FrameSink;
use crate::system::bus::SystemBus;
use crossbeam_channel::RecvTimeoutError;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CONFIG: &str = "hud.toml";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("MAIN: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    log::info!("MAIN: Booting mrp-hud...");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let settings = HudSettings::load(&config_path)?;

    let bus = SystemBus::new();

    let transport = HttpTransport::new(&settings.bridge);
    bridge::start_thread(bus.clone(), Bridge::new(settings.bridge.clone(), transport))?;
    input::start_thread(bus.clone())?;
    let logic = logic::start_thread(bus.clone(), settings.clone())?;

    let mut sink = FrameSink::new(settings.output.snapshot_path.clone());
    loop {
        match bus.render_rx.recv_timeout(Duration::from_millis(250)) {
            Ok(frame) => {
                sink.present(&frame);
            }
            Err(RecvTimeoutError::Timeout) if logic.is_finished() => break,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    while let Ok(frame) = bus.render_rx.try_recv() {
        sink.present(&frame);
    }

    log::info!("MAIN: Shutdown after {} frames", sink.frames());
    Ok(())
}
