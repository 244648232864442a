//! Render sink: persists every published frame for the embedding page.

use crate::error::{HudError, Result};
use crate::shared::snapshot::RenderFrame;
use std::fs;
use std::path::PathBuf;

pub struct FrameSink {
    path: Option<PathBuf>,
    frames: u64,
}

impl FrameSink {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path, frames: 0 }
    }

    /// Writes the frame HTML to the snapshot path, or only logs it when none is set.
    pub fn write(&mut self, frame: &RenderFrame) -> Result<()> {
        self.frames += 1;
        log::debug!(
            "RENDER: frame {} (visible: {}, kills: {}, notifications: {})",
            self.frames,
            frame.state.visible,
            frame.state.kill_feed_len,
            frame.state.notification_len
        );
        let Some(path) = &self.path else {
            return Ok(());
        };
        fs::write(path, &frame.html).map_err(|source| HudError::Snapshot {
            path: path.clone(),
            source,
        })
    }

    /// Like [`FrameSink::write`], but a failed write is logged and the sink keeps going.
    pub fn present(&mut self, frame: &RenderFrame) -> bool {
        match self.write(frame) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("RENDER: {}", e);
                false
            }
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
