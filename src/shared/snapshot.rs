//! Plain-data captures of the overlay state.
//!
//! Widgets own their live state; snapshots are what the logic thread hands
//! out for logging, tests and anything else that must not touch the widgets.

use crate::models::Faction;

/// Trait for creating immutable snapshots of a stateful component.
pub trait Snapshot {
    type Output;

    fn create_snapshot(&self) -> Self::Output;
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompassState {
    pub enabled: bool,
    /// Last heading received, normalized to `[0, 360)`.
    pub heading: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaptureState {
    pub active: bool,
    pub name: String,
    /// Percent in `[0, 100]`.
    pub progress: f64,
    pub owner: Faction,
    pub contested: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeathState {
    pub active: bool,
    pub timer: u32,
    pub killer: String,
    pub can_give_up: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RosterState {
    pub active: bool,
}

/// The whole overlay at one point in time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HudState {
    pub visible: bool,
    pub compass: CompassState,
    pub capture: CaptureState,
    pub death: DeathState,
    pub roster: RosterState,
    pub revive_active: bool,
    pub kill_feed_len: usize,
    pub notification_len: usize,
}

/// Rendered overlay published by the logic thread.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub html: String,
    pub state: HudState,
}
