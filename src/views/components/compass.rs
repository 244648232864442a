//! Compass strip: a ring of degree markers scrolled under a fixed needle.
//!
//! The ring spans -180°..=540° so that any heading in `[0, 360)` has at least
//! half a turn of markers on both sides of the needle. The strip offset is
//! computed from an unwrapped heading, so crossing north never makes the strip
//! jump back by a full turn.

use crate::dom::layout::ids;
use crate::dom::{Document, Element};
use crate::models::settings::CompassSettings;
use crate::shared::snapshot::{CompassState, Snapshot};

pub const STEP_DEGREES: i32 = 5;
pub const RING_START: i32 = -180;
pub const RING_END: i32 = 540;

/// Markers between the start of the ring and 0°.
const LEAD_IN_TICKS: f64 = (-RING_START / STEP_DEGREES) as f64;

/// Window the unwrapped heading is kept in. Both bounds are 90° inside the
/// ring so the visible part of the strip never runs off its ends.
const TRACK_MIN: f64 = -90.0;
const TRACK_MAX: f64 = 450.0;

const CARDINALS: [(u16, &str); 8] = [
    (0, "N"),
    (45, "NE"),
    (90, "E"),
    (135, "SE"),
    (180, "S"),
    (225, "SW"),
    (270, "W"),
    (315, "NW"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerLabel {
    Cardinal { label: &'static str, north: bool },
    Numeral,
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompassMarker {
    pub degree: i32,
    pub normalized: u16,
    pub label: MarkerLabel,
}

impl CompassMarker {
    fn element(&self) -> Element {
        let mut marker = Element::div()
            .with_id(format!("compass-marker-{}", self.degree))
            .with_class("compass-marker");
        let label = match self.label {
            MarkerLabel::Cardinal { label, north } => {
                marker.add_class("cardinal");
                if north {
                    marker.add_class("north");
                }
                Some(label.to_string())
            }
            MarkerLabel::Numeral => Some(self.normalized.to_string()),
            MarkerLabel::Tick => None,
        };
        marker = marker.with_child(Element::div().with_class("tick"));
        if let Some(text) = label {
            marker = marker.with_child(Element::span().with_class("label").with_text(text));
        }
        marker
    }
}

/// Wraps any angle into `[0, 360)`.
pub fn normalize(degrees: f64) -> f64 {
    let n = ((degrees % 360.0) + 360.0) % 360.0;
    if n >= 360.0 { 0.0 } else { n }
}

fn normalize_degree(degree: i32) -> u16 {
    degree.rem_euclid(360) as u16
}

pub fn classify(degree: i32) -> CompassMarker {
    let normalized = normalize_degree(degree);
    let label = if normalized % 45 == 0 {
        match CARDINALS.iter().find(|(d, _)| *d == normalized) {
            Some(&(_, label)) => MarkerLabel::Cardinal {
                label,
                north: normalized == 0,
            },
            None => MarkerLabel::Tick,
        }
    } else if normalized % 15 == 0 {
        MarkerLabel::Numeral
    } else {
        MarkerLabel::Tick
    };
    CompassMarker {
        degree,
        normalized,
        label,
    }
}

pub fn marker_ring() -> Vec<CompassMarker> {
    (RING_START..=RING_END)
        .step_by(STEP_DEGREES as usize)
        .map(classify)
        .collect()
}

/// Horizontal translation of the marker strip, in pixels.
pub fn strip_offset(heading: f64, settings: &CompassSettings) -> f64 {
    settings.center_offset - (heading / STEP_DEGREES as f64) * settings.tick_width
        + LEAD_IN_TICKS * settings.tick_width
}

/// Moves `track` to `heading` along the shortest arc, then recenters it by
/// whole turns so it stays within the strip.
pub fn unwrap_heading(track: f64, heading: f64) -> f64 {
    let mut delta = normalize(heading) - normalize(track);
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    let mut next = track + delta;
    while next >= TRACK_MAX {
        next -= 360.0;
    }
    while next < TRACK_MIN {
        next += 360.0;
    }
    next
}

pub struct Compass {
    settings: CompassSettings,
    state: CompassState,
    /// Unwrapped heading the strip is positioned from.
    track: f64,
}

impl Compass {
    pub fn new(settings: CompassSettings) -> Self {
        Self {
            settings,
            state: CompassState::default(),
            track: 0.0,
        }
    }

    /// Builds the marker ring once at startup.
    pub fn init(&mut self, doc: &mut Document) {
        self.build_markers(doc);
    }

    fn build_markers(&self, doc: &mut Document) {
        let Some(strip) = doc.find_mut(ids::COMPASS_MARKERS) else {
            return;
        };
        strip.clear_children();
        for marker in marker_ring() {
            strip.append_child(marker.element());
        }
    }

    fn apply_offset(&self, doc: &mut Document) {
        if let Some(strip) = doc.find_mut(ids::COMPASS_MARKERS) {
            strip.set_style("transform", format!("translateX({}px)", self.offset()));
        }
    }

    pub fn show(&mut self, doc: &mut Document) {
        let Some(compass) = doc.find_mut(ids::COMPASS) else {
            return;
        };
        compass.set_visible(true);
        if !self.state.enabled {
            self.state.enabled = true;
            self.track = self.state.heading;
            self.build_markers(doc);
            self.apply_offset(doc);
        }
    }

    pub fn hide(&mut self, doc: &mut Document) {
        let Some(compass) = doc.find_mut(ids::COMPASS) else {
            return;
        };
        compass.set_visible(false);
        self.state.enabled = false;
    }

    /// Handles `updateCompass`. A missing heading keeps the previous one;
    /// `enabled: false` from older hosts hides the compass.
    pub fn update(&mut self, doc: &mut Document, heading: Option<f64>, enabled: Option<bool>) {
        if enabled == Some(false) {
            self.hide(doc);
            return;
        }
        if !doc.contains(ids::COMPASS) {
            return;
        }

        let raw = heading.unwrap_or(self.state.heading);
        self.state.heading = normalize(raw);
        if self.state.enabled {
            self.track = unwrap_heading(self.track, self.state.heading);
        } else {
            self.show(doc);
        }

        if let Some(bearing) = doc.find_mut(ids::COMPASS_BEARING) {
            bearing.set_text(format!("{}°", raw.round() as i64));
        }
        self.apply_offset(doc);
    }

    pub fn offset(&self) -> f64 {
        strip_offset(self.track, &self.settings)
    }
}

impl Snapshot for Compass {
    type Output = CompassState;

    fn create_snapshot(&self) -> Self::Output {
        self.state
    }
}
