//! Capture point indicator: name, tier, progress bar and ownership status.

use super::progress;
use crate::dom::Document;
use crate::dom::layout::ids;
use crate::models::Faction;
use crate::shared::de::clamp_percent;
use crate::shared::snapshot::{CaptureState, Snapshot};

const STATUS_CLASSES: [&str; 3] = ["capturing", "contested", "owned"];
const BAR_CLASSES: [&str; 3] = ["military", "resistance", "contested"];

/// What the status line says, highest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStatus {
    Contested,
    Capturing(Faction),
    Owned(Faction),
    Neutral,
}

impl CaptureStatus {
    pub fn resolve(owner: Faction, contested: bool, capturing: bool) -> Self {
        match (contested, owner, capturing) {
            (true, _, _) => CaptureStatus::Contested,
            (false, owner, true) => CaptureStatus::Capturing(owner),
            (false, Faction::None, false) => CaptureStatus::Neutral,
            (false, owner, false) => CaptureStatus::Owned(owner),
        }
    }

    pub fn text(self) -> String {
        match self {
            CaptureStatus::Contested => "CONTESTED".into(),
            CaptureStatus::Capturing(Faction::None) => "CAPTURING".into(),
            CaptureStatus::Capturing(f) => format!("{} CAPTURING", f.label().to_uppercase()),
            CaptureStatus::Owned(f) => format!("{} CONTROLLED", f.label().to_uppercase()),
            CaptureStatus::Neutral => "NEUTRAL".into(),
        }
    }

    fn class(self) -> Option<&'static str> {
        match self {
            CaptureStatus::Contested => Some("contested"),
            CaptureStatus::Capturing(_) => Some("capturing"),
            CaptureStatus::Owned(_) => Some("owned"),
            CaptureStatus::Neutral => None,
        }
    }

    fn bar_class(self) -> Option<&'static str> {
        match self {
            CaptureStatus::Contested => Some("contested"),
            CaptureStatus::Capturing(f) | CaptureStatus::Owned(f) => f.css_class(),
            CaptureStatus::Neutral => None,
        }
    }
}

#[derive(Default)]
pub struct CaptureIndicator {
    state: CaptureState,
}

impl CaptureIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(
        &mut self,
        doc: &mut Document,
        name: &str,
        progress: f64,
        owner: Faction,
        contested: bool,
        tier: &str,
    ) {
        let Some(indicator) = doc.find_mut(ids::CAPTURE) else {
            log::trace!("CAPTURE: no anchor, skipping show");
            return;
        };
        indicator.set_visible(true);
        self.state.active = true;
        self.state.name = name.to_string();

        if let Some(el) = doc.find_mut(ids::CAPTURE_NAME) {
            el.set_text(name);
        }
        if let Some(el) = doc.find_mut(ids::CAPTURE_TIER) {
            let tier = tier.trim();
            if tier.is_empty() {
                el.set_text("");
                el.set_visible(false);
            } else {
                el.set_text(format!("Tier {tier}"));
                el.set_visible(true);
            }
        }
        self.update(doc, progress, owner, contested, false);
    }

    /// Re-renders progress and status. Does not change visibility.
    pub fn update(
        &mut self,
        doc: &mut Document,
        progress: f64,
        owner: Faction,
        contested: bool,
        capturing: bool,
    ) {
        let Some(indicator) = doc.find_mut(ids::CAPTURE) else {
            return;
        };
        let status = CaptureStatus::resolve(owner, contested, capturing);

        indicator.remove_classes(&STATUS_CLASSES);
        if let Some(class) = status.class() {
            indicator.add_class(class);
        }

        self.state.progress = clamp_percent(progress);
        self.state.owner = owner;
        self.state.contested = contested;

        if let Some(bar) = doc.find_mut(ids::CAPTURE_BAR) {
            bar.remove_classes(&BAR_CLASSES);
            if let Some(class) = status.bar_class() {
                bar.add_class(class);
            }
            bar.set_style("width", progress::width(self.state.progress));
        }
        if let Some(el) = doc.find_mut(ids::CAPTURE_STATUS) {
            el.remove_classes(&STATUS_CLASSES);
            if let Some(class) = status.class() {
                el.add_class(class);
            }
            el.set_text(status.text());
        }
    }

    pub fn hide(&mut self, doc: &mut Document) {
        let Some(indicator) = doc.find_mut(ids::CAPTURE) else {
            return;
        };
        indicator.set_visible(false);
        self.state.active = false;
    }
}

impl Snapshot for CaptureIndicator {
    type Output = CaptureState;

    fn create_snapshot(&self) -> CaptureState {
        self.state.clone()
    }
}
