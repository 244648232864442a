//! Anchor ids and the standard overlay page skeleton.

use super::{Element, HIDDEN};

pub mod ids {
    pub const HUD: &str = "hud";

    pub const COMPASS: &str = "compass";
    pub const COMPASS_MARKERS: &str = "compassMarkers";
    pub const COMPASS_BEARING: &str = "compassBearing";

    pub const KILL_FEED: &str = "killFeed";

    pub const CAPTURE: &str = "captureIndicator";
    pub const CAPTURE_NAME: &str = "captureName";
    pub const CAPTURE_TIER: &str = "captureTier";
    pub const CAPTURE_BAR: &str = "captureBar";
    pub const CAPTURE_STATUS: &str = "captureStatus";

    pub const DEATH: &str = "deathScreen";
    pub const DEATH_KILLER: &str = "deathKiller";
    pub const DEATH_TIMER_TEXT: &str = "deathTimerText";
    pub const DEATH_TIMER_COUNT: &str = "deathTimerCount";

    pub const REVIVE: &str = "reviveProgress";
    pub const REVIVE_BAR: &str = "reviveBar";

    pub const SCOREBOARD: &str = "scoreboard";
    pub const SCOREBOARD_FACTIONS: &str = "scoreboardFactions";

    pub const NOTIFICATIONS: &str = "notifications";
}

fn hidden(el: Element) -> Element {
    el.with_class(HIDDEN)
}

pub fn overlay_page() -> Element {
    let compass = hidden(Element::div().with_id(ids::COMPASS).with_class("compass"))
        .with_child(Element::div().with_id(ids::COMPASS_MARKERS).with_class("compass-markers"))
        .with_child(Element::div().with_class("compass-needle"))
        .with_child(Element::div().with_id(ids::COMPASS_BEARING).with_class("compass-bearing"));

    let capture = hidden(Element::div().with_id(ids::CAPTURE).with_class("capture-indicator"))
        .with_child(Element::div().with_id(ids::CAPTURE_NAME).with_class("capture-name"))
        .with_child(Element::div().with_id(ids::CAPTURE_TIER).with_class("capture-tier"))
        .with_child(
            Element::div()
                .with_class("capture-bar-bg")
                .with_child(Element::div().with_id(ids::CAPTURE_BAR).with_class("capture-bar")),
        )
        .with_child(Element::div().with_id(ids::CAPTURE_STATUS).with_class("capture-status"));

    let death = hidden(Element::div().with_id(ids::DEATH).with_class("death-screen"))
        .with_child(Element::div().with_class("death-title").with_text("WOUNDED"))
        .with_child(Element::div().with_id(ids::DEATH_KILLER).with_class("death-killer"))
        .with_child(
            Element::div()
                .with_class("death-timer")
                .with_child(Element::span().with_id(ids::DEATH_TIMER_TEXT))
                .with_child(Element::span().with_id(ids::DEATH_TIMER_COUNT)),
        );

    let revive = hidden(Element::div().with_id(ids::REVIVE).with_class("revive-progress"))
        .with_child(Element::div().with_class("revive-label").with_text("Reviving..."))
        .with_child(
            Element::div()
                .with_class("revive-bar-bg")
                .with_child(Element::div().with_id(ids::REVIVE_BAR).with_class("revive-bar")),
        );

    let scoreboard = hidden(Element::div().with_id(ids::SCOREBOARD).with_class("scoreboard"))
        .with_child(Element::div().with_class("scoreboard-title").with_text("Players"))
        .with_child(Element::div().with_id(ids::SCOREBOARD_FACTIONS).with_class("scoreboard-factions"));

    Element::div()
        .with_id(ids::HUD)
        .with_class("hud")
        .with_child(compass)
        .with_child(Element::div().with_id(ids::KILL_FEED).with_class("kill-feed"))
        .with_child(capture)
        .with_child(death)
        .with_child(revive)
        .with_child(scoreboard)
        .with_child(Element::div().with_id(ids::NOTIFICATIONS).with_class("notifications"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn overlay_exposes_every_anchor() {
        let doc = Document::overlay();
        for id in [
            ids::HUD,
            ids::COMPASS,
            ids::COMPASS_MARKERS,
            ids::COMPASS_BEARING,
            ids::KILL_FEED,
            ids::CAPTURE,
            ids::CAPTURE_NAME,
            ids::CAPTURE_TIER,
            ids::CAPTURE_BAR,
            ids::CAPTURE_STATUS,
            ids::DEATH,
            ids::DEATH_KILLER,
            ids::DEATH_TIMER_TEXT,
            ids::DEATH_TIMER_COUNT,
            ids::REVIVE,
            ids::REVIVE_BAR,
            ids::SCOREBOARD,
            ids::SCOREBOARD_FACTIONS,
            ids::NOTIFICATIONS,
        ] {
            assert!(doc.contains(id), "missing anchor {id}");
        }
    }

    #[test]
    fn widgets_start_hidden() {
        let doc = Document::overlay();
        assert!(doc.get(ids::HUD).unwrap().is_visible());
        assert!(doc.get(ids::KILL_FEED).unwrap().is_visible());
        for id in [ids::COMPASS, ids::CAPTURE, ids::DEATH, ids::REVIVE, ids::SCOREBOARD] {
            assert!(!doc.get(id).unwrap().is_visible(), "{id} should start hidden");
        }
    }
}
