//! Death screen: killer header, respawn countdown and the give-up prompt.

use crate::dom::layout::ids;
use crate::dom::{Document, Element};
use crate::models::settings::{DeathSettings, GiveUpPolicy};
use crate::shared::snapshot::{DeathState, Snapshot};

pub struct DeathScreen {
    settings: DeathSettings,
    state: DeathState,
}

impl DeathScreen {
    pub fn new(settings: DeathSettings) -> Self {
        Self {
            settings,
            state: DeathState::default(),
        }
    }

    pub fn show(&mut self, doc: &mut Document, killer: &str, timer: u32) {
        let Some(screen) = doc.find_mut(ids::DEATH) else {
            log::trace!("DEATH: no anchor, skipping show");
            return;
        };
        screen.set_visible(true);

        if let Some(header) = doc.find_mut(ids::DEATH_KILLER) {
            if killer.is_empty() {
                header.set_text("You died");
            } else {
                header.set_text("Killed by ");
                header.append_child(Element::span().with_text(killer));
            }
        }

        self.state.active = true;
        self.state.killer = killer.to_string();
        self.update_timer(doc, timer, false);
    }

    pub fn update_timer(&mut self, doc: &mut Document, timer: u32, can_give_up: bool) {
        if !doc.contains(ids::DEATH) {
            return;
        }
        self.state.timer = timer;
        self.state.can_give_up = can_give_up;

        if let Some(count) = doc.find_mut(ids::DEATH_TIMER_COUNT) {
            count.set_text(timer.to_string());
        }
        if let Some(prompt) = doc.find_mut(ids::DEATH_TIMER_TEXT) {
            prompt.set_text(self.prompt());
        }
    }

    fn prompt(&self) -> String {
        if self.state.can_give_up {
            format!(
                "Hold [{}] to give up: ",
                self.settings.give_up_key.to_uppercase()
            )
        } else {
            "Wait to give up: ".to_string()
        }
    }

    pub fn hide(&mut self, doc: &mut Document) {
        let Some(screen) = doc.find_mut(ids::DEATH) else {
            return;
        };
        screen.set_visible(false);
        self.state.active = false;
        self.state.can_give_up = false;
    }

    /// Whether a key press should be forwarded to the host as `giveUp`.
    pub fn accepts_give_up(&self, key: &str) -> bool {
        if !self.state.active || !key.eq_ignore_ascii_case(&self.settings.give_up_key) {
            return false;
        }
        match self.settings.give_up_policy {
            GiveUpPolicy::WhenAllowed => self.state.can_give_up,
            GiveUpPolicy::LegacyThreshold => self.state.timer <= self.settings.give_up_threshold,
        }
    }
}

impl Snapshot for DeathScreen {
    type Output = DeathState;

    fn create_snapshot(&self) -> DeathState {
        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(doc: &Document) -> String {
        doc.get(ids::DEATH_KILLER).unwrap().text_content()
    }

    #[test]
    fn header_depends_on_killer() {
        let mut doc = Document::overlay();
        let mut death = DeathScreen::new(DeathSettings::default());
        death.show(&mut doc, "", 30);
        assert_eq!(header(&doc), "You died");
        death.show(&mut doc, "Bob", 30);
        assert_eq!(header(&doc), "Killed by Bob");
        assert_eq!(
            doc.get(ids::DEATH_KILLER).unwrap().children()[0].text_content(),
            "Bob"
        );
    }

    #[test]
    fn timer_ticks_update_count_and_prompt() {
        let mut doc = Document::overlay();
        let mut death = DeathScreen::new(DeathSettings::default());
        death.show(&mut doc, "Bob", 30);
        assert_eq!(doc.get(ids::DEATH_TIMER_COUNT).unwrap().text_content(), "30");
        assert_eq!(
            doc.get(ids::DEATH_TIMER_TEXT).unwrap().text_content(),
            "Wait to give up: "
        );
        death.update_timer(&mut doc, 12, true);
        assert_eq!(doc.get(ids::DEATH_TIMER_COUNT).unwrap().text_content(), "12");
        assert_eq!(
            doc.get(ids::DEATH_TIMER_TEXT).unwrap().text_content(),
            "Hold [E] to give up: "
        );
    }

    #[test]
    fn give_up_is_gated_by_can_give_up_by_default() {
        let mut doc = Document::overlay();
        let mut death = DeathScreen::new(DeathSettings::default());
        assert!(!death.accepts_give_up("e"));
        death.show(&mut doc, "", 30);
        assert!(!death.accepts_give_up("e"));
        death.update_timer(&mut doc, 20, true);
        assert!(death.accepts_give_up("e"));
        assert!(death.accepts_give_up("E"));
        assert!(!death.accepts_give_up("q"));
        death.hide(&mut doc);
        assert!(!death.accepts_give_up("e"));
    }

    #[test]
    fn legacy_policy_uses_the_threshold() {
        let mut doc = Document::overlay();
        let mut death = DeathScreen::new(DeathSettings {
            give_up_policy: GiveUpPolicy::LegacyThreshold,
            ..DeathSettings::default()
        });
        death.show(&mut doc, "", 45);
        assert!(!death.accepts_give_up("e"));
        death.update_timer(&mut doc, 30, false);
        assert!(death.accepts_give_up("e"));
    }

    #[test]
    fn hide_is_idempotent() {
        let mut doc = Document::overlay();
        let mut death = DeathScreen::new(DeathSettings::default());
        death.show(&mut doc, "Bob", 30);
        death.hide(&mut doc);
        let once = doc.clone();
        death.hide(&mut doc);
        assert_eq!(doc, once);
        assert!(!death.create_snapshot().active);
        assert!(!doc.get(ids::DEATH).unwrap().is_visible());
    }
}
