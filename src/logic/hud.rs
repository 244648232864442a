//! The overlay controller: owns the document, every widget and the timers,
//! and routes host messages to exactly one widget handler each.

use crate::dom::Document;
use crate::dom::layout::ids;
use crate::logic::timers::{TimerAction, TimerQueue};
use crate::models::HudSettings;
use crate::shared::messages::{InboundMessage, OutboundEvent};
use crate::shared::snapshot::{HudState, RenderFrame, Snapshot};
use crate::views::components::capture::CaptureIndicator;
use crate::views::components::compass::Compass;
use crate::views::components::death::DeathScreen;
use crate::views::components::kill_feed::{Kill, KillFeed};
use crate::views::components::notification::{Notifications, Toast};
use crate::views::components::revive::ReviveProgress;
use crate::views::components::roster::Roster;
use crossbeam_channel::Sender;
use std::time::Instant;

pub struct Hud {
    doc: Document,
    visible: bool,
    compass: Compass,
    kill_feed: KillFeed,
    capture: CaptureIndicator,
    death: DeathScreen,
    revive: ReviveProgress,
    roster: Roster,
    notifications: Notifications,
    timers: TimerQueue,
    outbound: Sender<OutboundEvent>,
}

impl Hud {
    pub fn new(settings: &HudSettings, outbound: Sender<OutboundEvent>) -> Self {
        Self::with_document(Document::overlay(), settings, outbound)
    }

    pub fn with_document(
        mut doc: Document,
        settings: &HudSettings,
        outbound: Sender<OutboundEvent>,
    ) -> Self {
        let mut compass = Compass::new(settings.compass.clone());
        compass.init(&mut doc);
        let visible = doc.get(ids::HUD).is_some_and(|hud| hud.is_visible());

        Self {
            doc,
            visible,
            compass,
            kill_feed: KillFeed::new(settings.kill_feed.clone()),
            capture: CaptureIndicator::new(),
            death: DeathScreen::new(settings.death.clone()),
            revive: ReviveProgress::new(),
            roster: Roster::new(),
            notifications: Notifications::new(settings.notifications.clone()),
            timers: TimerQueue::new(),
            outbound,
        }
    }

    fn set_visible(&mut self, visible: bool) {
        if let Some(hud) = self.doc.find_mut(ids::HUD) {
            hud.set_visible(visible);
            self.visible = visible;
        }
    }

    /// Applies one host message. Returns whether the document may have changed.
    pub fn dispatch(&mut self, msg: InboundMessage, now: Instant) -> bool {
        log::trace!("HUD: {}", msg.kind());
        let doc = &mut self.doc;
        match msg {
            InboundMessage::ShowHud => self.set_visible(true),
            InboundMessage::HideHud => self.set_visible(false),

            InboundMessage::UpdateCompass {
                heading,
                bearing,
                enabled,
            } => self.compass.update(doc, heading.or(bearing), enabled),
            InboundMessage::ShowCompass => self.compass.show(doc),
            InboundMessage::HideCompass => self.compass.hide(doc),
            InboundMessage::ToggleCompass { enabled: true } => self.compass.show(doc),
            InboundMessage::ToggleCompass { enabled: false } => self.compass.hide(doc),

            InboundMessage::AddKillFeed {
                killer,
                victim,
                killer_faction,
                victim_faction,
                is_teamkill,
            } => {
                let kill = Kill {
                    killer,
                    victim,
                    killer_faction,
                    victim_faction,
                    is_teamkill,
                };
                self.kill_feed.add(doc, &mut self.timers, kill, now);
            }
            InboundMessage::ClearKillFeed => self.kill_feed.clear(doc),

            InboundMessage::ShowCapture {
                name,
                progress,
                owner,
                contested,
                tier,
            } => self
                .capture
                .show(doc, &name, progress, owner, contested, &tier),
            InboundMessage::UpdateCapture {
                progress,
                owner,
                contested,
                capturing,
            } => self
                .capture
                .update(doc, progress, owner, contested, capturing),
            InboundMessage::HideCapture => self.capture.hide(doc),

            InboundMessage::ShowDeath { killer, timer } => self.death.show(doc, &killer, timer),
            InboundMessage::UpdateDeathTimer { timer, can_give_up } => {
                self.death.update_timer(doc, timer, can_give_up)
            }
            InboundMessage::HideDeath => self.death.hide(doc),

            InboundMessage::ShowRevive { progress } => self.revive.show(doc, progress),
            InboundMessage::UpdateRevive { progress } => self.revive.update(doc, progress),
            InboundMessage::HideRevive => self.revive.hide(doc),

            InboundMessage::ShowRoster {
                factions,
                my_faction,
            } => self.roster.show(doc, &factions, my_faction),
            InboundMessage::HideRoster => self.roster.hide(doc),

            InboundMessage::UpdateStats { stats } => {
                log::trace!("HUD: stats update ignored ({} bytes)", stats.to_string().len());
                return false;
            }

            InboundMessage::Notification {
                title,
                text,
                notify_type,
                duration,
            } => {
                let toast = Toast {
                    title: &title,
                    text: &text,
                    kind: &notify_type,
                    duration_ms: duration,
                };
                self.notifications.push(doc, &mut self.timers, toast, now);
            }

            InboundMessage::Unknown => return false,
        }
        true
    }

    /// Forwards `giveUp` to the host when the death screen accepts `key`.
    pub fn key_pressed(&mut self, key: &str) -> bool {
        if !self.death.accepts_give_up(key) {
            return false;
        }
        log::debug!("HUD: give up requested");
        if let Err(e) = self.outbound.send(OutboundEvent::give_up()) {
            log::warn!("HUD: bridge is gone, dropping giveUp: {}", e);
        }
        true
    }

    /// Runs every timer due at `now`. Returns whether anything fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = self.timers.drain_due(now);
        for action in &due {
            match *action {
                TimerAction::FadeKill(id) => self.kill_feed.fade(&mut self.doc, id),
                TimerAction::RemoveKill(id) => self.kill_feed.remove(&mut self.doc, id),
                TimerAction::FadeNotification(id) => self.notifications.fade(&mut self.doc, id),
                TimerAction::RemoveNotification(id) => {
                    self.notifications.remove(&mut self.doc, id)
                }
            }
        }
        !due.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    #[cfg(test)]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            html: self.doc.to_html(),
            state: self.create_snapshot(),
        }
    }
}

impl Snapshot for Hud {
    type Output = HudState;

    fn create_snapshot(&self) -> HudState {
        HudState {
            visible: self.visible,
            compass: self.compass.create_snapshot(),
            capture: self.capture.create_snapshot(),
            death: self.death.create_snapshot(),
            roster: self.roster.create_snapshot(),
            revive_active: self.revive.is_active(),
            kill_feed_len: self.kill_feed.len(),
            notification_len: self.notifications.len(),
        }
    }
}
