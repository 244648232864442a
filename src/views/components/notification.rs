//! Transient toast notifications.

use crate::dom::escape::class_token;
use crate::dom::layout::ids;
use crate::dom::{Document, Element};
use crate::logic::timers::{TimerAction, TimerQueue};
use crate::models::settings::NotificationSettings;
use std::time::{Duration, Instant};

/// A toast as requested by the host.
#[derive(Debug, Clone, Copy)]
pub struct Toast<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub kind: &'a str,
    pub duration_ms: Option<f64>,
}

pub struct Notifications {
    settings: NotificationSettings,
    live: Vec<u64>,
    next_id: u64,
}

impl Notifications {
    pub fn new(settings: NotificationSettings) -> Self {
        Self {
            settings,
            live: Vec::new(),
            next_id: 0,
        }
    }

    fn element_id(id: u64) -> String {
        format!("notification-{id}")
    }

    /// Appends a toast that fades after `duration_ms` (default from settings).
    /// Negative durations fade immediately.
    pub fn push(&mut self, doc: &mut Document, timers: &mut TimerQueue, toast: Toast<'_>, now: Instant) {
        let Some(container) = doc.find_mut(ids::NOTIFICATIONS) else {
            log::debug!("NOTIFY: no anchor, dropping '{}'", toast.title);
            return;
        };
        let id = self.next_id;
        self.next_id += 1;

        let kind = class_token(toast.kind, "info");
        container.append_child(
            Element::div()
                .with_id(Self::element_id(id))
                .with_class("notification")
                .with_class(&kind)
                .with_child(
                    Element::div()
                        .with_class("notification-title")
                        .with_text(toast.title),
                )
                .with_child(
                    Element::div()
                        .with_class("notification-text")
                        .with_text(toast.text),
                ),
        );
        self.live.push(id);

        let duration = toast
            .duration_ms
            .map(|ms| ms.max(0.0).round() as u64)
            .unwrap_or(self.settings.default_duration_ms);
        let fade_at = now + Duration::from_millis(duration);
        timers.schedule(fade_at, TimerAction::FadeNotification(id));
        timers.schedule(
            fade_at + Duration::from_millis(self.settings.fade_ms),
            TimerAction::RemoveNotification(id),
        );
    }

    pub fn fade(&mut self, doc: &mut Document, id: u64) {
        if !self.live.contains(&id) {
            return;
        }
        if let Some(el) = doc.find_mut(&Self::element_id(id)) {
            el.add_class("fade-out");
        }
    }

    pub fn remove(&mut self, doc: &mut Document, id: u64) {
        let Some(pos) = self.live.iter().position(|live| *live == id) else {
            return;
        };
        self.live.remove(pos);
        if let Some(container) = doc.find_mut(ids::NOTIFICATIONS) {
            container.remove_child_by_id(&Self::element_id(id));
        }
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }
}
