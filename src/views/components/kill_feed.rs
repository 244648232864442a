//! Kill feed: newest-first list of recent kills with timed expiry.

use crate::dom::layout::ids;
use crate::dom::{Document, Element};
use crate::logic::timers::{TimerAction, TimerQueue};
use crate::models::Faction;
use crate::models::settings::KillFeedSettings;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const FADE_CLASS: &str = "fade-out";

#[derive(Debug, Clone, PartialEq)]
pub struct KillFeedEntry {
    pub id: u64,
    pub killer: String,
    pub victim: String,
    pub killer_faction: Faction,
    pub victim_faction: Faction,
    pub is_teamkill: bool,
    pub created_at: Instant,
}

impl KillFeedEntry {
    /// Row coloring: teamkill wins over the killer's faction.
    pub fn category(&self) -> Option<&'static str> {
        if self.is_teamkill {
            Some("teamkill")
        } else {
            self.killer_faction.css_class()
        }
    }

    fn element_id(id: u64) -> String {
        format!("killfeed-{id}")
    }

    fn element(&self) -> Element {
        let mut row = Element::div()
            .with_id(Self::element_id(self.id))
            .with_class("kill-feed-item");
        if let Some(category) = self.category() {
            row.add_class(category);
        }

        let mut killer = Element::span()
            .with_class("kill-feed-killer")
            .with_text(self.killer.as_str());
        if let Some(class) = self.killer_faction.css_class() {
            killer.add_class(class);
        }
        let mut victim = Element::span()
            .with_class("kill-feed-victim")
            .with_text(self.victim.as_str());
        if let Some(class) = self.victim_faction.css_class() {
            victim.add_class(class);
        }

        row.with_child(killer)
            .with_child(
                Element::span()
                    .with_class("kill-feed-icon")
                    .with_child(Element::new("i").with_class("fas fa-skull")),
            )
            .with_child(victim)
    }
}

/// A kill as received from the host, before it gets an id and timestamp.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Kill {
    pub killer: String,
    pub victim: String,
    pub killer_faction: Faction,
    pub victim_faction: Faction,
    pub is_teamkill: bool,
}

pub struct KillFeed {
    settings: KillFeedSettings,
    /// Newest first, mirrors the children of the feed anchor.
    entries: VecDeque<KillFeedEntry>,
    next_id: u64,
}

impl KillFeed {
    pub fn new(settings: KillFeedSettings) -> Self {
        Self {
            settings,
            entries: VecDeque::new(),
            next_id: 0,
        }
    }

    pub fn add(&mut self, doc: &mut Document, timers: &mut TimerQueue, kill: Kill, now: Instant) {
        let Some(feed) = doc.find_mut(ids::KILL_FEED) else {
            log::trace!("KILLFEED: no anchor, dropping entry");
            return;
        };

        let id = self.next_id;
        self.next_id += 1;
        let entry = KillFeedEntry {
            id,
            killer: kill.killer,
            victim: kill.victim,
            killer_faction: kill.killer_faction,
            victim_faction: kill.victim_faction,
            is_teamkill: kill.is_teamkill,
            created_at: now,
        };

        feed.prepend_child(entry.element());
        self.entries.push_front(entry);

        let max = self.settings.max_entries;
        if self.entries.len() > max {
            self.entries.truncate(max);
            feed.truncate_children(max);
        }

        let fade_at = now + Duration::from_millis(self.settings.display_ms);
        timers.schedule(fade_at, TimerAction::FadeKill(id));
        timers.schedule(
            fade_at + Duration::from_millis(self.settings.fade_ms),
            TimerAction::RemoveKill(id),
        );
    }

    pub fn fade(&mut self, doc: &mut Document, id: u64) {
        if !self.entries.iter().any(|e| e.id == id) {
            return;
        }
        if let Some(row) = doc.find_mut(&KillFeedEntry::element_id(id)) {
            row.add_class(FADE_CLASS);
        }
    }

    pub fn remove(&mut self, doc: &mut Document, id: u64) {
        let Some(pos) = self.entries.iter().position(|e| e.id == id) else {
            return;
        };
        if let Some(entry) = self.entries.remove(pos) {
            log::trace!("KILLFEED: {} expired after {:?}", id, entry.created_at.elapsed());
        }
        if let Some(feed) = doc.find_mut(ids::KILL_FEED) {
            feed.remove_child_by_id(&KillFeedEntry::element_id(id));
        }
    }

    /// Drops every entry at once. Pending timers for them become no-ops.
    pub fn clear(&mut self, doc: &mut Document) {
        self.entries.clear();
        if let Some(feed) = doc.find_mut(ids::KILL_FEED) {
            feed.clear_children();
        }
    }

    #[cfg(test)]
    pub fn entries(&self) -> impl Iterator<Item = &KillFeedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kill(killer: &str, victim: &str) -> Kill {
        Kill {
            killer: killer.into(),
            victim: victim.into(),
            ..Kill::default()
        }
    }

    fn apply(feed: &mut KillFeed, doc: &mut Document, timers: &mut TimerQueue, now: Instant) {
        for action in timers.drain_due(now) {
            match action {
                TimerAction::FadeKill(id) => feed.fade(doc, id),
                TimerAction::RemoveKill(id) => feed.remove(doc, id),
                _ => {}
            }
        }
    }

    fn feed_killers(doc: &Document) -> Vec<String> {
        doc.get(ids::KILL_FEED)
            .unwrap()
            .children()
            .iter()
            .map(|c| c.children()[0].text_content())
            .collect()
    }

    #[test]
    fn caps_at_five_newest_first() {
        let mut doc = Document::overlay();
        let mut timers = TimerQueue::new();
        let mut feed = KillFeed::new(KillFeedSettings::default());
        let now = Instant::now();
        for i in 1..=7 {
            feed.add(&mut doc, &mut timers, kill(&format!("k{i}"), "v"), now);
        }
        assert_eq!(feed.len(), 5);
        assert_eq!(feed_killers(&doc), vec!["k7", "k6", "k5", "k4", "k3"]);
        let killers: Vec<_> = feed.entries().map(|e| e.killer.clone()).collect();
        assert_eq!(killers, vec!["k7", "k6", "k5", "k4", "k3"]);
    }

    #[test]
    fn entries_fade_then_disappear() {
        let mut doc = Document::overlay();
        let mut timers = TimerQueue::new();
        let mut feed = KillFeed::new(KillFeedSettings::default());
        let t0 = Instant::now();
        let ms = |n| t0 + Duration::from_millis(n);
        feed.add(&mut doc, &mut timers, kill("a", "b"), t0);
        feed.add(&mut doc, &mut timers, kill("c", "d"), ms(1000));

        apply(&mut feed, &mut doc, &mut timers, ms(4999));
        assert!(!doc.get("killfeed-0").unwrap().has_class(FADE_CLASS));

        apply(&mut feed, &mut doc, &mut timers, ms(5000));
        assert!(doc.get("killfeed-0").unwrap().has_class(FADE_CLASS));
        assert!(!doc.get("killfeed-1").unwrap().has_class(FADE_CLASS));

        apply(&mut feed, &mut doc, &mut timers, ms(5500));
        assert!(doc.get("killfeed-0").is_none());
        assert_eq!(feed_killers(&doc), vec!["c"]);

        apply(&mut feed, &mut doc, &mut timers, ms(6500));
        assert!(feed.is_empty());
        assert!(timers.is_empty());
    }

    #[test]
    fn eviction_does_not_disturb_survivors() {
        let mut doc = Document::overlay();
        let mut timers = TimerQueue::new();
        let mut feed = KillFeed::new(KillFeedSettings::default());
        let t0 = Instant::now();
        for i in 0..6u64 {
            let at = t0 + Duration::from_millis(i * 100);
            feed.add(&mut doc, &mut timers, kill(&format!("k{i}"), "v"), at);
        }
        // k0 was evicted; its timers fire against nothing.
        apply(&mut feed, &mut doc, &mut timers, t0 + Duration::from_millis(5500));
        assert_eq!(feed_killers(&doc), vec!["k5", "k4", "k3", "k2", "k1"]);
        assert!(doc.get("killfeed-1").unwrap().has_class(FADE_CLASS));
    }

    #[test]
    fn clear_orphans_pending_timers() {
        let mut doc = Document::overlay();
        let mut timers = TimerQueue::new();
        let mut feed = KillFeed::new(KillFeedSettings::default());
        let t0 = Instant::now();
        feed.add(&mut doc, &mut timers, kill("a", "b"), t0);
        feed.clear(&mut doc);
        assert!(feed_killers(&doc).is_empty());
        feed.add(&mut doc, &mut timers, kill("c", "d"), t0 + Duration::from_secs(5));
        apply(&mut feed, &mut doc, &mut timers, t0 + Duration::from_millis(5500));
        assert_eq!(feed_killers(&doc), vec!["c"]);
    }

    #[test]
    fn teamkill_beats_faction_coloring() {
        let mut doc = Document::overlay();
        let mut timers = TimerQueue::new();
        let mut feed = KillFeed::new(KillFeedSettings::default());
        let now = Instant::now();
        let teamkill = Kill {
            killer: "a".into(),
            victim: "b".into(),
            killer_faction: Faction::Military,
            victim_faction: Faction::Military,
            is_teamkill: true,
        };
        let normal = Kill {
            killer: "c".into(),
            victim: "d".into(),
            killer_faction: Faction::Resistance,
            victim_faction: Faction::Military,
            is_teamkill: false,
        };
        feed.add(&mut doc, &mut timers, teamkill, now);
        feed.add(&mut doc, &mut timers, normal, now);

        let row = doc.get("killfeed-0").unwrap();
        assert!(row.has_class("teamkill"));
        assert!(!row.has_class("military"));
        assert!(row.children()[0].has_class("military"));

        let row = doc.get("killfeed-1").unwrap();
        assert!(row.has_class("resistance"));
        assert!(row.children()[2].has_class("military"));
    }

    #[test]
    fn names_are_escaped_in_output() {
        let mut doc = Document::overlay();
        let mut timers = TimerQueue::new();
        let mut feed = KillFeed::new(KillFeedSettings::default());
        feed.add(&mut doc, &mut timers, kill("<img>", "b"), Instant::now());
        let html = doc.to_html();
        assert!(html.contains("&lt;img&gt;"));
        assert!(!html.contains("<img>"));
    }
}
