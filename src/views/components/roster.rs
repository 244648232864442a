//! Player roster (scoreboard) grouped by faction.

use crate::dom::layout::ids;
use crate::dom::{Document, Element};
use crate::models::Faction;
use crate::shared::messages::{RosterFaction, RosterPlayer};
use crate::shared::snapshot::{RosterState, Snapshot};
use std::collections::BTreeMap;

/// Kill/death ratio with two decimals; no deaths means the ratio is the kill count.
pub fn kd_ratio(kills: u32, deaths: u32) -> String {
    let ratio = if deaths > 0 {
        kills as f64 / deaths as f64
    } else {
        kills as f64
    };
    format!("{ratio:.2}")
}

fn player_row(player: &RosterPlayer) -> Element {
    let mut row = Element::div().with_class("player-row");
    if !player.rank.is_empty() {
        row.append_child(
            Element::span()
                .with_class("player-rank")
                .with_text(player.rank.as_str()),
        );
    }
    if !player.whitelist.is_empty() {
        row.append_child(
            Element::span()
                .with_class("player-whitelist")
                .with_text(player.whitelist.as_str()),
        );
    }
    row.with_child(
        Element::span()
            .with_class("player-name")
            .with_text(player.name.as_str()),
    )
    .with_child(
        Element::span()
            .with_class("player-kills")
            .with_text(player.kills.to_string()),
    )
    .with_child(
        Element::span()
            .with_class("player-deaths")
            .with_text(player.deaths.to_string()),
    )
    .with_child(
        Element::span()
            .with_class("player-kd")
            .with_text(kd_ratio(player.kills, player.deaths)),
    )
    .with_child(
        Element::span()
            .with_class("player-ping")
            .with_text(format!("{}ms", player.ping)),
    )
}

fn faction_block(id: u8, faction: &RosterFaction, mine: bool) -> Element {
    let team = Faction::from_id(id as i64);
    let name = if faction.name.is_empty() {
        team.label()
    } else {
        faction.name.as_str()
    };
    let mut block = Element::div()
        .with_class("scoreboard-faction")
        .with_class(&format!("faction-{id}"));
    if mine {
        block.add_class("mine");
    }
    block.append_child(
        Element::div()
            .with_class("faction-header")
            .with_text(format!("{} ({})", name, faction.players.len())),
    );
    for player in &faction.players {
        block.append_child(player_row(player));
    }
    block
}

#[derive(Default)]
pub struct Roster {
    state: RosterState,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders factions 1..=3 that have at least one player, in host order within each.
    pub fn show(
        &mut self,
        doc: &mut Document,
        factions: &BTreeMap<u8, RosterFaction>,
        my_faction: Faction,
    ) {
        let Some(board) = doc.find_mut(ids::SCOREBOARD) else {
            log::trace!("ROSTER: no anchor, skipping show");
            return;
        };
        board.set_visible(true);
        self.state.active = true;

        let Some(container) = doc.find_mut(ids::SCOREBOARD_FACTIONS) else {
            return;
        };
        container.clear_children();
        for id in 1..=3u8 {
            let Some(faction) = factions.get(&id).filter(|f| !f.players.is_empty()) else {
                continue;
            };
            let mine = my_faction != Faction::None && my_faction.id() == id;
            container.append_child(faction_block(id, faction, mine));
        }
    }

    pub fn hide(&mut self, doc: &mut Document) {
        let Some(board) = doc.find_mut(ids::SCOREBOARD) else {
            return;
        };
        board.set_visible(false);
        self.state.active = false;
    }
}

impl Snapshot for Roster {
    type Output = RosterState;

    fn create_snapshot(&self) -> RosterState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_name(row: &Element) -> String {
        row.children()
            .iter()
            .find(|c| c.has_class("player-name"))
            .map(|c| c.text_content())
            .unwrap_or_default()
    }

    fn player(name: &str, kills: u32, deaths: u32) -> RosterPlayer {
        RosterPlayer {
            name: name.into(),
            kills,
            deaths,
            ping: 50,
            ..RosterPlayer::default()
        }
    }

    #[test]
    fn ratio_formats_two_decimals() {
        assert_eq!(kd_ratio(4, 0), "4.00");
        assert_eq!(kd_ratio(3, 2), "1.50");
        assert_eq!(kd_ratio(0, 0), "0.00");
        assert_eq!(kd_ratio(1, 3), "0.33");
    }

    #[test]
    fn empty_factions_are_skipped_and_mine_is_marked() {
        let mut doc = Document::overlay();
        let mut roster = Roster::new();
        let mut factions = BTreeMap::new();
        factions.insert(
            1,
            RosterFaction {
                name: "Military".into(),
                players: vec![player("Zed", 1, 1), player("Amy", 4, 0)],
            },
        );
        factions.insert(2, RosterFaction::default());
        factions.insert(
            3,
            RosterFaction {
                name: String::new(),
                players: vec![player("Civ", 0, 2)],
            },
        );
        roster.show(&mut doc, &factions, Faction::Civilian);

        let blocks = doc.get(ids::SCOREBOARD_FACTIONS).unwrap().children();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].has_class("faction-1"));
        assert!(!blocks[0].has_class("mine"));
        assert!(blocks[1].has_class("faction-3"));
        assert!(blocks[1].has_class("mine"));
        assert_eq!(blocks[1].children()[0].text_content(), "Civilian (1)");

        // Host order is kept.
        let names: Vec<_> = blocks[0].children()[1..].iter().map(row_name).collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
        assert!(doc.to_html().contains("4.00"));
    }

    #[test]
    fn reshow_replaces_previous_blocks() {
        let mut doc = Document::overlay();
        let mut roster = Roster::new();
        let mut factions = BTreeMap::new();
        factions.insert(
            2,
            RosterFaction {
                name: "Resistance".into(),
                players: vec![player("A", 0, 0)],
            },
        );
        roster.show(&mut doc, &factions, Faction::None);
        roster.show(&mut doc, &factions, Faction::None);
        assert_eq!(doc.get(ids::SCOREBOARD_FACTIONS).unwrap().children().len(), 1);
        roster.hide(&mut doc);
        roster.hide(&mut doc);
        assert!(!roster.create_snapshot().active);
        assert!(!doc.get(ids::SCOREBOARD).unwrap().is_visible());
    }
}
