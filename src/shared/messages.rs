//! Message schema exchanged with the host script.
//!
//! Inbound messages are JSON objects tagged by `type`. Field decoding is
//! lenient (see [`crate::shared::de`]); unknown types decode to
//! [`InboundMessage::Unknown`] and are dropped by the dispatcher.

use crate::models::Faction;
use crate::shared::de;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InboundMessage {
    #[serde(rename = "showHUD")]
    ShowHud,
    #[serde(rename = "hideHUD")]
    HideHud,

    UpdateCompass {
        #[serde(default, deserialize_with = "de::opt_number")]
        heading: Option<f64>,
        /// Older hosts send the heading as `bearing`; `heading` wins when both are set.
        #[serde(default, deserialize_with = "de::opt_number")]
        bearing: Option<f64>,
        /// Older hosts hide the compass by sending `enabled: false` here.
        #[serde(default, deserialize_with = "de::opt_flag")]
        enabled: Option<bool>,
    },
    ShowCompass,
    HideCompass,
    /// Older hosts show and hide the compass through a single message.
    ToggleCompass {
        #[serde(default, deserialize_with = "de::flag")]
        enabled: bool,
    },

    AddKillFeed {
        #[serde(default, deserialize_with = "de::text")]
        killer: String,
        #[serde(default, deserialize_with = "de::text")]
        victim: String,
        #[serde(default)]
        killer_faction: Faction,
        #[serde(default)]
        victim_faction: Faction,
        #[serde(default, deserialize_with = "de::flag")]
        is_teamkill: bool,
    },
    ClearKillFeed,

    ShowCapture {
        #[serde(default, deserialize_with = "de::text")]
        name: String,
        #[serde(default, deserialize_with = "de::percent")]
        progress: f64,
        #[serde(default)]
        owner: Faction,
        #[serde(default, deserialize_with = "de::flag")]
        contested: bool,
        #[serde(default, deserialize_with = "de::text")]
        tier: String,
    },
    UpdateCapture {
        #[serde(default, deserialize_with = "de::percent")]
        progress: f64,
        #[serde(default)]
        owner: Faction,
        #[serde(default, deserialize_with = "de::flag")]
        contested: bool,
        #[serde(default, deserialize_with = "de::flag")]
        capturing: bool,
    },
    HideCapture,

    ShowDeath {
        #[serde(default, deserialize_with = "de::text")]
        killer: String,
        #[serde(default, deserialize_with = "de::count")]
        timer: u32,
    },
    UpdateDeathTimer {
        #[serde(default, deserialize_with = "de::count")]
        timer: u32,
        #[serde(default, deserialize_with = "de::flag")]
        can_give_up: bool,
    },
    HideDeath,

    ShowRevive {
        #[serde(default, deserialize_with = "de::percent")]
        progress: f64,
    },
    UpdateRevive {
        #[serde(default, deserialize_with = "de::percent")]
        progress: f64,
    },
    HideRevive,

    ShowRoster {
        #[serde(default, deserialize_with = "roster_factions")]
        factions: BTreeMap<u8, RosterFaction>,
        #[serde(default)]
        my_faction: Faction,
    },
    HideRoster,

    UpdateStats {
        #[serde(default)]
        stats: Value,
    },

    Notification {
        #[serde(default, deserialize_with = "de::text")]
        title: String,
        #[serde(default, deserialize_with = "de::text")]
        text: String,
        #[serde(default, deserialize_with = "de::text")]
        notify_type: String,
        #[serde(default, deserialize_with = "de::opt_number")]
        duration: Option<f64>,
    },

    #[serde(other)]
    Unknown,
}

impl InboundMessage {
    /// Wire name of the message, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundMessage::ShowHud => "showHUD",
            InboundMessage::HideHud => "hideHUD",
            InboundMessage::UpdateCompass { .. } => "updateCompass",
            InboundMessage::ShowCompass => "showCompass",
            InboundMessage::HideCompass => "hideCompass",
            InboundMessage::ToggleCompass { .. } => "toggleCompass",
            InboundMessage::AddKillFeed { .. } => "addKillFeed",
            InboundMessage::ClearKillFeed => "clearKillFeed",
            InboundMessage::ShowCapture { .. } => "showCapture",
            InboundMessage::UpdateCapture { .. } => "updateCapture",
            InboundMessage::HideCapture => "hideCapture",
            InboundMessage::ShowDeath { .. } => "showDeath",
            InboundMessage::UpdateDeathTimer { .. } => "updateDeathTimer",
            InboundMessage::HideDeath => "hideDeath",
            InboundMessage::ShowRevive { .. } => "showRevive",
            InboundMessage::UpdateRevive { .. } => "updateRevive",
            InboundMessage::HideRevive => "hideRevive",
            InboundMessage::ShowRoster { .. } => "showRoster",
            InboundMessage::HideRoster => "hideRoster",
            InboundMessage::UpdateStats { .. } => "updateStats",
            InboundMessage::Notification { .. } => "notification",
            InboundMessage::Unknown => "unknown",
        }
    }
}

/// One faction block of the roster, as supplied by the host.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RosterFaction {
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,
    #[serde(default, deserialize_with = "roster_players")]
    pub players: Vec<RosterPlayer>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RosterPlayer {
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,
    #[serde(default, deserialize_with = "de::text")]
    pub rank: String,
    #[serde(default, deserialize_with = "de::text")]
    pub whitelist: String,
    #[serde(default, deserialize_with = "de::count")]
    pub kills: u32,
    #[serde(default, deserialize_with = "de::count")]
    pub deaths: u32,
    #[serde(default, deserialize_with = "de::count")]
    pub ping: u32,
}

/// Accepts `{ "1": {...}, "2": {...} }` or a 1-based array. Entries that do
/// not decode, or whose id is outside `1..=3`, are skipped.
fn roster_factions<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<BTreeMap<u8, RosterFaction>, D::Error> {
    let raw = Option::<Value>::deserialize(d)?.unwrap_or(Value::Null);
    let entries: Vec<(Option<u8>, Value)> = match raw {
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| (k.trim().parse().ok(), v))
            .collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, v)| (u8::try_from(i + 1).ok(), v))
            .collect(),
        _ => Vec::new(),
    };

    let mut factions = BTreeMap::new();
    for (id, value) in entries {
        let Some(id) = id.filter(|id| (1..=3).contains(id)) else {
            log::warn!("ROSTER: ignoring faction with unknown id");
            continue;
        };
        if value.is_null() {
            continue;
        }
        match serde_json::from_value::<RosterFaction>(value) {
            Ok(faction) => {
                factions.insert(id, faction);
            }
            Err(e) => log::warn!("ROSTER: ignoring malformed faction {}: {}", id, e),
        }
    }
    Ok(factions)
}

fn roster_players<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<RosterPlayer>, D::Error> {
    let raw = Option::<Value>::deserialize(d)?.unwrap_or(Value::Null);
    let items = match raw {
        Value::Array(items) => items,
        // Lua tables with holes arrive as objects keyed by index.
        Value::Object(map) => {
            let mut indexed: Vec<(usize, Value)> = map
                .into_iter()
                .filter_map(|(k, v)| k.parse().ok().map(|i| (i, v)))
                .collect();
            indexed.sort_by_key(|(i, _)| *i);
            indexed.into_iter().map(|(_, v)| v).collect()
        }
        _ => Vec::new(),
    };
    Ok(items
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

/// Event sent back to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEvent {
    pub name: String,
    pub payload: Value,
}

impl OutboundEvent {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// The player asked to skip the death countdown.
    pub fn give_up() -> Self {
        Self::new("giveUp", Value::Object(Default::default()))
    }
}
