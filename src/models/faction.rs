//! Team affiliations as sent by the host.

use serde::{Deserialize, Deserializer};

/// Faction of a player or owner of a capture point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub enum Faction {
    #[default]
    None,
    Military,
    Resistance,
    Civilian,
}

impl Faction {
    /// Maps the host's numeric ids (1, 2, 3). Anything else is `None`.
    pub fn from_id(id: i64) -> Self {
        match id {
            1 => Faction::Military,
            2 => Faction::Resistance,
            3 => Faction::Civilian,
            _ => Faction::None,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "military" | "1" => Faction::Military,
            "resistance" | "2" => Faction::Resistance,
            "civilian" | "3" => Faction::Civilian,
            _ => Faction::None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Faction::None => 0,
            Faction::Military => 1,
            Faction::Resistance => 2,
            Faction::Civilian => 3,
        }
    }

    /// CSS class used for faction coloring. Only the two combat factions are colored.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Faction::Military => Some("military"),
            Faction::Resistance => Some("resistance"),
            Faction::Civilian | Faction::None => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Faction::None => "Neutral",
            Faction::Military => "Military",
            Faction::Resistance => "Resistance",
            Faction::Civilian => "Civilian",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FactionRepr {
    Id(i64),
    Float(f64),
    Name(String),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for Faction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match FactionRepr::deserialize(deserializer)? {
            FactionRepr::Id(id) => Faction::from_id(id),
            FactionRepr::Float(f) if f.fract() == 0.0 => Faction::from_id(f as i64),
            FactionRepr::Name(name) => Faction::from_name(&name),
            FactionRepr::Float(_) | FactionRepr::Other(_) => Faction::None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ids_names_and_garbage() {
        let parse = |s: &str| serde_json::from_str::<Faction>(s).unwrap();
        assert_eq!(parse("1"), Faction::Military);
        assert_eq!(parse("2.0"), Faction::Resistance);
        assert_eq!(parse("3"), Faction::Civilian);
        assert_eq!(parse("\"Resistance\""), Faction::Resistance);
        assert_eq!(parse("7"), Faction::None);
        assert_eq!(parse("null"), Faction::None);
        assert_eq!(parse("{}"), Faction::None);
    }

    #[test]
    fn only_combat_factions_are_colored() {
        assert_eq!(Faction::Military.css_class(), Some("military"));
        assert_eq!(Faction::Resistance.css_class(), Some("resistance"));
        assert_eq!(Faction::Civilian.css_class(), None);
        assert_eq!(Faction::None.css_class(), None);
    }
}
