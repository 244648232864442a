//! Overlay configuration loaded from `hud.toml`.
//!
//! Every field has a default so a partial (or missing) file is valid.

use crate::error::{HudError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How the death-screen give-up key is gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GiveUpPolicy {
    /// Forward only while the host reports `canGiveUp`.
    #[default]
    WhenAllowed,
    /// Forward whenever the countdown is at or below `give_up_threshold`.
    LegacyThreshold,
}

fn default_scheme() -> String {
    "https".into()
}
fn default_resource_name() -> String {
    "mrp_gamemode".into()
}
fn default_timeout_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeSettings {
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Host resource that receives callbacks (`{scheme}://{resource_name}/{event}`).
    #[serde(default = "default_resource_name")]
    pub resource_name: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            resource_name: default_resource_name(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_tick_width() -> f64 {
    30.0
}
fn default_center_offset() -> f64 {
    200.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompassSettings {
    /// Width in pixels of one 5° marker.
    #[serde(default = "default_tick_width")]
    pub tick_width: f64,
    /// Half of the visible compass width, in pixels.
    #[serde(default = "default_center_offset")]
    pub center_offset: f64,
}

impl Default for CompassSettings {
    fn default() -> Self {
        Self {
            tick_width: default_tick_width(),
            center_offset: default_center_offset(),
        }
    }
}

fn default_max_entries() -> usize {
    5
}
fn default_display_ms() -> u64 {
    5000
}
fn default_kill_fade_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KillFeedSettings {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,
    #[serde(default = "default_kill_fade_ms")]
    pub fade_ms: u64,
}

impl Default for KillFeedSettings {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            display_ms: default_display_ms(),
            fade_ms: default_kill_fade_ms(),
        }
    }
}

fn default_notification_ms() -> u64 {
    5000
}
fn default_notification_fade_ms() -> u64 {
    300
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_notification_ms")]
    pub default_duration_ms: u64,
    #[serde(default = "default_notification_fade_ms")]
    pub fade_ms: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            default_duration_ms: default_notification_ms(),
            fade_ms: default_notification_fade_ms(),
        }
    }
}

fn default_give_up_key() -> String {
    "e".into()
}
fn default_give_up_threshold() -> u32 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeathSettings {
    #[serde(default = "default_give_up_key")]
    pub give_up_key: String,
    #[serde(default)]
    pub give_up_policy: GiveUpPolicy,
    /// Only used by [`GiveUpPolicy::LegacyThreshold`].
    #[serde(default = "default_give_up_threshold")]
    pub give_up_threshold: u32,
}

impl Default for DeathSettings {
    fn default() -> Self {
        Self {
            give_up_key: default_give_up_key(),
            give_up_policy: GiveUpPolicy::default(),
            give_up_threshold: default_give_up_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    /// Where the rendered overlay HTML is written after each change.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

/// Complete overlay configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HudSettings {
    #[serde(default)]
    pub bridge: BridgeSettings,
    #[serde(default)]
    pub compass: CompassSettings,
    #[serde(default)]
    pub kill_feed: KillFeedSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub death: DeathSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

impl HudSettings {
    pub fn from_toml(path: &Path, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| HudError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the config at `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("CONFIG: {:?} not found, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| HudError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(path, &content)?;
        log::info!("CONFIG: loaded {:?}", path);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = HudSettings::from_toml(Path::new("hud.toml"), "").unwrap();
        assert_eq!(settings.bridge.resource_name, "mrp_gamemode");
        assert_eq!(settings.kill_feed.max_entries, 5);
        assert_eq!(settings.kill_feed.display_ms, 5000);
        assert_eq!(settings.kill_feed.fade_ms, 500);
        assert_eq!(settings.notifications.fade_ms, 300);
        assert_eq!(settings.compass.tick_width, 30.0);
        assert_eq!(settings.death.give_up_policy, GiveUpPolicy::WhenAllowed);
        assert!(settings.output.snapshot_path.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = HudSettings::from_toml(
            Path::new("hud.toml"),
            r#"
            [death]
            give_up_policy = "legacy_threshold"

            [bridge]
            resource_name = "my_mode"
            "#,
        )
        .unwrap();
        assert_eq!(settings.death.give_up_policy, GiveUpPolicy::LegacyThreshold);
        assert_eq!(settings.death.give_up_key, "e");
        assert_eq!(settings.death.give_up_threshold, 30);
        assert_eq!(settings.bridge.resource_name, "my_mode");
        assert_eq!(settings.bridge.scheme, "https");
    }

    #[test]
    fn invalid_toml_reports_the_path() {
        let err = HudSettings::from_toml(Path::new("broken.toml"), "[death\n").unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let settings = HudSettings::load(Path::new("/nonexistent/hud.toml")).unwrap();
        assert_eq!(settings.kill_feed.max_entries, 5);
    }
}
