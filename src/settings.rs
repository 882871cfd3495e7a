//! Player preferences
//!
//! Volumes and key bindings. Loaded from JSON by whoever hosts the mode;
//! the simulation only reads the values.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::input::Action;
use crate::tuning::ConfigError;

/// Key name -> action map (names compared case-insensitively)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(deserialize_with = "lowercase_keys")]
    keys: HashMap<String, Action>,
}

fn lowercase_keys<'de, D>(deserializer: D) -> Result<HashMap<String, Action>, D::Error>
where
    D: Deserializer<'de>,
{
    let keys = HashMap::<String, Action>::deserialize(deserializer)?;
    Ok(keys
        .into_iter()
        .map(|(key, action)| (key.to_lowercase(), action))
        .collect())
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = [
            ("a", Action::Left),
            ("d", Action::Right),
            ("w", Action::Up),
            ("s", Action::Down),
            ("k", Action::RotateCcw),
            ("l", Action::RotateCw),
        ]
        .into_iter()
        .map(|(k, a)| (k.to_string(), a))
        .collect();
        Self { keys }
    }
}

impl KeyBindings {
    /// Empty map, nothing bound
    pub fn empty() -> Self {
        Self {
            keys: HashMap::new(),
        }
    }

    pub fn bind(&mut self, key: &str, action: Action) {
        self.keys.insert(key.to_lowercase(), action);
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.keys.get(&key.to_lowercase()).copied()
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence every cue
    pub muted: bool,
    pub bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        settings.music_volume = settings.music_volume.clamp(0.0, 1.0);
        log::info!("Loaded settings");
        Ok(settings)
    }

    /// Volume to request for a sound effect of the given base volume
    pub fn sfx(&self, base: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            base * self.master_volume * self.sfx_volume
        }
    }

    /// Volume to request for music of the given base volume
    pub fn music(&self, base: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            base * self.master_volume * self.music_volume
        }
    }
}
