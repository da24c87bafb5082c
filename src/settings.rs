//! Game settings and preferences
//!
//! Persisted in LocalStorage. Game state itself is never saved.

use serde::{Deserialize, Serialize};

use crate::consts::NUM_STARS;
use crate::sim::{Ruleset, RulesetKind};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which variant of the rules to play
    pub ruleset: RulesetKind,
    /// Shields and bullet count overlay
    pub show_stats: bool,
    /// Fade the title image in and out at startup
    pub show_title: bool,
    /// Background stars
    pub star_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ruleset: RulesetKind::Classic,
            show_stats: true,
            show_title: true,
            star_count: NUM_STARS,
        }
    }
}

impl Settings {
    /// Rule parameters for the selected variant
    pub fn ruleset(&self) -> Ruleset {
        Ruleset::from(self.ruleset)
    }

    /// Apply overrides from a URL query string such as `?rules=duel&stats=off`.
    ///
    /// Unknown keys and values are ignored.
    pub fn apply_query(&mut self, query: &str) {
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "rules" => {
                    if let Some(kind) = RulesetKind::from_str(value) {
                        self.ruleset = kind;
                    }
                }
                "stats" => {
                    if let Some(on) = parse_switch(value) {
                        self.show_stats = on;
                    }
                }
                "title" => {
                    if let Some(on) = parse_switch(value) {
                        self.show_title = on;
                    }
                }
                "stars" => {
                    if let Ok(count) = value.parse() {
                        self.star_count = count;
                    }
                }
                _ => {}
            }
        }
    }

    /// Decode a stored settings blob; fields missing from older blobs take defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                None
            }
        }
    }

    pub fn to_json(&self) -> Option<String> {
        match serde_json::to_string(self) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("Could not encode settings: {}", e);
                None
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "space_ping_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let (Some(storage), Some(json)) = (storage, self.to_json()) {
            match storage.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings: {:?}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
