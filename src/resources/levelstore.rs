//! Level layouts and the level currently in play.
//!
//! Layouts are JSON documents describing the player start and the pegs of a
//! level:
//!
//! ```json
//! {
//!   "id": 1,
//!   "name": "Intro",
//!   "player_start": [0.0, 0.0],
//!   "player_speed": 3.0,
//!   "end_x": 60.0,
//!   "pegs": [
//!     { "x": 10.0, "y": 5.0, "zoom": "Wide", "lock": "HLock", "offset_x": 2.0 }
//!   ]
//! }
//! ```
//!
//! [`LevelStore`] keeps every known layout by id; [`ActiveLevel`] names the
//! one spawned by [`load_level`](crate::game::load_level).

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;

use crate::components::peg::{LockEffect, ZoomEffect};

const BUILTIN_LEVELS: [&str; 2] = [
    include_str!("../../assets/levels/01_intro.json"),
    include_str!("../../assets/levels/02_towers.json"),
];

fn default_radius() -> f32 {
    1.0
}

fn default_speed() -> f32 {
    3.0
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PegLayout {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub zoom: ZoomEffect,
    #[serde(default)]
    pub lock: LockEffect,
    #[serde(default)]
    pub offset_x: f32,
    #[serde(default)]
    pub offset_y: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LevelLayout {
    pub id: u32,
    pub name: String,
    pub player_start: [f32; 2],
    #[serde(default = "default_speed")]
    pub player_speed: f32,
    /// Player X at which the level counts as finished.
    pub end_x: f32,
    #[serde(default)]
    pub pegs: Vec<PegLayout>,
}

impl LevelLayout {
    pub fn from_json_str(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Failed to parse level JSON: {}", e))
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct LevelStore {
    levels: FxHashMap<u32, LevelLayout>,
}

impl LevelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store containing the levels shipped with the crate.
    pub fn builtin() -> Result<Self, String> {
        let mut store = Self::new();
        for text in BUILTIN_LEVELS {
            store.insert(LevelLayout::from_json_str(text)?);
        }
        Ok(store)
    }

    /// Load every `*.json` file in `dir`.
    ///
    /// Files that fail to parse are skipped with a warning; an unreadable
    /// directory or a directory without any valid level is an error.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, String> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir)
            .map_err(|e| format!("Failed to read levels dir {:?}: {}", dir, e))?;
        let mut store = Self::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read {:?}: {}", path, e))
                .and_then(|text| LevelLayout::from_json_str(&text));
            match loaded {
                Ok(layout) => {
                    info!("Loaded level {} '{}' from {:?}", layout.id, layout.name, path);
                    store.insert(layout);
                }
                Err(e) => warn!("Skipping level file {:?}: {}", path, e),
            }
        }
        if store.is_empty() {
            return Err(format!("No valid level files in {:?}", dir));
        }
        Ok(store)
    }

    /// Insert a layout, replacing any layout with the same id.
    pub fn insert(&mut self, layout: LevelLayout) {
        if let Some(old) = self.levels.insert(layout.id, layout) {
            warn!("Level {} '{}' was replaced", old.id, old.name);
        }
    }

    pub fn get(&self, id: u32) -> Option<&LevelLayout> {
        self.levels.get(&id)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level ids in ascending order.
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.levels.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn first(&self) -> Option<u32> {
        self.ids().first().copied()
    }

    /// Level following `id`, wrapping around to the first one.
    pub fn next_after(&self, id: u32) -> Option<u32> {
        let ids = self.ids();
        ids.iter()
            .copied()
            .find(|&other| other > id)
            .or_else(|| ids.first().copied())
    }
}

/// Id of the level currently in play.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveLevel(pub u32);

/// Pending switch to another level after the current one ended.
#[derive(Resource, Debug, Clone, Default)]
pub struct LevelTransition {
    /// Level to load once `remaining` runs out.
    pub pending: Option<u32>,
    /// Seconds left before the pending level loads.
    pub remaining: f32,
}

impl LevelTransition {
    pub fn schedule(&mut self, level: u32, delay: f32) {
        self.pending = Some(level);
        self.remaining = delay;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn clear(&mut self) {
        self.pending = None;
        self.remaining = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{ "id": 7, "name": "Tiny", "player_start": [1.0, 2.0], "end_x": 5.0 }"#;

    #[test]
    fn test_minimal_layout_uses_defaults() {
        let layout = LevelLayout::from_json_str(MINIMAL).unwrap();
        assert_eq!(layout.id, 7);
        assert_eq!(layout.player_speed, 3.0);
        assert!(layout.pegs.is_empty());
    }

    #[test]
    fn test_peg_effects_parse_by_name() {
        let text = r#"{ "id": 1, "name": "A", "player_start": [0.0, 0.0], "end_x": 9.0,
            "pegs": [ { "x": 10.0, "y": 5.0, "zoom": "Wide", "lock": "FullLock", "offset_y": -1.5 },
                      { "x": 20.0, "y": 0.0 } ] }"#;
        let layout = LevelLayout::from_json_str(text).unwrap();
        assert_eq!(layout.pegs[0].zoom, ZoomEffect::Wide);
        assert_eq!(layout.pegs[0].lock, LockEffect::FullLock);
        assert_eq!(layout.pegs[0].offset_y, -1.5);
        assert_eq!(layout.pegs[1].zoom, ZoomEffect::DoNotChange);
        assert_eq!(layout.pegs[1].lock, LockEffect::DoNotChange);
        assert_eq!(layout.pegs[1].radius, 1.0);
    }

    #[test]
    fn test_unknown_effect_is_an_error() {
        let text = r#"{ "id": 1, "name": "A", "player_start": [0.0, 0.0], "end_x": 9.0,
            "pegs": [ { "x": 1.0, "y": 1.0, "lock": "DiagonalLock" } ] }"#;
        let err = LevelLayout::from_json_str(text).unwrap_err();
        assert!(err.starts_with("Failed to parse level JSON"));
    }

    #[test]
    fn test_builtin_levels_parse() {
        let store = LevelStore::builtin().unwrap();
        assert_eq!(store.ids(), vec![1, 2]);
        assert!(!store.get(1).unwrap().pegs.is_empty());
    }

    #[test]
    fn test_next_after_wraps() {
        let store = LevelStore::builtin().unwrap();
        assert_eq!(store.first(), Some(1));
        assert_eq!(store.next_after(1), Some(2));
        assert_eq!(store.next_after(2), Some(1));
    }

    #[test]
    fn test_load_dir_missing_is_an_error() {
        assert!(LevelStore::load_dir("./no/such/levels").is_err());
    }

    #[test]
    fn test_transition_schedule_and_clear() {
        let mut transition = LevelTransition::default();
        assert!(!transition.is_pending());
        transition.schedule(2, 3.0);
        assert_eq!(transition.pending, Some(2));
        transition.clear();
        assert!(!transition.is_pending());
    }
}
