//! String-keyed persistence
//!
//! The game's records and tutorial gates live as individual LocalStorage
//! entries rather than one blob, and the key names are kept from earlier
//! releases so existing players' data carries over. A storage failure
//! (privacy mode, quota) reads as absent and writes as a no-op; the game
//! keeps running without persistence.

use std::collections::HashMap;

use crate::sim::{TutorialFlags, TutorialKind};

/// Minimal key-value backend. Flags are presence-keyed (matching the old
/// `localStorage.getItem(key) != null` checks), numbers are stored as their
/// decimal string form.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);

    fn get_flag(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn set_flag(&mut self, key: &str) {
        self.set(key, "true");
    }

    /// Absent or unparseable values read as `None`.
    fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key)?.parse().ok()
    }

    fn set_number(&mut self, key: &str, value: f64) {
        self.set(key, &value.to_string());
    }
}

/// In-memory store for native builds and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// LocalStorage-backed store (WASM only).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct WebStore;

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for WebStore {
    fn get(&self, key: &str) -> Option<String> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(key).ok())
            .flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if let Some(storage) = storage {
            if storage.set_item(key, value).is_err() {
                log::warn!("failed to persist {key}");
            }
        }
    }
}

/// Read the one-time tutorial gates.
pub fn load_tutorial_flags(store: &impl KeyValueStore) -> TutorialFlags {
    TutorialFlags {
        super_jump: store.get_flag(TutorialKind::SuperJump.flag_key()),
        moving_platform: store.get_flag(TutorialKind::MovingPlatform.flag_key()),
        projectile_shield: store.get_flag(TutorialKind::ProjectileShield.flag_key()),
    }
}

/// Persist a tutorial gate the moment its overlay opens.
pub fn mark_tutorial_seen(store: &mut impl KeyValueStore, kind: TutorialKind) {
    store.set_flag(kind.flag_key());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_presence_keyed() {
        let mut store = MemoryStore::default();
        assert!(!store.get_flag("hasSeenSuperJumpTutorial"));
        store.set_flag("hasSeenSuperJumpTutorial");
        assert!(store.get_flag("hasSeenSuperJumpTutorial"));
    }

    #[test]
    fn numbers_round_trip_and_garbage_reads_absent() {
        let mut store = MemoryStore::default();
        assert_eq!(store.get_number("highestTime"), None);
        store.set_number("highestTime", 12.5);
        assert_eq!(store.get_number("highestTime"), Some(12.5));

        store.set("highestTime", "not a number");
        assert_eq!(store.get_number("highestTime"), None);
    }

    #[test]
    fn tutorial_flags_round_trip() {
        let mut store = MemoryStore::default();
        let flags = load_tutorial_flags(&store);
        assert!(!flags.super_jump && !flags.moving_platform && !flags.projectile_shield);

        mark_tutorial_seen(&mut store, TutorialKind::MovingPlatform);
        let flags = load_tutorial_flags(&store);
        assert!(flags.moving_platform);
        assert!(!flags.super_jump);
    }
}
