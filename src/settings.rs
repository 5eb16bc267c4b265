//! Sound settings and preferences
//!
//! Persisted as one JSON blob in LocalStorage, separately from the
//! per-key game records.

use serde::{Deserialize, Serialize};

use crate::consts::{BGM_VOLUME, JUMP_VOLUME_OFFSET, SFX_VOLUME};

/// Player-facing sound preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundSettings {
    /// Background music volume (0.0 - 1.0)
    pub bgm_volume: f32,
    /// Sound effect volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            bgm_volume: BGM_VOLUME,
            sfx_volume: SFX_VOLUME,
            muted: false,
        }
    }
}

impl SoundSettings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "piggy_jump_settings";

    /// Music volume with mute applied
    pub fn effective_bgm(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.bgm_volume.clamp(0.0, 1.0)
        }
    }

    /// Effect volume with mute applied
    pub fn effective_sfx(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// The jump effect plays quieter than the other effects
    pub fn jump_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.sfx_volume + JUMP_VOLUME_OFFSET).clamp(0.0, 1.0)
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded sound settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default sound settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Sound settings saved");
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
