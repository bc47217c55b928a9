//! Game settings and preferences
//!
//! Loaded once at startup from a JSON file next to the binary. A missing file
//! means defaults; a malformed one is a fatal error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Default settings file name
pub const SETTINGS_FILE: &str = "frenzy_settings.json";

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum simultaneous cosmetic effects on the player
    pub fn max_effects(&self) -> usize {
        match self {
            QualityPreset::Low => 2,
            QualityPreset::Medium => 8,
            QualityPreset::High => 32,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cosmetic quality preset
    pub quality: QualityPreset,

    // === Window ===
    pub window_width: f32,
    pub window_height: f32,

    // === Session ===
    /// RNG seed (None = derive from clock)
    pub seed: Option<u64>,
    /// Lives at the start of a run
    pub starting_lives: u8,
    /// Autopilot steers the player (demo/attract mode)
    pub autopilot: bool,
    /// Stop after this many rendered frames (headless runs)
    pub max_frames: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Crossfade length between music tracks (seconds)
    pub music_crossfade: f32,

    // === Paths ===
    /// Directory holding sound effect files (None = audio disabled)
    pub audio_dir: Option<PathBuf>,
    /// Directory holding textures and fonts (None = untextured rendering)
    pub asset_dir: Option<PathBuf>,
    /// Leaderboard file
    pub highscores_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            window_width: ARENA_WIDTH,
            window_height: ARENA_HEIGHT,

            seed: None,
            starting_lives: STARTING_LIVES,
            autopilot: true,
            max_frames: Some(60 * 90),

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            music_crossfade: 1.0,

            audio_dir: None,
            asset_dir: None,
            highscores_path: PathBuf::from("frenzy_highscores.json"),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective sound effect volume
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Effective music volume
    pub fn effective_music_volume(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    /// Load settings from `path`, falling back to defaults if it doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "seed": 7, "autopilot": false }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert!(!settings.autopilot);
        assert_eq!(settings.starting_lives, STARTING_LIVES);
        assert_eq!(settings.quality, QualityPreset::Medium);
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("frenzy_settings_does_not_exist.json");
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.window_width, ARENA_WIDTH);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let path = std::env::temp_dir().join(format!("frenzy_bad_settings_{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(crate::GameError::Settings(_))));
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::from_preset(QualityPreset::High);
        settings.master_volume = 0.5;
        settings.sfx_volume = 0.5;
        assert!((settings.effective_sfx_volume() - 0.25).abs() < 1e-6);
        assert_eq!(QualityPreset::parse("HIGH"), Some(QualityPreset::High));
        assert_eq!(settings.quality.as_str(), "High");
    }
}
