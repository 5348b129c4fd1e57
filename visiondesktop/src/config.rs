//! Desktop settings
//!
//! Read once at startup from `$VISIONOS_CONFIG`, or from `desktop.json` in the
//! platform config directory, then overridden by environment variables. A
//! missing file means defaults; a broken one is logged and ignored.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use visioncore::storage::{self, StorageError};

const CONFIG_ENV: &str = "VISIONOS_CONFIG";
const CONFIG_FILE: &str = "desktop.json";
/// Longest intro card we honour.
const MAX_INTRO_SECONDS: f32 = 60.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: StorageError,
    },
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Go straight to the desktop, without the intro card or CRT animation.
    pub skip_intro: bool,
    /// Seconds the intro card stays up before the CRT animation starts.
    pub intro_seconds: f32,
    pub use_24h_time: bool,
    /// Hand the video URL to the browser when a video window opens.
    pub autoplay_video: bool,
    /// Fixed seed for every random source (food, blinks). Entropy when unset.
    pub rng_seed: Option<u64>,
    pub game_tick_ms: u64,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            skip_intro: false,
            intro_seconds: 4.0,
            use_24h_time: true,
            autoplay_video: true,
            rng_seed: None,
            game_tick_ms: visionsnake::game::TICK_MS,
        }
    }
}

impl DesktopConfig {
    /// Load settings, falling back to defaults on any error.
    pub fn load() -> Self {
        let mut config = match Self::from_file(&Self::path()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("[visiondesktop] {}; using defaults", e);
                Self::default()
            }
        };
        if let Err(e) = config.apply_env(|var| std::env::var(var).ok()) {
            log::warn!("[visiondesktop] {}", e);
        }
        config.sanitize();
        config
    }

    pub fn path() -> PathBuf {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => storage::config_dir("visionos").join(CONFIG_FILE),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let loaded = storage::load_json_optional(path).map_err(|source| ConfigError::Storage {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(loaded.unwrap_or_default())
    }

    /// Apply `VISIONOS_*` overrides. Every valid variable is applied even if
    /// another one is malformed; the first error is returned.
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let mut first_error = None;

        if let Some(value) = get("VISIONOS_SKIP_INTRO") {
            match parse_bool(&value) {
                Some(b) => self.skip_intro = b,
                None => {
                    first_error.get_or_insert(ConfigError::InvalidEnv { var: "VISIONOS_SKIP_INTRO", value });
                }
            }
        }
        if let Some(value) = get("VISIONOS_24H") {
            match parse_bool(&value) {
                Some(b) => self.use_24h_time = b,
                None => {
                    first_error.get_or_insert(ConfigError::InvalidEnv { var: "VISIONOS_24H", value });
                }
            }
        }
        if let Some(value) = get("VISIONOS_SEED") {
            match value.trim().parse() {
                Ok(seed) => self.rng_seed = Some(seed),
                Err(_) => {
                    first_error.get_or_insert(ConfigError::InvalidEnv { var: "VISIONOS_SEED", value });
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn sanitize(&mut self) {
        if !self.intro_seconds.is_finite() || self.intro_seconds < 0.0 {
            self.intro_seconds = Self::default().intro_seconds;
        }
        self.intro_seconds = self.intro_seconds.min(MAX_INTRO_SECONDS);
        if self.game_tick_ms == 0 {
            self.game_tick_ms = Self::default().game_tick_ms;
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let c = DesktopConfig::default();
        assert!(!c.skip_intro);
        assert_eq!(c.intro_seconds, 4.0);
        assert!(c.use_24h_time);
        assert!(c.autoplay_video);
        assert_eq!(c.rng_seed, None);
        assert_eq!(c.game_tick_ms, 120);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let c: DesktopConfig = serde_json::from_str(r#"{"skip_intro": true, "rng_seed": 9}"#).expect("parse");
        assert!(c.skip_intro);
        assert_eq!(c.rng_seed, Some(9));
        assert_eq!(c.intro_seconds, 4.0);
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("visiondesktop_no_such_config.json");
        let c = DesktopConfig::from_file(&path).expect("missing file is fine");
        assert_eq!(c, DesktopConfig::default());
    }

    #[test]
    fn test_broken_file_is_error() {
        let path = std::env::temp_dir().join(format!("visiondesktop_bad_{}.json", std::process::id()));
        std::fs::write(&path, "{ nope").expect("write");
        assert!(matches!(DesktopConfig::from_file(&path), Err(ConfigError::Storage { .. })));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_env_overrides() {
        let mut c = DesktopConfig::default();
        c.apply_env(env(&[("VISIONOS_SKIP_INTRO", "yes"), ("VISIONOS_SEED", "42"), ("VISIONOS_24H", "0")]))
            .expect("valid env");
        assert!(c.skip_intro);
        assert_eq!(c.rng_seed, Some(42));
        assert!(!c.use_24h_time);
    }

    #[test]
    fn test_bad_env_reported_but_others_applied() {
        let mut c = DesktopConfig::default();
        let err = c.apply_env(env(&[("VISIONOS_SEED", "lots"), ("VISIONOS_SKIP_INTRO", "1")]));
        assert!(matches!(err, Err(ConfigError::InvalidEnv { var: "VISIONOS_SEED", .. })));
        assert!(c.skip_intro);
        assert_eq!(c.rng_seed, None);
    }

    #[test]
    fn test_sanitize_rejects_nonsense() {
        let mut c = DesktopConfig {
            intro_seconds: -3.0,
            game_tick_ms: 0,
            ..Default::default()
        };
        c.sanitize();
        assert_eq!(c, DesktopConfig::default());
    }

    #[test]
    fn test_sanitize_caps_huge_intro() {
        let mut c: DesktopConfig = serde_json::from_str(r#"{"intro_seconds": 1e20}"#).expect("parse");
        c.sanitize();
        assert_eq!(c.intro_seconds, MAX_INTRO_SECONDS);
        assert!(Duration::try_from_secs_f32(c.intro_seconds).is_ok());
    }
}
