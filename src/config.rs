/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to the classic defaults if the file is missing or incomplete.

use log::warn;
use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::error::GameError;

/// Pursuer count above this still works but crowds small fields.
pub const RECOMMENDED_MAX_PURSUERS: usize = 3;

/// Largest accepted `field_size`. Keeps `size²` and signed coordinates in range.
pub const MAX_FIELD_SIZE: usize = 1000;

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Cells per side.
    pub field_size: usize,
    /// Share of cells covered by barriers, 0..=100.
    pub barrier_percent: u32,
    pub pursuers: usize,
    pub tick_rate_ms: u64,
    /// Fixed RNG seed; `None` picks one from the clock.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field_size: default_field_size(),
            barrier_percent: default_barriers(),
            pursuers: default_pursuers(),
            tick_rate_ms: default_tick_rate(),
            seed: None,
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    speed: TomlSpeed,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_field_size")]
    field_size: usize,
    #[serde(default = "default_barriers")]
    barriers: u32,
    #[serde(default = "default_pursuers")]
    pursuers: usize,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

// ── Defaults ──

fn default_field_size() -> usize { 10 }
fn default_barriers() -> u32 { 15 }
fn default_pursuers() -> usize { 2 }
fn default_tick_rate() -> u64 { 500 }

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            field_size: default_field_size(),
            barriers: default_barriers(),
            pursuers: default_pursuers(),
            seed: None,
        }
    }
}

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { tick_rate_ms: default_tick_rate() }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(t: TomlConfig) -> Self {
        GameConfig {
            field_size: t.game.field_size,
            barrier_percent: t.game.barriers,
            pursuers: t.game.pursuers,
            tick_rate_ms: t.speed.tick_rate_ms,
            seed: t.game.seed,
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        load_toml(&candidate_dirs()).into()
    }

    /// Parse a config document. Absent keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(Into::into)
    }

    /// Reject values the game cannot run with.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(1..=MAX_FIELD_SIZE).contains(&self.field_size) {
            return Err(GameError::InvalidConfig(format!(
                "field_size must be 1..={MAX_FIELD_SIZE}, got {}",
                self.field_size
            )));
        }
        if self.barrier_percent > 100 {
            return Err(GameError::InvalidConfig(format!(
                "barriers must be 0..=100 percent, got {}",
                self.barrier_percent
            )));
        }
        if self.pursuers < 1 {
            return Err(GameError::InvalidConfig("at least one pursuer is required".into()));
        }
        if self.tick_rate_ms < 1 {
            return Err(GameError::InvalidConfig("tick_rate_ms must be at least 1".into()));
        }
        if self.pursuers > RECOMMENDED_MAX_PURSUERS {
            warn!(
                "{} pursuers configured; more than {} makes the game very short",
                self.pursuers, RECOMMENDED_MAX_PURSUERS
            );
        }
        Ok(())
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        warn!("config.toml parse error: {e}; using default settings");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    warn!("could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = GameConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.field_size, 10);
        assert_eq!(cfg.barrier_percent, 15);
        assert_eq!(cfg.pursuers, 2);
        assert_eq!(cfg.tick_rate_ms, 500);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let cfg = GameConfig::from_toml_str(
            "[game]\nfield_size = 5\nseed = 42\n\n[speed]\ntick_rate_ms = 120\n",
        ).unwrap();
        assert_eq!(cfg.field_size, 5);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.tick_rate_ms, 120);
        assert_eq!(cfg.pursuers, 2);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(GameConfig::from_toml_str("[game]\nfield_size = \"big\"").is_err());
    }

    #[test]
    fn validate_bounds() {
        assert!(GameConfig::default().validate().is_ok());
        let bad = [
            GameConfig { field_size: 0, ..GameConfig::default() },
            GameConfig { field_size: MAX_FIELD_SIZE + 1, ..GameConfig::default() },
            GameConfig { field_size: usize::MAX, ..GameConfig::default() },
            GameConfig { barrier_percent: 101, ..GameConfig::default() },
            GameConfig { pursuers: 0, ..GameConfig::default() },
            GameConfig { tick_rate_ms: 0, ..GameConfig::default() },
        ];
        for cfg in bad {
            assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))), "{cfg:?}");
        }
    }

    #[test]
    fn largest_field_is_accepted() {
        let cfg = GameConfig { field_size: MAX_FIELD_SIZE, ..GameConfig::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn many_pursuers_only_warn() {
        let cfg = GameConfig { pursuers: 5, ..GameConfig::default() };
        assert!(cfg.validate().is_ok());
    }
}
