use std::path::Path;

use crate::error::ConfigError;
use crate::game::Player;

/// Who controls the Yellow side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Two humans at the keyboard.
    Pvp,
    /// Human (Red) against the minimax opponent (Yellow).
    Pvai,
}

/// Which side makes the first move of the first set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartingSide {
    Red,
    Yellow,
}

impl StartingSide {
    pub fn to_player(self) -> Player {
        match self {
            StartingSide::Red => Player::Red,
            StartingSide::Yellow => Player::Yellow,
        }
    }
}

/// Match and opponent settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Number of sets in the match; odd. The menu of the game offers
    /// 1, 3 or 5, but any odd count is accepted.
    pub best_of: usize,
    /// Look-ahead of the minimax opponent, in plies.
    pub search_depth: usize,
    /// Side that starts the first set; alternates every set after that.
    pub starting_side: StartingSide,
    /// Pause before the computer's move is shown. Presentation pacing
    /// only; zero disables it.
    pub ai_move_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            mode: GameMode::Pvai,
            best_of: 3,
            search_depth: 4,
            starting_side: StartingSide::Red,
            ai_move_delay_ms: 300,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if
    /// the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.best_of == 0 || self.game.best_of % 2 == 0 {
            return Err(ConfigError::Validation(
                "game.best_of must be an odd number >= 1".into(),
            ));
        }
        if self.game.search_depth == 0 {
            return Err(ConfigError::Validation(
                "game.search_depth must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for
    /// creating example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.game.best_of, 3);
        assert_eq!(config.game.search_depth, 4);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[game]
best_of = 5
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.best_of, 5);
        assert_eq!(config.game.search_depth, 4);
        assert_eq!(config.game.mode, GameMode::Pvai);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.game.best_of, AppConfig::default().game.best_of);
    }

    #[test]
    fn test_mode_and_side_parse_lowercase() {
        let toml_str = r#"
[game]
mode = "pvp"
starting_side = "yellow"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.mode, GameMode::Pvp);
        assert_eq!(config.game.starting_side.to_player(), Player::Yellow);
    }

    #[test]
    fn test_validation_rejects_even_best_of() {
        let mut config = AppConfig::default();
        config.game.best_of = 2;
        assert!(config.validate().is_err());
        config.game.best_of = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.game.search_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.game.best_of, 3);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[game]
best_of = 5
search_depth = 2
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.game.best_of, 5);
        assert_eq!(config.game.search_depth, 2);
        // Others are defaults
        assert_eq!(config.game.mode, GameMode::Pvai);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_config.toml");
        std::fs::write(&path, "[game]\nbest_of = 4\n").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
