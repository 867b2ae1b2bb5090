use std::path::PathBuf;

/// Errors reported by the match controller. All of them are recoverable
/// at the call site: a rejected operation leaves the match untouched and
/// the caller simply re-prompts.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("column {0} is out of range or full")]
    IllegalMove(usize),

    #[error("not your turn")]
    NotYourTurn,

    #[error("no legal move remains on the board")]
    NoLegalMove,

    #[error("a match is best-of-N for odd N >= 1, got {0}")]
    InvalidBestOf(usize),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_error_display() {
        assert_eq!(
            MatchError::IllegalMove(9).to_string(),
            "column 9 is out of range or full"
        );
        assert_eq!(MatchError::NotYourTurn.to_string(), "not your turn");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("game.best_of must be odd".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: game.best_of must be odd"
        );
    }
}
