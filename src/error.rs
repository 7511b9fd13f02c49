use std::path::PathBuf;

/// Errors raised when a move cannot be placed on the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range (expected 0..7)")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,
}

/// Errors raised by the search engine.
///
/// These are contract violations on the caller's side, not transient faults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal move: the board is full")]
    NoLegalMove,
}

/// Errors that can occur when replaying a move sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid column '{ch}' at position {index} (expected 1-7)")]
    InvalidCharacter { index: usize, ch: char },

    #[error("illegal move at position {index}: {source}")]
    IllegalMove {
        index: usize,
        #[source]
        source: MoveError,
    },
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
    fn test_move_error_display() {
        assert_eq!(MoveError::ColumnFull(3).to_string(), "column 3 is full");
        assert_eq!(
            MoveError::InvalidColumn(9).to_string(),
            "column 9 is out of range (expected 0..7)"
        );
    }

    #[test]
    fn test_search_error_display() {
        assert_eq!(
            SearchError::NoLegalMove.to_string(),
            "no legal move: the board is full"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::IllegalMove {
            index: 6,
            source: MoveError::ColumnFull(0),
        };
        assert_eq!(err.to_string(), "illegal move at position 6: column 0 is full");

        let err = ParseError::InvalidCharacter { index: 2, ch: '8' };
        assert_eq!(
            err.to_string(),
            "invalid column '8' at position 2 (expected 1-7)"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("search.depth must be in 1..=42".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: search.depth must be in 1..=42"
        );
    }
}
