//! Error types for keymix

use thiserror::Error;

/// The main error type for keymix operations
#[derive(Debug, Error)]
pub enum KeymixError {
    /// Malformed clip text. `line` is 1-based, 0 when the position is unknown.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

impl KeymixError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        KeymixError::Parse {
            line,
            message: message.into(),
        }
    }

    /// True for errors caused by malformed clip text
    pub fn is_parse(&self) -> bool {
        matches!(self, KeymixError::Parse { .. } | KeymixError::MissingField(_))
    }
}

/// Result type alias for keymix operations
pub type Result<T> = std::result::Result<T, KeymixError>;

impl From<toml::de::Error> for KeymixError {
    fn from(err: toml::de::Error) -> Self {
        KeymixError::TomlParse(err.to_string())
    }
}
