//! Error types for vitrin.

use std::io;

/// Errors produced by vitrin controllers and backends.
#[derive(Debug, thiserror::Error)]
pub enum VitrinError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("element error: {0}")]
    Element(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, VitrinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_display() {
        let e = VitrinError::Backend("style write rejected".into());
        assert_eq!(format!("{e}"), "backend error: style write rejected");
    }

    #[test]
    fn config_error_display() {
        let e = VitrinError::Config("negative interval".into());
        assert_eq!(format!("{e}"), "config error: negative interval");
    }

    #[test]
    fn element_error_display() {
        let e = VitrinError::Element("stale handle 7".into());
        assert_eq!(format!("{e}"), "element error: stale handle 7");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: VitrinError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: VitrinError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: VitrinError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }
}
