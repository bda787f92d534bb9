//! Errors raised at the configuration boundary.
//!
//! Composers never fail: empty data, missing fields and degenerate domains are
//! handled as display states or fallbacks. Only parsing and validating a chart
//! description can produce a `ChartError`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid chart description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate series dataKey: {0}")]
    DuplicateDataKey(String),

    #[error("Series dataKey must not be empty (series #{index})")]
    EmptyDataKey { index: usize },

    #[error("Unknown palette: {0}")]
    UnknownPalette(String),
}

impl ChartError {
    /// Short category name, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(_) => "Parse",
            Self::DuplicateDataKey(_) | Self::EmptyDataKey { .. } => "Series",
            Self::UnknownPalette(_) => "Palette",
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChartError::DuplicateDataKey("revenue".to_string());
        assert_eq!(err.to_string(), "Duplicate series dataKey: revenue");

        let err = ChartError::EmptyDataKey { index: 2 };
        assert_eq!(err.to_string(), "Series dataKey must not be empty (series #2)");
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ChartError = parse.into();
        assert_eq!(err.kind(), "Parse");
        assert!(err.to_string().starts_with("Invalid chart description"));
    }
}
