//! # vizkit-core
//!
//! Design tokens, data model and configuration vocabulary shared by every
//! vizkit chart family. Nothing in this crate renders; it only describes.
//!
//! ## Modules
//!
//! - `tokens` - Palettes, typography, sizing, element styles, theme resolution
//! - `data` - Rows, pie segments, scatter points, gauge thresholds
//! - `config` - Series, axis, legend, tooltip, reference overlay and frame config
//! - `format` - Value formatting strategies
//! - `error` - Configuration-boundary errors

pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod tokens;

pub use config::*;
pub use data::*;
pub use error::{ChartError, Result};
pub use format::*;
pub use tokens::{PaletteName, StyleToken, Theme, ThemeMode, color};

use std::collections::HashSet;

/// Check the series list invariant: every `dataKey` is non-empty and unique
pub fn validate_series<'a, I>(data_keys: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for (index, key) in data_keys.into_iter().enumerate() {
        if key.is_empty() {
            return Err(ChartError::EmptyDataKey { index });
        }
        if !seen.insert(key) {
            return Err(ChartError::DuplicateDataKey(key.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_series() {
        assert!(validate_series(["a", "b"]).is_ok());
        assert!(matches!(
            validate_series(["a", "b", "a"]),
            Err(ChartError::DuplicateDataKey(k)) if k == "a"
        ));
        assert!(matches!(
            validate_series(["a", ""]),
            Err(ChartError::EmptyDataKey { index: 1 })
        ));
    }
}
