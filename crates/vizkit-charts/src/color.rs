//! Series color resolution.

use vizkit_core::tokens;

/// Effective color for the series at `index`
///
/// An explicit color wins; otherwise the palette override (or the primary
/// palette when the override is absent or empty) is indexed modulo its length.
pub fn resolve_color(explicit: Option<&str>, index: usize, palette: Option<&[String]>) -> String {
    if let Some(color) = explicit {
        return color.to_string();
    }
    match palette {
        Some(colors) if !colors.is_empty() => colors[index % colors.len()].clone(),
        _ => tokens::color(index).to_string(),
    }
}

/// Colors for a whole series list, in order
pub fn resolve_colors<'a, I>(explicit: I, palette: Option<&[String]>) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    explicit
        .into_iter()
        .enumerate()
        .map(|(i, c)| resolve_color(c, i, palette))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vizkit_core::tokens::palettes;

    #[test]
    fn test_explicit_color_wins() {
        let palette = vec!["#000".to_string()];
        assert_eq!(resolve_color(Some("#abc"), 5, Some(&palette)), "#abc");
    }

    #[test]
    fn test_palette_override_wraps() {
        let palette = vec!["#111".to_string(), "#222".to_string(), "#333".to_string()];
        assert_eq!(resolve_color(None, 0, Some(&palette)), "#111");
        assert_eq!(resolve_color(None, 4, Some(&palette)), "#222");
    }

    #[test]
    fn test_default_palette_is_total() {
        let n = palettes::PRIMARY.len();
        for i in [0, 1, n - 1, n, 10 * n + 3, 1_000_003, usize::MAX] {
            assert_eq!(resolve_color(None, i, None), palettes::PRIMARY[i % n]);
        }
    }

    #[test]
    fn test_empty_override_falls_back() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(resolve_color(None, 2, Some(&empty)), palettes::PRIMARY[2]);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let keys = [None, Some("#f00"), None, None];
        let first = resolve_colors(keys, None);
        let second = resolve_colors(keys, None);
        assert_eq!(first, second);
        assert_eq!(first[1], "#f00");
        assert_eq!(first[2], palettes::PRIMARY[2]);
    }
}
