//! Bundled TOML themes (compiled into binary, extracted on first run)
//!
//! These themes are written to ~/.config/taleterm/themes/ on first run.
//! Users can then modify them freely.

mod classic;
mod nord;
mod terminal_ansi;

pub use classic::THEME as CLASSIC;
pub use nord::THEME as NORD;
pub use terminal_ansi::THEME as TERMINAL_ANSI;

/// A theme compiled into the binary
pub struct BundledTheme {
    pub filename: &'static str,
    pub content: &'static str,
}

/// All bundled themes
pub const BUNDLED_THEMES: &[BundledTheme] = &[
    BundledTheme {
        filename: "Classic.toml",
        content: CLASSIC,
    },
    BundledTheme {
        filename: "Nord.toml",
        content: NORD,
    },
    BundledTheme {
        filename: "Terminal_ANSI.toml",
        content: TERMINAL_ANSI,
    },
];

/// Display names of bundled themes
pub fn list_bundled_themes() -> Vec<String> {
    BUNDLED_THEMES
        .iter()
        .map(|t| t.filename.trim_end_matches(".toml").replace('_', " "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::TomlTheme;

    #[test]
    fn test_bundled_themes_parse() {
        for theme in BUNDLED_THEMES {
            let parsed = TomlTheme::from_str(theme.content);
            assert!(
                parsed.is_ok(),
                "{} failed to parse: {:?}",
                theme.filename,
                parsed.err()
            );
        }
    }

    #[test]
    fn test_list_uses_display_names() {
        let names = list_bundled_themes();
        assert!(names.contains(&"Classic".to_string()));
        assert!(names.contains(&"Terminal ANSI".to_string()));
    }
}
