// Theme system
//
// Architecture:
// - TomlTheme: native file format (chrome colors + tag palette)
// - Theme: final resolved theme with all colors ready for use
// - Palette: the tag color lookup table handed to the interpreter
//
// Theme loading priority:
// 1. External TOML themes from ~/.config/taleterm/themes/*.toml
// 2. Bundled themes (compiled in, extracted on first run)
// 3. Fallback to hardcoded default

mod bundled;
mod palette;
mod toml_format;

pub use palette::{terminal_indexed, xterm_256, IndexedResolver, Palette};
pub use toml_format::TomlTheme;

use ratatui::style::Color;
use std::path::PathBuf;

/// Name of the theme used when none is configured
pub const DEFAULT_THEME: &str = "Classic";

/// Theme configuration options
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            use_theme_background: true,
        }
    }
}

/// Complete resolved theme ready for use in the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,

    // ─── UI Element Colors ───────────────────────────────────
    pub border: Color,
    pub status_bar: Color,
    pub muted: Color,

    // ─── Tag Palette ─────────────────────────────────────────
    pub palette: Palette,
}

impl Theme {
    /// Load theme by name with default configuration
    #[cfg(test)]
    pub fn by_name(name: &str) -> Self {
        Self::by_name_with_config(name, &ThemeConfig::default())
    }

    /// Load theme by name with custom configuration
    pub fn by_name_with_config(name: &str, config: &ThemeConfig) -> Self {
        if let Some(theme) = Self::load_toml(name, config) {
            return theme;
        }

        tracing::warn!("Theme {:?} not found, using built-in default", name);
        Self::hardcoded_default(config)
    }

    /// Load from TOML theme file or bundled theme
    fn load_toml(name: &str, config: &ThemeConfig) -> Option<Self> {
        let normalized = name.replace(' ', "_");

        // Try external TOML file first (as written, then with underscores)
        if let Some(themes_dir) = Self::themes_dir() {
            for candidate in [name, normalized.as_str()] {
                let path = themes_dir.join(format!("{}.toml", candidate));
                if !path.exists() {
                    continue;
                }
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match TomlTheme::from_str(&contents) {
                        Ok(toml_theme) => return Some(Self::from_toml(toml_theme, config)),
                        Err(e) => {
                            tracing::warn!("Invalid theme file {}: {}", path.display(), e);
                        }
                    },
                    Err(e) => tracing::warn!("Cannot read theme {}: {}", path.display(), e),
                }
            }
        }

        // Try bundled themes (compiled into binary)
        let filename = format!("{}.toml", normalized);
        bundled::BUNDLED_THEMES
            .iter()
            .find(|theme| theme.filename.eq_ignore_ascii_case(&filename))
            .and_then(|theme| TomlTheme::from_str(theme.content).ok())
            .map(|toml_theme| Self::from_toml(toml_theme, config))
    }

    /// Get themes directory path
    fn themes_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".config").join("taleterm").join("themes"))
    }

    /// Create theme from native TOML format
    pub fn from_toml(toml: TomlTheme, config: &ThemeConfig) -> Self {
        let parse = TomlTheme::parse_color;

        let background = if config.use_theme_background {
            parse(&toml.ui.background)
        } else {
            Color::Reset
        };
        let foreground = parse(&toml.ui.foreground);

        let colors = TomlTheme::parse_table(&toml.colors)
            .into_iter()
            .collect::<std::collections::HashMap<_, _>>();

        // Background table is optional: share the foreground names when absent
        let background_colors = match &toml.background_colors {
            Some(table) => TomlTheme::parse_table(table).into_iter().collect(),
            None => colors.clone(),
        };

        // Echo color may name a palette entry or be a literal
        let sent_text = match &toml.sent_text {
            Some(sent) => colors
                .get(&sent.color)
                .copied()
                .unwrap_or_else(|| parse(&sent.color)),
            None => colors.get("white").copied().unwrap_or(foreground),
        };

        Self {
            name: toml.meta.name.clone(),
            background,
            foreground,
            border: parse(&toml.ui.border),
            status_bar: parse(&toml.ui.status_bar),
            muted: toml
                .ui
                .muted
                .as_ref()
                .map(|m| parse(m))
                .unwrap_or(foreground),
            palette: Palette {
                colors,
                background_colors,
                sent_text,
                indexed: xterm_256,
            },
        }
    }

    /// Hardcoded fallback when no themes can be loaded
    fn hardcoded_default(config: &ThemeConfig) -> Self {
        let background = if config.use_theme_background {
            Color::Rgb(0x1a, 0x20, 0x2c)
        } else {
            Color::Reset
        };

        Self {
            name: "Classic (Fallback)".to_string(),
            background,
            foreground: Color::Rgb(0xa0, 0xae, 0xc0),
            border: Color::Rgb(0x4a, 0x55, 0x68),
            status_bar: Color::Rgb(0xcb, 0xd5, 0xe0),
            muted: Color::Rgb(0x71, 0x80, 0x96),
            palette: Palette::classic(),
        }
    }

    /// List all available themes (bundled + external)
    pub fn list_available() -> Vec<String> {
        let mut themes = bundled::list_bundled_themes();

        if let Some(themes_dir) = Self::themes_dir() {
            if let Ok(entries) = std::fs::read_dir(themes_dir) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.extension().is_some_and(|ext| ext == "toml") {
                        if let Some(stem) = path.file_stem() {
                            // Convert filename format (underscore) to display format (space)
                            let display_name = stem.to_string_lossy().replace('_', " ");
                            if !themes.iter().any(|t| t.eq_ignore_ascii_case(&display_name)) {
                                themes.push(display_name);
                            }
                        }
                    }
                }
            }
        }

        themes
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::hardcoded_default(&ThemeConfig::default())
    }
}

/// Ensure themes directory exists and extract bundled themes on first run
pub fn ensure_themes_extracted() {
    let Some(themes_dir) = Theme::themes_dir() else {
        return;
    };

    // Create directory if needed
    if std::fs::create_dir_all(&themes_dir).is_err() {
        return;
    }

    // Check if we've already extracted (marker file)
    let marker = themes_dir.join(".extracted_v1");
    if marker.exists() {
        return;
    }

    // Extract bundled TOML themes
    for theme in bundled::BUNDLED_THEMES {
        let path = themes_dir.join(theme.filename);
        // Only write if file doesn't exist (don't overwrite user modifications)
        if !path.exists() {
            let _ = std::fs::write(&path, theme.content);
        }
    }

    // Create marker file
    let _ = std::fs::write(&marker, "1");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled(name: &str) -> Theme {
        let filename = format!("{}.toml", name.replace(' ', "_"));
        let content = bundled::BUNDLED_THEMES
            .iter()
            .find(|t| t.filename == filename)
            .map(|t| t.content)
            .unwrap();
        Theme::from_toml(TomlTheme::from_str(content).unwrap(), &ThemeConfig::default())
    }

    #[test]
    fn test_classic_matches_hardcoded_palette() {
        let theme = bundled("Classic");
        let classic = Palette::classic();

        assert_eq!(theme.name, "Classic");
        assert_eq!(theme.palette.colors, classic.colors);
        assert_eq!(theme.palette.background_colors, classic.background_colors);
        assert_eq!(theme.palette.sent_text, classic.sent_text);
    }

    #[test]
    fn test_background_table_falls_back_to_colors() {
        let theme = bundled("Nord");
        assert_eq!(theme.palette.background("red"), theme.palette.foreground("red"));
        assert_eq!(theme.palette.sent_text, Color::Rgb(0xec, 0xef, 0xf4));
    }

    #[test]
    fn test_terminal_ansi_uses_color_slots() {
        let theme = bundled("Terminal ANSI");
        assert_eq!(theme.background, Color::Reset);
        assert_eq!(theme.palette.sent_text, Color::White);
        assert_eq!(theme.palette.foreground("red"), Some(Color::Red));
    }

    #[test]
    fn test_terminal_background_toggle() {
        let toml = TomlTheme::from_str(bundled::CLASSIC).unwrap();
        let theme = Theme::from_toml(
            toml,
            &ThemeConfig {
                use_theme_background: false,
            },
        );
        assert_eq!(theme.background, Color::Reset);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let theme = Theme::by_name("definitely not a theme");
        assert_eq!(theme.name, "Classic (Fallback)");
    }
}
