// TOML theme format parser
//
// Native theme format for taleterm. A theme defines the terminal chrome and
// the tag palette: the colors `color` tags may name, and the color used for
// echoed sends.
//
// Format version: 1

use ratatui::style::Color;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Root structure for TOML theme files
#[derive(Debug, Clone, Deserialize)]
pub struct TomlTheme {
    pub meta: ThemeMeta,
    pub ui: UiColors,
    /// Named foreground colors for `color` tags
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    /// Named background colors (falls back to `colors`)
    #[serde(default)]
    pub background_colors: Option<BTreeMap<String, String>>,
    /// Optional echo color (falls back to the "white" palette entry)
    pub sent_text: Option<SentTextColors>,
}

/// Theme metadata
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeMeta {
    pub name: String,
    #[allow(dead_code)] // For future schema evolution
    pub version: u32,
    #[serde(default)]
    #[allow(dead_code)] // Metadata for theme attribution
    pub author: Option<String>,
}

/// Terminal chrome colors
#[derive(Debug, Clone, Deserialize)]
pub struct UiColors {
    pub background: String,
    pub foreground: String,
    pub border: String,
    pub status_bar: String,
    /// Optional muted/secondary text color (falls back to foreground)
    pub muted: Option<String>,
}

/// Echo styling
#[derive(Debug, Clone, Deserialize)]
pub struct SentTextColors {
    /// Palette name or color literal
    pub color: String,
}

impl TomlTheme {
    /// Parse a TOML theme from string
    pub fn from_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Parse a color string to ratatui Color
    /// Supports:
    /// - Hex format: #RRGGBB
    /// - ANSI format: ansi:0-15, ansi:fg, ansi:bg (for terminal-native colors)
    pub fn parse_color(value: &str) -> Color {
        // Handle ANSI color codes (for Terminal theme - inherits terminal colors)
        if let Some(ansi) = value.strip_prefix("ansi:") {
            return match ansi {
                "0" => Color::Black,
                "1" => Color::Red,
                "2" => Color::Green,
                "3" => Color::Yellow,
                "4" => Color::Blue,
                "5" => Color::Magenta,
                "6" => Color::Cyan,
                "7" => Color::Gray,
                "8" => Color::DarkGray,
                "9" => Color::LightRed,
                "10" => Color::LightGreen,
                "11" => Color::LightYellow,
                "12" => Color::LightBlue,
                "13" => Color::LightMagenta,
                "14" => Color::LightCyan,
                "15" => Color::White,
                "fg" => Color::Reset, // Use terminal default foreground
                "bg" => Color::Reset, // Use terminal default background
                _ => Color::White,
            };
        }

        // Handle hex format
        let hex = value.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Color::White; // fallback
        }
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);
        Color::Rgb(r, g, b)
    }

    /// Parse every entry of a named color table
    pub fn parse_table(table: &BTreeMap<String, String>) -> Vec<(String, Color)> {
        table
            .iter()
            .map(|(name, value)| (name.clone(), Self::parse_color(value)))
            .collect()
    }
}
