//! Transcript settings: buffer size, echo handling and indexed colors

use crate::buffer::DEFAULT_MAX_LINES;
use crate::lines::EchoNewline;
use crate::theme::{terminal_indexed, xterm_256, IndexedResolver};
use serde::Deserialize;

/// How `256:N` color tokens are turned into terminal colors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexedColors {
    /// Resolve to the standard xterm RGB values
    #[default]
    Rgb,
    /// Emit the index and let the terminal's own table decide
    Terminal,
}

impl IndexedColors {
    /// Parse mode string from config
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "terminal" | "indexed" => Self::Terminal,
            _ => Self::Rgb,
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Terminal => "terminal",
        }
    }

    pub fn resolver(&self) -> IndexedResolver {
        match self {
            Self::Rgb => xterm_256,
            Self::Terminal => terminal_indexed,
        }
    }
}

/// Transcript configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalConfig {
    /// Lines kept before the oldest are evicted
    pub max_lines: usize,
    /// When to swallow the newline that follows an echoed send
    pub echo_newline: EchoNewline,
    /// Resolution of `256:N` color tokens
    pub indexed_colors: IndexedColors,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            echo_newline: EchoNewline::default(),
            indexed_colors: IndexedColors::default(),
        }
    }
}

/// Terminal settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileTerminal {
    pub max_lines: Option<usize>,
    pub echo_newline: Option<String>,
    pub indexed_colors: Option<String>,
}

impl TerminalConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileTerminal>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            max_lines: file.max_lines.unwrap_or(defaults.max_lines),
            echo_newline: file
                .echo_newline
                .map(|s| EchoNewline::from_str(&s))
                .unwrap_or(defaults.echo_newline),
            indexed_colors: file
                .indexed_colors
                .map(|s| IndexedColors::from_str(&s))
                .unwrap_or(defaults.indexed_colors),
        }
    }
}
