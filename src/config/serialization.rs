//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize the tooltip alias table, sorted for deterministic output
    pub(super) fn tooltips_to_toml(&self) -> String {
        let mut keys: Vec<_> = self.tooltips.keys().collect();
        keys.sort();

        let mut output = String::new();
        for name in keys {
            output.push_str(&format!("{} = {:?}\n", toml_key(name), self.tooltips[name]));
        }
        output
    }

    /// Render the full config file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# taleterm configuration

# Theme: Classic, Nord, Terminal ANSI, or any file in ~/.config/taleterm/themes
theme = {theme:?}

# Use theme's background color (true) or terminal's default (false)
use_theme_background = {use_bg}

# Transcript settings
[terminal]
# Lines kept before the oldest are dropped
max_lines = {max_lines}
# Swallow the newline a server sends right after an echoed command:
# always, sequences (only for list payloads), never
echo_newline = "{echo_newline}"
# 256-color tokens: rgb (standard xterm values) or terminal (terminal palette)
indexed_colors = "{indexed_colors}"

# Tags shown as tooltips with a fixed caption
[tooltips]
{tooltips}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix:?}
"#,
            theme = self.theme,
            use_bg = self.use_theme_background,
            max_lines = self.terminal.max_lines,
            echo_newline = self.terminal.echo_newline.as_str(),
            indexed_colors = self.terminal.indexed_colors.as_str(),
            tooltips = self.tooltips_to_toml(),
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}

/// Bare keys when possible, quoted otherwise
fn toml_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        key.to_string()
    } else {
        format!("{:?}", key)
    }
}
