// TUI application state
//
// Owns the session and everything needed to draw it: the handler registry,
// theme and alias table for interpretation, a render cache keyed by line id,
// and the transcript scroll position.

use super::scroll::ScrollState;
use crate::config::Config;
use crate::interpret::{handlers, HandlerRegistry, Interpreter, TooltipAliases};
use crate::lines::LineId;
use crate::logging::LogBuffer;
use crate::render;
use crate::session::{Action, Session};
use crate::theme::{IndexedResolver, Theme, ThemeConfig};
use ratatui::style::Style;
use ratatui::text::Line;
use std::collections::HashMap;
use std::time::Instant;

/// A transcript line ready to draw
struct RenderedLine {
    line: Line<'static>,
    /// Tooltip captions, shown in the status bar since a terminal cannot hover
    captions: Vec<String>,
}

/// Main application state for the TUI
pub struct App {
    /// Transcript and connection state
    pub session: Session,

    /// Handlers for custom tags
    registry: HandlerRegistry,

    /// Tags rendered as fixed-caption tooltips
    aliases: TooltipAliases,

    /// Current color theme
    pub theme: Theme,

    theme_config: ThemeConfig,
    indexed: IndexedResolver,

    /// Interpreted lines, dropped when the session retires them
    cache: HashMap<LineId, RenderedLine>,

    /// Transcript scroll position (in wrapped rows)
    pub scroll: ScrollState,

    /// Log buffer for the status bar and log pane
    pub log_buffer: LogBuffer,

    /// Whether the log pane is visible
    pub show_logs: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// What feeds the session, for the title bar
    pub source_label: String,

    /// When the app started (for uptime display)
    pub start_time: Instant,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer, source_label: impl Into<String>) -> Self {
        let theme_config = ThemeConfig {
            use_theme_background: config.use_theme_background,
        };
        let indexed = config.terminal.indexed_colors.resolver();

        let mut theme = Theme::by_name_with_config(&config.theme, &theme_config);
        theme.palette = theme.palette.with_indexed(indexed);

        let session = Session::new(config.terminal.max_lines, config.terminal.echo_newline);
        let registry = handlers::standard();
        let aliases = TooltipAliases::new(config.tooltips.clone());

        tracing::debug!(
            "Transcript holds {} lines, echo newline {}, {} tag handlers ({}), {} tooltip aliases",
            session.buffer().capacity(),
            session.echo_policy().as_str(),
            registry.len(),
            registry.names().join(", "),
            aliases.len(),
        );

        Self {
            session,
            registry,
            aliases,
            theme,
            theme_config,
            indexed,
            cache: HashMap::new(),
            scroll: ScrollState::new(),
            log_buffer,
            show_logs: false,
            should_quit: false,
            source_label: source_label.into(),
            start_time: Instant::now(),
        }
    }

    /// Apply a session action and forget lines that are no longer shown
    pub fn apply(&mut self, action: Action) {
        for id in self.session.apply(action) {
            self.cache.remove(&id);
        }
    }

    /// Interpret every displayed line that is not cached yet
    pub fn refresh_cache(&mut self) {
        let interpreter = Interpreter::new(&self.registry, &self.theme.palette, &self.aliases);
        for line in self.session.lines() {
            self.cache.entry(line.id).or_insert_with(|| {
                let primitives = interpreter.interpret_line(line);
                RenderedLine {
                    line: render::to_line(&primitives, Style::default()),
                    captions: render::captions(&primitives),
                }
            });
        }
    }

    /// Rendered lines in transcript order
    ///
    /// Lines missing from the cache (call `refresh_cache` first) are skipped.
    pub fn rendered_lines(&self) -> impl Iterator<Item = &Line<'static>> {
        self.session
            .lines()
            .filter_map(move |line| self.cache.get(&line.id))
            .map(|rendered| &rendered.line)
    }

    /// Captions of the newest displayed line that has any
    pub fn latest_captions(&self) -> Option<&[String]> {
        self.session
            .lines()
            .rev()
            .filter_map(|line| self.cache.get(&line.id))
            .map(|rendered| rendered.captions.as_slice())
            .find(|captions| !captions.is_empty())
    }

    #[cfg(test)]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Switch to the next available theme
    pub fn cycle_theme(&mut self) {
        let themes = Theme::list_available();
        if themes.is_empty() {
            return;
        }

        let current = themes
            .iter()
            .position(|name| name.eq_ignore_ascii_case(&self.theme.name));
        let next = match current {
            Some(i) => &themes[(i + 1) % themes.len()],
            None => &themes[0],
        };

        let mut theme = Theme::by_name_with_config(next, &self.theme_config);
        theme.palette = theme.palette.with_indexed(self.indexed);
        tracing::info!("Theme: {}", theme.name);
        self.theme = theme;

        // Colors are baked into rendered lines
        self.cache.clear();
    }

    /// Uptime as H:MM:SS
    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
