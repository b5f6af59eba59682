// UI rendering logic
//
// Layout, top to bottom:
// - Transcript (fills remaining space, bordered, scrollable)
// - Log pane (optional, toggled with 'l')
// - Status bar (1 line)

use super::app::App;
use super::wrap::wrap;
use crate::logging::{LogEntry, LogLevel};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{
        Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Height of the log pane including borders
const LOG_PANE_HEIGHT: u16 = 8;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let mut constraints = vec![Constraint::Min(3)];
    if app.show_logs {
        constraints.push(Constraint::Length(LOG_PANE_HEIGHT));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    render_transcript(f, chunks[0], app);
    if app.show_logs {
        render_logs_panel(f, chunks[1], app);
    }
    render_status(f, chunks[chunks.len() - 1], app);
}

fn render_transcript(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let base = Style::default().fg(theme.foreground).bg(theme.background);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" taleterm · {} ", app.source_label))
        .style(base);

    let inner = block.inner(area);
    f.render_widget(block, area);

    // Leave a column for the scrollbar
    let width = inner.width.saturating_sub(1) as usize;
    let height = inner.height as usize;

    app.refresh_cache();
    let rows: Vec<Line<'static>> = app
        .rendered_lines()
        .flat_map(|line| wrap(line, width))
        .collect();

    app.scroll.update_dimensions(rows.len(), height);
    let (start, end) = app.scroll.visible_range();
    let visible = rows[start..end].to_vec();

    f.render_widget(Paragraph::new(visible).style(base), inner);

    if app.scroll.needs_scrollbar() {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));

        let mut scrollbar_state =
            ScrollbarState::new(app.scroll.max_offset()).position(app.scroll.offset());

        f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn render_logs_panel(f: &mut Frame, area: Rect, app: &App) {
    // Get recent log entries from buffer
    let height = area.height.saturating_sub(2) as usize; // Account for borders
    let log_entries = app.log_buffer.recent(height);

    // Convert log entries to list items with color coding
    let items: Vec<ListItem> = log_entries
        .iter()
        .map(|entry| {
            ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border))
            .title(" Logs "),
    );

    f.render_widget(list, area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let session = &app.session;

    let connection = if session.is_connected() {
        "● connected"
    } else {
        "○ disconnected"
    };
    let follow = if app.scroll.auto_follow {
        "follow"
    } else {
        "paused"
    };

    let mut status = format!(
        " {} │ {} lines │ {} │ {} │ {}",
        connection,
        session.line_count(),
        follow,
        theme.name,
        app.uptime(),
    );

    if let Some(at) = session.last_event_at() {
        status.push_str(&format!(" │ last event {}", at.format("%H:%M:%S")));
    }

    if let Some(captions) = app.latest_captions() {
        status.push_str(" │ ");
        status.push_str(&captions.join(" · "));
    }

    if !app.show_logs {
        if let Some(entry) = app.log_buffer.latest() {
            status.push_str(" │ ");
            status.push_str(&entry.message);
        }
    }

    // Dim the whole bar once the source has gone away
    let fg = if session.is_connected() {
        theme.status_bar
    } else {
        theme.muted
    };

    let status = truncate_to_width(&status, area.width as usize);
    let paragraph = Paragraph::new(status).style(
        Style::default()
            .fg(fg)
            .bg(theme.background)
            .add_modifier(Modifier::DIM),
    );
    f.render_widget(paragraph, area);
}

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.target,
        entry.message
    )
}

/// Get color style for log level
fn log_level_style(level: &LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Info => Style::default().fg(Color::Blue),
        LogLevel::Debug => Style::default().fg(Color::Gray),
        LogLevel::Trace => Style::default().fg(Color::DarkGray),
    }
}

/// Cut a string to `max` display columns, ending in an ellipsis when cut
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_strings_untouched() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn test_truncate_respects_wide_characters() {
        // Each CJK character is two columns wide
        let cut = truncate_to_width("日本語テキスト", 6);
        assert_eq!(cut, "日本…");
        assert!(cut.width() <= 6);
    }
}
