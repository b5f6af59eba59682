// Soft wrapping of styled lines to the transcript width
//
// Breaks at character boundaries by display width, so wide (CJK, emoji)
// characters never straddle the edge. Styles are carried onto every row.

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Wrap a line into rows of at most `width` columns
///
/// An empty line still occupies one row.
pub fn wrap(line: &Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![line.clone()];
    }

    let mut rows: Vec<Vec<Span<'static>>> = vec![Vec::new()];
    let mut used = 0usize;

    for span in &line.spans {
        let mut current = String::new();

        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && used > 0 {
                if !current.is_empty() {
                    push_span(&mut rows, std::mem::take(&mut current), span);
                }
                rows.push(Vec::new());
                used = 0;
            }
            current.push(c);
            used += w;
        }

        if !current.is_empty() {
            push_span(&mut rows, current, span);
        }
    }

    rows.into_iter()
        .map(|spans| Line::from(spans).style(line.style))
        .collect()
}

fn push_span(rows: &mut [Vec<Span<'static>>], content: String, template: &Span<'static>) {
    if let Some(row) = rows.last_mut() {
        row.push(Span::styled(content, template.style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Style};

    fn row_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_short_line_is_untouched() {
        let line = Line::from("hello");
        let rows = wrap(&line, 10);
        assert_eq!(rows.len(), 1);
        assert_eq!(row_text(&rows[0]), "hello");
    }

    #[test]
    fn test_empty_line_is_one_row() {
        let rows = wrap(&Line::default(), 10);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].spans.is_empty());
    }

    #[test]
    fn test_wraps_across_spans_keeping_styles() {
        let red = Style::default().fg(Color::Red);
        let line = Line::from(vec![Span::raw("abcd"), Span::styled("efgh", red)]);

        let rows = wrap(&line, 3);
        let texts: Vec<String> = rows.iter().map(row_text).collect();
        assert_eq!(texts, vec!["abc", "def", "gh"]);

        assert_eq!(rows[1].spans[0].content, "d");
        assert_eq!(rows[1].spans[1].content, "ef");
        assert_eq!(rows[1].spans[1].style, red);
        assert_eq!(rows[2].spans[0].style, red);
    }

    #[test]
    fn test_wide_characters_do_not_straddle() {
        let line = Line::from("a日本");
        let rows = wrap(&line, 4);
        let texts: Vec<String> = rows.iter().map(row_text).collect();
        assert_eq!(texts, vec!["a日", "本"]);
    }
}
