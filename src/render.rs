// Terminal rendering of interpreted primitives
//
// Styles nest: a span inherits everything its ancestors set and overrides
// only what it sets itself. Tooltips, actions and groups have no terminal
// representation of their own and render their children in place; tooltip
// captions are collected separately for the status bar.

use crate::interpret::{Primitive, SpanStyle};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

impl SpanStyle {
    /// Layer this span's attributes over an inherited style
    pub fn patch(&self, base: Style) -> Style {
        let mut style = base;
        if let Some(fg) = self.foreground {
            style = style.fg(fg);
        }
        if let Some(bg) = self.background {
            style = style.bg(bg);
        }
        if self.underline {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

/// Render one transcript line
pub fn to_line(primitives: &[Primitive], base: Style) -> Line<'static> {
    let mut spans = Vec::new();
    for primitive in primitives {
        push_spans(primitive, base, &mut spans);
    }
    Line::from(spans)
}

fn push_spans(primitive: &Primitive, style: Style, out: &mut Vec<Span<'static>>) {
    match primitive {
        Primitive::Text(text) => {
            if text.is_empty() {
                return;
            }
            // Merge with the previous span when the style is unchanged
            if let Some(last) = out.last_mut() {
                if last.style == style {
                    last.content.to_mut().push_str(text);
                    return;
                }
            }
            out.push(Span::styled(text.clone(), style));
        }
        Primitive::Span {
            style: span_style,
            children,
        } => {
            let style = span_style.patch(style);
            for child in children {
                push_spans(child, style, out);
            }
        }
        Primitive::Tooltip { children, .. }
        | Primitive::Action { children, .. }
        | Primitive::Group(children) => {
            for child in children {
                push_spans(child, style, out);
            }
        }
    }
}

/// Render a line as unstyled text
pub fn plain_text(primitives: &[Primitive]) -> String {
    primitives.iter().map(Primitive::text_content).collect()
}

/// Tooltip captions in a line as "text: caption", outermost first
pub fn captions(primitives: &[Primitive]) -> Vec<String> {
    let mut out = Vec::new();
    for primitive in primitives {
        collect_captions(primitive, &mut out);
    }
    out
}

fn collect_captions(primitive: &Primitive, out: &mut Vec<String>) {
    let children = match primitive {
        Primitive::Text(_) => return,
        Primitive::Tooltip { caption, children } => {
            if !caption.is_empty() {
                out.push(format!("{}: {}", primitive.text_content().trim(), caption));
            }
            children
        }
        Primitive::Span { children, .. }
        | Primitive::Action { children, .. }
        | Primitive::Group(children) => children,
    };
    for child in children {
        collect_captions(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn text(s: &str) -> Primitive {
        Primitive::Text(s.to_string())
    }

    #[test]
    fn test_nested_styles_inherit() {
        let line = to_line(
            &[
                text("a"),
                Primitive::Span {
                    style: SpanStyle::foreground(Color::Red),
                    children: vec![
                        text("b"),
                        Primitive::Span {
                            style: SpanStyle {
                                background: Some(Color::Black),
                                underline: true,
                                ..SpanStyle::default()
                            },
                            children: vec![text("c")],
                        },
                    ],
                },
            ],
            Style::default().fg(Color::Gray),
        );

        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[0].content, "a");
        assert_eq!(line.spans[0].style.fg, Some(Color::Gray));
        assert_eq!(line.spans[1].style.fg, Some(Color::Red));
        assert_eq!(line.spans[2].style.fg, Some(Color::Red));
        assert_eq!(line.spans[2].style.bg, Some(Color::Black));
        assert!(line.spans[2]
            .style
            .add_modifier
            .contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_transparent_wrappers_merge_into_one_span() {
        let primitives = vec![
            text("You see "),
            Primitive::Tooltip {
                caption: "Health Points".into(),
                children: vec![Primitive::Group(vec![text("50")])],
            },
            Primitive::Action {
                command: "look".into(),
                children: vec![text("!")],
            },
        ];

        let line = to_line(&primitives, Style::default());
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "You see 50!");
        assert_eq!(plain_text(&primitives), "You see 50!");
    }

    #[test]
    fn test_captions_collected_in_order() {
        let primitives = vec![
            Primitive::Tooltip {
                caption: "Health Points".into(),
                children: vec![text("50hp")],
            },
            text(" "),
            Primitive::Span {
                style: SpanStyle::default(),
                children: vec![Primitive::Tooltip {
                    caption: "Send \"north\"".into(),
                    children: vec![Primitive::Action {
                        command: "north".into(),
                        children: vec![Primitive::Tooltip {
                            caption: String::new(),
                            children: vec![text(" north ")],
                        }],
                    }],
                }],
            },
        ];

        assert_eq!(
            captions(&primitives),
            vec!["50hp: Health Points", "north: Send \"north\""]
        );
        assert!(captions(&[text("plain")]).is_empty());
    }

    #[test]
    fn test_empty_line() {
        let line = to_line(&[], Style::default());
        assert!(line.spans.is_empty());
        assert_eq!(plain_text(&[]), "");
    }
}
