//! Tag interpretation
//!
//! Turns split lines into renderer-agnostic primitives. Dispatch for a tag,
//! first match wins:
//!
//! ```text
//! registered handler → tooltip alias → built-in (color, tooltip, sent-text) → group
//! ```
//!
//! Unknown tags fall through to a transparent group so their content is
//! never lost.

pub mod color;
pub mod handlers;
mod registry;

pub use registry::{HandlerRegistry, TagHandler};

use crate::lines::Line;
use crate::tags::{Fragment, Tag, SENT_TEXT};
use crate::theme::Palette;
use ratatui::style::Color;
use std::collections::HashMap;

/// Visual attributes of a styled span
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub underline: bool,
}

impl SpanStyle {
    pub fn foreground(color: Color) -> Self {
        Self {
            foreground: Some(color),
            ..Self::default()
        }
    }

    pub fn underlined() -> Self {
        Self {
            underline: true,
            ..Self::default()
        }
    }
}

/// Interpreted output node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    Text(String),
    Span {
        style: SpanStyle,
        children: Vec<Primitive>,
    },
    Tooltip {
        caption: String,
        children: Vec<Primitive>,
    },
    /// Clickable command
    Action {
        command: String,
        children: Vec<Primitive>,
    },
    /// Transparent container
    Group(Vec<Primitive>),
}

impl Primitive {
    /// Concatenated text of all descendant leaves
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Span { children, .. }
            | Self::Tooltip { children, .. }
            | Self::Action { children, .. }
            | Self::Group(children) => {
                for child in children {
                    child.write_text(out);
                }
            }
        }
    }
}

/// Tag names rendered as tooltips with a fixed caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipAliases(HashMap<String, String>);

impl TooltipAliases {
    pub fn new(aliases: HashMap<String, String>) -> Self {
        Self(aliases)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Default abbreviations for vitals
    pub fn defaults() -> HashMap<String, String> {
        [
            ("ep", "Endurance Points"),
            ("hp", "Health Points"),
            ("sp", "Skill Points"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }
}

impl Default for TooltipAliases {
    fn default() -> Self {
        Self(Self::defaults())
    }
}

/// Walks tag trees and produces primitives
///
/// Holds only borrowed lookup tables; building one per frame is free.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'a> {
    registry: &'a HandlerRegistry,
    palette: &'a Palette,
    aliases: &'a TooltipAliases,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        registry: &'a HandlerRegistry,
        palette: &'a Palette,
        aliases: &'a TooltipAliases,
    ) -> Self {
        Self {
            registry,
            palette,
            aliases,
        }
    }

    /// Interpret a single node
    pub fn interpret(&self, node: &Fragment) -> Primitive {
        match node {
            Fragment::Text(text) => Primitive::Text(text.clone()),
            Fragment::Tag(tag) => self.interpret_tag(tag),
        }
    }

    /// Interpret a list of siblings in order
    pub fn interpret_children(&self, children: &[Fragment]) -> Vec<Primitive> {
        children.iter().map(|child| self.interpret(child)).collect()
    }

    /// Interpret the top-level children of a line
    pub fn interpret_line(&self, line: &Line) -> Vec<Primitive> {
        self.interpret_children(&line.children)
    }

    fn interpret_tag(&self, tag: &Tag) -> Primitive {
        if let Some(handler) = self.registry.get(&tag.name) {
            return handler.render(tag, self);
        }

        if let Some(caption) = self.aliases.get(&tag.name) {
            return Primitive::Tooltip {
                caption: caption.to_string(),
                children: self.interpret_children(&tag.children),
            };
        }

        match tag.name.as_str() {
            "color" => Primitive::Span {
                style: self.color_style(tag),
                children: self.interpret_children(&tag.children),
            },
            "tooltip" => Primitive::Tooltip {
                caption: tag.attribute("text").unwrap_or_default().to_string(),
                children: self.interpret_children(&tag.children),
            },
            SENT_TEXT => Primitive::Span {
                style: SpanStyle::foreground(self.palette.sent_text),
                children: self.interpret_children(&tag.children),
            },
            _ => {
                tracing::trace!("No handler for tag {:?}, rendering children", tag.name);
                Primitive::Group(self.interpret_children(&tag.children))
            }
        }
    }

    fn color_style(&self, tag: &Tag) -> SpanStyle {
        SpanStyle {
            foreground: tag
                .attribute("foreground")
                .and_then(|token| color::resolve_foreground(token, self.palette)),
            background: tag
                .attribute("background")
                .and_then(|token| color::resolve_background(token, self.palette)),
            underline: tag.attribute("underline") == Some("true"),
        }
    }
}
