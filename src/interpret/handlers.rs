//! Standard application tags
//!
//! Game-specific tags that ship with the client but go through the registry
//! like any other custom tag. Callers may override or drop them.

use super::{HandlerRegistry, Interpreter, Primitive, SpanStyle};
use crate::tags::Tag;

/// Clickable command: sends its `send` attribute when activated
pub fn command(tag: &Tag, interpreter: &Interpreter<'_>) -> Primitive {
    let send = tag.attribute("send").unwrap_or_default();

    Primitive::Tooltip {
        caption: format!("Send \"{}\"", send),
        children: vec![Primitive::Action {
            command: send.to_string(),
            children: vec![Primitive::Span {
                style: SpanStyle::underlined(),
                children: interpreter.interpret_children(&tag.children),
            }],
        }],
    }
}

/// Inventory or room item with a name and description
pub fn item(tag: &Tag, interpreter: &Interpreter<'_>) -> Primitive {
    let caption = match (tag.attribute("name"), tag.attribute("description")) {
        (Some(name), Some(description)) => format!("{}: {}", name, description),
        (Some(name), None) => name.to_string(),
        (None, Some(description)) => description.to_string(),
        (None, None) => String::new(),
    };

    Primitive::Tooltip {
        caption,
        children: interpreter.interpret_children(&tag.children),
    }
}

/// Character reference, captioned with the character's name
pub fn character(tag: &Tag, interpreter: &Interpreter<'_>) -> Primitive {
    Primitive::Tooltip {
        caption: tag.attribute("name").unwrap_or_default().to_string(),
        children: interpreter.interpret_children(&tag.children),
    }
}

/// Registry preloaded with the standard tags
pub fn standard() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register("command", command);
    registry.register("item", item);
    registry.register("character", character);
    registry
}
