//! Color token resolution for `color` tags
//!
//! A token is tried, in order, as a palette name, an `r,g,b` triplet, a
//! `256:N` index, a `#rrggbb` hex literal and finally a plain color name.
//! Anything else is unresolved and the span inherits its parent's color.

use crate::theme::Palette;
use ratatui::style::Color;
use std::str::FromStr;

/// Resolve a foreground token
pub fn resolve_foreground(token: &str, palette: &Palette) -> Option<Color> {
    palette
        .foreground(token)
        .or_else(|| resolve_literal(token, palette))
}

/// Resolve a background token
pub fn resolve_background(token: &str, palette: &Palette) -> Option<Color> {
    palette
        .background(token)
        .or_else(|| resolve_literal(token, palette))
}

fn resolve_literal(token: &str, palette: &Palette) -> Option<Color> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    if token.contains(',') {
        return parse_triplet(token);
    }

    if let Some(index) = token.strip_prefix("256:") {
        return index.trim().parse::<u8>().ok().map(palette.indexed);
    }

    if let Some(hex) = token.strip_prefix('#') {
        return parse_hex(hex);
    }

    Color::from_str(token).ok()
}

fn parse_triplet(token: &str) -> Option<Color> {
    let mut parts = token.split(',').map(|p| p.trim().parse::<u8>());
    let (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    Some(Color::Rgb(r, g, b))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
