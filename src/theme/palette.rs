// Tag color palette
//
// The lookup table the interpreter consults for `color` and `sent-text`
// tags: named foreground and background colors plus the resolver used for
// `256:N` indexed tokens. Values come from the active theme and can be
// swapped wholesale.

use ratatui::style::Color;
use std::collections::HashMap;

/// Resolves an index of the 256-color palette to a concrete color
pub type IndexedResolver = fn(u8) -> Color;

/// Color lookup table for tag rendering
#[derive(Debug, Clone)]
pub struct Palette {
    /// Named foreground colors (`"red"` -> `#d71e00`)
    pub colors: HashMap<String, Color>,

    /// Named background colors
    pub background_colors: HashMap<String, Color>,

    /// Color of locally echoed sends
    pub sent_text: Color,

    /// Resolver for `256:N` tokens
    pub indexed: IndexedResolver,
}

/// Standard xterm palette, resolved to RGB so output does not depend on the
/// terminal's own color table
pub fn xterm_256(index: u8) -> Color {
    const BASIC: [(u8, u8, u8); 16] = [
        (0, 0, 0),
        (128, 0, 0),
        (0, 128, 0),
        (128, 128, 0),
        (0, 0, 128),
        (128, 0, 128),
        (0, 128, 128),
        (192, 192, 192),
        (128, 128, 128),
        (255, 0, 0),
        (0, 255, 0),
        (255, 255, 0),
        (0, 0, 255),
        (255, 0, 255),
        (0, 255, 255),
        (255, 255, 255),
    ];
    const CUBE: [u8; 6] = [0, 95, 135, 175, 215, 255];

    match index {
        0..=15 => {
            let (r, g, b) = BASIC[index as usize];
            Color::Rgb(r, g, b)
        }
        16..=231 => {
            let i = index - 16;
            Color::Rgb(
                CUBE[(i / 36) as usize],
                CUBE[((i / 6) % 6) as usize],
                CUBE[(i % 6) as usize],
            )
        }
        232..=255 => {
            let level = 8 + (index - 232) * 10;
            Color::Rgb(level, level, level)
        }
    }
}

/// Leave indexed colors to the terminal
pub fn terminal_indexed(index: u8) -> Color {
    Color::Indexed(index)
}

impl Palette {
    /// Look up a named foreground color
    pub fn foreground(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    /// Look up a named background color
    pub fn background(&self, name: &str) -> Option<Color> {
        self.background_colors.get(name).copied()
    }

    /// Replace the `256:N` resolver
    pub fn with_indexed(mut self, indexed: IndexedResolver) -> Self {
        self.indexed = indexed;
        self
    }

    /// The classic web client colors
    pub fn classic() -> Self {
        let named = |pairs: &[(&str, (u8, u8, u8))]| -> HashMap<String, Color> {
            pairs
                .iter()
                .map(|(name, (r, g, b))| (name.to_string(), Color::Rgb(*r, *g, *b)))
                .collect()
        };

        let shared = [
            ("red", (0xd7, 0x1e, 0x00)),
            ("green", (0x5d, 0xa6, 0x02)),
            ("yellow", (0xcf, 0xad, 0x00)),
            ("blue", (0x41, 0x7a, 0xb3)),
            ("magenta", (0x88, 0x65, 0x8d)),
            ("cyan", (0x00, 0xa7, 0xaa)),
            ("white", (0xdb, 0xde, 0xd8)),
        ];

        let mut colors = named(&shared);
        colors.insert("black".to_string(), Color::Rgb(0x37, 0x37, 0x37));

        let mut background_colors = named(&shared);
        background_colors.insert("black".to_string(), Color::Rgb(0, 0, 0));

        Self {
            sent_text: Color::Rgb(0xdb, 0xde, 0xd8),
            colors,
            background_colors,
            indexed: xterm_256,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}
