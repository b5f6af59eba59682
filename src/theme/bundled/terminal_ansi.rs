//! Terminal ANSI - inherits the terminal's own colors

pub const THEME: &str = r##"# Terminal ANSI theme for taleterm
# Uses ANSI color slots so the terminal's color scheme applies

[meta]
name = "Terminal ANSI"
version = 1

[ui]
background = "ansi:bg"
foreground = "ansi:fg"
border = "ansi:8"
status_bar = "ansi:fg"
muted = "ansi:8"

[colors]
black = "ansi:0"
red = "ansi:1"
green = "ansi:2"
yellow = "ansi:3"
blue = "ansi:4"
magenta = "ansi:5"
cyan = "ansi:6"
white = "ansi:7"

[sent_text]
color = "ansi:15"
"##;
