//! Nord - Arctic, bluish color palette

pub const THEME: &str = r##"# Nord theme for taleterm
# Arctic, bluish color palette

[meta]
name = "Nord"
version = 1
author = "iTerm2-Color-Schemes"

[ui]
background = "#2e3440"
foreground = "#d8dee9"
border = "#4c566a"
status_bar = "#d8dee9"
muted = "#4c566a"

[colors]
black = "#3b4252"
red = "#bf616a"
green = "#a3be8c"
yellow = "#ebcb8b"
blue = "#81a1c1"
magenta = "#b48ead"
cyan = "#88c0d0"
white = "#e5e9f0"

[sent_text]
color = "#eceff4"
"##;
