//! Classic - the colors of the original web client

pub const THEME: &str = r##"# Classic theme for taleterm
# Dark slate terminal with the web client's tag colors

[meta]
name = "Classic"
version = 1

[ui]
background = "#1a202c"
foreground = "#a0aec0"
border = "#4a5568"
status_bar = "#cbd5e0"
muted = "#718096"

[colors]
black = "#373737"
red = "#d71e00"
green = "#5da602"
yellow = "#cfad00"
blue = "#417ab3"
magenta = "#88658d"
cyan = "#00a7aa"
white = "#dbded8"

[background_colors]
black = "#000000"
red = "#d71e00"
green = "#5da602"
yellow = "#cfad00"
blue = "#417ab3"
magenta = "#88658d"
cyan = "#00a7aa"
white = "#dbded8"

[sent_text]
color = "white"
"##;
