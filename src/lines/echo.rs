// Echo newline policy
//
// A send is echoed locally as `sent-text` ending in "\n". Servers commonly
// start their reply with another "\n", which would leave a blank row between
// the echoed command and the reply. The policy decides when that leading
// newline is swallowed.

use crate::tags::Payload;

/// When to strip a leading newline that directly follows a `sent-text` echo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EchoNewline {
    /// Keep every newline
    Never,
    /// Strip only when the following payload is a sequence
    Sequences,
    /// Strip for sequences and bare strings
    #[default]
    Always,
}

impl EchoNewline {
    /// Parse policy string from config
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "never" | "keep" => Self::Never,
            "sequences" | "arrays" => Self::Sequences,
            "always" => Self::Always,
            _ => Self::Always, // Default for unknown values
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::Sequences => "sequences",
            Self::Always => "always",
        }
    }

    /// Strip the leading newline of each text fragment that follows an echo
    ///
    /// `after_echo` says whether the previous payload ended with a `sent-text`
    /// tag. Echoes inside the payload itself are honoured too. Only one `\n`
    /// is removed per position. Returns whether anything was stripped.
    pub fn apply(&self, payload: &mut Payload, after_echo: bool) -> bool {
        let allowed = match self {
            Self::Never => false,
            Self::Sequences => payload.is_sequence(),
            Self::Always => true,
        };
        if !allowed {
            return false;
        }

        let mut previous_was_echo = after_echo;
        strip_after_echo(payload, &mut previous_was_echo)
    }
}

fn strip_after_echo(payload: &mut Payload, previous_was_echo: &mut bool) -> bool {
    match payload {
        Payload::Text(text) => {
            let stripped = *previous_was_echo && text.starts_with('\n');
            if stripped {
                text.remove(0);
            }
            *previous_was_echo = false;
            stripped
        }
        Payload::Tag(tag) => {
            *previous_was_echo = tag.is_sent_text();
            false
        }
        Payload::Many(items) => {
            let mut stripped = false;
            for item in items.iter_mut() {
                stripped |= strip_after_echo(item, previous_was_echo);
            }
            stripped
        }
    }
}
