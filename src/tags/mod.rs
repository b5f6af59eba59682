//! Tag tree model
//!
//! Game output arrives as a tree of named, attributed tags interleaved with
//! raw strings. A bare string is a text leaf, never a `Tag`.
//!
//! Ids exist only so the renderer can key its cache. Equality ignores them,
//! which keeps tests free of id noise.

mod id;
mod wire;

pub use id::{IdGenerator, RandomIds};

#[cfg(test)]
pub use id::SequentialIds;

use std::collections::BTreeMap;
use std::sync::Arc;

/// Tag name used for locally echoed sends
pub const SENT_TEXT: &str = "sent-text";

/// Attribute map shared by every clone of a tag produced while splitting
pub type Attributes = Arc<BTreeMap<String, String>>;

/// Identity of a tag, only meaningful for render keying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TagId(pub u64);

/// A named, attributed node with ordered children
#[derive(Debug, Clone)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub attributes: Attributes,
    pub children: Vec<Fragment>,
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attributes == other.attributes
            && self.children == other.children
    }
}

impl Eq for Tag {}

impl Tag {
    /// Create a tag without attributes
    pub fn new(name: impl Into<String>, children: Vec<Fragment>) -> Self {
        Self {
            id: TagId::default(),
            name: name.into(),
            attributes: Attributes::default(),
            children,
        }
    }

    /// Create a tag with attributes
    #[cfg(test)]
    pub fn with_attributes<K, V>(
        name: impl Into<String>,
        attributes: impl IntoIterator<Item = (K, V)>,
        children: Vec<Fragment>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let attributes = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<BTreeMap<_, _>>();

        Self {
            id: TagId::default(),
            name: name.into(),
            attributes: Arc::new(attributes),
            children,
        }
    }

    /// The local echo of a user send: `sent-text` wrapping the text and a newline
    pub fn sent_text(text: impl Into<String>) -> Self {
        Self::new(SENT_TEXT, vec![Fragment::Text(text.into()), Fragment::text("\n")])
    }

    /// Same name and (shared) attributes, different children and a fresh id
    pub fn clone_with_children(&self, id: TagId, children: Vec<Fragment>) -> Self {
        Self {
            id,
            name: self.name.clone(),
            attributes: Arc::clone(&self.attributes),
            children,
        }
    }

    /// Look up an attribute value
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Whether this tag is a local send echo
    pub fn is_sent_text(&self) -> bool {
        self.name == SENT_TEXT
    }

    /// Concatenated text of all descendant leaves
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_text(&mut out);
        }
        out
    }
}

/// A text leaf or a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Tag(Tag),
}

impl Fragment {
    pub fn text(text: impl Into<String>) -> Self {
        Fragment::Text(text.into())
    }

    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Fragment::Tag(tag) => Some(tag),
            Fragment::Text(_) => None,
        }
    }

    /// Whether this is a `sent-text` tag
    pub fn is_sent_text(&self) -> bool {
        self.as_tag().is_some_and(Tag::is_sent_text)
    }

    /// Concatenated text of this fragment
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Fragment::Text(text) => out.push_str(text),
            Fragment::Tag(tag) => {
                for child in &tag.children {
                    child.write_text(out);
                }
            }
        }
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment::Text(text.to_string())
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Fragment::Text(text)
    }
}

impl From<Tag> for Fragment {
    fn from(tag: Tag) -> Self {
        Fragment::Tag(tag)
    }
}

/// Shape of a display event's `data`: a fragment or a (possibly nested) sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Tag(Tag),
    Many(Vec<Payload>),
}

impl Payload {
    /// Whether the payload arrived as a sequence
    pub fn is_sequence(&self) -> bool {
        matches!(self, Payload::Many(_))
    }

    /// Flatten into top-level fragments, in order
    pub fn into_fragments(self) -> Vec<Fragment> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Fragment>) {
        match self {
            Payload::Text(text) => out.push(Fragment::Text(text)),
            Payload::Tag(tag) => out.push(Fragment::Tag(tag)),
            Payload::Many(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }

    /// Whether the last top-level fragment is a `sent-text` echo
    pub fn ends_with_echo(&self) -> bool {
        match self {
            Payload::Text(_) => false,
            Payload::Tag(tag) => tag.is_sent_text(),
            Payload::Many(items) => items
                .iter()
                .rev()
                .find(|item| !item.is_empty_sequence())
                .is_some_and(Payload::ends_with_echo),
        }
    }

    fn is_empty_sequence(&self) -> bool {
        match self {
            Payload::Many(items) => items.iter().all(Payload::is_empty_sequence),
            _ => false,
        }
    }
}

impl From<Fragment> for Payload {
    fn from(fragment: Fragment) -> Self {
        match fragment {
            Fragment::Text(text) => Payload::Text(text),
            Fragment::Tag(tag) => Payload::Tag(tag),
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Tag> for Payload {
    fn from(tag: Tag) -> Self {
        Payload::Tag(tag)
    }
}

impl From<Vec<Payload>> for Payload {
    fn from(items: Vec<Payload>) -> Self {
        Payload::Many(items)
    }
}
