// Wire decoding for display payloads
//
// The server sends `data` as a string, a tag object or an array of either
// (arrays may nest). Tags are decoded through an intermediate shape so that
// fresh ids can be drawn from the caller's generator.

use super::{Fragment, IdGenerator, Payload, Tag, TagId};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WirePayload {
    Text(String),
    Many(Vec<WirePayload>),
    Tag(WireTag),
}

#[derive(Debug, Deserialize)]
struct WireTag {
    name: String,
    #[serde(default)]
    attributes: Option<BTreeMap<String, Value>>,
    children: Vec<WirePayload>,
}

impl Payload {
    /// Decode a display payload, assigning fresh tag ids
    ///
    /// Fails when a tag object lacks `name` or `children`, or when a value is
    /// neither a string, an array nor a tag object.
    pub fn decode(value: Value, ids: &dyn IdGenerator) -> Result<Payload, serde_json::Error> {
        let wire = WirePayload::deserialize(value)?;
        Ok(wire.into_payload(ids))
    }
}

impl WirePayload {
    fn into_payload(self, ids: &dyn IdGenerator) -> Payload {
        match self {
            WirePayload::Text(text) => Payload::Text(text),
            WirePayload::Many(items) => {
                Payload::Many(items.into_iter().map(|i| i.into_payload(ids)).collect())
            }
            WirePayload::Tag(tag) => Payload::Tag(tag.into_tag(ids)),
        }
    }

    fn flatten_into(self, ids: &dyn IdGenerator, out: &mut Vec<Fragment>) {
        match self {
            WirePayload::Text(text) => out.push(Fragment::Text(text)),
            WirePayload::Tag(tag) => out.push(Fragment::Tag(tag.into_tag(ids))),
            WirePayload::Many(items) => {
                for item in items {
                    item.flatten_into(ids, out);
                }
            }
        }
    }
}

impl WireTag {
    fn into_tag(self, ids: &dyn IdGenerator) -> Tag {
        let attributes = self
            .attributes
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, value)| attribute_string(value).map(|v| (key, v)))
            .collect::<BTreeMap<_, _>>();

        let mut children = Vec::with_capacity(self.children.len());
        for child in self.children {
            child.flatten_into(ids, &mut children);
        }

        Tag {
            id: TagId(ids.next_id()),
            name: self.name,
            attributes: Arc::new(attributes),
            children,
        }
    }
}

/// Strings pass through, other scalars are stringified, null is dropped
fn attribute_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::SequentialIds;
    use serde_json::json;

    fn decode(value: Value) -> Payload {
        Payload::decode(value, &SequentialIds::new()).unwrap()
    }

    #[test]
    fn test_decode_string() {
        assert_eq!(decode(json!("hello")), Payload::from("hello"));
    }

    #[test]
    fn test_decode_tag_with_attributes() {
        let payload = decode(json!({
            "name": "color",
            "attributes": {"foreground": "red", "bold": true, "weight": 3, "skip": null},
            "children": ["text"]
        }));

        let Payload::Tag(tag) = payload else {
            panic!("expected a tag");
        };
        assert_eq!(tag.name, "color");
        assert_eq!(tag.attribute("foreground"), Some("red"));
        assert_eq!(tag.attribute("bold"), Some("true"));
        assert_eq!(tag.attribute("weight"), Some("3"));
        assert_eq!(tag.attribute("skip"), None);
        assert_eq!(tag.children, vec![Fragment::text("text")]);
    }

    #[test]
    fn test_decode_assigns_fresh_ids() {
        let ids = SequentialIds::new();
        let payload = Payload::decode(
            json!([
                {"name": "a", "children": []},
                {"name": "b", "children": [{"name": "c", "children": []}]}
            ]),
            &ids,
        )
        .unwrap();

        let fragments = payload.into_fragments();
        let a = fragments[0].as_tag().unwrap();
        let b = fragments[1].as_tag().unwrap();
        let c = b.children[0].as_tag().unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_decode_flattens_nested_child_arrays() {
        let payload = decode(json!({
            "name": "tooltip",
            "children": ["a", ["b", ["c"]], "d"]
        }));

        let Payload::Tag(tag) = payload else {
            panic!("expected a tag");
        };
        assert_eq!(
            tag.children,
            vec![
                Fragment::text("a"),
                Fragment::text("b"),
                Fragment::text("c"),
                Fragment::text("d"),
            ]
        );
    }

    #[test]
    fn test_decode_keeps_top_level_sequence_shape() {
        let payload = decode(json!(["a", ["b"]]));
        assert!(payload.is_sequence());
        assert_eq!(
            payload,
            Payload::Many(vec!["a".into(), Payload::Many(vec!["b".into()])])
        );
    }

    #[test]
    fn test_decode_rejects_tag_without_children() {
        let result = Payload::decode(json!({"name": "color"}), &SequentialIds::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_numbers() {
        let result = Payload::decode(json!(42), &SequentialIds::new());
        assert!(result.is_err());
    }
}
