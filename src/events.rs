// Wire events exchanged with the game server
//
// Every frame is a JSON object `{"topic": ..., "data": ...}`. The server may
// batch several events into one `system/multiple` frame; those are unwrapped
// here so the rest of the client only ever sees single events.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Known event topics
pub mod topics {
    /// Tagged text to append to the transcript
    pub const DISPLAY: &str = "system/display";
    /// A batch of events, delivered in order
    pub const MULTIPLE: &str = "system/multiple";
    /// Keepalive reply
    pub const PONG: &str = "system/pong";
    /// Text typed by the user
    pub const SEND: &str = "system/send";
}

/// An event received from the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEvent {
    /// Older servers batch frames under `type`
    #[serde(alias = "type")]
    pub topic: String,
    #[serde(default)]
    pub data: Value,
}

impl ServerEvent {
    pub fn new(topic: impl Into<String>, data: Value) -> Self {
        Self {
            topic: topic.into(),
            data,
        }
    }

    /// A display event carrying tagged text
    pub fn display(data: Value) -> Self {
        Self::new(topics::DISPLAY, data)
    }

    /// Unwrap `system/multiple` batches (recursively) into single events
    pub fn flatten(self) -> Vec<ServerEvent> {
        if self.topic != topics::MULTIPLE {
            return vec![self];
        }

        let Value::Array(items) = self.data else {
            tracing::warn!("Ignoring {} frame without an event list", topics::MULTIPLE);
            return Vec::new();
        };

        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<ServerEvent>(item) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!("Skipping malformed batched event: {}", e);
                    None
                }
            })
            .flat_map(ServerEvent::flatten)
            .collect()
    }
}

/// An event sent to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientEvent {
    pub topic: String,
    pub data: Value,
}

impl ClientEvent {
    /// User input
    pub fn send(text: impl Into<String>) -> Self {
        Self {
            topic: topics::SEND.to_string(),
            data: json!({ "text": text.into() }),
        }
    }

    /// The text of a send event
    pub fn send_text(&self) -> Option<&str> {
        if self.topic != topics::SEND {
            return None;
        }
        self.data.get("text").and_then(Value::as_str)
    }
}

/// Parse one JSON document with no nesting limit
///
/// Tag trees nest as deep as the server likes. The recursion limit is off and
/// the stack grows on demand instead.
pub fn parse_json(text: &str) -> serde_json::Result<Value> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_frame(frame: &str) -> Vec<ServerEvent> {
        let value = parse_json(frame).unwrap();
        serde_json::from_value::<ServerEvent>(value).unwrap().flatten()
    }

    #[test]
    fn test_decode_single_frame() {
        let events = unwrap_frame(r#"{"topic":"system/display","data":"hello\n"}"#);
        assert_eq!(events, vec![ServerEvent::display(json!("hello\n"))]);
    }

    #[test]
    fn test_multiple_frames_unwrap_in_order() {
        let frame = r#"{
            "type": "system/multiple",
            "data": [
                {"topic": "system/display", "data": "one"},
                {"topic": "system/pong"},
                {"topic": "system/multiple", "data": [{"topic": "system/display", "data": "two"}]}
            ]
        }"#;

        let events = unwrap_frame(frame);
        let names: Vec<&str> = events.iter().map(|e| e.topic.as_str()).collect();
        assert_eq!(names, vec![topics::DISPLAY, topics::PONG, topics::DISPLAY]);
        assert_eq!(events[2].data, json!("two"));
        assert_eq!(events[1].data, Value::Null);
    }

    #[test]
    fn test_malformed_batch_members_are_skipped() {
        let frame = r#"{"topic":"system/multiple","data":[42, {"topic":"system/display","data":"ok"}]}"#;
        let events = unwrap_frame(frame);
        assert_eq!(events, vec![ServerEvent::display(json!("ok"))]);

        let frame = r#"{"topic":"system/multiple","data":"not a list"}"#;
        assert!(unwrap_frame(frame).is_empty());
    }

    #[test]
    fn test_invalid_frame_is_an_error() {
        assert!(parse_json("not json").is_err());
        assert!(parse_json(r#"{"topic": "a"} trailing"#).is_err());

        let value = parse_json(r#"{"data": 1}"#).unwrap();
        assert!(serde_json::from_value::<ServerEvent>(value).is_err());
    }

    #[test]
    fn test_parse_json_has_no_depth_limit() {
        let depth = 1000;
        let text = format!("{}0{}", "[".repeat(depth), "]".repeat(depth));
        assert!(serde_json::from_str::<Value>(&text).is_err());

        let mut value = &parse_json(&text).unwrap();
        let mut seen = 0;
        while let Some(inner) = value.get(0) {
            value = inner;
            seen += 1;
        }
        assert_eq!(seen, depth);
        assert_eq!(value, &json!(0));
    }

    #[test]
    fn test_send_event_shape() {
        let event = ClientEvent::send("look");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"topic": "system/send", "data": {"text": "look"}})
        );
        assert_eq!(event.send_text(), Some("look"));

        let other = ClientEvent {
            topic: "system/ping".into(),
            data: Value::Null,
        };
        assert_eq!(other.send_text(), None);
    }
}
