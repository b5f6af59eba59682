// Session state
//
// Reducer-style container for everything the client knows about the current
// game session: connection status, the transcript and the echo bookkeeping.
// Actions are applied strictly in arrival order by a single owner (the TUI
// loop or the headless printer).
//
// Output that is not yet newline-terminated stays in an "open" line and is
// re-split together with the next display event, so text arriving across
// several events continues on the same row.

use crate::buffer::OutputBuffer;
use crate::events::{topics, ServerEvent};
use crate::lines::{EchoNewline, Line, LineId, Splitter};
use crate::tags::{IdGenerator, Payload, RandomIds, Tag};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;

/// Something that happened to the session
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Connected,
    Disconnected,
    Received(ServerEvent),
    /// The user sent text to the server
    Sent { text: String },
}

/// Current state of a game session
pub struct Session {
    buffer: OutputBuffer,
    open: Option<Line>,
    last_was_echo: bool,
    connected: bool,
    ids: Arc<dyn IdGenerator>,
    splitter: Splitter<Arc<dyn IdGenerator>>,
    echo_policy: EchoNewline,
    last_event_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(max_lines: usize, echo_policy: EchoNewline) -> Self {
        Self::with_ids(max_lines, echo_policy, Arc::new(RandomIds::new()))
    }

    /// Create a session drawing tag and line ids from `ids`
    pub fn with_ids(max_lines: usize, echo_policy: EchoNewline, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            buffer: OutputBuffer::new(max_lines),
            open: None,
            last_was_echo: false,
            connected: false,
            splitter: Splitter::new(Arc::clone(&ids)),
            ids,
            echo_policy,
            last_event_at: None,
        }
    }

    /// Apply one action
    ///
    /// Returns the ids of lines that are no longer displayed (evicted, or an
    /// open line that was re-split) so render caches can drop them.
    pub fn apply(&mut self, action: Action) -> Vec<LineId> {
        match action {
            Action::Connected => {
                if !self.connected {
                    tracing::info!("Connected");
                }
                self.connected = true;
                Vec::new()
            }
            Action::Disconnected => {
                if self.connected {
                    tracing::info!("Disconnected");
                }
                self.connected = false;
                Vec::new()
            }
            Action::Received(event) => {
                self.last_event_at = Some(Utc::now());
                event
                    .flatten()
                    .into_iter()
                    .flat_map(|event| self.receive(event))
                    .collect()
            }
            Action::Sent { text } => {
                tracing::debug!(text = %text, "Echoing send");
                self.append(Payload::Tag(Tag::sent_text(text)))
            }
        }
    }

    fn receive(&mut self, event: ServerEvent) -> Vec<LineId> {
        match event.topic.as_str() {
            topics::DISPLAY => self.display(event.data),
            topics::PONG => {
                tracing::trace!("Pong");
                Vec::new()
            }
            other => {
                tracing::debug!(topic = other, "Ignoring event");
                Vec::new()
            }
        }
    }

    fn display(&mut self, data: Value) -> Vec<LineId> {
        match Payload::decode(data, self.ids.as_ref()) {
            Ok(payload) => self.append(payload),
            Err(e) => {
                tracing::error!("Dropping malformed display event: {}", e);
                Vec::new()
            }
        }
    }

    /// Split a payload onto the end of the transcript
    pub fn append(&mut self, mut payload: Payload) -> Vec<LineId> {
        if self.echo_policy.apply(&mut payload, self.last_was_echo) {
            tracing::trace!("Stripped newline after echo");
        }

        let ends_with_echo = payload.ends_with_echo();
        let fragments = payload.into_fragments();
        if fragments.is_empty() {
            return Vec::new();
        }

        let mut retired = Vec::new();
        let mut stream = match self.open.take() {
            Some(open) => {
                retired.push(open.id);
                open.children
            }
            None => Vec::new(),
        };
        stream.extend(fragments);

        let mut lines = self.splitter.split(&stream);
        // split always yields at least one line; the last is unterminated
        let open = lines.pop();
        retired.extend(self.buffer.extend(lines));
        self.open = open.filter(|line| !line.is_empty());
        self.last_was_echo = ends_with_echo;

        retired
    }

    /// Committed lines, oldest first
    pub fn buffer(&self) -> &OutputBuffer {
        &self.buffer
    }

    /// Unterminated trailing line, if it has content
    pub fn open_line(&self) -> Option<&Line> {
        self.open.as_ref()
    }

    /// Every displayed line: the buffer followed by the open line
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &Line> {
        self.buffer.iter().chain(self.open.iter())
    }

    pub fn line_count(&self) -> usize {
        self.buffer.len() + usize::from(self.open.is_some())
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn last_event_at(&self) -> Option<DateTime<Utc>> {
        self.last_event_at
    }

    pub fn echo_policy(&self) -> EchoNewline {
        self.echo_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogBuffer, LogEntry, LogLevel, TuiLogLayer};
    use crate::tags::{Fragment, SequentialIds};
    use serde_json::json;
    use tracing_subscriber::layer::SubscriberExt;

    fn session(policy: EchoNewline) -> Session {
        Session::with_ids(100, policy, Arc::new(SequentialIds::new()))
    }

    fn display(data: Value) -> Action {
        Action::Received(ServerEvent::display(data))
    }

    fn texts(session: &Session) -> Vec<String> {
        session.lines().map(Line::text_content).collect()
    }

    #[test]
    fn test_connection_status() {
        let mut session = session(EchoNewline::Always);
        assert!(!session.is_connected());
        session.apply(Action::Connected);
        assert!(session.is_connected());
        session.apply(Action::Disconnected);
        session.apply(Action::Disconnected);
        assert!(!session.is_connected());
    }

    #[test]
    fn test_display_commits_terminated_lines() {
        let mut session = session(EchoNewline::Always);
        session.apply(display(json!("one\ntwo\n")));

        assert_eq!(session.buffer().len(), 2);
        assert!(session.open_line().is_none());
        assert_eq!(texts(&session), vec!["one", "two"]);
        assert!(session.last_event_at().is_some());
    }

    #[test]
    fn test_unterminated_text_continues_on_next_event() {
        let mut session = session(EchoNewline::Always);
        session.apply(display(json!("Health: ")));
        assert_eq!(session.buffer().len(), 0);
        assert_eq!(session.line_count(), 1);

        let open_id = session.open_line().map(|line| line.id);
        let retired = session.apply(display(json!([
            {"name": "color", "attributes": {"foreground": "red"}, "children": ["50"]},
            "\nReady\n"
        ])));

        assert_eq!(texts(&session), vec!["Health: 50", "Ready"]);
        assert_eq!(retired, open_id.into_iter().collect::<Vec<_>>());

        let first = session.buffer().iter().next().unwrap();
        assert_eq!(first.children.len(), 2);
        assert_eq!(first.children[0], Fragment::text("Health: "));
        assert_eq!(first.children[1].as_tag().map(|t| t.name.as_str()), Some("color"));
    }

    #[test]
    fn test_echo_then_reply_leaves_no_blank_line() {
        let mut session = session(EchoNewline::Always);
        session.apply(Action::Sent {
            text: "look".into(),
        });
        session.apply(display(json!("\nA dark room.\n")));

        assert_eq!(texts(&session), vec!["look", "A dark room."]);
        let echo = session.buffer().iter().next().unwrap();
        assert!(echo.children[0].is_sent_text());
    }

    #[test]
    fn test_sequences_policy_keeps_newline_for_strings() {
        let mut session = session(EchoNewline::Sequences);
        session.apply(Action::Sent {
            text: "look".into(),
        });
        session.apply(display(json!("\nA dark room.\n")));
        assert_eq!(texts(&session), vec!["look", "", "A dark room."]);

        session.apply(Action::Sent {
            text: "north".into(),
        });
        session.apply(display(json!(["\nA hallway.\n"])));
        assert_eq!(
            texts(&session),
            vec!["look", "", "A dark room.", "north", "A hallway."]
        );
    }

    #[test]
    fn test_never_policy_keeps_blank_line() {
        let mut session = session(EchoNewline::Never);
        session.apply(Action::Sent {
            text: "look".into(),
        });
        session.apply(display(json!(["\nA dark room.\n"])));
        assert_eq!(texts(&session), vec!["look", "", "A dark room."]);
    }

    #[test]
    fn test_echo_continues_prompt_line() {
        let mut session = session(EchoNewline::Always);
        session.apply(display(json!("> ")));
        session.apply(Action::Sent {
            text: "look".into(),
        });
        assert_eq!(texts(&session), vec!["> look"]);
        assert!(session.open_line().is_none());
    }

    #[test]
    fn test_batched_events_apply_in_order() {
        let mut session = session(EchoNewline::Always);
        session.apply(Action::Received(ServerEvent::new(
            topics::MULTIPLE,
            json!([
                {"topic": "system/display", "data": "first\n"},
                {"topic": "system/pong"},
                {"topic": "room/info", "data": {"name": "Hall"}},
                {"topic": "system/display", "data": "second\n"}
            ]),
        )));
        assert_eq!(texts(&session), vec!["first", "second"]);
    }

    #[test]
    fn test_malformed_display_is_dropped() {
        let mut session = session(EchoNewline::Always);
        session.apply(display(json!("kept\n")));
        session.apply(display(json!({"name": "color"})));
        session.apply(display(json!(42)));
        assert_eq!(texts(&session), vec!["kept"]);
    }

    #[test]
    fn test_malformed_display_is_logged_as_error() {
        let logs = LogBuffer::new();
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(logs.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let mut session = session(EchoNewline::Always);
            session.apply(display(json!("fine\n")));
            session.apply(display(json!({"name": "color"})));
        });

        let errors: Vec<LogEntry> = logs
            .recent(10)
            .into_iter()
            .filter(|entry| entry.level == LogLevel::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("Dropping malformed display event"));
    }

    #[test]
    fn test_empty_sequence_keeps_echo_state() {
        let mut session = session(EchoNewline::Always);
        session.apply(Action::Sent {
            text: "look".into(),
        });
        session.apply(display(json!([])));
        session.apply(display(json!("\nroom\n")));
        assert_eq!(texts(&session), vec!["look", "room"]);
    }

    #[test]
    fn test_eviction_reports_retired_lines() {
        let mut session = Session::with_ids(2, EchoNewline::Always, Arc::new(SequentialIds::new()));
        session.apply(display(json!("a\nb\n")));
        let first = session.buffer().iter().next().map(|line| line.id).unwrap();

        let retired = session.apply(display(json!("c\n")));
        assert_eq!(retired, vec![first]);
        assert_eq!(texts(&session), vec!["b", "c"]);
    }
}
