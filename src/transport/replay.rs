// Replay source: feed a JSON-lines capture into the session
//
// One event per line:
//
//   {"topic": "system/display", "data": ["Hello ", {"name": "color", ...}]}
//   {"topic": "system/send", "data": {"text": "look"}, "delay_ms": 500}
//
// `system/send` lines become local echoes. Blank lines and lines starting
// with `#` are skipped; anything unparseable is logged and skipped.

use crate::events::{self, topics, ClientEvent, ServerEvent};
use crate::session::Action;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};
use tokio::time::sleep;

/// One parsed capture line
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayEntry {
    pub action: Action,
    pub delay: Option<Duration>,
}

/// Parse a capture line; `Ok(None)` for blanks and comments
pub fn parse_line(line: &str) -> Result<Option<ReplayEntry>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let value = events::parse_json(line).context("Invalid JSON")?;
    let delay = value
        .get("delay_ms")
        .and_then(Value::as_u64)
        .map(Duration::from_millis);

    let is_send = value.get("topic").and_then(Value::as_str) == Some(topics::SEND);
    let action = if is_send {
        let event: ClientEvent =
            serde_json::from_value(value).context("Invalid send event")?;
        let text = event
            .send_text()
            .context("Send event without data.text")?
            .to_string();
        Action::Sent { text }
    } else {
        let event: ServerEvent = serde_json::from_value(value).context("Invalid event")?;
        Action::Received(event)
    };

    Ok(Some(ReplayEntry { action, delay }))
}

/// Replay a capture from `path`, or stdin when `None`
pub async fn run_replay(
    path: Option<PathBuf>,
    tx: mpsc::Sender<Action>,
    shutdown_rx: oneshot::Receiver<()>,
) -> Result<()> {
    match path {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("Failed to open replay file {}", path.display()))?;
            replay_lines(BufReader::new(file), tx, shutdown_rx).await?;
        }
        None => {
            replay_lines(BufReader::new(tokio::io::stdin()), tx, shutdown_rx).await?;
        }
    }
    Ok(())
}

/// Replay every line of `reader`, returning how many entries were delivered
pub async fn replay_lines<R>(
    reader: R,
    tx: mpsc::Sender<Action>,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_number = 0usize;
    let mut delivered = 0usize;

    if tx.send(Action::Connected).await.is_err() {
        return Ok(0);
    }

    loop {
        let next = tokio::select! {
            _ = &mut shutdown_rx => {
                tracing::debug!("Replay received shutdown signal");
                return Ok(delivered);
            }
            next = lines.next_line() => next.context("Failed to read replay input")?,
        };

        let Some(line) = next else {
            break;
        };
        line_number += 1;

        let entry = match parse_line(&line) {
            Ok(Some(entry)) => entry,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("Skipping replay line {}: {:#}", line_number, e);
                continue;
            }
        };

        if let Some(delay) = entry.delay {
            tokio::select! {
                _ = &mut shutdown_rx => return Ok(delivered),
                _ = sleep(delay) => {}
            }
        }

        if tx.send(entry.action).await.is_err() {
            // Consumer is gone
            return Ok(delivered);
        }
        delivered += 1;
    }

    tracing::info!("Replay finished after {} events", delivered);
    let _ = tx.send(Action::Disconnected).await;
    Ok(delivered)
}
