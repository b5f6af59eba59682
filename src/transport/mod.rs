// Event sources
//
// The live socket is not part of this client; instead a source task feeds
// session actions into a bounded channel, exactly as a network transport
// would. The TUI (or headless printer) is the only consumer.
//
// Sources:
// - replay: JSON-lines capture from a file or stdin
// - demo: scripted session showing off the tag set

pub mod demo;
pub mod replay;

use crate::session::Action;
use std::path::PathBuf;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Capacity of the action channel; senders wait when the consumer lags
pub const ACTION_CHANNEL_CAPACITY: usize = 1000;

/// Where session actions come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Replay a capture (`None` reads stdin)
    Replay(Option<PathBuf>),
    /// Built-in scripted session
    Demo,
}

impl Source {
    /// Interpret a `--replay` argument, `-` meaning stdin
    pub fn replay(arg: &str) -> Self {
        if arg == "-" {
            Self::Replay(None)
        } else {
            Self::Replay(Some(PathBuf::from(arg)))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Replay(Some(path)) => format!("replay {}", path.display()),
            Self::Replay(None) => "replay <stdin>".to_string(),
            Self::Demo => "demo".to_string(),
        }
    }
}

/// Create the action channel
pub fn channel() -> (mpsc::Sender<Action>, mpsc::Receiver<Action>) {
    mpsc::channel(ACTION_CHANNEL_CAPACITY)
}

/// Run a source on its own task until it finishes or is told to stop
pub fn spawn(
    source: Source,
    tx: mpsc::Sender<Action>,
    shutdown_rx: oneshot::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let label = source.describe();
        tracing::debug!("Starting source: {}", label);

        let result = match source {
            Source::Replay(path) => replay::run_replay(path, tx, shutdown_rx).await,
            Source::Demo => {
                demo::run_demo(tx, shutdown_rx).await;
                Ok(())
            }
        };

        match result {
            Ok(()) => tracing::debug!("Source finished: {}", label),
            Err(e) => tracing::error!("Source failed ({}): {:#}", label, e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_argument() {
        assert_eq!(Source::replay("-"), Source::Replay(None));
        assert_eq!(
            Source::replay("session.jsonl"),
            Source::Replay(Some(PathBuf::from("session.jsonl")))
        );
        assert_eq!(Source::replay("-").describe(), "replay <stdin>");
    }
}
