mod actor;
mod messages;

use crate::events::SinkEvent;
use crate::types::{OutputLine, Severity};
use actor::Actor;
use messages::Message;
use tokio::sync::{mpsc, oneshot};

/// What a host shows while the sink is empty.
pub const PLACEHOLDER: &str = "Run your code to see the output here...";

/// An append-only log of output lines that can be cleared and streamed.
///
/// This struct is an actor handle. The lines live in the actor spawned by `OutputSinkHandle::spawn`,
/// which applies messages in the order they were sent, so appends from one task keep their order.
#[derive(Clone)]
pub struct OutputSinkHandle {
    sender: mpsc::UnboundedSender<Message>,
}

impl OutputSinkHandle {
    pub fn spawn() -> Self {
        let (sender, inbox) = mpsc::unbounded_channel();
        Actor::spawn(inbox);
        Self { sender }
    }

    pub fn append(&self, line: OutputLine) {
        let _ = self.sender.send(Message::Append { line });
    }

    /// Append every non-blank line of `text`, in order, with the same severity.
    pub fn append_text(&self, text: &str, severity: Severity) {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .for_each(|line| self.append(OutputLine::new(line, severity)));
    }

    pub fn clear(&self) {
        let _ = self.sender.send(Message::Clear);
    }

    pub async fn snapshot(&self) -> Vec<OutputLine> {
        let (tx, rx) = oneshot::channel();
        let _ = self.sender.send(Message::Snapshot { response: tx });
        rx.await.unwrap_or_default()
    }

    /// Replays the current lines, then streams every later append and clear.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<SinkEvent> {
        let (subscriber, events) = mpsc::unbounded_channel();
        let _ = self.sender.send(Message::Subscribe { subscriber });
        events
    }
}
