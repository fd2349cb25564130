use crate::events::SinkEvent;
use crate::types::OutputLine;
use tokio::sync::{mpsc, oneshot};

#[derive(Debug)]
pub enum Message {
    Append {
        line: OutputLine,
    },
    Clear,
    Snapshot {
        response: oneshot::Sender<Vec<OutputLine>>,
    },
    Subscribe {
        subscriber: mpsc::UnboundedSender<SinkEvent>,
    },
}
