use super::messages::Message;
use crate::events::SinkEvent;
use crate::types::OutputLine;

use tokio::sync::mpsc;
use tracing::trace;

pub struct Actor {
    inbox: mpsc::UnboundedReceiver<Message>,
    lines: Vec<OutputLine>,
    subscribers: Vec<mpsc::UnboundedSender<SinkEvent>>,
}

impl Actor {
    pub fn spawn(inbox: mpsc::UnboundedReceiver<Message>) {
        let actor = Actor {
            inbox,
            lines: Vec::new(),
            subscribers: Vec::new(),
        };
        tokio::spawn(async move { actor.run().await });
    }

    async fn run(mut self) {
        use self::Message::*;
        while let Some(msg) = self.inbox.recv().await {
            match msg {
                Append { line } => self.append(line),
                Clear => self.clear(),
                Snapshot { response } => {
                    let _ = response.send(self.lines.clone());
                }
                Subscribe { subscriber } => self.subscribe(subscriber),
            }
        }
        trace!("output sink handles dropped, exiting");
    }

    fn append(&mut self, line: OutputLine) {
        self.lines.push(line.clone());
        self.broadcast(SinkEvent::Line(line));
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.broadcast(SinkEvent::Cleared);
    }

    fn broadcast(&mut self, event: SinkEvent) {
        // only retain subscribers who have not dropped
        self.subscribers
            .retain(|sub| sub.send(event.clone()).is_ok());
    }

    fn subscribe(&mut self, subscriber: mpsc::UnboundedSender<SinkEvent>) {
        let replayed = self
            .lines
            .iter()
            .cloned()
            .all(|line| subscriber.send(SinkEvent::Line(line)).is_ok());
        if replayed {
            self.subscribers.push(subscriber);
        }
    }
}
