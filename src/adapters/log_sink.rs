//! Logging message sink adapter.
//!
//! Wraps another [`MessageSink`] and writes each outbound message to the
//! `log` facade before forwarding it.  Mode announcements and failure
//! detections go out at `info`, routine pump commands at `debug`.

use log::{debug, info};

use crate::app::ports::MessageSink;
use crate::mailbox::{Message, MessageKind};

/// Adapter that logs every outbound [`Message`] and forwards it.
pub struct LoggingSink<S> {
    inner: S,
    sent: u64,
}

impl<S: MessageSink> LoggingSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, sent: 0 }
    }

    /// Messages forwarded so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: MessageSink> MessageSink for LoggingSink<S> {
    fn send(&mut self, msg: Message) {
        match msg.kind() {
            MessageKind::OpenPump | MessageKind::ClosePump | MessageKind::Valve => {
                debug!("OUT | {msg}");
            }
            _ => info!("OUT | {msg}"),
        }
        self.sent += 1;
        self.inner.send(msg);
    }
}
