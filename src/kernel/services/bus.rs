use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::kernel::SessionEvent;

#[derive(Clone)]
pub struct SessionEventSender {
    tx: Sender<SessionEvent>,
}

pub struct SessionEventReceiver {
    rx: Receiver<SessionEvent>,
}

pub fn session_bus() -> (SessionEventSender, SessionEventReceiver) {
    let (tx, rx) = mpsc::channel();
    (SessionEventSender { tx }, SessionEventReceiver { rx })
}

impl SessionEventSender {
    pub fn send(&self, event: SessionEvent) -> Result<(), mpsc::SendError<SessionEvent>> {
        self.tx.send(event)
    }
}

impl SessionEventReceiver {
    pub fn try_recv(&mut self) -> Result<SessionEvent, TryRecvError> {
        self.rx.try_recv()
    }

    /// Everything published so far, without blocking.
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        self.rx.try_iter().collect()
    }
}
