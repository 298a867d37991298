use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::protocol::Message;
use crate::transport::Transport;

/// One end of an in-process connection, for tests and local play. Dropping
/// either end closes the link for the other.
pub struct InMemoryTransport {
    outbox: UnboundedSender<Message>,
    inbox: UnboundedReceiver<Message>,
}

impl InMemoryTransport {
    /// Two connected ends: whatever one sends, the other receives in order.
    pub fn pair() -> (Self, Self) {
        let (a_tx, b_rx) = unbounded_channel();
        let (b_tx, a_rx) = unbounded_channel();
        (
            Self {
                outbox: a_tx,
                inbox: a_rx,
            },
            Self {
                outbox: b_tx,
                inbox: b_rx,
            },
        )
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        self.outbox
            .send(msg)
            .map_err(|_| anyhow::anyhow!("Channel closed"))
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        self.inbox
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("Channel closed"))
    }
}
