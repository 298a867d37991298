use crate::protocol::domain::{GameState, MoveResponse};
use crate::protocol::{Message, PlannerApi, PROTOCOL_VERSION};
use crate::transport::Transport;

/// Client side of the planner protocol.
///
/// Planner failures come back as a [`Failure`](crate::protocol::domain::Failure)
/// error, so callers can `downcast_ref` it and apply their own fallback.
pub struct Stub<T: Transport> {
    transport: T,
    handshaken: bool,
}

impl<T: Transport> Stub<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            handshaken: false,
        }
    }

    async fn ensure_handshake(&mut self) -> anyhow::Result<()> {
        if self.handshaken {
            return Ok(());
        }
        self.transport
            .send(Message::Hello {
                version: PROTOCOL_VERSION,
            })
            .await?;
        match self.transport.recv().await? {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.handshaken = true;
                Ok(())
            }
            Message::Hello { version } => Err(anyhow::anyhow!(
                "Protocol version mismatch: expected {}, got {}",
                PROTOCOL_VERSION,
                version
            )),
            _ => Err(anyhow::anyhow!("Unexpected message")),
        }
    }

    /// Tell the server this connection is finished.
    pub async fn close(mut self) -> anyhow::Result<()> {
        if self.handshaken {
            self.transport.send(Message::Bye).await?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<T: Transport> PlannerApi for Stub<T> {
    async fn next_move(&mut self, state: GameState) -> anyhow::Result<MoveResponse> {
        self.ensure_handshake().await?;
        self.transport.send(Message::NextMove(state)).await?;
        match self.transport.recv().await? {
            Message::Move(response) => Ok(response),
            Message::Failure(failure) => Err(failure.into()),
            _ => Err(anyhow::anyhow!("Unexpected message")),
        }
    }
}
