use anyhow::anyhow;

use crate::common::PlanError;
use crate::protocol::domain::{Failure, FailureKind};
use crate::protocol::{Message, PlannerApi, PROTOCOL_VERSION};
use crate::transport::{DecodeError, Transport};

/// Serves a planner over one transport: handshake, then one reply per
/// request until the peer says goodbye or the connection drops. A frame that
/// fails to decode gets a `BadRequest` failure and the session goes on.
pub struct Skeleton<E: PlannerApi, T: Transport> {
    engine: E,
    transport: T,
    served: usize,
}

impl<E: PlannerApi, T: Transport> Skeleton<E, T> {
    pub fn new(engine: E, transport: T) -> Self {
        Self {
            engine,
            transport,
            served: 0,
        }
    }

    /// Number of move requests answered so far.
    pub fn served(&self) -> usize {
        self.served
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        match self.transport.recv().await? {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.transport
                    .send(Message::Hello {
                        version: PROTOCOL_VERSION,
                    })
                    .await?;
            }
            Message::Hello { version } => {
                return Err(anyhow!(
                    "Protocol version mismatch: expected {}, got {}",
                    PROTOCOL_VERSION,
                    version
                ));
            }
            _ => return Err(anyhow!("Expected handshake")),
        }

        loop {
            let msg = match self.transport.recv().await {
                Ok(msg) => msg,
                Err(e) => match e.downcast_ref::<DecodeError>() {
                    Some(bad) => {
                        log::warn!("bad request: {}", bad);
                        self.transport
                            .send(Message::Failure(Failure {
                                kind: FailureKind::BadRequest,
                                detail: bad.to_string(),
                            }))
                            .await?;
                        continue;
                    }
                    None => {
                        log::debug!("connection ended: {}", e);
                        break;
                    }
                },
            };
            let reply = match msg {
                Message::NextMove(state) => {
                    self.served += 1;
                    match self.engine.next_move(state).await {
                        Ok(response) => {
                            log::debug!(
                                "move: target {} from {} shot {:?}",
                                response.target,
                                response.cell_index,
                                response.pattern
                            );
                            Message::Move(response)
                        }
                        Err(e) => {
                            let failure = failure_from(&e);
                            log::warn!("no move: {}", failure);
                            Message::Failure(failure)
                        }
                    }
                }
                Message::Bye => break,
                other => Message::Failure(Failure {
                    kind: FailureKind::BadRequest,
                    detail: format!("unexpected message: {:?}", other),
                }),
            };
            self.transport.send(reply).await?;
        }
        Ok(())
    }
}

fn failure_from(err: &anyhow::Error) -> Failure {
    if let Some(plan) = err.downcast_ref::<PlanError>() {
        return Failure::from(plan);
    }
    if let Some(failure) = err.downcast_ref::<Failure>() {
        return failure.clone();
    }
    Failure {
        kind: FailureKind::InternalPlanningError,
        detail: err.to_string(),
    }
}
