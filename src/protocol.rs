pub mod domain;

use domain::{Failure, GameState, MoveResponse};

/// Version exchanged in the handshake; peers must match exactly.
pub const PROTOCOL_VERSION: u32 = 1;

/// Messages exchanged between the game engine and the planner service.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    /// Handshake, echoed by the server.
    Hello { version: u32 },
    /// Ask for the next move for this snapshot.
    NextMove(GameState),
    /// The chosen move.
    Move(MoveResponse),
    /// No move could be chosen.
    Failure(Failure),
    /// Client is done; the server closes the connection.
    Bye,
}

/// Anything that can answer move requests, locally or across a transport.
#[cfg(feature = "std")]
#[async_trait::async_trait]
pub trait PlannerApi: Send + Sync {
    async fn next_move(&mut self, state: GameState) -> anyhow::Result<MoveResponse>;
}
