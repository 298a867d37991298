#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod cellset;
mod common;
mod config;
mod features;
mod grid;
#[cfg(feature = "std")]
mod logging;
pub mod planner;
mod probability;
pub mod protocol;
pub mod referee;
#[cfg(feature = "std")]
pub mod server;
pub mod service;
mod ship;
mod shot;
#[cfg(feature = "std")]
pub mod skeleton;
#[cfg(feature = "std")]
pub mod stub;
#[cfg(feature = "std")]
pub mod transport;

pub use cellset::{CellSet, CellSetError, Cells, Indices};
pub use common::*;
pub use config::*;
pub use features::Features;
pub use grid::{CellState, Dimensions, Grid};
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use planner::{
    select_mode, select_next_shot, select_option, select_shape, shape_options, Mode, Shot,
    ShotOption,
};
pub use probability::{PlacementRules, ProbabilityField};
pub use protocol::domain::{Failure, FailureKind, GameState, MoveResponse};
#[cfg(feature = "std")]
pub use protocol::PlannerApi;
pub use protocol::{Message, PROTOCOL_VERSION};
pub use referee::{GameRules, GameSummary, Referee, RefereeError, TurnReport};
#[cfg(feature = "std")]
pub use server::{serve, serve_listener, ServerConfig};
pub use service::{decide, AiService};
pub use ship::{Orientation, Placement};
pub use shot::{Availability, ShotType};
#[cfg(feature = "std")]
pub use skeleton::Skeleton;
#[cfg(feature = "std")]
pub use stub::Stub;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Codec, Transport};
