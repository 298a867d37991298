//! Entry point from one inbound snapshot to one decision.

use crate::common::PlanError;
use crate::config::PlannerConfig;
use crate::features::Features;
use crate::grid::Grid;
use crate::planner::{self, Shot};
use crate::probability::{PlacementRules, ProbabilityField};
use crate::protocol::domain::{GameState, MoveResponse};

/// Run the whole pipeline: grid, features, probability field, planner.
/// Each call builds its own values, so concurrent calls share nothing.
pub fn decide(state: &GameState, config: &PlannerConfig) -> Result<Shot, PlanError> {
    let grid = Grid::parse(&state.grid, config.width, config.height)?;
    let features = Features::extract(&grid, &state.remaining_ships)?;
    let rules = PlacementRules {
        ships_can_touch: state.ships_can_touch,
        hit_weight: config.hit_weight,
    };
    let field = ProbabilityField::compute(&features, &rules);
    #[cfg(feature = "std")]
    log::trace!(
        "{} unknown, {} hit, ships {:?}",
        features.available.count(),
        features.hit.count(),
        features.remaining_ships
    );
    planner::select_next_shot(&features, &field, &state.availability())
}

impl From<Shot> for MoveResponse {
    fn from(shot: Shot) -> Self {
        MoveResponse {
            cell_index: shot.anchor,
            target: shot.cell,
            shot_type: shot.shot_type.code(),
            pattern: shot.shot_type,
            cells: shot.cells,
        }
    }
}

/// In-process planner behind the [`PlannerApi`](crate::protocol::PlannerApi)
/// seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct AiService {
    config: PlannerConfig,
}

impl AiService {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn decide(&self, state: &GameState) -> Result<MoveResponse, PlanError> {
        decide(state, &self.config).map(MoveResponse::from)
    }
}

#[cfg(feature = "std")]
#[async_trait::async_trait]
impl crate::protocol::PlannerApi for AiService {
    async fn next_move(&mut self, state: GameState) -> anyhow::Result<MoveResponse> {
        Ok(AiService::decide(self, &state)?)
    }
}
