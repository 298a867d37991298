//! Self-contained game referee: hides a fleet, resolves attacks and keeps the
//! special-attack counters, so the planner can be played end to end.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::common::PlanError;
use crate::config::{
    PlannerConfig, AIRSTRIKE_REQUIRED_HITS, BOMBARDMENT_REQUIRED_HITS, DEFAULT_SHIPS,
};
use crate::grid::{CellState, Dimensions, Grid};
use crate::protocol::domain::GameState;
use crate::service;
use crate::ship::{Orientation, Placement};
use crate::shot::ShotType;

/// Errors raised while refereeing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefereeError {
    /// Random placement gave up, or a fixed fleet overlaps/touches.
    UnableToPlaceShip,
    /// The attack covers a cell already resolved as miss or sunk.
    AlreadyTargeted { index: usize },
    /// The attack leaves the board.
    OutOfBounds { index: usize },
    /// A special attack was fired while not activated.
    SpecialUnavailable(ShotType),
    /// The planner could not produce a move.
    Plan(PlanError),
}

impl From<PlanError> for RefereeError {
    fn from(err: PlanError) -> Self {
        RefereeError::Plan(err)
    }
}

impl fmt::Display for RefereeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefereeError::UnableToPlaceShip => write!(f, "Unable to place ship"),
            RefereeError::AlreadyTargeted { index } => {
                write!(f, "Cell {} was already resolved", index)
            }
            RefereeError::OutOfBounds { index } => {
                write!(f, "Attack anchored at {} leaves the board", index)
            }
            RefereeError::SpecialUnavailable(shot) => {
                write!(f, "{} is not available", shot.name())
            }
            RefereeError::Plan(e) => write!(f, "Planner failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RefereeError {}

/// Rules of a refereed game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRules {
    pub dims: Dimensions,
    pub ships: Vec<usize>,
    pub ships_can_touch: bool,
    pub airstrike_allowed: bool,
    pub bombardment_allowed: bool,
}

impl GameRules {
    /// Classic 10×10 game with the standard fleet.
    pub fn classic() -> Self {
        Self {
            dims: Dimensions::STANDARD,
            ships: DEFAULT_SHIPS.to_vec(),
            ships_can_touch: false,
            airstrike_allowed: false,
            bombardment_allowed: false,
        }
    }

    pub fn with_specials(mut self, airstrike: bool, bombardment: bool) -> Self {
        self.airstrike_allowed = airstrike;
        self.bombardment_allowed = bombardment;
        self
    }

    pub fn with_touching(mut self, ships_can_touch: bool) -> Self {
        self.ships_can_touch = ships_can_touch;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HiddenShip {
    cells: Vec<usize>,
    hits: usize,
}

impl HiddenShip {
    fn is_sunk(&self) -> bool {
        self.hits == self.cells.len()
    }
}

/// Outcome of one attack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnReport {
    pub hits: Vec<usize>,
    pub misses: Vec<usize>,
    /// Lengths of ships sunk by this attack.
    pub sunk: Vec<usize>,
}

/// Hidden fleet plus the attacker's view of it.
#[derive(Debug, Clone)]
pub struct Referee {
    rules: GameRules,
    ships: Vec<HiddenShip>,
    view: Grid,
    airstrike_hit_count: u32,
    bombardment_hit_count: u32,
    turns: usize,
}

impl Referee {
    /// Place the fleet at random, largest ship first.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, rules: GameRules) -> Result<Self, RefereeError> {
        let mut placements: Vec<Placement> = Vec::with_capacity(rules.ships.len());
        let mut lengths = rules.ships.clone();
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        for len in lengths {
            let placement = random_placement(rng, &rules, &placements, len)?;
            placements.push(placement);
        }
        Self::with_fleet(rules, &placements)
    }

    /// Use a fixed fleet. Fails if ships overlap, or touch when the rules
    /// forbid it.
    pub fn with_fleet(rules: GameRules, placements: &[Placement]) -> Result<Self, RefereeError> {
        let dims = rules.dims;
        let mut ships: Vec<HiddenShip> = Vec::with_capacity(placements.len());
        for placement in placements {
            let cells: Vec<usize> = placement.cells(dims).collect();
            if !fits(&rules, &ships, &cells) {
                return Err(RefereeError::UnableToPlaceShip);
            }
            ships.push(HiddenShip { cells, hits: 0 });
        }
        let view = Grid::from_states(alloc::vec![CellState::Unknown; dims.cells()], dims)?;
        Ok(Self {
            view,
            rules,
            ships,
            airstrike_hit_count: 0,
            bombardment_hit_count: 0,
            turns: 0,
        })
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn is_over(&self) -> bool {
        self.ships.iter().all(HiddenShip::is_sunk)
    }

    pub fn airstrike_activated(&self) -> bool {
        self.rules.airstrike_allowed && self.airstrike_hit_count >= AIRSTRIKE_REQUIRED_HITS
    }

    pub fn bombardment_activated(&self) -> bool {
        self.rules.bombardment_allowed && self.bombardment_hit_count >= BOMBARDMENT_REQUIRED_HITS
    }

    /// Lengths of ships still afloat.
    pub fn remaining_ships(&self) -> Vec<usize> {
        self.ships
            .iter()
            .filter(|s| !s.is_sunk())
            .map(|s| s.cells.len())
            .collect()
    }

    /// Snapshot in the form the planner consumes.
    pub fn snapshot(&self) -> GameState {
        GameState {
            grid: self.view.to_codes(),
            remaining_ships: self.remaining_ships(),
            ships_can_touch: self.rules.ships_can_touch,
            airstrike_allowed: self.rules.airstrike_allowed,
            bombardment_allowed: self.rules.bombardment_allowed,
            airstrike_hit_count: self.airstrike_hit_count,
            bombardment_hit_count: self.bombardment_hit_count,
            airstrike_available: self.airstrike_activated(),
            bombardment_available: self.bombardment_activated(),
        }
    }

    /// Resolve an attack anchored at `anchor`.
    ///
    /// Cells already hit may be covered again without effect; misses and
    /// sunk cells may not.
    pub fn fire(&mut self, anchor: usize, shot: ShotType) -> Result<TurnReport, RefereeError> {
        let cells = shot
            .cells(self.rules.dims, anchor)
            .ok_or(RefereeError::OutOfBounds { index: anchor })?;
        let usable = match shot {
            ShotType::Single => true,
            ShotType::AirstrikeUpRight | ShotType::AirstrikeDownRight => {
                self.airstrike_activated()
            }
            ShotType::Bombardment => self.bombardment_activated(),
        };
        if !usable {
            return Err(RefereeError::SpecialUnavailable(shot));
        }
        if let Some(&index) = cells
            .iter()
            .find(|&&c| {
                matches!(
                    self.view.state_of(c),
                    Some(CellState::Miss | CellState::Sunk)
                )
            })
        {
            return Err(RefereeError::AlreadyTargeted { index });
        }
        if shot == ShotType::Single && self.view.state_of(anchor) != Some(CellState::Unknown) {
            return Err(RefereeError::AlreadyTargeted { index: anchor });
        }

        let mut report = TurnReport::default();
        for &cell in &cells {
            if self.view.state_of(cell) != Some(CellState::Unknown) {
                continue;
            }
            match self.ships.iter_mut().find(|s| s.cells.contains(&cell)) {
                Some(ship) => {
                    ship.hits += 1;
                    self.view.set(cell, CellState::Hit);
                    report.hits.push(cell);
                    if ship.is_sunk() {
                        for &c in &ship.cells {
                            self.view.set(c, CellState::Sunk);
                        }
                        report.sunk.push(ship.cells.len());
                    }
                }
                None => {
                    self.view.set(cell, CellState::Miss);
                    report.misses.push(cell);
                }
            }
        }

        // firing a special spends its counter before this turn's hits count
        if shot.is_airstrike() {
            self.airstrike_hit_count = 0;
        }
        if shot == ShotType::Bombardment {
            self.bombardment_hit_count = 0;
        }
        let hits = report.hits.len() as u32;
        self.airstrike_hit_count += hits;
        self.bombardment_hit_count += hits;
        self.turns += 1;

        Ok(report)
    }
}

fn fits(rules: &GameRules, ships: &[HiddenShip], cells: &[usize]) -> bool {
    cells.iter().all(|&c| {
        ships.iter().all(|s| {
            !s.cells.contains(&c)
                && (rules.ships_can_touch
                    || rules.dims.neighbors4(c).all(|n| !s.cells.contains(&n)))
        })
    })
}

fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    rules: &GameRules,
    placed: &[Placement],
    len: usize,
) -> Result<Placement, RefereeError> {
    let dims = rules.dims;
    let ships: Vec<HiddenShip> = placed
        .iter()
        .map(|p| HiddenShip {
            cells: p.cells(dims).collect(),
            hits: 0,
        })
        .collect();
    let mut attempts = 0;
    while attempts < 200 {
        attempts += 1;
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let x = rng.random_range(0..dims.width());
        let y = rng.random_range(0..dims.height());
        let Some(placement) = Placement::new(dims, x, y, len, orientation) else {
            continue;
        };
        let cells: Vec<usize> = placement.cells(dims).collect();
        if fits(rules, &ships, &cells) {
            return Ok(placement);
        }
    }
    Err(RefereeError::UnableToPlaceShip)
}

/// Summary of a finished game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSummary {
    pub turns: usize,
    pub airstrikes: usize,
    pub bombardments: usize,
}

/// Let the planner play against the referee until the fleet is sunk.
pub fn play(referee: &mut Referee, config: &PlannerConfig) -> Result<GameSummary, RefereeError> {
    let mut summary = GameSummary::default();
    let limit = referee.rules().dims.cells();
    while !referee.is_over() {
        if referee.turns() >= limit {
            return Err(RefereeError::Plan(PlanError::InternalPlanningError(
                "game did not finish within the board size",
            )));
        }
        let shot = service::decide(&referee.snapshot(), config)?;
        referee.fire(shot.anchor, shot.shot_type)?;
        if shot.shot_type.is_airstrike() {
            summary.airstrikes += 1;
        } else if shot.shot_type == ShotType::Bombardment {
            summary.bombardments += 1;
        }
    }
    summary.turns = referee.turns();
    Ok(summary)
}
