//! Shot selection: hunt/target mode, target choice and attack shape.
//!
//! Mode and shape are decided by separate functions so each can be tested on
//! its own. Special attacks may be fired from an anchor shifted off the
//! target, so shape selection scores every placement that still covers it.
//! [`select_next_shot`] composes the steps and checks the result before
//! handing it back.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::common::PlanError;
use crate::features::Features;
use crate::probability::ProbabilityField;
use crate::shot::{Availability, ShotType};

/// Targeting policy in effect for a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No unresolved hit: pick the statistically best unknown cell.
    Hunt,
    /// At least one unresolved hit: finish the damaged ship.
    Target,
}

/// The chosen action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shot {
    /// Unknown cell the decision is aimed at.
    pub cell: usize,
    /// Cell the pattern is fired from; equals `cell` unless a shifted
    /// special covers the target better.
    pub anchor: usize,
    pub shot_type: ShotType,
    pub mode: Mode,
    /// Every cell the attack covers, ascending.
    pub cells: Vec<usize>,
}

/// Target mode whenever an unresolved hit exists.
pub fn select_mode(features: &Features) -> Mode {
    if features.hit.is_empty() {
        Mode::Hunt
    } else {
        Mode::Target
    }
}

/// Anchor cell for the given mode.
pub fn select_anchor(features: &Features, field: &ProbabilityField, mode: Mode) -> Option<usize> {
    match mode {
        Mode::Hunt => field.best_cell(features),
        Mode::Target => target_anchor(features, field).or_else(|| field.best_cell(features)),
    }
}

fn target_anchor(features: &Features, field: &ProbabilityField) -> Option<usize> {
    for line in lines_of_hits(features) {
        let ends = line_extensions(features, &line);
        if let Some(cell) = best_by_score(field, ends) {
            return Some(cell);
        }
    }

    let mut adjacent: Vec<usize> = features
        .hit
        .iter()
        .flat_map(|h| features.dims.neighbors4(h))
        .filter(|&n| features.available.contains(n))
        .collect();
    adjacent.sort_unstable();
    adjacent.dedup();
    best_by_score(field, adjacent)
}

/// Highest score, ties to the lowest index. Zero scores still qualify since
/// every candidate here is already known to be unknown and hit-adjacent.
fn best_by_score<I: IntoIterator<Item = usize>>(field: &ProbabilityField, cells: I) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for idx in cells {
        let score = field.score(idx);
        match best {
            Some((b_idx, b_score)) if score < b_score || (score == b_score && idx > b_idx) => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// A run of two or more consecutive hits along a row or column.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HitLine {
    cells: Vec<usize>,
    horizontal: bool,
}

/// Runs of hits, longest first; row runs precede column runs of equal length,
/// then lower starting index.
fn lines_of_hits(features: &Features) -> Vec<HitLine> {
    let dims = features.dims;
    let mut lines = Vec::new();

    for horizontal in [true, false] {
        let (outer, inner) = if horizontal {
            (dims.height(), dims.width())
        } else {
            (dims.width(), dims.height())
        };
        for fixed in 0..outer {
            let mut run: Vec<usize> = Vec::new();
            for moving in 0..=inner {
                let idx = if moving == inner {
                    None
                } else if horizontal {
                    dims.index_of(moving, fixed)
                } else {
                    dims.index_of(fixed, moving)
                };
                match idx {
                    Some(i) if features.hit.contains(i) => run.push(i),
                    _ => {
                        if run.len() >= 2 {
                            lines.push(HitLine {
                                cells: core::mem::take(&mut run),
                                horizontal,
                            });
                        }
                        run.clear();
                    }
                }
            }
        }
    }

    // stable sort keeps rows before columns and scan order within each
    lines.sort_by(|a, b| b.cells.len().cmp(&a.cells.len()));
    lines
}

/// Unknown cells directly before and after a line of hits.
fn line_extensions(features: &Features, line: &HitLine) -> Vec<usize> {
    let (dx, dy) = if line.horizontal { (1, 0) } else { (0, 1) };
    let dims = features.dims;
    let mut ends = Vec::with_capacity(2);
    if let Some(&first) = line.cells.first() {
        ends.extend(dims.offset(first, -dx, -dy));
    }
    if let Some(&last) = line.cells.last() {
        ends.extend(dims.offset(last, dx, dy));
    }
    ends.retain(|&c| features.available.contains(c));
    ends
}

/// Number of probability-ranked cells compared while hunting.
const HUNT_CANDIDATES: usize = 5;

/// One way of covering a target cell: a shape fired from an anchor that may
/// sit a step or two away from the target.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotOption {
    pub shot_type: ShotType,
    pub anchor: usize,
    /// Covered cells, ascending.
    pub cells: Vec<usize>,
    /// Covered unknown cells that touch an unresolved hit.
    pub hit_adjacent: usize,
    /// Summed probability over the covered cells.
    pub score: f64,
}

impl ShotOption {
    fn rank(&self) -> u8 {
        match self.shot_type {
            ShotType::Single => 0,
            ShotType::AirstrikeUpRight | ShotType::AirstrikeDownRight => 1,
            ShotType::Bombardment => 2,
        }
    }

    /// Richer shape first, then more hit-adjacent coverage, then more
    /// probability. Equal options keep the one seen first.
    fn outranks(&self, other: &ShotOption) -> bool {
        match (self.rank(), self.hit_adjacent).cmp(&(other.rank(), other.hit_adjacent)) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.score > other.score,
        }
    }
}

/// Every legal placement of `shape` that covers `target`. The anchor equal to
/// the target comes first.
pub fn shape_options(
    features: &Features,
    field: &ProbabilityField,
    shape: ShotType,
    target: usize,
) -> Vec<ShotOption> {
    let dims = features.dims;
    shape
        .offsets()
        .iter()
        .filter_map(|&(dx, dy)| dims.offset(target, -dx, -dy))
        .filter_map(|anchor| {
            let cells = shape.legal_cells(features, anchor)?;
            let hit_adjacent = cells
                .iter()
                .filter(|&&c| features.available.contains(c) && features.is_hit_adjacent(c))
                .count();
            let score = field.total(cells.iter().copied());
            Some(ShotOption {
                shot_type: shape,
                anchor,
                cells,
                hit_adjacent,
                score,
            })
        })
        .collect()
}

/// Best usable option covering `target`, or `None` when the target itself
/// cannot be shot.
pub fn select_option(
    features: &Features,
    field: &ProbabilityField,
    target: usize,
    availability: &Availability,
) -> Option<ShotOption> {
    let shapes = [
        ShotType::Bombardment,
        ShotType::AirstrikeUpRight,
        ShotType::AirstrikeDownRight,
        ShotType::Single,
    ];
    let mut best: Option<ShotOption> = None;
    for shape in shapes.into_iter().filter(|&s| availability.is_usable(s)) {
        for option in shape_options(features, field, shape, target) {
            if best.as_ref().map_or(true, |b| option.outranks(b)) {
                best = Some(option);
            }
        }
    }
    best
}

/// Richest legal and usable shape covering `target`: bombardment, then the
/// better airstrike, then a single shot.
pub fn select_shape(
    features: &Features,
    field: &ProbabilityField,
    target: usize,
    availability: &Availability,
) -> ShotType {
    select_option(features, field, target, availability).map_or(ShotType::Single, |o| o.shot_type)
}

/// Cells worth comparing options for. Hunting looks at the few best cells,
/// targeting only at the chosen follow-up cell.
fn candidate_targets(features: &Features, field: &ProbabilityField, mode: Mode) -> Vec<usize> {
    if mode == Mode::Hunt {
        let mut ranked: Vec<usize> = features
            .available
            .iter()
            .filter(|&i| field.score(i) > 0.0)
            .collect();
        ranked.sort_by(|&a, &b| {
            field
                .score(b)
                .total_cmp(&field.score(a))
                .then_with(|| features.is_hit_adjacent(b).cmp(&features.is_hit_adjacent(a)))
                .then_with(|| a.cmp(&b))
        });
        ranked.truncate(HUNT_CANDIDATES);
        if !ranked.is_empty() {
            return ranked;
        }
    }
    select_anchor(features, field, mode).into_iter().collect()
}

/// Full decision for one snapshot.
pub fn select_next_shot(
    features: &Features,
    field: &ProbabilityField,
    availability: &Availability,
) -> Result<Shot, PlanError> {
    if features.available.is_empty() {
        return Err(PlanError::NoLegalMove);
    }

    let mode = select_mode(features);
    let targets = candidate_targets(features, field, mode);
    if targets.is_empty() {
        return Err(PlanError::InternalPlanningError("no scored cell despite unknown cells"));
    }

    let mut best: Option<(usize, ShotOption)> = None;
    for target in targets {
        if !features.available.contains(target) {
            return Err(PlanError::InternalPlanningError("target is not an unknown cell"));
        }
        if let Some(option) = select_option(features, field, target, availability) {
            if best.as_ref().map_or(true, |(_, b)| option.outranks(b)) {
                best = Some((target, option));
            }
        }
    }
    let (cell, option) =
        best.ok_or(PlanError::InternalPlanningError("no shape covers the target"))?;

    let legal = option.shot_type.legal_cells(features, option.anchor);
    if legal.as_ref() != Some(&option.cells) || !option.cells.contains(&cell) {
        return Err(PlanError::InternalPlanningError("selected shape is not legal"));
    }

    Ok(Shot {
        cell,
        anchor: option.anchor,
        shot_type: option.shot_type,
        mode,
        cells: option.cells,
    })
}
