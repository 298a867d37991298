// Placement-count probability field over the unknown cells.
// Pure enumeration, no randomness, so identical snapshots score identically.

use alloc::vec;
use alloc::vec::Vec;

use crate::config::DEFAULT_HIT_WEIGHT;
use crate::features::Features;
use crate::ship::Placement;

/// Constraints applied to hypothetical placements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRules {
    /// Whether two ships may occupy orthogonally adjacent cells.
    pub ships_can_touch: bool,
    /// Multiplier applied once per unresolved hit a placement covers.
    pub hit_weight: f64,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            ships_can_touch: true,
            hit_weight: DEFAULT_HIT_WEIGHT,
        }
    }
}

/// Relative likelihood that a ship occupies each cell. Only unknown cells
/// carry weight; the scores sum to one whenever any unknown cell exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityField {
    scores: Vec<f64>,
}

impl ProbabilityField {
    /// Enumerate every placement of every remaining ship and accumulate the
    /// weight of the consistent ones on the unknown cells they cover.
    pub fn compute(features: &Features, rules: &PlacementRules) -> Self {
        let dims = features.dims;
        let mut scores = vec![0.0f64; dims.cells()];
        let open = features.open();

        for &len in features.remaining_ships.iter() {
            for placement in Placement::enumerate(dims, len) {
                // check placement validity and count hits
                let mut valid = true;
                let mut n_hits = 0i32;
                for idx in placement.cells(dims) {
                    if !open.contains(idx)
                        || (!rules.ships_can_touch && features.is_sunk_adjacent(idx))
                    {
                        valid = false;
                        break;
                    }
                    if features.hit.contains(idx) {
                        n_hits += 1;
                    }
                }
                if !valid {
                    continue;
                }

                let weight = if n_hits == 0 {
                    1.0
                } else {
                    libm::pow(rules.hit_weight, n_hits as f64)
                };
                for idx in placement.cells(dims) {
                    if features.available.contains(idx) {
                        scores[idx] += weight;
                    }
                }
            }
        }

        normalize(scores, features)
    }

    /// Score of `index`; zero for anything that is not an unknown cell.
    #[inline]
    pub fn score(&self, index: usize) -> f64 {
        self.scores.get(index).copied().unwrap_or(0.0)
    }

    /// Summed score of a group of cells.
    pub fn total<I: IntoIterator<Item = usize>>(&self, cells: I) -> f64 {
        cells.into_iter().map(|i| self.score(i)).sum()
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Highest-scoring unknown cell. Ties prefer a cell next to an
    /// unresolved hit, then the lowest index.
    pub fn best_cell(&self, features: &Features) -> Option<usize> {
        self.best_of(features, features.available.iter())
    }

    /// Highest-scoring positive cell among `candidates`, ranked like
    /// [`best_cell`](Self::best_cell).
    pub fn best_of<I>(&self, features: &Features, candidates: I) -> Option<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut best: Option<(usize, f64, bool)> = None;
        for idx in candidates {
            let score = self.score(idx);
            if score <= 0.0 {
                continue;
            }
            let adjacent = features.is_hit_adjacent(idx);
            let better = match best {
                None => true,
                Some((b_idx, b_score, b_adj)) => {
                    score > b_score
                        || (score == b_score && adjacent && !b_adj)
                        || (score == b_score && adjacent == b_adj && idx < b_idx)
                }
            };
            if better {
                best = Some((idx, score, adjacent));
            }
        }
        best.map(|(idx, _, _)| idx)
    }
}

/// Scale to a distribution over the unknown cells. With no consistent
/// placement at all, every unknown cell is equally likely.
fn normalize(mut scores: Vec<f64>, features: &Features) -> ProbabilityField {
    let total: f64 = scores.iter().sum();
    if total == 0.0 {
        let count = features.available.count();
        if count > 0 {
            let uniform = 1.0 / count as f64;
            for idx in features.available.iter() {
                scores[idx] = uniform;
            }
        }
        return ProbabilityField { scores };
    }
    for v in scores.iter_mut() {
        *v /= total;
    }
    ProbabilityField { scores }
}
