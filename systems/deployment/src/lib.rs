#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks launch cells for mobile units by estimating path risk.

mod stall;

use lane_defence_core::{BoardCoord, BoardQuery, BoardSnapshot, GameConfig, Player, HALF_ARENA};
use tracing::trace;

pub use stall::{ScramblerStall, MAX_STALL_DEPLOYS};

/// Column splitting the arena into its left and right flanks.
pub const MIDPOINT_X: i32 = HALF_ARENA;

/// Estimated damage a mobile unit takes walking from `start` to the far edge.
///
/// Sums, over every cell of the predicted path, the per-hit damage of each
/// opposing structure that can reach that cell.
#[must_use]
pub fn risk_score<Q>(query: &Q, config: &GameConfig, start: BoardCoord) -> f32
where
    Q: BoardQuery + ?Sized,
{
    query
        .path_to_edge(start)
        .into_iter()
        .flat_map(|cell| query.attackers(cell, Player::Me))
        .map(|kind| config.damage(kind))
        .sum()
}

/// Returns the candidate with the strictly smallest risk score.
///
/// Ties keep the earliest candidate in input order.
///
/// # Panics
///
/// Panics when `candidates` is empty; callers must fall back to
/// [`deploy_locations`] before asking for a rally point.
#[must_use]
pub fn choose_rally<Q>(query: &Q, config: &GameConfig, candidates: &[BoardCoord]) -> BoardCoord
where
    Q: BoardQuery + ?Sized,
{
    assert!(
        !candidates.is_empty(),
        "choose_rally requires at least one candidate"
    );

    let mut best: Option<RallyCandidate> = None;
    for (index, &cell) in candidates.iter().enumerate() {
        let current = RallyCandidate {
            cell,
            index,
            risk: risk_score(query, config, cell),
        };
        trace!(at = %cell, risk = current.risk, "rally candidate");

        match &mut best {
            Some(existing) => {
                if current.precedes(existing) {
                    *existing = current;
                }
            }
            None => best = Some(current),
        }
    }

    best.map_or(candidates[0], |candidate| candidate.cell)
}

/// Diagonal neighbours of a rally cell used to launch a flanking wave.
///
/// Right of the midpoint the offsets are `(+1, +1)` and `(-1, -1)`; otherwise
/// `(+1, -1)` and `(-1, +1)`. The offsets only depend on which side of the
/// midpoint the cell lies, so a cell at the end of an edge can get neighbours
/// off that edge.
#[must_use]
pub fn neighbors_of(best: BoardCoord) -> [BoardCoord; 2] {
    if best.x() > MIDPOINT_X {
        [best.offset(1, 1), best.offset(-1, -1)]
    } else {
        [best.offset(1, -1), best.offset(-1, 1)]
    }
}

/// Friendly edge cells not blocked by a structure.
///
/// Bottom-left edge first, then bottom-right, each in increasing `x`.
#[must_use]
pub fn deploy_locations(snapshot: &BoardSnapshot) -> Vec<BoardCoord> {
    Player::Me
        .deploy_edges()
        .into_iter()
        .flat_map(|edge| snapshot.open_edge_cells(edge))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct RallyCandidate {
    cell: BoardCoord,
    index: usize,
    risk: f32,
}

impl RallyCandidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.risk != other.risk {
            return self.risk < other.risk;
        }

        self.index < other.index
    }
}
