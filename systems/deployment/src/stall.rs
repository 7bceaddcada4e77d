use lane_defence_core::{BoardSnapshot, Command, GameConfig, Player, UnitKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::deploy_locations;

/// Upper bound on scramblers placed in a single turn.
pub const MAX_STALL_DEPLOYS: u32 = 64;

/// Spends leftover bits on scramblers scattered across the friendly edges.
///
/// Every turn draws from a generator keyed by the seed and the snapshot's turn
/// number, so the same snapshot and seed always yield the same deployments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScramblerStall {
    seed: u64,
}

impl ScramblerStall {
    /// Creates a stall whose random choices are fully determined by `seed`.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Emits one scrambler deployment per affordable unit, at most
    /// [`MAX_STALL_DEPLOYS`].
    ///
    /// Nothing is emitted when scramblers are free or unconfigured, or when
    /// every edge cell is blocked.
    pub fn handle(&self, snapshot: &BoardSnapshot, config: &GameConfig, out: &mut Vec<Command>) {
        let Some(stats) = config.stats(UnitKind::Scrambler) else {
            return;
        };
        if stats.cost.bits <= 0.0 && stats.cost.cores <= 0.0 {
            return;
        }

        let locations = deploy_locations(snapshot);
        if locations.is_empty() {
            return;
        }

        let count = snapshot
            .resources(Player::Me)
            .affordable(stats.cost, MAX_STALL_DEPLOYS);
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed ^ u64::from(snapshot.turn_number()));
        for _ in 0..count {
            let at = locations[rng.gen_range(0..locations.len())];
            debug!(at = %at, "stall with scrambler");
            out.push(Command::Deploy {
                kind: UnitKind::Scrambler,
                at,
                count: 1,
            });
        }
    }
}
