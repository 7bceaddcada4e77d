use lane_defence_core::{BoardCoord, BoardSnapshot, Command, Player, Resource, UnitKind};
use serde::Deserialize;

/// Group of identical mobile units launched from one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Wave {
    /// Mobile unit to launch.
    pub kind: UnitKind,
    /// Requested unit count; the host clamps it to what bits allow.
    pub count: u32,
}

impl Wave {
    /// Creates a wave of `count` units of `kind`.
    #[must_use]
    pub const fn new(kind: UnitKind, count: u32) -> Self {
        Self { kind, count }
    }

    /// Deployment command launching the wave from `at`.
    #[must_use]
    pub const fn deploy_at(self, at: BoardCoord) -> Command {
        Command::Deploy {
            kind: self.kind,
            at,
            count: self.count,
        }
    }
}

/// Condition that released the offense on a given turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffenseTrigger {
    /// Own health dropped to the critical threshold.
    CriticalHealth,
    /// Bits exceed the surplus threshold.
    BitsSurplus,
}

/// Thresholds and wave composition of the probe-and-swarm offense.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OffensePolicy {
    /// Own health at or below which the offense fires.
    pub critical_health: f32,
    /// Bits above which the offense fires.
    pub bits_surplus: f32,
    /// Wave launched from the safest rally cell.
    pub probe: Wave,
    /// Wave launched from each diagonal neighbour of the rally cell.
    pub flank: Wave,
    /// Follow-up wave meant to spend the remaining bits.
    pub swarm: Wave,
    /// Spend idle bits on randomly placed scramblers when the offense holds.
    pub stall_with_scramblers: bool,
    /// Seed of the scrambler placement generator.
    pub seed: u64,
}

impl Default for OffensePolicy {
    fn default() -> Self {
        Self {
            critical_health: 3.0,
            bits_surplus: 15.0,
            probe: Wave::new(UnitKind::Emp, 2),
            flank: Wave::new(UnitKind::Ping, 1),
            swarm: Wave::new(UnitKind::Emp, 1000),
            stall_with_scramblers: false,
            seed: 0,
        }
    }
}

impl OffensePolicy {
    /// Waves in launch order.
    #[must_use]
    pub const fn waves(&self) -> [Wave; 3] {
        [self.probe, self.flank, self.swarm]
    }

    /// Evaluates the thresholds against `snapshot`.
    ///
    /// Turn zero always holds. Critical health is checked before the bits
    /// surplus.
    #[must_use]
    pub fn trigger(&self, snapshot: &BoardSnapshot) -> Option<OffenseTrigger> {
        if snapshot.turn_number() == 0 {
            return None;
        }

        if snapshot.health(Player::Me) <= self.critical_health {
            Some(OffenseTrigger::CriticalHealth)
        } else if snapshot.resources(Player::Me).get(Resource::Bits) > self.bits_surplus {
            Some(OffenseTrigger::BitsSurplus)
        } else {
            None
        }
    }
}
