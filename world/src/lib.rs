#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative in-memory game host for Lane Defence.
//!
//! The world owns the board, grants per-turn income, admits submitted
//! commands on a best-effort basis and resolves deployed waves into breach
//! events. Decision systems never touch it directly; they read snapshots and
//! submit commands through the [`Host`] trait.

mod waves;

use lane_defence_core::{
    BoardCoord, BoardSnapshot, Command, Event, GameConfig, Host, Player, Resources,
    StructureSnapshot, UnitKind,
};
use tracing::{debug, trace};

/// Represents the authoritative Lane Defence board state.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    board: BoardSnapshot,
    events: Vec<Event>,
    last_submission: Vec<Command>,
    rejections: usize,
}

impl World {
    /// Creates a world on turn zero with the configured starting resources and health.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let income = *config.income();
        let start = Resources::new(income.starting_cores, income.starting_bits);
        let board = BoardSnapshot::empty(0)
            .with_resources(Player::Me, start)
            .with_resources(Player::Opponent, start)
            .with_health(Player::Me, income.starting_health)
            .with_health(Player::Opponent, income.starting_health);

        Self {
            config,
            board,
            events: Vec::new(),
            last_submission: Vec::new(),
            rejections: 0,
        }
    }

    /// Configuration the world was created with.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Places a structure for `player` without charging for it.
    ///
    /// Returns `false` when the cell is outside the arena, already occupied,
    /// or the kind is not a configured structure.
    pub fn place(&mut self, player: Player, kind: UnitKind, at: BoardCoord) -> bool {
        let Some(stats) = self.config.stats(kind) else {
            return false;
        };
        if !kind.is_stationary() || self.board.contains_stationary(at) {
            return false;
        }

        let structure = StructureSnapshot {
            kind,
            owner: player,
            health: stats.health,
        };
        self.board.insert_structure(at, structure)
    }

    /// Overrides the resource pool of `player`.
    pub fn set_resources(&mut self, player: Player, resources: Resources) {
        self.board.set_resources(player, resources);
    }

    /// Overrides the core health of `player`.
    pub fn set_health(&mut self, player: Player, health: f32) {
        self.board.set_health(player, health);
    }

    /// Moves to the next turn and grants income to both players.
    pub fn advance_turn(&mut self) {
        let income = *self.config.income();
        let turn = self.board.turn_number().saturating_add(1);
        self.board.set_turn(turn);

        for player in [Player::Me, Player::Opponent] {
            let mut pool = self.board.resources(player);
            pool.cores += income.cores_per_turn;
            pool.bits += income.bits_per_turn;
            self.board.set_resources(player, pool);
        }
        trace!(turn, "turn advanced");
    }

    /// Commands admitted from the most recent submission, with clamped counts.
    #[must_use]
    pub fn last_submission(&self) -> &[Command] {
        &self.last_submission
    }

    /// Total number of submitted commands the world dropped.
    #[must_use]
    pub const fn rejections(&self) -> usize {
        self.rejections
    }

    /// Removes and returns the events broadcast since the previous call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

impl Host for World {
    fn snapshot(&self) -> BoardSnapshot {
        self.board.clone()
    }

    fn submit(&mut self, commands: Vec<Command>) {
        self.last_submission.clear();

        for command in commands {
            match self.board.admit(Player::Me, command, &self.config) {
                Some(admitted) => self.last_submission.push(admitted),
                None => {
                    debug!(?command, "command rejected");
                    self.rejections += 1;
                }
            }
        }

        let deployments: Vec<Command> = self
            .last_submission
            .iter()
            .copied()
            .filter(|command| matches!(command, Command::Deploy { .. }))
            .collect();
        for deployment in deployments {
            let breach = waves::resolve(&mut self.board, &self.config, Player::Me, deployment);
            self.events.extend(breach);
        }
    }
}
