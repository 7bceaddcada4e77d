#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn controller that sequences construction and offense for one turn.
//!
//! Each call to [`TurnController::play_turn`] walks the same fixed sequence of
//! [`TurnPhase`]s: read a snapshot, queue the missing defenses, re-evaluate
//! the board as it will look once those builds land, pick the offense and hand
//! the whole batch to the host in a single submission.

mod breach;
mod policy;

use lane_defence_core::{
    BoardCoord, BoardSnapshot, BoardView, CellKind, Command, ConfigError, Event, GameConfig,
    Host, UnitKind,
};
use lane_defence_system_builder::Scheduler;
use lane_defence_system_deployment::{choose_rally, deploy_locations, neighbors_of, ScramblerStall};
use lane_defence_system_layout::DesiredLayout;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

pub use breach::BreachLog;
pub use policy::{OffensePolicy, OffenseTrigger, Wave};

/// Step of the single-pass turn sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting for the host to provide the board.
    AwaitingSnapshot,
    /// Queuing construction against the desired layout.
    BuildingDefense,
    /// Re-reading the board with queued construction applied.
    ReEvaluating,
    /// Choosing mobile deployments.
    Attacking,
    /// Commands handed to the host; terminal for the turn.
    Submitted,
}

/// Errors raised while assembling a [`TurnController`].
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A unit referenced by the layout or the offense policy is not configured.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The offense policy tries to deploy a structure.
    #[error("offense waves must use mobile units, found {kind}")]
    StationaryWave {
        /// Offending unit kind.
        kind: UnitKind,
    },
}

/// Summary of a completed turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    /// Turn number reported by the host snapshot.
    pub turn: u32,
    /// Condition that released the offense, if any.
    pub trigger: Option<OffenseTrigger>,
    /// Commands submitted to the host, in submission order.
    pub commands: Vec<Command>,
}

impl TurnReport {
    /// Number of build commands submitted.
    #[must_use]
    pub fn builds(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, Command::Build { .. }))
            .count()
    }

    /// Number of deploy commands submitted.
    #[must_use]
    pub fn deploys(&self) -> usize {
        self.commands.len() - self.builds()
    }
}

/// Decides every turn of a match for the friendly player.
#[derive(Debug)]
pub struct TurnController {
    config: GameConfig,
    policy: OffensePolicy,
    scheduler: Scheduler,
    rally: Vec<BoardCoord>,
    stall: ScramblerStall,
    breaches: BreachLog,
    phase: TurnPhase,
}

impl TurnController {
    /// Builds a controller for `layout` under `config` and `policy`.
    ///
    /// Fails when the layout or a wave uses an unconfigured unit, or when a
    /// wave names a stationary unit.
    pub fn new(
        layout: &DesiredLayout,
        config: GameConfig,
        policy: OffensePolicy,
    ) -> Result<Self, PolicyError> {
        for wave in policy.waves() {
            if wave.kind.is_stationary() {
                return Err(PolicyError::StationaryWave { kind: wave.kind });
            }
            let _ = config.require(wave.kind)?;
        }
        if policy.stall_with_scramblers {
            let _ = config.require(UnitKind::Scrambler)?;
        }

        let scheduler = Scheduler::new(layout, &config)?;
        let rally = layout
            .find_all(CellKind::Rally)
            .iter()
            .map(|cell| layout.to_board(*cell))
            .collect();

        Ok(Self {
            config,
            policy,
            scheduler,
            rally,
            stall: ScramblerStall::new(policy.seed),
            breaches: BreachLog::default(),
            phase: TurnPhase::AwaitingSnapshot,
        })
    }

    /// Phase reached by the most recent turn.
    #[must_use]
    pub const fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Rally cells taken from the layout, in layout order.
    #[must_use]
    pub fn rally_cells(&self) -> &[BoardCoord] {
        &self.rally
    }

    /// Breach history accumulated through [`TurnController::observe`].
    #[must_use]
    pub const fn breaches(&self) -> &BreachLog {
        &self.breaches
    }

    /// Records out-of-band events delivered by the host.
    pub fn observe(&mut self, events: &[Event]) {
        self.breaches.record(events);
    }

    /// Plays one turn against `host` and submits the resulting commands.
    pub fn play_turn<H>(&mut self, host: &mut H) -> TurnReport
    where
        H: Host + ?Sized,
    {
        self.enter(TurnPhase::AwaitingSnapshot);
        let snapshot = host.snapshot();
        let turn = snapshot.turn_number();

        self.enter(TurnPhase::BuildingDefense);
        let mut commands = Vec::new();
        self.scheduler.handle(&snapshot, &mut commands);

        self.enter(TurnPhase::ReEvaluating);
        let refreshed = host.snapshot().projected(&commands, &self.config);

        self.enter(TurnPhase::Attacking);
        let trigger = self.policy.trigger(&refreshed);
        match trigger {
            Some(trigger) => self.attack(&refreshed, trigger, &mut commands),
            None if self.policy.stall_with_scramblers && turn > 0 => {
                self.stall.handle(&refreshed, &self.config, &mut commands);
            }
            None => {}
        }

        self.enter(TurnPhase::Submitted);
        let report = TurnReport {
            turn,
            trigger,
            commands,
        };
        info!(
            turn,
            builds = report.builds(),
            deploys = report.deploys(),
            ?trigger,
            "turn submitted"
        );
        host.submit(report.commands.clone());
        report
    }

    fn enter(&mut self, phase: TurnPhase) {
        trace!(?phase, "turn phase");
        self.phase = phase;
    }

    fn attack(&self, snapshot: &BoardSnapshot, trigger: OffenseTrigger, out: &mut Vec<Command>) {
        let view = BoardView::new(snapshot, &self.config);
        let open = deploy_locations(snapshot);
        let rally: Vec<BoardCoord> = self
            .rally
            .iter()
            .copied()
            .filter(|cell| open.contains(cell))
            .collect();

        let candidates: &[BoardCoord] = if rally.is_empty() { &open } else { &rally };
        if candidates.is_empty() {
            warn!(?trigger, "every deploy location is blocked, holding offense");
            return;
        }
        if rally.is_empty() {
            debug!("no open rally cell, scanning friendly edges");
        }

        let best = choose_rally(&view, &self.config, candidates);
        debug!(at = %best, ?trigger, "probe rally chosen");
        out.push(self.policy.probe.deploy_at(best));
        for flank in neighbors_of(best) {
            out.push(self.policy.flank.deploy_at(flank));
        }

        let follow_up = choose_rally(&view, &self.config, &open);
        out.push(self.policy.swarm.deploy_at(follow_up));
    }
}
