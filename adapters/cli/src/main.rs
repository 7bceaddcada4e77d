#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Lane Defence match.
//!
//! The friendly side is driven by the turn controller; the opponent is a
//! static mirror of a layout that never attacks.

mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lane_defence_core::{Host, Player, Resource};
use lane_defence_system_layout::DesiredLayout;
use lane_defence_system_turn::TurnController;
use lane_defence_world::World;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use crate::settings::{Settings, Sources};

/// Runs the decision engine against the in-memory reference host.
#[derive(Parser, Debug)]
#[command(name = "lane-defence", version)]
struct Args {
    /// Number of turns to play.
    #[arg(short, long, default_value_t = 10)]
    turns: u32,

    /// Seed of the scrambler stall; overrides the policy file.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Unit and economy configuration (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Offense policy (TOML with an `[offense]` table).
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Friendly defensive layout (TOML); the built-in layout when omitted.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Layout mirrored onto the opponent's half; the friendly layout when omitted.
    #[arg(long)]
    opponent_layout: Option<PathBuf>,
}

/// Entry point for the Lane Defence command-line interface.
fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let Settings {
        config,
        mut policy,
        layout,
        opponent,
    } = Settings::load(Sources {
        config: args.config.as_deref(),
        policy: args.policy.as_deref(),
        layout: args.layout.as_deref(),
        opponent: args.opponent_layout.as_deref(),
    })?;
    if let Some(seed) = args.seed {
        policy.seed = seed;
    }

    let mut controller = TurnController::new(&layout, config.clone(), policy)
        .context("could not assemble the turn controller")?;
    let mut world = World::new(config);
    let placed = seed_opponent(&mut world, &opponent);
    info!(placed, turns = args.turns, "match ready");

    for _ in 0..args.turns {
        controller.observe(&world.drain_events());
        let report = controller.play_turn(&mut world);

        let snapshot = world.snapshot();
        let pool = snapshot.resources(Player::Me);
        info!(
            turn = report.turn,
            requested = report.commands.len(),
            admitted = world.last_submission().len(),
            cores = pool.get(Resource::Cores),
            bits = pool.get(Resource::Bits),
            health = snapshot.health(Player::Me),
            opponent_health = snapshot.health(Player::Opponent),
            "turn complete"
        );

        if snapshot.health(Player::Opponent) <= 0.0 {
            info!(turn = report.turn, "opponent defeated");
            break;
        }
        world.advance_turn();
    }

    info!(
        rejections = world.rejections(),
        breaches = controller.breaches().locations().len(),
        "match finished"
    );
    Ok(())
}

/// Builds every structure of `layout` on the opponent's half, mirrored.
fn seed_opponent(world: &mut World, layout: &DesiredLayout) -> usize {
    let mut placed = 0;
    for (cell, desired) in layout.cells() {
        let Some(kind) = desired.kind.structure() else {
            continue;
        };

        let at = layout.to_board(cell).mirrored();
        if world.place(Player::Opponent, kind, at) {
            placed += 1;
        } else {
            warn!(%at, %kind, "opponent structure could not be placed");
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::GameConfig;

    #[test]
    fn opponent_mirror_fills_the_far_half() {
        let layout = DesiredLayout::standard().expect("layout");
        let mut world = World::new(GameConfig::standard());

        let placed = seed_opponent(&mut world, &layout);
        let snapshot = world.snapshot();

        assert!(placed > 0);
        assert_eq!(snapshot.structures().count(), placed);
        assert!(snapshot
            .structures()
            .all(|(at, structure)| structure.owner == Player::Opponent
                && Player::Opponent.owns(at)));
    }

    #[test]
    fn arguments_parse_with_defaults() {
        let args = Args::try_parse_from(["lane-defence", "--seed", "9"]).expect("arguments");
        assert_eq!(args.turns, 10);
        assert_eq!(args.seed, Some(9));
        assert!(args.opponent_layout.is_none());
    }
}
