//! Resolution of deployed waves into breaches.

use lane_defence_core::{
    BoardCoord, BoardQuery, BoardSnapshot, BoardView, Command, Edge, Event, GameConfig, Player,
};
use tracing::trace;

/// Walks a deployed wave along its predicted path and scores surviving units.
///
/// Every cell on the path subtracts the damage of the defending structures in
/// range from the wave's pooled health. Units left alive on reaching the far
/// edge each remove one point of the defender's health and produce a breach.
pub(crate) fn resolve(
    board: &mut BoardSnapshot,
    config: &GameConfig,
    attacker: Player,
    deployment: Command,
) -> Option<Event> {
    let Command::Deploy { kind, at, count } = deployment else {
        return None;
    };
    let stats = config.stats(kind)?;

    let (location, damage) = {
        let view = BoardView::new(board, config);
        let path = view.path_to_edge(at);
        let location = *path.last()?;
        if Edge::of(location) != Some(Edge::home_of(at).opposite()) {
            trace!(%at, %location, "wave stalled before the far edge");
            return None;
        }
        (location, path_damage(&view, config, &path, attacker))
    };

    let pooled = stats.health * count as f32;
    let remaining = pooled - damage;
    if remaining <= 0.0 {
        trace!(%at, damage, "wave destroyed");
        return None;
    }

    let survivors = if stats.health > 0.0 {
        (remaining / stats.health).ceil().min(count as f32)
    } else {
        count as f32
    };

    let defender = attacker.opponent();
    let health = (board.health(defender) - survivors).max(0.0);
    board.set_health(defender, health);
    trace!(%location, survivors, "wave breached");

    Some(Event::Breach { location, attacker })
}

fn path_damage(
    view: &BoardView<'_>,
    config: &GameConfig,
    path: &[BoardCoord],
    victim: Player,
) -> f32 {
    path.iter()
        .flat_map(|cell| view.attackers(*cell, victim))
        .map(|kind| config.damage(kind))
        .sum()
}
