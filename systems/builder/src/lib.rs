#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure construction system that emits build commands in layout priority order.

use lane_defence_core::{
    BoardCoord, BoardSnapshot, Command, ConfigError, GameConfig, LayoutCoord, UnitKind,
};
use lane_defence_system_layout::{DesiredLayout, Priority};
use tracing::debug;

/// Single entry of the construction plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildOrder {
    /// Structure the layout asks for.
    pub kind: UnitKind,
    /// Layout cell the order was derived from.
    pub cell: LayoutCoord,
    /// Board cell that receives the structure.
    pub at: BoardCoord,
    /// Build priority of the cell.
    pub priority: Priority,
}

impl BuildOrder {
    fn plan_order(&self, other: &Self) -> std::cmp::Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.cell.row().cmp(&other.cell.row()))
            .then_with(|| self.cell.column().cmp(&other.cell.column()))
    }
}

/// Construction scheduler that walks a fixed, fully ordered plan every turn.
///
/// The plan is derived once from the immutable layout: every cell that asks
/// for a structure and carries a positive priority, sorted by descending
/// priority with ties broken by layout row and then column.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    plan: Vec<BuildOrder>,
}

impl Scheduler {
    /// Derives the construction plan from `layout`.
    ///
    /// Fails when a structure requested by the layout has no configured cost.
    pub fn new(layout: &DesiredLayout, config: &GameConfig) -> Result<Self, ConfigError> {
        let mut plan = Vec::new();

        for (cell, desired) in layout.cells() {
            let Some(kind) = desired.kind.structure() else {
                continue;
            };
            let Some(priority) = desired.priority.filter(Priority::is_schedulable) else {
                continue;
            };

            let _ = config.require(kind)?;
            plan.push(BuildOrder {
                kind,
                cell,
                at: layout.to_board(cell),
                priority,
            });
        }

        plan.sort_by(BuildOrder::plan_order);
        Ok(Self { plan })
    }

    /// Construction plan in the order it is attempted.
    #[must_use]
    pub fn plan(&self) -> &[BuildOrder] {
        &self.plan
    }

    /// Emits a build command for every planned cell that is still empty.
    ///
    /// Resource admission is left to the host, which drops requests it cannot
    /// afford; spending therefore follows plan order until the pool runs dry.
    pub fn handle(&self, snapshot: &BoardSnapshot, out: &mut Vec<Command>) {
        for order in &self.plan {
            if snapshot.contains_stationary(order.at) {
                continue;
            }

            debug!(
                kind = %order.kind,
                at = %order.at,
                priority = order.priority.get(),
                "queue build"
            );
            out.push(Command::Build {
                kind: order.kind,
                at: order.at,
            });
        }
    }
}

/// Schedules the builds for a single snapshot without keeping the plan around.
pub fn schedule_builds(
    layout: &DesiredLayout,
    config: &GameConfig,
    snapshot: &BoardSnapshot,
) -> Result<Vec<Command>, ConfigError> {
    let scheduler = Scheduler::new(layout, config)?;
    let mut commands = Vec::new();
    scheduler.handle(snapshot, &mut commands);
    Ok(commands)
}
