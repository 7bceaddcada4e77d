//! Read-only board snapshot supplied by the host each turn.

use crate::{
    navigation, BoardCoord, BoardQuery, Command, Edge, GameConfig, Player, Resources, UnitKind,
    ARENA_SIZE,
};

/// Immutable representation of a structure occupying a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StructureSnapshot {
    /// Kind of structure that was built.
    pub kind: UnitKind,
    /// Player that owns the structure.
    pub owner: Player,
    /// Remaining hit points.
    pub health: f32,
}

/// Per-turn view of the arena: occupancy, resources, health and turn number.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardSnapshot {
    turn: u32,
    cells: Vec<Option<StructureSnapshot>>,
    resources: [Resources; 2],
    health: [f32; 2],
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::empty(0)
    }
}

impl BoardSnapshot {
    /// Creates a snapshot with no structures, no resources and no health.
    #[must_use]
    pub fn empty(turn: u32) -> Self {
        let side = usize::try_from(ARENA_SIZE).unwrap_or(0);
        Self {
            turn,
            cells: vec![None; side * side],
            resources: [Resources::default(); 2],
            health: [0.0; 2],
        }
    }

    /// Returns the snapshot with the provided resource pool for `player`.
    #[must_use]
    pub fn with_resources(mut self, player: Player, resources: Resources) -> Self {
        self.set_resources(player, resources);
        self
    }

    /// Returns the snapshot with the provided core health for `player`.
    #[must_use]
    pub fn with_health(mut self, player: Player, health: f32) -> Self {
        self.set_health(player, health);
        self
    }

    /// Returns the snapshot with a structure placed at `at`.
    ///
    /// Cells outside the arena are ignored.
    #[must_use]
    pub fn with_structure(mut self, at: BoardCoord, structure: StructureSnapshot) -> Self {
        let _ = self.insert_structure(at, structure);
        self
    }

    /// Current turn number, starting at zero.
    #[must_use]
    pub const fn turn_number(&self) -> u32 {
        self.turn
    }

    /// Resource pool held by `player`.
    #[must_use]
    pub const fn resources(&self, player: Player) -> Resources {
        self.resources[player.slot()]
    }

    /// Core health of `player`.
    #[must_use]
    pub const fn health(&self, player: Player) -> f32 {
        self.health[player.slot()]
    }

    /// Structure occupying `at`, if any.
    #[must_use]
    pub fn structure_at(&self, at: BoardCoord) -> Option<StructureSnapshot> {
        index(at).and_then(|index| self.cells.get(index).copied().flatten())
    }

    /// Reports whether a stationary unit blocks `at`.
    #[must_use]
    pub fn contains_stationary(&self, at: BoardCoord) -> bool {
        self.structure_at(at).is_some()
    }

    /// Iterator over all structures in row-major board order.
    pub fn structures(&self) -> impl Iterator<Item = (BoardCoord, StructureSnapshot)> + '_ {
        self.cells.iter().enumerate().filter_map(|(index, cell)| {
            let structure = (*cell)?;
            let index = i32::try_from(index).ok()?;
            Some((
                BoardCoord::new(index % ARENA_SIZE, index / ARENA_SIZE),
                structure,
            ))
        })
    }

    /// Cells of `edge` not blocked by a structure.
    #[must_use]
    pub fn open_edge_cells(&self, edge: Edge) -> Vec<BoardCoord> {
        edge.cells()
            .into_iter()
            .filter(|cell| !self.contains_stationary(*cell))
            .collect()
    }

    /// Advances the turn counter.
    pub fn set_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    /// Replaces the resource pool of `player`.
    pub fn set_resources(&mut self, player: Player, resources: Resources) {
        self.resources[player.slot()] = resources;
    }

    /// Replaces the core health of `player`.
    pub fn set_health(&mut self, player: Player, health: f32) {
        self.health[player.slot()] = health;
    }

    /// Places a structure, returning `false` when the cell lies outside the arena.
    pub fn insert_structure(&mut self, at: BoardCoord, structure: StructureSnapshot) -> bool {
        match index(at).and_then(|index| self.cells.get_mut(index)) {
            Some(cell) => {
                *cell = Some(structure);
                true
            }
            None => false,
        }
    }

    /// Applies `command` on behalf of `player` under the host's admission rules.
    ///
    /// Returns the command as admitted, with deploy counts clamped to what the
    /// player can afford, or `None` when the host would drop it.
    pub fn admit(
        &mut self,
        player: Player,
        command: Command,
        config: &GameConfig,
    ) -> Option<Command> {
        let stats = config.stats(command.kind())?;
        let at = command.at();

        match command {
            Command::Build { kind, .. } => {
                if !kind.is_stationary()
                    || !at.in_arena()
                    || !player.owns(at)
                    || self.contains_stationary(at)
                {
                    return None;
                }

                let pool = &mut self.resources[player.slot()];
                if pool.affordable(stats.cost, 1) == 0 {
                    return None;
                }
                pool.spend(stats.cost, 1);

                let structure = StructureSnapshot {
                    kind,
                    owner: player,
                    health: stats.health,
                };
                let _ = self.insert_structure(at, structure);
                Some(command)
            }
            Command::Deploy { kind, count, .. } => {
                let on_edge = player
                    .deploy_edges()
                    .into_iter()
                    .any(|edge| edge.contains(at));
                if kind.is_stationary() || !on_edge || self.contains_stationary(at) {
                    return None;
                }

                let pool = &mut self.resources[player.slot()];
                let admitted = pool.affordable(stats.cost, count);
                if admitted == 0 {
                    return None;
                }
                pool.spend(stats.cost, admitted);

                Some(Command::Deploy {
                    kind,
                    at,
                    count: admitted,
                })
            }
        }
    }

    /// Returns a copy of the snapshot with `commands` admitted for the friendly player.
    ///
    /// The host has not yet seen these commands, so this mirrors the state it
    /// will reach once they are submitted. `self` is left untouched.
    #[must_use]
    pub fn projected(&self, commands: &[Command], config: &GameConfig) -> Self {
        let mut projected = self.clone();
        for command in commands {
            let _ = projected.admit(Player::Me, *command, config);
        }
        projected
    }
}

fn index(at: BoardCoord) -> Option<usize> {
    if !at.in_arena() {
        return None;
    }

    let x = usize::try_from(at.x()).ok()?;
    let y = usize::try_from(at.y()).ok()?;
    let side = usize::try_from(ARENA_SIZE).ok()?;
    y.checked_mul(side)?.checked_add(x)
}

/// Snapshot paired with the configuration needed to answer path and threat queries.
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    snapshot: &'a BoardSnapshot,
    config: &'a GameConfig,
}

impl<'a> BoardView<'a> {
    /// Captures a new view over the provided snapshot.
    #[must_use]
    pub const fn new(snapshot: &'a BoardSnapshot, config: &'a GameConfig) -> Self {
        Self { snapshot, config }
    }
}

impl BoardQuery for BoardView<'_> {
    fn path_to_edge(&self, start: BoardCoord) -> Vec<BoardCoord> {
        navigation::path_to_edge(start, |cell| self.snapshot.contains_stationary(cell))
    }

    fn attackers(&self, at: BoardCoord, victim: Player) -> Vec<UnitKind> {
        let hostile = victim.opponent();
        self.snapshot
            .structures()
            .filter(|(_, structure)| structure.owner == hostile)
            .filter_map(|(cell, structure)| {
                let stats = self.config.stats(structure.kind)?;
                if stats.damage <= 0.0 {
                    return None;
                }
                let reach = f64::from(stats.range) * f64::from(stats.range);
                (cell.distance_squared(at) as f64 <= reach).then_some(structure.kind)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turret(owner: Player) -> StructureSnapshot {
        StructureSnapshot {
            kind: UnitKind::Destructor,
            owner,
            health: 75.0,
        }
    }

    #[test]
    fn structures_outside_arena_are_ignored() {
        let snapshot =
            BoardSnapshot::empty(1).with_structure(BoardCoord::new(0, 0), turret(Player::Me));
        assert_eq!(snapshot.structures().count(), 0);
        assert_eq!(snapshot.structure_at(BoardCoord::new(0, 0)), None);
    }

    #[test]
    fn structures_iterate_with_board_coordinates() {
        let cell = BoardCoord::new(13, 2);
        let snapshot = BoardSnapshot::empty(1).with_structure(cell, turret(Player::Me));
        let found: Vec<_> = snapshot.structures().map(|(at, _)| at).collect();
        assert_eq!(found, vec![cell]);
    }

    #[test]
    fn build_admission_spends_cores_once_per_cell() {
        let config = GameConfig::standard();
        let mut snapshot = BoardSnapshot::empty(1)
            .with_resources(Player::Me, Resources::new(5.0, 0.0));
        let build = Command::Build {
            kind: UnitKind::Destructor,
            at: BoardCoord::new(13, 5),
        };

        assert_eq!(snapshot.admit(Player::Me, build, &config), Some(build));
        assert_eq!(snapshot.admit(Player::Me, build, &config), None);
        assert!((snapshot.resources(Player::Me).cores - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn build_admission_rejects_opponent_half_and_unaffordable() {
        let config = GameConfig::standard();
        let mut snapshot = BoardSnapshot::empty(1)
            .with_resources(Player::Me, Resources::new(2.0, 0.0));

        let enemy_half = Command::Build {
            kind: UnitKind::Filter,
            at: BoardCoord::new(13, 20),
        };
        let too_expensive = Command::Build {
            kind: UnitKind::Destructor,
            at: BoardCoord::new(13, 5),
        };

        assert_eq!(snapshot.admit(Player::Me, enemy_half, &config), None);
        assert_eq!(snapshot.admit(Player::Me, too_expensive, &config), None);
        assert!((snapshot.resources(Player::Me).cores - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn deploy_admission_clamps_count_to_bits() {
        let config = GameConfig::standard();
        let mut snapshot = BoardSnapshot::empty(1)
            .with_resources(Player::Me, Resources::new(0.0, 10.0));
        let deploy = Command::Deploy {
            kind: UnitKind::Emp,
            at: BoardCoord::new(6, 7),
            count: 1000,
        };

        let admitted = snapshot.admit(Player::Me, deploy, &config);
        assert_eq!(
            admitted,
            Some(Command::Deploy {
                kind: UnitKind::Emp,
                at: BoardCoord::new(6, 7),
                count: 3,
            })
        );
        assert!((snapshot.resources(Player::Me).bits - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn deploy_admission_requires_friendly_edge() {
        let config = GameConfig::standard();
        let mut snapshot = BoardSnapshot::empty(1)
            .with_resources(Player::Me, Resources::new(0.0, 10.0));
        let inland = Command::Deploy {
            kind: UnitKind::Ping,
            at: BoardCoord::new(13, 5),
            count: 1,
        };
        let enemy_edge = Command::Deploy {
            kind: UnitKind::Ping,
            at: BoardCoord::new(0, 14),
            count: 1,
        };

        assert_eq!(snapshot.admit(Player::Me, inland, &config), None);
        assert_eq!(snapshot.admit(Player::Me, enemy_edge, &config), None);
    }

    #[test]
    fn projection_leaves_source_untouched() {
        let config = GameConfig::standard();
        let snapshot = BoardSnapshot::empty(1)
            .with_resources(Player::Me, Resources::new(10.0, 0.0));
        let builds = [
            Command::Build {
                kind: UnitKind::Filter,
                at: BoardCoord::new(0, 13),
            },
            Command::Build {
                kind: UnitKind::Filter,
                at: BoardCoord::new(1, 13),
            },
        ];

        let projected = snapshot.projected(&builds, &config);
        assert_eq!(projected.structures().count(), 2);
        assert!((projected.resources(Player::Me).cores - 8.0).abs() < f32::EPSILON);
        assert_eq!(snapshot.structures().count(), 0);
    }

    #[test]
    fn attackers_respect_owner_range_and_damage() {
        let config = GameConfig::standard();
        let snapshot = BoardSnapshot::empty(1)
            .with_structure(BoardCoord::new(13, 17), turret(Player::Opponent))
            .with_structure(BoardCoord::new(14, 17), turret(Player::Me))
            .with_structure(
                BoardCoord::new(12, 17),
                StructureSnapshot {
                    kind: UnitKind::Filter,
                    owner: Player::Opponent,
                    health: 60.0,
                },
            );
        let view = BoardView::new(&snapshot, &config);

        assert_eq!(
            view.attackers(BoardCoord::new(13, 14), Player::Me),
            vec![UnitKind::Destructor]
        );
        assert!(view.attackers(BoardCoord::new(13, 10), Player::Me).is_empty());
        assert_eq!(
            view.attackers(BoardCoord::new(14, 15), Player::Opponent),
            vec![UnitKind::Destructor]
        );
    }
}
