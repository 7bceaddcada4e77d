#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence decision engine.
//!
//! This crate defines the message surface that connects the host adapter, the
//! authoritative board, and pure decision systems. The host supplies a fresh
//! [`BoardSnapshot`] every turn, systems query it through [`BoardQuery`], and
//! respond exclusively with [`Command`] batches that the host admits on a
//! best-effort basis. Out-of-band [`Event`] values report breaches.

mod config;
mod navigation;
mod snapshot;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use config::{ConfigError, GameConfig, IncomeConfig, UnitCost, UnitStats};
pub use snapshot::{BoardSnapshot, BoardView, StructureSnapshot};

/// Side length of the square bounding box that contains the diamond arena.
pub const ARENA_SIZE: i32 = 28;

/// Half of [`ARENA_SIZE`]; rows below it belong to the friendly player.
pub const HALF_ARENA: i32 = ARENA_SIZE / 2;

/// Location of a single arena cell in the host's board coordinate system.
///
/// The origin sits at the bottom-left corner of the bounding box, `x` grows to
/// the right and `y` grows upward. Coordinates are signed so that diagonal
/// offsets from edge cells remain representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardCoord {
    x: i32,
    y: i32,
}

impl BoardCoord {
    /// Creates a new board coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component, increasing rightward.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component, increasing upward.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the coordinate shifted by the provided deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Reflects the coordinate across the arena's horizontal centerline.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        Self::new(self.x, ARENA_SIZE - 1 - self.y)
    }

    /// Squared Euclidean distance between two coordinates.
    #[must_use]
    pub fn distance_squared(self, other: BoardCoord) -> i64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        dx * dx + dy * dy
    }

    /// Reports whether the coordinate lies inside the diamond arena.
    #[must_use]
    pub const fn in_arena(self) -> bool {
        if self.y < 0 || self.y >= ARENA_SIZE {
            return false;
        }

        if self.y < HALF_ARENA {
            self.x >= HALF_ARENA - 1 - self.y && self.x <= HALF_ARENA + self.y
        } else {
            self.x >= self.y - HALF_ARENA && self.x <= ARENA_SIZE + HALF_ARENA - 1 - self.y
        }
    }

    /// Converts the coordinate into the layout system of a grid with `rows` rows.
    ///
    /// This is the inverse of [`LayoutCoord::to_board`]. Returns `None` when the
    /// coordinate falls outside the layout's row span or has a negative column.
    #[must_use]
    pub fn to_layout(self, rows: u32) -> Option<LayoutCoord> {
        let rows = i32::try_from(rows).ok()?;
        if self.x < 0 || self.y < 0 || self.y >= rows {
            return None;
        }

        let row = u32::try_from(rows - 1 - self.y).ok()?;
        let column = u32::try_from(self.x).ok()?;
        Some(LayoutCoord::new(row, column))
    }
}

impl fmt::Display for BoardCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Location of a cell inside a desired-layout grid.
///
/// Row zero is the top row of the grid and rows grow downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutCoord {
    row: u32,
    column: u32,
}

impl LayoutCoord {
    /// Creates a new layout coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index, counted from the top of the grid.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Converts the layout cell into the board system of a grid with `rows` rows.
    ///
    /// `board_y = (rows - 1) - row` and `board_x = column`. Every layout cell
    /// that becomes a command goes through this function.
    #[must_use]
    pub fn to_board(self, rows: u32) -> BoardCoord {
        debug_assert!(self.row < rows, "layout row {} outside {rows} rows", self.row);
        let rows = i64::from(rows);
        let y = rows - 1 - i64::from(self.row);
        BoardCoord::new(
            i32::try_from(self.column).unwrap_or(i32::MAX),
            i32::try_from(y).unwrap_or(i32::MIN),
        )
    }
}

/// One of the four diagonal edges of the diamond arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Upper-left edge, owned by the opponent.
    TopLeft,
    /// Upper-right edge, owned by the opponent.
    TopRight,
    /// Lower-left edge, owned by the friendly player.
    BottomLeft,
    /// Lower-right edge, owned by the friendly player.
    BottomRight,
}

impl Edge {
    /// All edges in a fixed order.
    pub const ALL: [Edge; 4] = [
        Edge::TopLeft,
        Edge::TopRight,
        Edge::BottomLeft,
        Edge::BottomRight,
    ];

    /// Edge a unit starting on `self` walks toward.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomLeft => Self::TopRight,
            Self::BottomRight => Self::TopLeft,
        }
    }

    /// Edge belonging to the quadrant that contains `cell`.
    #[must_use]
    pub const fn home_of(cell: BoardCoord) -> Self {
        match (cell.x() < HALF_ARENA, cell.y() < HALF_ARENA) {
            (true, true) => Self::BottomLeft,
            (false, true) => Self::BottomRight,
            (true, false) => Self::TopLeft,
            (false, false) => Self::TopRight,
        }
    }

    /// Edge that contains `cell`, if it lies on one.
    #[must_use]
    pub fn of(cell: BoardCoord) -> Option<Self> {
        Self::ALL.into_iter().find(|edge| edge.contains(cell))
    }

    /// Reports whether `cell` lies on this edge.
    #[must_use]
    pub const fn contains(self, cell: BoardCoord) -> bool {
        let (x, y) = (cell.x(), cell.y());
        match self {
            Self::TopLeft => x >= 0 && x < HALF_ARENA && y == x + HALF_ARENA,
            Self::TopRight => {
                x >= HALF_ARENA && x < ARENA_SIZE && y == ARENA_SIZE + HALF_ARENA - 1 - x
            }
            Self::BottomLeft => x >= 0 && x < HALF_ARENA && y == HALF_ARENA - 1 - x,
            Self::BottomRight => x >= HALF_ARENA && x < ARENA_SIZE && y == x - HALF_ARENA,
        }
    }

    /// Cells composing the edge in increasing `x` order.
    #[must_use]
    pub fn cells(self) -> Vec<BoardCoord> {
        let columns = match self {
            Self::TopLeft | Self::BottomLeft => 0..HALF_ARENA,
            Self::TopRight | Self::BottomRight => HALF_ARENA..ARENA_SIZE,
        };

        columns
            .map(|x| {
                let y = match self {
                    Self::TopLeft => x + HALF_ARENA,
                    Self::TopRight => ARENA_SIZE + HALF_ARENA - 1 - x,
                    Self::BottomLeft => HALF_ARENA - 1 - x,
                    Self::BottomRight => x - HALF_ARENA,
                };
                BoardCoord::new(x, y)
            })
            .collect()
    }
}

/// Participants of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The player this engine decides for.
    Me,
    /// The opposing player.
    Opponent,
}

impl Player {
    /// Returns the other participant.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Me => Self::Opponent,
            Self::Opponent => Self::Me,
        }
    }

    /// Reports whether `cell` lies in the half of the arena owned by the player.
    #[must_use]
    pub const fn owns(self, cell: BoardCoord) -> bool {
        match self {
            Self::Me => cell.y() < HALF_ARENA,
            Self::Opponent => cell.y() >= HALF_ARENA,
        }
    }

    /// Edges from which the player may deploy mobile units.
    #[must_use]
    pub const fn deploy_edges(self) -> [Edge; 2] {
        match self {
            Self::Me => [Edge::BottomLeft, Edge::BottomRight],
            Self::Opponent => [Edge::TopLeft, Edge::TopRight],
        }
    }

    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::Me => 0,
            Self::Opponent => 1,
        }
    }
}

/// Types of units available in a match.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Cheap stationary wall that only blocks paths.
    Filter,
    /// Stationary support structure that shields friendly mobile units.
    Encryptor,
    /// Stationary ranged turret that damages passing mobile units.
    Destructor,
    /// Fast, fragile mobile unit.
    Ping,
    /// Slow, long-range mobile unit.
    Emp,
    /// Mobile interceptor that hunts enemy mobile units.
    Scrambler,
}

impl UnitKind {
    /// Every unit kind in declaration order.
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Filter,
        UnitKind::Encryptor,
        UnitKind::Destructor,
        UnitKind::Ping,
        UnitKind::Emp,
        UnitKind::Scrambler,
    ];

    /// Reports whether the unit is a structure held at a single cell.
    #[must_use]
    pub const fn is_stationary(self) -> bool {
        matches!(self, Self::Filter | Self::Encryptor | Self::Destructor)
    }

    /// Lowercase name used in configuration files and diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Filter => "filter",
            Self::Encryptor => "encryptor",
            Self::Destructor => "destructor",
            Self::Ping => "ping",
            Self::Emp => "emp",
            Self::Scrambler => "scrambler",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Desired content of a single layout cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellKind {
    /// Cell outside the arena; never a placement target.
    Invalid,
    /// Cell intentionally left open.
    Empty,
    /// Cell that should hold a [`UnitKind::Filter`].
    Wall,
    /// Cell that should hold a [`UnitKind::Destructor`].
    Turret,
    /// Cell that should hold a [`UnitKind::Encryptor`].
    Support,
    /// Staging cell from which mobile units may be launched.
    Rally,
}

impl CellKind {
    /// Decodes the integer encoding used by layout files.
    ///
    /// `-1` invalid, `0` empty, `1` wall, `2` turret, `3` support, `4` rally.
    #[must_use]
    pub const fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(Self::Invalid),
            0 => Some(Self::Empty),
            1 => Some(Self::Wall),
            2 => Some(Self::Turret),
            3 => Some(Self::Support),
            4 => Some(Self::Rally),
            _ => None,
        }
    }

    /// Structure that should be built on a cell of this kind, if any.
    #[must_use]
    pub const fn structure(self) -> Option<UnitKind> {
        match self {
            Self::Wall => Some(UnitKind::Filter),
            Self::Turret => Some(UnitKind::Destructor),
            Self::Support => Some(UnitKind::Encryptor),
            Self::Invalid | Self::Empty | Self::Rally => None,
        }
    }
}

/// The two independently tracked currencies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Currency spent on structures.
    Cores,
    /// Currency spent on mobile units.
    Bits,
}

/// Resource pool held by a single player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    /// Cores available for structures.
    pub cores: f32,
    /// Bits available for mobile units.
    pub bits: f32,
}

impl Resources {
    /// Creates a new resource pool.
    #[must_use]
    pub const fn new(cores: f32, bits: f32) -> Self {
        Self { cores, bits }
    }

    /// Amount held of the provided currency.
    #[must_use]
    pub const fn get(&self, resource: Resource) -> f32 {
        match resource {
            Resource::Cores => self.cores,
            Resource::Bits => self.bits,
        }
    }

    /// Number of units of the given cost the pool can pay for, capped at `limit`.
    #[must_use]
    pub fn affordable(&self, cost: UnitCost, limit: u32) -> u32 {
        let mut count = limit;
        for (held, price) in [(self.cores, cost.cores), (self.bits, cost.bits)] {
            if price > 0.0 {
                let whole = (held / price).floor().max(0.0);
                if whole < count as f32 {
                    count = whole as u32;
                }
            }
        }
        count
    }

    /// Deducts `count` units of the given cost from the pool.
    pub fn spend(&mut self, cost: UnitCost, count: u32) {
        self.cores -= cost.cores * count as f32;
        self.bits -= cost.bits * count as f32;
    }
}

/// Requests submitted to the host. Every request is best-effort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Requests construction of a structure at the provided cell.
    Build {
        /// Stationary unit to construct.
        kind: UnitKind,
        /// Cell that should hold the structure.
        at: BoardCoord,
    },
    /// Requests deployment of mobile units from the provided edge cell.
    Deploy {
        /// Mobile unit to launch.
        kind: UnitKind,
        /// Edge cell the units start from.
        at: BoardCoord,
        /// Maximum number of units to launch; the host clamps it to what bits allow.
        count: u32,
    },
}

impl Command {
    /// Unit kind named by the command.
    #[must_use]
    pub const fn kind(&self) -> UnitKind {
        match self {
            Self::Build { kind, .. } | Self::Deploy { kind, .. } => *kind,
        }
    }

    /// Cell targeted by the command.
    #[must_use]
    pub const fn at(&self) -> BoardCoord {
        match self {
            Self::Build { at, .. } | Self::Deploy { at, .. } => *at,
        }
    }
}

/// Events delivered out-of-band by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A mobile unit reached the far edge and damaged the defending player.
    Breach {
        /// Edge cell where the unit scored.
        location: BoardCoord,
        /// Player that owned the scoring unit.
        attacker: Player,
    },
}

/// Path and threat queries answered against a board state.
pub trait BoardQuery {
    /// Cells a mobile unit starting at `start` traverses toward the far edge.
    ///
    /// The path includes `start`. It is empty when `start` is outside the arena
    /// or blocked by a structure.
    fn path_to_edge(&self, start: BoardCoord) -> Vec<BoardCoord>;

    /// Kinds of the structures owned by `victim`'s opponent that can hit `at`.
    fn attackers(&self, at: BoardCoord, victim: Player) -> Vec<UnitKind>;
}

/// External game engine that supplies state and accepts commands.
pub trait Host {
    /// Captures the current board state.
    fn snapshot(&self) -> BoardSnapshot;

    /// Hands the turn's commands to the host in submission order.
    ///
    /// No per-command outcome is reported; rejected commands are dropped.
    fn submit(&mut self, commands: Vec<Command>);
}
