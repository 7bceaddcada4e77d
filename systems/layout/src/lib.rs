#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Immutable desired-layout model describing target structures and build priorities.
//!
//! The layout is expressed in layout coordinates (row zero at the top). Every
//! conversion to board coordinates goes through [`DesiredLayout::to_board`],
//! which delegates to the single conversion defined in the core crate.

mod standard;

use std::collections::BTreeMap;

use lane_defence_core::{BoardCoord, CellKind, LayoutCoord};
use serde::Deserialize;

/// Build priority of a layout cell. Higher priorities are serviced first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Priority(u8);

impl Priority {
    /// Largest priority a layout may declare.
    pub const MAX: Priority = Priority(69);

    /// Creates a priority, returning `None` above [`Priority::MAX`].
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value > Self::MAX.0 {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Retrieves the numeric priority.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Only positive priorities are eligible for scheduling.
    #[must_use]
    pub const fn is_schedulable(&self) -> bool {
        self.0 > 0
    }
}

/// Desired kind and build priority of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutCell {
    /// Desired content of the cell.
    pub kind: CellKind,
    /// Build priority, `None` when unset.
    pub priority: Option<Priority>,
}

impl LayoutCell {
    const INVALID: LayoutCell = LayoutCell {
        kind: CellKind::Invalid,
        priority: None,
    };
}

/// Names the two parallel grids of a layout in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grid {
    /// The desired-kind grid.
    Kinds,
    /// The build-priority grid.
    Priorities,
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kinds => f.write_str("kind"),
            Self::Priorities => f.write_str("priority"),
        }
    }
}

/// Configuration errors detected while constructing a layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// A row of one grid has a different width than the first row.
    #[error("{grid} grid row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        /// Grid containing the row.
        grid: Grid,
        /// Offending row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// The kind and priority grids disagree on their dimensions.
    #[error("kind grid is {kinds:?} but priority grid is {priorities:?} (rows, columns)")]
    DimensionMismatch {
        /// Rows and columns of the kind grid.
        kinds: (usize, usize),
        /// Rows and columns of the priority grid.
        priorities: (usize, usize),
    },
    /// A kind code has no meaning.
    #[error("unknown kind code {code} at row {row}, column {column}")]
    UnknownKind {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        column: usize,
        /// Code found in the grid.
        code: i8,
    },
    /// A priority lies outside `-1..=69`.
    #[error("priority {value} at row {row}, column {column} is outside -1..=69")]
    PriorityOutOfRange {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        column: usize,
        /// Value found in the grid.
        value: i16,
    },
    /// The layout payload could not be parsed.
    #[error("could not parse layout: {0}")]
    Malformed(#[from] toml::de::Error),
}

#[derive(Deserialize)]
struct RawLayout {
    kinds: Vec<Vec<i8>>,
    priorities: Vec<Vec<i16>>,
}

/// Two parallel immutable grids of desired kind and build priority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesiredLayout {
    rows: u32,
    columns: u32,
    cells: Vec<LayoutCell>,
    index: BTreeMap<CellKind, Vec<LayoutCoord>>,
}

impl DesiredLayout {
    /// Builds a layout from integer-coded grids.
    ///
    /// Kind codes follow [`CellKind::from_code`]. Priority `-1` marks an unset
    /// priority; values must otherwise lie in `0..=69`.
    pub fn from_codes<K, P>(kinds: &[K], priorities: &[P]) -> Result<Self, LayoutError>
    where
        K: AsRef<[i8]>,
        P: AsRef<[i16]>,
    {
        let kind_dims = dimensions::<K, i8>(Grid::Kinds, kinds)?;
        let priority_dims = dimensions::<P, i16>(Grid::Priorities, priorities)?;
        if kind_dims != priority_dims {
            return Err(LayoutError::DimensionMismatch {
                kinds: kind_dims,
                priorities: priority_dims,
            });
        }

        let (rows, columns) = kind_dims;
        let mut cells = Vec::with_capacity(rows * columns);
        for (row, (kind_row, priority_row)) in kinds.iter().zip(priorities).enumerate() {
            let cell_pairs = kind_row.as_ref().iter().zip(priority_row.as_ref());
            for (column, (&code, &value)) in cell_pairs.enumerate() {
                let kind = CellKind::from_code(code)
                    .ok_or(LayoutError::UnknownKind { row, column, code })?;
                let priority = decode_priority(value)
                    .ok_or(LayoutError::PriorityOutOfRange { row, column, value })?;

                cells.push(match kind {
                    CellKind::Invalid => LayoutCell::INVALID,
                    kind => LayoutCell { kind, priority },
                });
            }
        }

        let rows = u32::try_from(rows).unwrap_or(u32::MAX);
        let columns = u32::try_from(columns).unwrap_or(u32::MAX);
        Ok(Self::from_cells(rows, columns, cells))
    }

    /// Parses a TOML payload with `kinds` and `priorities` arrays of rows.
    pub fn from_toml_str(payload: &str) -> Result<Self, LayoutError> {
        let raw: RawLayout = toml::from_str(payload)?;
        Self::from_codes(&raw.kinds, &raw.priorities)
    }

    /// Built-in defensive layout covering the friendly half of the arena.
    pub fn standard() -> Result<Self, LayoutError> {
        Self::from_codes(&standard::KINDS, &standard::PRIORITIES)
    }

    fn from_cells(rows: u32, columns: u32, cells: Vec<LayoutCell>) -> Self {
        let mut layout = Self {
            rows,
            columns,
            cells,
            index: BTreeMap::new(),
        };

        let mut index: BTreeMap<CellKind, Vec<LayoutCoord>> = BTreeMap::new();
        for (coord, cell) in layout.cells() {
            index.entry(cell.kind).or_default().push(coord);
        }
        layout.index = index;
        layout
    }

    /// Number of rows in the layout.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the layout.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the layout has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Converts a layout cell of this grid into board coordinates.
    #[must_use]
    pub fn to_board(&self, cell: LayoutCoord) -> BoardCoord {
        cell.to_board(self.rows)
    }

    /// Desired cell at the provided layout coordinate.
    ///
    /// Out-of-range coordinates yield an invalid cell.
    #[must_use]
    pub fn cell(&self, coord: LayoutCoord) -> LayoutCell {
        if coord.row() >= self.rows || coord.column() >= self.columns {
            return LayoutCell::INVALID;
        }

        let index = coord.row() as usize * self.columns as usize + coord.column() as usize;
        self.cells.get(index).copied().unwrap_or(LayoutCell::INVALID)
    }

    /// Desired kind at a board coordinate; `Invalid` outside the layout.
    #[must_use]
    pub fn kind_at(&self, coord: BoardCoord) -> CellKind {
        self.board_cell(coord).kind
    }

    /// Build priority at a board coordinate; `None` outside the layout or when unset.
    #[must_use]
    pub fn priority_at(&self, coord: BoardCoord) -> Option<Priority> {
        self.board_cell(coord).priority
    }

    fn board_cell(&self, coord: BoardCoord) -> LayoutCell {
        coord
            .to_layout(self.rows)
            .map_or(LayoutCell::INVALID, |cell| self.cell(cell))
    }

    /// Every coordinate whose kind matches `kind`, in row-major layout order.
    #[must_use]
    pub fn find_all(&self, kind: CellKind) -> &[LayoutCoord] {
        self.index.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterator over all cells in row-major layout order.
    pub fn cells(&self) -> impl Iterator<Item = (LayoutCoord, LayoutCell)> + '_ {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            (LayoutCoord::new(index / columns, index % columns), *cell)
        })
    }
}

fn dimensions<R, T>(grid: Grid, rows: &[R]) -> Result<(usize, usize), LayoutError>
where
    R: AsRef<[T]>,
{
    let expected = rows.first().map_or(0, |row| row.as_ref().len());
    for (row, cells) in rows.iter().enumerate() {
        let found = cells.as_ref().len();
        if found != expected {
            return Err(LayoutError::RaggedRow {
                grid,
                row,
                expected,
                found,
            });
        }
    }
    Ok((rows.len(), expected))
}

fn decode_priority(value: i16) -> Option<Option<Priority>> {
    match value {
        -1 => Some(None),
        value => u8::try_from(value).ok().and_then(Priority::new).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_rejects_values_above_max() {
        assert_eq!(Priority::new(69), Some(Priority::MAX));
        assert_eq!(Priority::new(70), None);
        assert!(!Priority::new(0).expect("zero").is_schedulable());
    }

    #[test]
    fn decode_priority_handles_unset_and_bounds() {
        assert_eq!(decode_priority(-1), Some(None));
        assert_eq!(decode_priority(12), Some(Priority::new(12)));
        assert_eq!(decode_priority(-2), None);
        assert_eq!(decode_priority(70), None);
    }

    #[test]
    fn invalid_cells_drop_their_priority() {
        let layout = DesiredLayout::from_codes(&[[-1i8, 1]], &[[50i16, 20]]).expect("layout");
        let invalid = layout.cell(LayoutCoord::new(0, 0));
        assert_eq!(invalid.kind, CellKind::Invalid);
        assert_eq!(invalid.priority, None);
    }

    #[test]
    fn empty_layout_is_accepted() {
        let kinds: [[i8; 0]; 0] = [];
        let priorities: [[i16; 0]; 0] = [];
        let layout = DesiredLayout::from_codes(&kinds, &priorities).expect("layout");
        assert!(layout.is_empty());
        assert_eq!(layout.cells().count(), 0);
        assert!(layout.find_all(CellKind::Wall).is_empty());
    }
}
