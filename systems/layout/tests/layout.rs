use lane_defence_core::{BoardCoord, CellKind, LayoutCoord, ARENA_SIZE};
use lane_defence_system_layout::{DesiredLayout, LayoutError, Priority};

#[test]
fn standard_layout_covers_friendly_half() {
    let layout = DesiredLayout::standard().expect("built-in layout is valid");

    assert_eq!(layout.rows(), 14);
    assert_eq!(layout.columns(), 28);

    for (cell, desired) in layout.cells() {
        let board = layout.to_board(cell);
        assert_eq!(
            desired.kind != CellKind::Invalid,
            board.in_arena(),
            "cell {cell:?} at {board} disagrees with arena bounds",
        );
    }
}

#[test]
fn standard_layout_front_corners_have_top_priority() {
    let layout = DesiredLayout::standard().expect("layout");

    for x in [0, 1, 2, 3, 24, 25, 26, 27] {
        let coord = BoardCoord::new(x, 13);
        assert_eq!(layout.kind_at(coord), CellKind::Wall);
        assert_eq!(layout.priority_at(coord), Some(Priority::MAX));
    }
}

#[test]
fn rally_cells_sit_on_friendly_edges_and_mirror_each_other() {
    let layout = DesiredLayout::standard().expect("layout");
    let rally: Vec<BoardCoord> = layout
        .find_all(CellKind::Rally)
        .iter()
        .map(|cell| layout.to_board(*cell))
        .collect();

    assert_eq!(
        rally,
        vec![
            BoardCoord::new(6, 7),
            BoardCoord::new(21, 7),
            BoardCoord::new(10, 3),
            BoardCoord::new(17, 3),
        ]
    );

    for cell in &rally {
        let reflected = BoardCoord::new(ARENA_SIZE - 1 - cell.x(), cell.y());
        assert!(rally.contains(&reflected), "{cell} has no mirror image");
    }
}

#[test]
fn find_all_scans_in_row_major_order() {
    let layout = DesiredLayout::from_codes(
        &[[1i8, 0, 1], [0, 1, 2]],
        &[[10i16, 0, 20], [0, 30, 40]],
    )
    .expect("layout");

    assert_eq!(
        layout.find_all(CellKind::Wall),
        &[
            LayoutCoord::new(0, 0),
            LayoutCoord::new(0, 2),
            LayoutCoord::new(1, 1),
        ]
    );
    assert_eq!(layout.find_all(CellKind::Turret), &[LayoutCoord::new(1, 2)]);
    assert!(layout.find_all(CellKind::Rally).is_empty());
}

#[test]
fn lookups_outside_layout_are_invalid() {
    let layout = DesiredLayout::from_codes(&[[1i8, 2]], &[[5i16, 6]]).expect("layout");

    assert_eq!(layout.kind_at(BoardCoord::new(0, 0)), CellKind::Wall);
    assert_eq!(layout.kind_at(BoardCoord::new(2, 0)), CellKind::Invalid);
    assert_eq!(layout.kind_at(BoardCoord::new(0, 1)), CellKind::Invalid);
    assert_eq!(layout.kind_at(BoardCoord::new(-1, 0)), CellKind::Invalid);
    assert_eq!(layout.priority_at(BoardCoord::new(5, 5)), None);
}

#[test]
fn dimension_mismatch_is_rejected() {
    let error = DesiredLayout::from_codes(&[[1i8, 2]], &[[5i16, 6], [1, 1]])
        .expect_err("grids differ in height");
    assert!(matches!(
        error,
        LayoutError::DimensionMismatch {
            kinds: (1, 2),
            priorities: (2, 2),
        }
    ));
}

#[test]
fn ragged_rows_are_rejected() {
    let kinds = vec![vec![1i8, 2], vec![1]];
    let priorities = vec![vec![1i16, 1], vec![1, 1]];
    let error = DesiredLayout::from_codes(&kinds, &priorities).expect_err("ragged");
    assert!(matches!(
        error,
        LayoutError::RaggedRow {
            row: 1,
            expected: 2,
            found: 1,
            ..
        }
    ));
}

#[test]
fn priority_above_maximum_is_rejected() {
    let error =
        DesiredLayout::from_codes(&[[1i8]], &[[70i16]]).expect_err("priority out of range");
    assert!(matches!(
        error,
        LayoutError::PriorityOutOfRange { value: 70, .. }
    ));
}

#[test]
fn unknown_kind_code_is_rejected() {
    let error = DesiredLayout::from_codes(&[[7i8]], &[[1i16]]).expect_err("unknown kind");
    assert!(matches!(error, LayoutError::UnknownKind { code: 7, .. }));
}

#[test]
fn parses_toml_layout() {
    let payload = r#"
        kinds = [[1, 2], [-1, 4]]
        priorities = [[69, 10], [-1, 4]]
    "#;

    let layout = DesiredLayout::from_toml_str(payload).expect("layout parses");
    assert_eq!(layout.rows(), 2);
    assert_eq!(layout.kind_at(BoardCoord::new(0, 1)), CellKind::Wall);
    assert_eq!(layout.kind_at(BoardCoord::new(1, 0)), CellKind::Rally);
}
