//! Path search used to predict the route of mobile units.

use std::collections::VecDeque;

use crate::{BoardCoord, Edge, ARENA_SIZE};

const UNREACHABLE: u16 = u16::MAX;

/// Dense distance grid seeded from a target edge.
///
/// Mirrors the arena's bounding box and stores reverse breadth-first search
/// results. Distances default to `u16::MAX` for blocked or unreachable cells.
#[derive(Clone, Debug)]
struct DistanceField {
    distances: Vec<u16>,
}

impl DistanceField {
    fn new() -> Self {
        let side = usize::try_from(ARENA_SIZE).unwrap_or(0);
        Self {
            distances: vec![UNREACHABLE; side * side],
        }
    }

    /// Runs a breadth-first search outward from `seeds` over open arena cells.
    fn flood<F>(&mut self, seeds: &[BoardCoord], is_blocked: &mut F)
    where
        F: FnMut(BoardCoord) -> bool,
    {
        let mut queue = VecDeque::new();

        for &seed in seeds {
            if is_blocked(seed) {
                continue;
            }

            if let Some(index) = index(seed) {
                if self.distances[index] == 0 {
                    continue;
                }

                self.distances[index] = 0;
                queue.push_back(seed);
            }
        }

        while let Some(cell) = queue.pop_front() {
            let Some(current) = self.distance(cell) else {
                continue;
            };

            if current >= UNREACHABLE.saturating_sub(1) {
                continue;
            }

            let next = current + 1;

            for neighbor in neighbors(cell) {
                if is_blocked(neighbor) {
                    continue;
                }

                let Some(neighbor_index) = index(neighbor) else {
                    continue;
                };

                if self.distances[neighbor_index] <= next {
                    continue;
                }

                self.distances[neighbor_index] = next;
                queue.push_back(neighbor);
            }
        }
    }

    fn distance(&self, cell: BoardCoord) -> Option<u16> {
        index(cell)
            .and_then(|offset| self.distances.get(offset).copied())
            .filter(|distance| *distance != UNREACHABLE)
    }
}

/// Predicts the cells a mobile unit starting at `start` walks through.
///
/// The unit heads for the edge opposite its home quadrant. At every step it
/// moves to a neighbour one closer to that edge, preferring to switch between
/// vertical and horizontal movement and otherwise following the order up,
/// right, down, left. When the edge cannot be reached the path ends at the
/// reachable cell that made the most progress toward it.
pub(crate) fn path_to_edge<F>(start: BoardCoord, mut is_blocked: F) -> Vec<BoardCoord>
where
    F: FnMut(BoardCoord) -> bool,
{
    if !start.in_arena() || is_blocked(start) {
        return Vec::new();
    }

    let target = Edge::home_of(start).opposite();
    let mut field = DistanceField::new();
    field.flood(&target.cells(), &mut is_blocked);

    match field.distance(start) {
        Some(_) => descend(start, &field),
        None => furthest_reachable(start, target, &mut is_blocked),
    }
}

fn descend(start: BoardCoord, field: &DistanceField) -> Vec<BoardCoord> {
    let mut path = vec![start];
    let mut current = start;
    let mut last_vertical: Option<bool> = None;

    while let Some(distance) = field.distance(current) {
        if distance == 0 {
            break;
        }

        let mut best: Option<(BoardCoord, bool)> = None;
        for neighbor in neighbors(current) {
            if field.distance(neighbor) != Some(distance - 1) {
                continue;
            }

            let vertical = neighbor.x() == current.x();
            let alternates = last_vertical.map_or(false, |last| last != vertical);
            match best {
                None => best = Some((neighbor, alternates)),
                Some((_, best_alternates)) if alternates && !best_alternates => {
                    best = Some((neighbor, alternates));
                }
                Some(_) => {}
            }
        }

        let Some((next, _)) = best else {
            break;
        };

        last_vertical = Some(next.x() == current.x());
        path.push(next);
        current = next;
    }

    path
}

fn furthest_reachable<F>(start: BoardCoord, target: Edge, is_blocked: &mut F) -> Vec<BoardCoord>
where
    F: FnMut(BoardCoord) -> bool,
{
    let side = usize::try_from(ARENA_SIZE).unwrap_or(0);
    let mut parents: Vec<Option<BoardCoord>> = vec![None; side * side];
    let mut steps = vec![UNREACHABLE; side * side];
    let mut queue = VecDeque::from([start]);
    if let Some(index) = index(start) {
        steps[index] = 0;
    }

    let mut best = (progress(start, target), 0_u16, start);

    while let Some(cell) = queue.pop_front() {
        let Some(current) = index(cell).map(|offset| steps[offset]) else {
            continue;
        };

        for neighbor in neighbors(cell) {
            if is_blocked(neighbor) {
                continue;
            }
            let Some(offset) = index(neighbor) else {
                continue;
            };
            if steps[offset] != UNREACHABLE {
                continue;
            }

            steps[offset] = current.saturating_add(1);
            parents[offset] = Some(cell);
            queue.push_back(neighbor);

            let candidate = (progress(neighbor, target), steps[offset], neighbor);
            let better = candidate.0 > best.0
                || (candidate.0 == best.0
                    && (candidate.1 < best.1 || (candidate.1 == best.1 && candidate.2 < best.2)));
            if better {
                best = candidate;
            }
        }
    }

    let mut path = vec![best.2];
    let mut cursor = best.2;
    while let Some(parent) = index(cursor).and_then(|offset| parents[offset]) {
        path.push(parent);
        cursor = parent;
    }
    path.reverse();
    path
}

/// How far `cell` has advanced toward `target`; larger is closer.
fn progress(cell: BoardCoord, target: Edge) -> i32 {
    match target {
        Edge::TopRight => cell.x() + cell.y(),
        Edge::TopLeft => cell.y() - cell.x(),
        Edge::BottomLeft => -(cell.x() + cell.y()),
        Edge::BottomRight => cell.x() - cell.y(),
    }
}

fn neighbors(cell: BoardCoord) -> impl Iterator<Item = BoardCoord> {
    [
        cell.offset(0, 1),
        cell.offset(1, 0),
        cell.offset(0, -1),
        cell.offset(-1, 0),
    ]
    .into_iter()
    .filter(|neighbor| neighbor.in_arena())
}

fn index(cell: BoardCoord) -> Option<usize> {
    if !cell.in_arena() {
        return None;
    }

    let column = usize::try_from(cell.x()).ok()?;
    let row = usize::try_from(cell.y()).ok()?;
    let side = usize::try_from(ARENA_SIZE).ok()?;
    row.checked_mul(side)?.checked_add(column)
}
