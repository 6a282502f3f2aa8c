use hashbrown::HashSet;
use rand::{seq::SliceRandom as _, Rng};

use crate::{dims::Pos, grid::Grid};

pub type ExitSet = HashSet<Pos>;

/// Border cells (corners excluded) whose inward neighbor is open.
///
/// Columns are scanned first, top edge before bottom edge, then rows, left edge before
/// right edge.
pub fn exit_candidates(grid: &Grid) -> Vec<Pos> {
    let last = grid.size() as i32 - 1;
    let mut candidates = Vec::new();

    for col in 1..last {
        if grid.is_open(Pos(1, col)) {
            candidates.push(Pos(0, col));
        }
        if grid.is_open(Pos(last - 1, col)) {
            candidates.push(Pos(last, col));
        }
    }

    for row in 1..last {
        if grid.is_open(Pos(row, 1)) {
            candidates.push(Pos(row, 0));
        }
        if grid.is_open(Pos(row, last - 1)) {
            candidates.push(Pos(row, last));
        }
    }

    candidates
}

/// Exit forced open when the maze has no border candidates: bottom edge, middle column.
pub fn fallback_exit(grid: &Grid) -> Pos {
    let size = grid.size() as i32;
    Pos(size - 1, size / 2)
}

/// Picks up to `count` distinct exits (at least one) and carves them into the border.
pub fn choose_exits<R: Rng + ?Sized>(grid: &mut Grid, count: usize, rng: &mut R) -> ExitSet {
    let candidates = exit_candidates(grid);

    if candidates.is_empty() {
        let fallback = fallback_exit(grid);
        log::warn!("no exit candidates, forcing exit at {:?}", fallback);
        grid.open(fallback);
        return ExitSet::from_iter([fallback]);
    }

    let exits: ExitSet = candidates
        .choose_multiple(rng, count.max(1))
        .copied()
        .collect();
    for &exit in &exits {
        grid.open(exit);
    }

    log::debug!(
        "chose {} of {} exit candidates: {:?}",
        exits.len(),
        candidates.len(),
        exits
    );

    exits
}
