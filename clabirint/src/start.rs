use std::collections::VecDeque;

use hashbrown::HashSet;

use crate::{dims::Pos, direction::Direction, grid::Grid};

/// Nominal start cell, the center of the grid.
pub fn center(grid: &Grid) -> Pos {
    let mid = (grid.size() / 2) as i32;
    Pos(mid, mid)
}

/// Returns `candidate` if it is open, otherwise the nearest open cell.
///
/// The search walks through walls as well as open cells, so "nearest" is grid distance,
/// not path distance. Ties go to whichever cell is reached first by expanding up, right,
/// down, left. If nothing open is reachable, the candidate comes back unchanged.
pub fn resolve_start(grid: &Grid, candidate: Pos) -> Pos {
    if grid.is_open(candidate) {
        return candidate;
    }

    let mut queue = VecDeque::from([candidate]);
    let mut seen = HashSet::new();
    seen.insert(candidate);

    while let Some(pos) = queue.pop_front() {
        if grid.is_open(pos) {
            log::debug!("start {:?} is a wall, moved to {:?}", candidate, pos);
            return pos;
        }

        for dir in Direction::IN_ORDER {
            let next = pos + dir.offset();
            if grid.is_in_bounds(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    log::warn!("no open cell reachable from {:?}", candidate);
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{random, MazeAlgorithm, RecursiveBacktracker};

    #[test]
    fn open_candidate_is_kept() {
        let grid: Grid = "
            #####
            #...#
            #...#
            #...#
            #####
        "
        .parse()
        .unwrap();
        assert_eq!(resolve_start(&grid, Pos(2, 2)), Pos(2, 2));
        assert_eq!(resolve_start(&grid, Pos(1, 3)), Pos(1, 3));
    }

    #[test]
    fn prefers_up_then_right() {
        let grid: Grid = "
            #####
            ##.##
            #.#.#
            #####
            #####
        "
        .parse()
        .unwrap();
        assert_eq!(resolve_start(&grid, Pos(2, 2)), Pos(1, 2));

        let grid: Grid = "
            #####
            #####
            ###.#
            ##.##
            #####
        "
        .parse()
        .unwrap();
        assert_eq!(resolve_start(&grid, Pos(2, 2)), Pos(2, 3));
    }

    #[test]
    fn walks_through_walls() {
        let grid: Grid = "
            #####
            #####
            #####
            #####
            ....#
        "
        .parse()
        .unwrap();
        assert_eq!(resolve_start(&grid, Pos(1, 3)), Pos(4, 3));
    }

    #[test]
    fn degenerate_grid_keeps_candidate() {
        let grid = Grid::new_walled(5);
        assert_eq!(resolve_start(&grid, Pos(2, 2)), Pos(2, 2));
    }

    #[test]
    fn even_half_size_is_repaired() {
        // 9 / 2 = 4, so the center sits on a pillar that is never carved
        for seed in 0..20 {
            let grid = RecursiveBacktracker
                .generate(9, &mut random(Some(seed)))
                .unwrap();
            let candidate = center(&grid);
            assert!(!grid.is_open(candidate));

            let start = resolve_start(&grid, candidate);
            assert!(grid.is_open(start));
            let nearest = grid
                .open_cells()
                .map(|pos| pos.manhattan(candidate))
                .min()
                .unwrap();
            assert_eq!(start.manhattan(candidate), nearest);
        }
    }
}
