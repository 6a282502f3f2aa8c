use rand::{seq::SliceRandom as _, Rng};

use super::{is_valid_size, GenError, MazeAlgorithm};
use crate::{dims::Pos, direction::Direction, grid::Grid};

/// Randomized recursive backtracker over the odd-coordinate room lattice.
///
/// Runs on an explicit stack. Every frame keeps its own shuffled direction list and a cursor
/// into it, so the carve order is the same as the recursive formulation given the same
/// random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecursiveBacktracker;

struct Frame {
    pos: Pos,
    dirs: [Direction; 4],
    next: usize,
}

impl Frame {
    fn new<R: Rng + ?Sized>(pos: Pos, rng: &mut R) -> Self {
        let mut dirs = Direction::IN_ORDER;
        dirs.shuffle(rng);
        Self { pos, dirs, next: 0 }
    }
}

impl RecursiveBacktracker {
    /// First odd coordinate not below `size / 2`, on both axes.
    pub fn seed_cell(size: usize) -> Pos {
        let mid = (size / 2) as i32 | 1;
        Pos(mid, mid)
    }
}

impl MazeAlgorithm for RecursiveBacktracker {
    fn generate<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Result<Grid, GenError> {
        if !is_valid_size(size) {
            return Err(GenError::InvalidSize(size));
        }

        let mut grid = Grid::new_walled(size);
        let inner = 1..=size as i32 - 2;

        let seed = Self::seed_cell(size);
        grid.open(seed);
        let mut stack = vec![Frame::new(seed, rng)];

        while let Some(frame) = stack.last_mut() {
            let Some(&dir) = frame.dirs.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            let offset = dir.offset();
            let wall = frame.pos + offset;
            let room = wall + offset;
            if inner.contains(&room.0) && inner.contains(&room.1) && !grid.is_open(room) {
                grid.open(wall);
                grid.open(room);
                stack.push(Frame::new(room, rng));
            }
        }

        log::debug!(
            "carved {}x{} maze from {:?}, {} open cells",
            size,
            size,
            seed,
            grid.open_cells().count()
        );

        Ok(grid)
    }
}
