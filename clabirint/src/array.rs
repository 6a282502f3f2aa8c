use std::ops;

use crate::dims::Pos;

/// Row-major 2D storage indexed by [`Pos`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Array2D<T> {
    /// Builds the array from equally long rows, `None` if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }

        Some(Self {
            buf: rows.into_iter().flatten().collect(),
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn dim_to_idx(&self, pos: Pos) -> Option<usize> {
        let Pos(row, col) = pos;
        // negative coordinates wrap to huge values and fail the check below
        let (row, col) = (row as usize, col as usize);

        if row >= self.height || col >= self.width {
            return None;
        }

        Some(row * self.width + col)
    }

    pub fn idx_to_dim(&self, idx: usize) -> Option<Pos> {
        if idx >= self.buf.len() {
            return None;
        }

        Some(Pos((idx / self.width) as i32, (idx % self.width) as i32))
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_dim(i))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.buf.chunks(self.width.max(1))
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, width: usize, height: usize) -> Self {
        Self {
            buf: vec![item; width * height],
            width,
            height,
        }
    }
}

impl<T> ops::Index<Pos> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        self.dim_to_idx(index)
            .and_then(|i| self.buf.get(i))
            .expect("Index out of bounds")
    }
}

impl<T> ops::IndexMut<Pos> for Array2D<T> {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        self.dim_to_idx(index)
            .and_then(|i| self.buf.get_mut(i))
            .expect("Index out of bounds")
    }
}
