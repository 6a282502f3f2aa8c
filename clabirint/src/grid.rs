use std::{fmt, ops, str::FromStr};

use thiserror::Error;

use crate::{array::Array2D, dims::Pos, direction::Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Wall,
    Open,
}

impl Tile {
    pub fn is_open(self) -> bool {
        self == Tile::Open
    }

    pub fn to_char(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Open => '.',
        }
    }
}

/// Square matrix of walls and open cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Array2D<Tile>,
}

impl Grid {
    pub fn new_walled(size: usize) -> Self {
        Self {
            tiles: Array2D::new(Tile::Wall, size, size),
        }
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.tiles.width()
    }

    pub fn is_in_bounds(&self, pos: Pos) -> bool {
        self.tiles.dim_to_idx(pos).is_some()
    }

    pub fn get(&self, pos: Pos) -> Option<Tile> {
        self.tiles.get(pos).copied()
    }

    /// `false` for walls and for anything outside the grid.
    pub fn is_open(&self, pos: Pos) -> bool {
        self.get(pos).is_some_and(Tile::is_open)
    }

    pub fn set(&mut self, pos: Pos, tile: Tile) {
        self.tiles[pos] = tile;
    }

    pub fn open(&mut self, pos: Pos) {
        self.set(pos, Tile::Open);
    }

    /// Whether `pos` lies on the outer ring.
    pub fn is_border(&self, pos: Pos) -> bool {
        let last = self.size() as i32 - 1;
        self.is_in_bounds(pos) && (pos.0 == 0 || pos.1 == 0 || pos.0 == last || pos.1 == last)
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Pos> + '_ {
        self.tiles.iter_pos()
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.iter_pos().filter(|&pos| self.is_open(pos))
    }

    pub fn open_neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        Direction::IN_ORDER
            .into_iter()
            .map(move |dir| pos + dir.offset())
            .filter(|&next| self.is_open(next))
    }
}

impl ops::Index<Pos> for Grid {
    type Output = Tile;

    fn index(&self, index: Pos) -> &Self::Output {
        &self.tiles[index]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.tiles.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{}", tile.to_char())?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridParseError {
    #[error("grid is empty")]
    Empty,
    #[error("grid is not square")]
    NotSquare,
    #[error("unknown tile '{0}'")]
    UnknownTile(char),
}

impl FromStr for Grid {
    type Err = GridParseError;

    /// Parses `#` as wall and `.` as open, one row per line, blank lines ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| match c {
                        '#' => Ok(Tile::Wall),
                        '.' => Ok(Tile::Open),
                        c => Err(GridParseError::UnknownTile(c)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        if rows.is_empty() {
            return Err(GridParseError::Empty);
        }
        if rows.iter().any(|row| row.len() != rows.len()) {
            return Err(GridParseError::NotSquare);
        }

        let tiles = Array2D::from_rows(rows).ok_or(GridParseError::NotSquare)?;
        Ok(Grid { tiles })
    }
}
