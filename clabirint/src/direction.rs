use crate::dims::Pos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Canonical order, shuffled by the carver and walked by start resolution.
    pub const IN_ORDER: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    pub fn offset(self) -> Pos {
        match self {
            Self::Up => Pos(-1, 0),
            Self::Right => Pos(0, 1),
            Self::Down => Pos(1, 0),
            Self::Left => Pos(0, -1),
        }
    }

    /// Order in which the path search pushes neighbors: [`Direction::IN_ORDER`] reversed.
    pub fn search_order() -> impl Iterator<Item = Direction> {
        Self::IN_ORDER.into_iter().rev()
    }
}
