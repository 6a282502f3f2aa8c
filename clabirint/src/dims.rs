use std::ops::Add;

/// Grid coordinate as `(row, col)`.
///
/// Signed, so neighbor arithmetic can step outside the grid before the bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos(pub i32, pub i32);

impl Pos {
    pub fn row(self) -> i32 {
        self.0
    }

    pub fn col(self) -> i32 {
        self.1
    }

    pub fn manhattan(self, other: Pos) -> i32 {
        (self.0 - other.0).abs() + (self.1 - other.1).abs()
    }

    pub fn is_adjacent(self, other: Pos) -> bool {
        self.manhattan(other) == 1
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, other: Pos) -> Pos {
        Pos(self.0 + other.0, self.1 + other.1)
    }
}

#[cfg(test)]
mod tests {
    use super::Pos;

    #[test]
    fn adjacency() {
        assert!(Pos(1, 1).is_adjacent(Pos(0, 1)));
        assert!(Pos(1, 1).is_adjacent(Pos(1, 2)));
        assert!(!Pos(1, 1).is_adjacent(Pos(2, 2)));
        assert!(!Pos(1, 1).is_adjacent(Pos(1, 1)));
    }
}
