/// Directions and their (row, column) deltas.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
}

impl Direction {
    /// Fixed evaluation order. Random picks index into lists built in this
    /// order, so a seeded run always sees the same candidates.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Top,
        Direction::Bottom,
    ];

    /// Unit delta as (d_row, d_column).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Top => (-1, 0),
            Direction::Bottom => (1, 0),
        }
    }

    /// Target coordinate one step from (row, column). May be off-field.
    pub fn apply(self, row: i32, column: i32) -> (i32, i32) {
        let (dr, dc) = self.delta();
        (row + dr, column + dc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_unit_steps() {
        assert_eq!(Direction::Left.delta(), (0, -1));
        assert_eq!(Direction::Right.delta(), (0, 1));
        assert_eq!(Direction::Top.delta(), (-1, 0));
        assert_eq!(Direction::Bottom.delta(), (1, 0));
    }

    #[test]
    fn apply_can_leave_the_field() {
        assert_eq!(Direction::Top.apply(0, 0), (-1, 0));
        assert_eq!(Direction::Left.apply(0, 0), (0, -1));
        assert_eq!(Direction::Bottom.apply(2, 3), (3, 3));
    }
}
