/// Legal-move rules.
///
/// Pure functions over a read-only view of the field. They answer "where may
/// this entity step" without performing the move.
///
/// ## Legal Direction Table
/// ┌──────────────────────────────┬─────────┐
/// │ Target cell                   │ Legal?  │
/// ├──────────────────────────────┼─────────┤
/// │ out of bounds                 │ NO      │
/// │ occupied by Barrier           │ NO      │
/// │ occupied by Pursuer           │ NO      │
/// │ occupied by Hero              │ YES     │ pursuer steps in = capture
/// │ empty                         │ YES     │
/// └──────────────────────────────┴─────────┘
///
/// The table is the same for the hero and for pursuers. The hero can never
/// see itself as a neighbour, so the Hero row only matters to pursuers.

use super::direction::Direction;
use super::entity::{Entity, EntityKind};
use super::field::Field;

/// Immutable view of the field plus the entity table, for rule queries.
#[derive(Clone, Copy)]
pub struct MapView<'a> {
    pub field: &'a Field,
    pub entities: &'a [Entity],
}

impl<'a> MapView<'a> {
    /// Kind of the entity standing at (row, column), if any.
    /// Out-of-bounds coordinates have no occupant.
    pub fn kind_at(&self, row: i32, column: i32) -> Option<EntityKind> {
        let idx = self.field.index_of(row, column).ok()?;
        self.field.occupant(idx).map(|id| self.entities[id.0].kind)
    }

    /// Can anyone step onto (row, column)?
    pub fn can_enter(&self, row: i32, column: i32) -> bool {
        if !self.field.is_in_bounds(row, column) {
            return false;
        }
        !self.kind_at(row, column).is_some_and(EntityKind::is_obstacle)
    }
}

/// Directions from (row, column) whose target cell can be entered,
/// in `Direction::ALL` order.
pub fn legal_directions(map: &MapView, row: i32, column: i32) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|d| {
            let (r, c) = d.apply(row, column);
            map.can_enter(r, c)
        })
        .collect()
}
