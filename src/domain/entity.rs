/// Entities: Hero, Pursuer, Barrier.
/// Each one is bound to exactly one cell, stored as an index into the field.

use super::field::CellIndex;

/// Index into `World::entities`. Stable for the lifetime of a game.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EntityId(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntityKind {
    Hero,
    Pursuer,
    Barrier,
}

impl EntityKind {
    /// Barriers never move once placed.
    pub fn is_mobile(self) -> bool {
        !matches!(self, EntityKind::Barrier)
    }

    /// Does this kind block whoever is computing legal moves?
    /// Same rule for hero and pursuer queries.
    pub fn is_obstacle(self) -> bool {
        matches!(self, EntityKind::Barrier | EntityKind::Pursuer)
    }
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub cell: CellIndex,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, cell: CellIndex) -> Self {
        Entity { id, kind, cell }
    }
}
