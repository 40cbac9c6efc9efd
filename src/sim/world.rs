/// World: the complete state of a running game.
///
/// ## Occupancy
///
/// Two index tables describe who stands where:
///   - `field` — every cell holds `Option<EntityId>`.
///   - `entities` — every entity holds the `CellIndex` it stands on.
///
/// They must always agree: a cell names an entity iff that entity names the
/// cell back. All writes go through `spawn()`, `move_entity()` and
/// `capture()`, which update both sides together or not at all.
///
/// The one exception is the captured hero: once a pursuer steps onto it,
/// the cell belongs to the pursuer and the hero keeps only a stale index
/// (pointing at the same cell). The game is over at that point.

use crate::domain::entity::{Entity, EntityId, EntityKind};
use crate::domain::error::GameError;
use crate::domain::field::{CellIndex, Field};
use crate::domain::rules::MapView;

pub struct World {
    field: Field,
    entities: Vec<Entity>,
    hero: EntityId,
    /// Tick order: by entity id.
    pursuers: Vec<EntityId>,
    captured_by: Option<EntityId>,
}

/// Put a new entity of `kind` on an empty cell.
/// Used while laying out a game, before the `World` exists.
pub fn spawn(
    field: &mut Field,
    entities: &mut Vec<Entity>,
    kind: EntityKind,
    cell: CellIndex,
) -> Result<EntityId, GameError> {
    if field.occupant(cell).is_some() {
        let c = field.cell(cell);
        return Err(GameError::IllegalMove { row: c.row as i32, column: c.column as i32 });
    }
    let id = EntityId(entities.len());
    entities.push(Entity::new(id, kind, cell));
    field.set_occupant(cell, Some(id));
    Ok(id)
}

// ── Construction ──

impl World {
    /// Wrap a laid-out field. Requires exactly one hero.
    pub fn assemble(field: Field, entities: Vec<Entity>) -> Result<Self, GameError> {
        let mut heroes = entities.iter().filter(|e| e.kind == EntityKind::Hero);
        let hero = match (heroes.next(), heroes.next()) {
            (Some(h), None) => h.id,
            (None, _) => return Err(GameError::InvalidConfig("no hero on the field".into())),
            (Some(_), Some(_)) => {
                return Err(GameError::InvalidConfig("more than one hero on the field".into()))
            }
        };
        let pursuers = entities
            .iter()
            .filter(|e| e.kind == EntityKind::Pursuer)
            .map(|e| e.id)
            .collect();

        Ok(World { field, entities, hero, pursuers, captured_by: None })
    }

    /// Build a world from a square text diagram.
    /// Legend: '.'=empty  '#'=Barrier  'H'=Hero  'P'=Pursuer
    /// Entities are created row by row, so pursuer order is reading order.
    pub fn from_rows(rows: &[&str]) -> Result<Self, GameError> {
        let size = rows.len();
        let mut field = Field::new(size)?;
        let mut entities = Vec::new();

        for (r, line) in rows.iter().enumerate() {
            if line.chars().count() != size {
                return Err(GameError::InvalidConfig(format!(
                    "row {r} has {} cells, expected {size}",
                    line.chars().count()
                )));
            }
            for (c, ch) in line.chars().enumerate() {
                let kind = match ch {
                    '#' => EntityKind::Barrier,
                    'H' => EntityKind::Hero,
                    'P' => EntityKind::Pursuer,
                    '.' | ' ' => continue,
                    other => {
                        return Err(GameError::InvalidConfig(format!("unknown cell '{other}'")))
                    }
                };
                let idx = field.index_of(r as i32, c as i32)?;
                spawn(&mut field, &mut entities, kind, idx)?;
            }
        }

        World::assemble(field, entities)
    }
}

// ── Queries ──

impl World {
    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.0]
    }

    pub fn kind(&self, id: EntityId) -> EntityKind {
        self.entities[id.0].kind
    }

    pub fn hero(&self) -> EntityId {
        self.hero
    }

    pub fn pursuers(&self) -> &[EntityId] {
        &self.pursuers
    }

    /// Who stands on this cell, for drawing.
    pub fn occupant(&self, cell: CellIndex) -> Option<&Entity> {
        self.field.occupant(cell).map(|id| &self.entities[id.0])
    }

    /// (row, column) of an entity's cell.
    pub fn position(&self, id: EntityId) -> (i32, i32) {
        let c = self.field.cell(self.entities[id.0].cell);
        (c.row as i32, c.column as i32)
    }

    pub fn map_view(&self) -> MapView<'_> {
        MapView { field: &self.field, entities: &self.entities }
    }

    pub fn is_captured(&self) -> bool {
        self.captured_by.is_some()
    }

    pub fn captured_by(&self) -> Option<EntityId> {
        self.captured_by
    }

    /// Check the cell <-> entity bijection. Returns the first violation found.
    pub fn check_occupancy(&self) -> Result<(), String> {
        for e in &self.entities {
            if e.id == self.hero && self.is_captured() {
                continue;
            }
            if self.field.occupant(e.cell) != Some(e.id) {
                return Err(format!("{:?} {:?} points at a cell that does not hold it", e.kind, e.id));
            }
        }
        for (idx, cell) in self.field.cells() {
            if let Some(id) = cell.occupant() {
                if self.entities[id.0].cell != idx {
                    return Err(format!(
                        "cell ({}, {}) holds {:?} which stands elsewhere",
                        cell.row, cell.column, id
                    ));
                }
            }
        }
        Ok(())
    }
}

// ── Movement ──

impl World {
    /// Move a mobile entity onto an empty in-bounds cell.
    ///
    /// Does not check adjacency; callers pick the target from the legal
    /// directions. On error nothing has changed.
    pub fn move_entity(&mut self, id: EntityId, row: i32, column: i32) -> Result<(), GameError> {
        let illegal = GameError::IllegalMove { row, column };
        let target = self.field.index_of(row, column).map_err(|_| illegal.clone())?;
        if self.field.occupant(target).is_some() {
            return Err(illegal);
        }
        if !self.entities[id.0].kind.is_mobile() {
            return Err(illegal);
        }
        if self.captured_by.is_some() {
            return Err(illegal);
        }

        let from = self.entities[id.0].cell;
        self.field.set_occupant(from, None);
        self.entities[id.0].cell = target;
        self.field.set_occupant(target, Some(id));
        Ok(())
    }

    /// Pursuer steps onto the hero's cell. Ends the game.
    pub fn capture(&mut self, pursuer: EntityId) -> Result<(), GameError> {
        let (row, column) = self.position(self.hero);
        if self.kind(pursuer) != EntityKind::Pursuer || self.captured_by.is_some() {
            return Err(GameError::IllegalMove { row, column });
        }

        let target = self.entities[self.hero.0].cell;
        let from = self.entities[pursuer.0].cell;
        self.field.set_occupant(from, None);
        self.entities[pursuer.0].cell = target;
        self.field.set_occupant(target, Some(pursuer));
        self.captured_by = Some(pursuer);
        Ok(())
    }
}
