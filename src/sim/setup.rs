/// Game setup: build the field and scatter entities on it.
///
/// Placement order is barriers, then the hero, then pursuers. Every
/// placement re-checks occupancy, so order only changes which cells are
/// still free, never correctness.

use log::info;
use rand::Rng;

use crate::config::GameConfig;
use crate::domain::entity::{Entity, EntityId, EntityKind};
use crate::domain::error::GameError;
use crate::domain::field::{CellIndex, Field};
use super::world::{spawn, World};

/// Random probes per cell before switching to a scan of the free cells.
const PROBES_PER_CELL: usize = 4;

/// round(size² / 100 × percent)
pub fn barrier_count(field_size: usize, barrier_percent: u32) -> usize {
    ((field_size * field_size) as f64 / 100.0 * barrier_percent as f64).round() as usize
}

/// Uniformly random empty cell, or `FieldFull`.
///
/// Probes random coordinates first. The probe budget is finite; once it runs
/// out the choice is made among the remaining empty cells directly, which is
/// still uniform.
fn random_empty_cell<R: Rng + ?Sized>(field: &Field, rng: &mut R) -> Result<CellIndex, GameError> {
    if field.empty_count() == 0 {
        return Err(GameError::FieldFull);
    }
    let size = field.size();
    for _ in 0..size * size * PROBES_PER_CELL {
        let row = rng.random_range(0..size) as i32;
        let column = rng.random_range(0..size) as i32;
        let idx = field.index_of(row, column)?;
        if field.cell(idx).is_empty() {
            return Ok(idx);
        }
    }

    let free: Vec<CellIndex> = field
        .cells()
        .filter(|(_, c)| c.is_empty())
        .map(|(i, _)| i)
        .collect();
    Ok(free[rng.random_range(0..free.len())])
}

/// Place `count` new entities of `kind` on random empty cells.
pub fn place_randomly<R: Rng + ?Sized>(
    field: &mut Field,
    entities: &mut Vec<Entity>,
    count: usize,
    kind: EntityKind,
    rng: &mut R,
) -> Result<Vec<EntityId>, GameError> {
    let mut placed = Vec::with_capacity(count);
    for _ in 0..count {
        let cell = random_empty_cell(field, rng)?;
        placed.push(spawn(field, entities, kind, cell)?);
    }
    Ok(placed)
}

/// Lay out a fresh game from a validated config.
pub fn new_game<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<World, GameError> {
    config.validate()?;

    let mut field = Field::new(config.field_size)?;
    let mut entities = Vec::new();

    let barriers = barrier_count(config.field_size, config.barrier_percent);
    place_randomly(&mut field, &mut entities, barriers, EntityKind::Barrier, rng)?;
    place_randomly(&mut field, &mut entities, 1, EntityKind::Hero, rng)?;
    place_randomly(&mut field, &mut entities, config.pursuers, EntityKind::Pursuer, rng)?;

    info!(
        "new game: {0}x{0} field, {1} barriers, {2} pursuers",
        config.field_size, barriers, config.pursuers
    );

    World::assemble(field, entities)
}
