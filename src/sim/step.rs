/// The tick function: advances the world by one turn.
///
/// Processing order:
///   1. Hero random step
///   2. Each pursuer in id order: choose, then move or capture
///   3. Stop at the first capture; later pursuers stay put this tick
///
/// An entity with no legal direction skips its move.
/// The whole tick mutates the world in place and must not be interleaved
/// with another tick.

use log::debug;
use rand::Rng;

use crate::domain::ai;
use crate::domain::entity::EntityId;
use crate::domain::error::GameError;
use super::event::GameEvent;
use super::world::World;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickResult {
    pub captured: bool,
    pub captured_by: Option<EntityId>,
    pub events: Vec<GameEvent>,
}

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn tick<R: Rng + ?Sized>(world: &mut World, rng: &mut R) -> Result<TickResult, GameError> {
    if let Some(by) = world.captured_by() {
        return Ok(TickResult { captured: true, captured_by: Some(by), events: vec![] });
    }

    let mut events = Vec::new();

    resolve_hero(world, rng, &mut events)?;

    let pursuers = world.pursuers().to_vec();
    for id in pursuers {
        if resolve_pursuer(world, id, rng, &mut events)? {
            return Ok(TickResult { captured: true, captured_by: Some(id), events });
        }
    }

    Ok(TickResult { captured: false, captured_by: None, events })
}

// ══════════════════════════════════════════════════════════════
// Hero
// ══════════════════════════════════════════════════════════════

fn resolve_hero<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Result<(), GameError> {
    let hero = world.hero();
    let (row, column) = world.position(hero);

    let Some(dir) = ai::choose_hero_direction(&world.map_view(), row, column, rng) else {
        debug!("hero boxed in at ({row}, {column})");
        events.push(GameEvent::HeroStuck);
        return Ok(());
    };

    let (nr, nc) = dir.apply(row, column);
    world.move_entity(hero, nr, nc)?;
    events.push(GameEvent::HeroMoved { dir, row: nr as usize, column: nc as usize });
    Ok(())
}

// ══════════════════════════════════════════════════════════════
// Pursuers
// ══════════════════════════════════════════════════════════════

/// Returns true if this pursuer caught the hero.
fn resolve_pursuer<R: Rng + ?Sized>(
    world: &mut World,
    id: EntityId,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Result<bool, GameError> {
    let here = world.position(id);
    let hero_at = world.position(world.hero());

    let Some(dir) = ai::choose_direction(&world.map_view(), here, hero_at, rng) else {
        debug!("pursuer {id:?} boxed in at {here:?}");
        events.push(GameEvent::PursuerStuck { id });
        return Ok(false);
    };

    let (nr, nc) = dir.apply(here.0, here.1);
    if (nr, nc) == hero_at {
        world.capture(id)?;
        events.push(GameEvent::HeroCaptured { by: id, row: nr as usize, column: nc as usize });
        return Ok(true);
    }

    world.move_entity(id, nr, nc)?;
    events.push(GameEvent::PursuerMoved { id, dir, row: nr as usize, column: nc as usize });
    Ok(false)
}
