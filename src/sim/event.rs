/// Events emitted during a tick.
/// The presentation layer consumes these for sound and logging.

use crate::domain::direction::Direction;
use crate::domain::entity::EntityId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    HeroMoved { dir: Direction, row: usize, column: usize },
    HeroStuck,
    PursuerMoved { id: EntityId, dir: Direction, row: usize, column: usize },
    PursuerStuck { id: EntityId },
    HeroCaptured { by: EntityId, row: usize, column: usize },
}
