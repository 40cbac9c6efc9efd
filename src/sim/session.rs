/// Session: one game run plus the bookkeeping the driver needs around it.
///
/// Owns the world, the seeded RNG and the move counter. The driver calls
/// `advance()` once per tick interval; the session decides whether that
/// interval plays a turn, does nothing (paused), or moves the capture
/// towards the end screen.

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::domain::error::GameError;
use super::event::GameEvent;
use super::setup;
use super::step;
use super::world::World;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    Paused,
    /// Hero just got caught. The end screen follows one interval later.
    Caught,
    GameOver,
}

pub struct Session {
    pub config: GameConfig,
    pub world: World,
    pub seed: u64,
    /// Turns played, counted once per hero step.
    pub moves: u64,
    pub phase: Phase,
    rng: Pcg32,
}

impl Session {
    pub fn start(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = setup::new_game(&config, &mut rng)?;
        info!("session started with seed {seed}");
        Ok(Session { config, world, seed, moves: 0, phase: Phase::Playing, rng })
    }

    /// Tear the current run down and lay out a new one.
    /// The next seed comes from the current RNG, so a seeded session
    /// replays the same sequence of games.
    pub fn restart(&mut self) -> Result<(), GameError> {
        let seed: u64 = self.rng.random();
        *self = Session::start(self.config.clone(), seed)?;
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            other => other,
        };
    }

    /// One scheduler tick.
    pub fn advance(&mut self) -> Result<Vec<GameEvent>, GameError> {
        match self.phase {
            Phase::Playing => {
                let result = step::tick(&mut self.world, &mut self.rng)?;
                self.moves += 1;
                for e in &result.events {
                    debug!("move {}: {e:?}", self.moves);
                }
                if result.captured {
                    info!("hero caught after {} moves", self.moves);
                    self.phase = Phase::Caught;
                }
                Ok(result.events)
            }
            Phase::Caught => {
                self.phase = Phase::GameOver;
                Ok(vec![])
            }
            Phase::Paused | Phase::GameOver => Ok(vec![]),
        }
    }

    /// 1-based number of the pursuer that made the catch.
    pub fn captor_number(&self) -> Option<usize> {
        let by = self.world.captured_by()?;
        self.world.pursuers().iter().position(|&p| p == by).map(|i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> GameConfig {
        GameConfig { field_size: 3, barrier_percent: 0, pursuers: 1, ..GameConfig::default() }
    }

    /// Session on a hand-drawn open 3x3 field. Hero and pursuer sit at an
    /// even Manhattan distance, the only kind of gap that can close.
    fn corner_to_corner(seed: u64) -> Session {
        let world = World::from_rows(&[
            "H..",
            "...",
            "..P",
        ]).unwrap();
        Session {
            config: small_config(),
            world,
            seed,
            moves: 0,
            phase: Phase::Playing,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn play_until_over(s: &mut Session) {
        for _ in 0..2000 {
            if s.phase == Phase::GameOver {
                return;
            }
            s.advance().unwrap();
        }
        panic!("game never ended");
    }

    #[test]
    fn counter_follows_turns() {
        let mut s = Session::start(GameConfig::default(), 1).unwrap();
        for _ in 0..3 {
            if s.phase != Phase::Playing {
                break;
            }
            s.advance().unwrap();
        }
        assert!(s.moves >= 1 && s.moves <= 3);
    }

    #[test]
    fn pause_stops_the_clock() {
        let mut s = Session::start(GameConfig::default(), 2).unwrap();
        s.toggle_pause();
        assert_eq!(s.phase, Phase::Paused);
        assert!(s.advance().unwrap().is_empty());
        assert_eq!(s.moves, 0);
        s.toggle_pause();
        assert_eq!(s.phase, Phase::Playing);
    }

    #[test]
    fn capture_leads_to_game_over_one_tick_later() {
        let mut s = corner_to_corner(3);
        let mut moves_at_capture = None;
        for _ in 0..2000 {
            s.advance().unwrap();
            if s.phase == Phase::Caught {
                moves_at_capture = Some(s.moves);
                break;
            }
        }
        let moves = moves_at_capture.expect("no capture on a 3x3 field");
        assert_eq!(s.captor_number(), Some(1));

        assert!(s.advance().unwrap().is_empty());
        assert_eq!(s.phase, Phase::GameOver);
        s.advance().unwrap();
        assert_eq!(s.moves, moves);

        // Pausing is not possible once the game is over.
        s.toggle_pause();
        assert_eq!(s.phase, Phase::GameOver);
    }

    #[test]
    fn restart_is_reproducible() {
        let mut a = corner_to_corner(4);
        let mut b = corner_to_corner(4);
        play_until_over(&mut a);
        play_until_over(&mut b);
        a.restart().unwrap();
        b.restart().unwrap();
        assert_eq!(a.seed, b.seed);
        assert_eq!(a.moves, 0);
        assert_eq!(a.phase, Phase::Playing);
        let cells = |s: &Session| s.world.entities().iter().map(|e| e.cell).collect::<Vec<_>>();
        assert_eq!(cells(&a), cells(&b));
    }

    #[test]
    fn bad_config_fails_to_start() {
        let cfg = GameConfig { pursuers: 0, ..GameConfig::default() };
        assert!(matches!(Session::start(cfg, 0), Err(GameError::InvalidConfig(_))));
    }
}
