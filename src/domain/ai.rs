/// Movement decisions for the hero and the pursuers.
///
/// Two strategies:
///   1. **Hero** — random walk over the legal directions.
///   2. **Pursuer** — greedy axis-aligned chase:
///      dead end → the only exit; same column → straight up/down;
///      same row → straight left/right; anything else → random legal step.
///
/// The chase is deliberately short-sighted. There is no path search, so a
/// hero circling a barrier cluster can shake a pursuer off indefinitely.
///
/// Both return `None` when no direction is legal; the caller skips the move.

use rand::Rng;

use super::direction::Direction;
use super::rules::{legal_directions, MapView};

/// Uniform pick among `dirs`, or `None` if empty.
fn pick_random<R: Rng + ?Sized>(dirs: &[Direction], rng: &mut R) -> Option<Direction> {
    if dirs.is_empty() {
        return None;
    }
    Some(dirs[rng.random_range(0..dirs.len())])
}

// ── Hero ──

pub fn choose_hero_direction<R: Rng + ?Sized>(
    map: &MapView,
    row: i32, column: i32,
    rng: &mut R,
) -> Option<Direction> {
    let sides = legal_directions(map, row, column);
    pick_random(&sides, rng)
}

// ── Pursuer ──

pub fn choose_direction<R: Rng + ?Sized>(
    map: &MapView,
    pursuer: (i32, i32),
    hero: (i32, i32),
    rng: &mut R,
) -> Option<Direction> {
    let (pr, pc) = pursuer;
    let empty_sides = legal_directions(map, pr, pc);

    // Dead end: nothing to decide
    if empty_sides.len() == 1 {
        return Some(empty_sides[0]);
    }

    let row_diff = hero.0 - pr;
    let col_diff = hero.1 - pc;

    if col_diff == 0 {
        let toward = if row_diff > 0 { Direction::Bottom } else { Direction::Top };
        if empty_sides.contains(&toward) {
            return Some(toward);
        }
    }

    if row_diff == 0 {
        let toward = if col_diff > 0 { Direction::Right } else { Direction::Left };
        if empty_sides.contains(&toward) {
            return Some(toward);
        }
    }

    pick_random(&empty_sides, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::setup::new_game;
    use crate::sim::step::tick;
    use crate::sim::world::World;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    fn positions(w: &World) -> ((i32, i32), (i32, i32)) {
        (w.position(w.pursuers()[0]), w.position(w.hero()))
    }

    // ── Dead end ──

    #[test]
    fn dead_end_ignores_hero_position() {
        let w = World::from_rows(&[
            "#P#",
            "...",
            "..H",
        ]).unwrap();
        let (p, h) = positions(&w);
        for seed in 0..50 {
            let d = choose_direction(&w.map_view(), p, h, &mut rng(seed));
            assert_eq!(d, Some(Direction::Bottom));
        }
    }

    // ── Axis-aligned chase ──

    #[test]
    fn hero_straight_below() {
        let w = World::from_rows(&[
            ".P.",
            "...",
            ".H.",
        ]).unwrap();
        let (p, h) = positions(&w);
        for seed in 0..50 {
            let d = choose_direction(&w.map_view(), p, h, &mut rng(seed));
            assert_eq!(d, Some(Direction::Bottom));
        }
    }

    #[test]
    fn hero_straight_above() {
        let w = World::from_rows(&[
            ".H.",
            "...",
            ".P.",
        ]).unwrap();
        let (p, h) = positions(&w);
        assert_eq!(choose_direction(&w.map_view(), p, h, &mut rng(1)), Some(Direction::Top));
    }

    #[test]
    fn hero_same_row_left() {
        let w = World::from_rows(&[
            "...",
            "H.P",
            "...",
        ]).unwrap();
        let (p, h) = positions(&w);
        for seed in 0..20 {
            assert_eq!(choose_direction(&w.map_view(), p, h, &mut rng(seed)), Some(Direction::Left));
        }
    }

    #[test]
    fn adjacent_hero_is_stepped_onto() {
        let w = World::from_rows(&[
            "...",
            ".PH",
            "...",
        ]).unwrap();
        let (p, h) = positions(&w);
        assert_eq!(choose_direction(&w.map_view(), p, h, &mut rng(3)), Some(Direction::Right));
    }

    // ── Fallback ──

    #[test]
    fn blocked_direct_path_falls_back_to_legal_random() {
        let w = World::from_rows(&[
            ".P.",
            ".#.",
            ".H.",
        ]).unwrap();
        let (p, h) = positions(&w);
        let map = w.map_view();
        let legal = legal_directions(&map, p.0, p.1);
        assert_eq!(legal, vec![Direction::Left, Direction::Right]);
        for seed in 0..50 {
            let d = choose_direction(&map, p, h, &mut rng(seed)).unwrap();
            assert!(legal.contains(&d));
        }
    }

    #[test]
    fn diagonal_hero_covers_all_legal_sides() {
        let w = World::from_rows(&[
            "....",
            ".P..",
            "....",
            "...H",
        ]).unwrap();
        let (p, h) = positions(&w);
        let mut seen = std::collections::HashSet::new();
        for seed in 0..200 {
            seen.insert(choose_direction(&w.map_view(), p, h, &mut rng(seed)).unwrap());
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn fully_blocked_pursuer_has_no_move() {
        let w = World::from_rows(&[
            "P#",
            "#H",
        ]).unwrap();
        let (p, h) = positions(&w);
        assert_eq!(choose_direction(&w.map_view(), p, h, &mut rng(0)), None);
    }

    #[test]
    fn same_seed_same_choice() {
        let w = World::from_rows(&[
            ".....",
            ".P...",
            ".....",
            "....H",
            ".....",
        ]).unwrap();
        let (p, h) = positions(&w);
        let a: Vec<_> = {
            let mut r = rng(42);
            (0..10).map(|_| choose_direction(&w.map_view(), p, h, &mut r)).collect()
        };
        let b: Vec<_> = {
            let mut r = rng(42);
            (0..10).map(|_| choose_direction(&w.map_view(), p, h, &mut r)).collect()
        };
        assert_eq!(a, b);
    }

    // ── Hero ──

    #[test]
    fn hero_never_walks_into_obstacles() {
        let w = World::from_rows(&[
            ".#.",
            "PH.",
            ".P.",
        ]).unwrap();
        let h = w.position(w.hero());
        for seed in 0..50 {
            let d = choose_hero_direction(&w.map_view(), h.0, h.1, &mut rng(seed));
            assert_eq!(d, Some(Direction::Right));
        }
    }

    #[test]
    fn boxed_in_hero_stays() {
        let w = World::from_rows(&[
            "H#",
            "P.",
        ]).unwrap();
        let h = w.position(w.hero());
        assert_eq!(choose_hero_direction(&w.map_view(), h.0, h.1, &mut rng(0)), None);
    }

    // ── Soundness over random layouts ──

    proptest! {
        #[test]
        fn choices_are_always_legal(
            seed in any::<u64>(),
            size in 2usize..10,
            percent in 0u32..70,
            pursuers in 1usize..4,
        ) {
            let cfg = GameConfig {
                field_size: size,
                barrier_percent: percent,
                pursuers,
                ..GameConfig::default()
            };
            let mut r = rng(seed);
            let Ok(mut w) = new_game(&cfg, &mut r) else {
                return Ok(());
            };
            for _ in 0..20 {
                let map = w.map_view();
                let hero = w.position(w.hero());

                let legal = legal_directions(&map, hero.0, hero.1);
                match choose_hero_direction(&map, hero.0, hero.1, &mut r) {
                    Some(d) => prop_assert!(legal.contains(&d)),
                    None => prop_assert!(legal.is_empty()),
                }

                for &p in w.pursuers() {
                    let at = w.position(p);
                    let legal = legal_directions(&map, at.0, at.1);
                    match choose_direction(&map, at, hero, &mut r) {
                        Some(d) => prop_assert!(legal.contains(&d)),
                        None => prop_assert!(legal.is_empty()),
                    }
                }

                if tick(&mut w, &mut r).unwrap().captured {
                    break;
                }
            }
        }
    }
}
