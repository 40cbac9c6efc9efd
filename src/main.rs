/// Entry point and game loop.

mod ui;

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::KeyCode;

use drunk_chase::config::GameConfig;
use drunk_chase::sim::event::GameEvent;
use drunk_chase::sim::session::{Phase, Session};
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(10);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = GameConfig::load();
    let seed = config.seed.unwrap_or_else(clock_seed);

    // Setup errors are fatal and reported before the terminal is taken over.
    let mut session = match Session::start(config, seed) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Cannot start game: {e}");
            std::process::exit(1);
        }
    };

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut session, &mut renderer, sound.as_ref());

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!("Moves survived: {}", session.moves);
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

// ── Key Constants ──

const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];
const KEYS_PAUSE: &[KeyCode] = &[KeyCode::Char('p'), KeyCode::Char('P'), KeyCode::Char(' ')];
const KEYS_RESTART: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];

fn game_loop(
    session: &mut Session,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let tick_rate = Duration::from_millis(session.config.tick_rate_ms);
    let mut last_tick = Instant::now();

    loop {
        kb.drain_events();

        if kb.ctrl_c_pressed() || kb.any_pressed(KEYS_QUIT) {
            break;
        }
        if kb.any_pressed(KEYS_PAUSE) {
            session.toggle_pause();
        }
        if kb.any_pressed(KEYS_RESTART) {
            session.restart()?;
            if let Some(sfx) = sound {
                sfx.play_start();
            }
            last_tick = Instant::now();
        }

        if last_tick.elapsed() >= tick_rate && session.phase != Phase::Paused {
            let events = session.advance()?;
            process_sound_events(sound, &events);
            last_tick = Instant::now();
        }

        renderer.render(session)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn process_sound_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let Some(sfx) = sound else { return };
    for event in events {
        if let GameEvent::HeroCaptured { .. } = event {
            sfx.play_caught();
        }
    }
}
