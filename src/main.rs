//! Headless demo runner
//!
//! Drives the engine with a scripted pilot so the simulation can be watched
//! from a terminal: the ship strafes, shoots constantly, and raises the
//! shield or fires a rocket when energy allows. Useful for eyeballing
//! balance changes without a renderer.

use galactic_defender::consts::FRAME_MS;
use galactic_defender::{Action, Engine, GamePhase, InputState, JsonFileStore};

const VIEW_W: f32 = 800.0;
const VIEW_H: f32 = 600.0;
/// Stop eventually even if the pilot refuses to die
const MAX_TICKS: u64 = 60 * 60 * 10;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xdef5eed);

    let store = JsonFileStore::new("highscore.json");
    let mut engine = Engine::new(VIEW_W, VIEW_H, seed).with_store(Box::new(store));
    engine.start();

    let mut input = InputState::new();
    input.press(Action::Shoot);

    for tick in 0..MAX_TICKS {
        // Strafe left and right on a slow cycle
        let strafe_left = (tick / 120) % 2 == 0;
        input.set(Action::Left, strafe_left);
        input.set(Action::Right, !strafe_left);

        // Burn spare energy on rockets, keep the shield up when flush
        let energy = engine.state().energy;
        input.set(Action::Skill1, energy > 60.0);
        input.set(Action::Shield, energy > 90.0);

        engine.update(FRAME_MS, &input);

        if tick % 300 == 0 {
            let s = engine.state();
            println!(
                "t={:>5.1}s wave={} score={} health={} energy={:>3.0} combo={} enemies={}",
                s.time_survived_ms / 1_000.0,
                s.wave,
                s.score,
                s.health,
                s.energy,
                s.combo,
                engine.enemies().len(),
            );
        }

        if engine.state().phase == GamePhase::GameOver {
            break;
        }
    }

    let s = engine.snapshot();
    println!(
        "run over: score={} high_score={} wave={} kills={} max_combo={} survived={:.1}s",
        s.score,
        s.high_score,
        s.wave,
        s.total_kills,
        s.max_combo,
        s.time_survived_ms / 1_000.0
    );
}
