//! Pixel Contra entry point
//!
//! Runs the game headless: the autopilot plays, frames are recorded
//! instead of shown. `RUST_LOG=debug` shows every shot, jump and hit.

use pixel_contra::platform::{Autopilot, Clock, FrameClock, SimulatedClock};
use pixel_contra::renderer::FrameRecorder;
use pixel_contra::{Game, GameSummary, PlatformError, Settings};

fn run_with_clock<C: Clock>(settings: &Settings, clock: C) -> Result<GameSummary, PlatformError> {
    let mut game = Game::new(Autopilot::new(&settings.autopilot), FrameRecorder::new(), clock);
    let summary = game.run()?;
    log::info!(
        "Presented {} frames over {} autopilot ticks",
        game.renderer().frames_presented(),
        game.input().ticks()
    );
    Ok(summary)
}

fn main() {
    env_logger::init();
    log::info!("Pixel Contra (headless) starting...");

    let settings = Settings::load();
    let result = if settings.realtime {
        let clock = FrameClock::new(settings.tick_rate);
        log::info!("Pacing ticks at {:?}", clock.frame_duration());
        run_with_clock(&settings, clock)
    } else {
        run_with_clock(&settings, SimulatedClock::new(settings.tick_rate))
    };

    match result {
        Ok(summary) => {
            log::info!(
                "Quit after {} sessions, {} ticks",
                summary.sessions.len(),
                summary.total_ticks()
            );
        }
        Err(e) => {
            log::error!("Fatal: {}", e);
            std::process::exit(1);
        }
    }
}
