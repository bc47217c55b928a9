//! Feeding Frenzy entry point
//!
//! Runs the game on the headless platform. With the default settings the
//! autopilot plays a demo until the frame limit is reached.

use std::path::Path;
use std::sync::Arc;

use feeding_frenzy::audio::NullBackend;
use feeding_frenzy::platform::HeadlessPlatform;
use feeding_frenzy::settings::SETTINGS_FILE;
use feeding_frenzy::{Game, Result, Settings};

/// Wall-clock delta fed to the headless platform
const FRAME_DT: f32 = 1.0 / 60.0;

fn run() -> Result<()> {
    let settings = Settings::load(Path::new(SETTINGS_FILE))?;
    let platform = HeadlessPlatform::new(FRAME_DT, settings.max_frames);
    let mut game = Game::new(settings, platform, Arc::new(NullBackend))?;
    game.run()
}

fn main() {
    env_logger::init();
    log::info!("Feeding Frenzy starting");

    if let Err(e) = run() {
        log::error!("Fatal: {}", e);
        eprintln!("error: {}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}
