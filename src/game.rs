//! Top-level game loop
//!
//! Owns the platform, the state stack and the shared session. Simulation runs
//! on a fixed timestep with an accumulator; rendering happens once per frame.

use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::audio::{AudioBackend, AudioManager, MusicPlayer};
use crate::consts::*;
use crate::error::Result;
use crate::highscores::HighScores;
use crate::levels::LevelTable;
use crate::platform::{Event, Platform};
use crate::renderer::Frame;
use crate::resources::Assets;
use crate::settings::Settings;
use crate::states::{self, Session, StateAction, StateId, StateManager};

pub struct Game<P: Platform> {
    platform: P,
    states: StateManager,
    session: Session,
    assets: Assets,
    audio: Option<AudioManager>,
    music: MusicPlayer,
    accumulator: f32,
    frames: u64,
}

impl<P: Platform> Game<P> {
    /// Load resources, register every state and open the menu
    pub fn new(settings: Settings, platform: P, backend: Arc<dyn AudioBackend>) -> Result<Self> {
        let assets = match &settings.asset_dir {
            Some(dir) => Assets::load_dir(dir)?,
            None => {
                log::info!("No asset directory configured, rendering untextured");
                Assets::default()
            }
        };

        let audio = match &settings.audio_dir {
            Some(dir) => Some(AudioManager::load(
                Arc::clone(&backend),
                dir,
                settings.effective_sfx_volume(),
            )?),
            None => {
                log::info!("No audio directory configured, sound effects disabled");
                None
            }
        };

        let music = MusicPlayer::new(
            backend,
            settings.effective_music_volume(),
            Duration::from_secs_f32(settings.music_crossfade.max(0.0)),
        );

        let high_scores = HighScores::load(&settings.highscores_path);
        let session = Session::new(settings, Rc::new(LevelTable::standard()), high_scores);

        let mut states = StateManager::new();
        states::register_all(&mut states);
        states.request(StateAction::Push(StateId::Menu));

        let mut game = Self {
            platform,
            states,
            session,
            assets,
            audio,
            music,
            accumulator: 0.0,
            frames: 0,
        };
        game.states.apply_pending_changes(&mut game.session)?;
        game.flush_audio();
        log::info!("Game initialized");
        Ok(game)
    }

    /// Run one frame. Returns false once the game should stop.
    pub fn frame(&mut self) -> Result<bool> {
        for event in self.platform.poll_events() {
            if event == Event::Closed {
                log::info!("Window closed after {} frames", self.frames);
                return Ok(false);
            }
            self.states.handle_event(&event, &mut self.session);
        }

        let dt = self.platform.frame_delta().clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.states.update(SIM_DT, &mut self.session);
            self.states.apply_pending_changes(&mut self.session)?;
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Too far behind: drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        // Transitions requested by events on frames without a step
        self.states.apply_pending_changes(&mut self.session)?;
        self.flush_audio();

        if self.states.is_empty() {
            log::info!("State stack empty, stopping");
            return Ok(false);
        }

        let mut frame = Frame::new();
        self.states.render(&mut frame, &self.session);
        self.check_frame(&frame)?;
        self.platform.present(&frame)?;
        self.frames += 1;
        Ok(true)
    }

    /// Run until the platform closes or the stack empties
    pub fn run(&mut self) -> Result<()> {
        while self.frame()? {}
        self.music.stop();
        log::info!(
            "Game finished after {} frames (level {}, {} points)",
            self.frames,
            self.session.level,
            self.session.total_points
        );
        Ok(())
    }

    /// Every sprite drawn must name a loaded texture and a valid frame
    fn check_frame(&self, frame: &Frame) -> Result<()> {
        if !self.assets.is_loaded() {
            return Ok(());
        }
        for (id, index) in frame.sprites() {
            self.assets.textures.get(id)?.frame(index)?;
        }
        Ok(())
    }

    fn flush_audio(&mut self) {
        let sounds = std::mem::take(&mut self.session.sounds);
        if let Some(audio) = &self.audio {
            for effect in sounds {
                audio.play(effect);
            }
        }
        if let Some(track) = self.session.music.take() {
            self.music.play(track);
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn states(&self) -> &StateManager {
        &self.states
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
