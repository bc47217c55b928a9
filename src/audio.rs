//! Audio system over a pluggable backend
//!
//! Decoding and device output belong to the backend. This module owns:
//! - Sound effect bytes, read in parallel at startup
//! - Music track switching with a cancellable crossfade thread

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::{GameError, Result};

/// Volume steps per crossfade
const FADE_STEPS: u32 = 20;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Fish eaten
    Eat,
    /// Tail bite landed
    Bite,
    /// Stage up
    Grow,
    /// Lost a life
    Hurt,
    /// Player died
    Die,
    /// Pickup collected
    PowerUp,
    /// Bomb went off
    Explosion,
    /// Jellyfish sting
    Stun,
    /// Level goal reached
    LevelComplete,
    /// Game over
    GameOver,
    /// Menu confirm
    MenuSelect,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 11] = [
        SoundEffect::Eat,
        SoundEffect::Bite,
        SoundEffect::Grow,
        SoundEffect::Hurt,
        SoundEffect::Die,
        SoundEffect::PowerUp,
        SoundEffect::Explosion,
        SoundEffect::Stun,
        SoundEffect::LevelComplete,
        SoundEffect::GameOver,
        SoundEffect::MenuSelect,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Eat => "eat.wav",
            SoundEffect::Bite => "bite.wav",
            SoundEffect::Grow => "grow.wav",
            SoundEffect::Hurt => "hurt.wav",
            SoundEffect::Die => "die.wav",
            SoundEffect::PowerUp => "powerup.wav",
            SoundEffect::Explosion => "explosion.wav",
            SoundEffect::Stun => "stun.wav",
            SoundEffect::LevelComplete => "level_complete.wav",
            SoundEffect::GameOver => "game_over.wav",
            SoundEffect::MenuSelect => "menu_select.wav",
        }
    }
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    Menu,
    Play,
    GameOver,
}

impl MusicTrack {
    pub fn file_name(&self) -> &'static str {
        match self {
            MusicTrack::Menu => "menu.ogg",
            MusicTrack::Play => "play.ogg",
            MusicTrack::GameOver => "game_over.ogg",
        }
    }
}

/// Sound output. Shared with the crossfade thread, so methods take `&self`.
pub trait AudioBackend: Send + Sync {
    fn play_sound(&self, effect: SoundEffect, data: &[u8], volume: f32);
    fn start_music(&self, track: MusicTrack);
    fn stop_music(&self, track: MusicTrack);
    fn set_music_volume(&self, track: MusicTrack, volume: f32);
}

/// Backend that discards everything
#[derive(Debug, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play_sound(&self, _effect: SoundEffect, _data: &[u8], _volume: f32) {}
    fn start_music(&self, _track: MusicTrack) {}
    fn stop_music(&self, _track: MusicTrack) {}
    fn set_music_volume(&self, _track: MusicTrack, _volume: f32) {}
}

/// Loaded sound effects
pub struct AudioManager {
    backend: Arc<dyn AudioBackend>,
    sounds: HashMap<SoundEffect, Vec<u8>>,
    volume: f32,
}

impl AudioManager {
    /// Read every sound effect in `dir`, one thread per file. Fails if any
    /// file is missing or unreadable.
    pub fn load(backend: Arc<dyn AudioBackend>, dir: &Path, volume: f32) -> Result<Self> {
        let results = thread::scope(|scope| {
            let handles: Vec<_> = SoundEffect::ALL
                .iter()
                .map(|&effect| {
                    let path = dir.join(effect.file_name());
                    let handle = scope.spawn({
                        let path = path.clone();
                        move || std::fs::read(path)
                    });
                    (effect, path, handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(effect, path, handle)| match handle.join() {
                    Ok(read) => (effect, path, read),
                    Err(payload) => std::panic::resume_unwind(payload),
                })
                .collect::<Vec<_>>()
        });

        let mut sounds = HashMap::with_capacity(results.len());
        for (effect, path, read) in results {
            let bytes = read.map_err(|source| GameError::ResourceLoad { path, source })?;
            sounds.insert(effect, bytes);
        }
        log::info!("Loaded {} sound effects from {}", sounds.len(), dir.display());

        Ok(Self {
            backend,
            sounds,
            volume: volume.clamp(0.0, 1.0),
        })
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        match self.sounds.get(&effect) {
            Some(data) => self.backend.play_sound(effect, data, self.volume),
            None => log::warn!("Sound {:?} not loaded", effect),
        }
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}

struct Fade {
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<()>,
    from: Option<MusicTrack>,
    to: MusicTrack,
}

/// Plays one music track at a time, crossfading on change
pub struct MusicPlayer {
    backend: Arc<dyn AudioBackend>,
    current: Option<MusicTrack>,
    volume: f32,
    crossfade: Duration,
    fade: Option<Fade>,
}

impl MusicPlayer {
    pub fn new(backend: Arc<dyn AudioBackend>, volume: f32, crossfade: Duration) -> Self {
        Self {
            backend,
            current: None,
            volume: volume.clamp(0.0, 1.0),
            crossfade,
            fade: None,
        }
    }

    pub fn current(&self) -> Option<MusicTrack> {
        self.current
    }

    pub fn is_fading(&self) -> bool {
        self.fade.as_ref().is_some_and(|f| !f.handle.is_finished())
    }

    /// Switch to `track`. A running fade is cancelled and settled first.
    pub fn play(&mut self, track: MusicTrack) {
        if self.current == Some(track) {
            return;
        }
        self.cancel_fade();
        let from = self.current.replace(track);
        log::info!("Music {:?} -> {:?}", from, track);

        self.backend.start_music(track);

        if self.crossfade.is_zero() {
            if let Some(old) = from {
                self.backend.stop_music(old);
            }
            self.backend.set_music_volume(track, self.volume);
            return;
        }

        self.backend.set_music_volume(track, 0.0);
        let cancel = Arc::new(AtomicBool::new(false));
        let backend = Arc::clone(&self.backend);
        let volume = self.volume;
        let step = self.crossfade / FADE_STEPS;
        let token = Arc::clone(&cancel);

        let handle = thread::spawn(move || {
            for i in 1..=FADE_STEPS {
                if token.load(Ordering::Acquire) {
                    return;
                }
                let t = i as f32 / FADE_STEPS as f32;
                if let Some(old) = from {
                    backend.set_music_volume(old, volume * (1.0 - t));
                }
                backend.set_music_volume(track, volume * t);
                thread::sleep(step);
            }
            if let Some(old) = from {
                backend.stop_music(old);
            }
        });

        self.fade = Some(Fade {
            cancel,
            handle,
            from,
            to: track,
        });
    }

    /// Stop all music
    pub fn stop(&mut self) {
        self.cancel_fade();
        if let Some(track) = self.current.take() {
            self.backend.stop_music(track);
        }
    }

    /// Cancel and join the fade thread, then snap to its end state
    fn cancel_fade(&mut self) {
        let Some(fade) = self.fade.take() else {
            return;
        };
        fade.cancel.store(true, Ordering::Release);
        let finished = fade.handle.is_finished();
        if fade.handle.join().is_err() {
            log::warn!("Music fade thread panicked");
        }
        if !finished {
            if let Some(old) = fade.from {
                self.backend.stop_music(old);
            }
            self.backend.set_music_volume(fade.to, self.volume);
        }
    }
}

impl Drop for MusicPlayer {
    fn drop(&mut self) {
        self.cancel_fade();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Sound(SoundEffect, usize),
        Start(MusicTrack),
        Stop(MusicTrack),
        Volume(MusicTrack, f32),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<Call>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl AudioBackend for Recorder {
        fn play_sound(&self, effect: SoundEffect, data: &[u8], _volume: f32) {
            self.record(Call::Sound(effect, data.len()));
        }
        fn start_music(&self, track: MusicTrack) {
            self.record(Call::Start(track));
        }
        fn stop_music(&self, track: MusicTrack) {
            self.record(Call::Stop(track));
        }
        fn set_music_volume(&self, track: MusicTrack, volume: f32) {
            self.record(Call::Volume(track, volume));
        }
    }

    fn sound_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("frenzy_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_reads_every_effect() {
        let dir = sound_dir("sfx_ok");
        for (i, effect) in SoundEffect::ALL.iter().enumerate() {
            std::fs::write(dir.join(effect.file_name()), vec![0u8; i + 1]).unwrap();
        }
        let recorder = Arc::new(Recorder::default());
        let audio = AudioManager::load(recorder.clone(), &dir, 1.0).unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(audio.len(), SoundEffect::ALL.len());
        audio.play(SoundEffect::Bite);
        assert_eq!(recorder.calls(), vec![Call::Sound(SoundEffect::Bite, 2)]);
    }

    #[test]
    fn test_missing_effect_fails_load() {
        let dir = sound_dir("sfx_missing");
        for effect in &SoundEffect::ALL[1..] {
            std::fs::write(dir.join(effect.file_name()), [1u8]).unwrap();
        }
        let result = AudioManager::load(Arc::new(NullBackend), &dir, 1.0);
        let _ = std::fs::remove_dir_all(&dir);

        match result {
            Err(GameError::ResourceLoad { path, .. }) => {
                assert!(path.ends_with(SoundEffect::Eat.file_name()));
            }
            other => panic!("expected ResourceLoad, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_instant_switch_without_crossfade() {
        let recorder = Arc::new(Recorder::default());
        let mut music = MusicPlayer::new(recorder.clone(), 0.5, Duration::ZERO);
        music.play(MusicTrack::Menu);
        music.play(MusicTrack::Menu);
        music.play(MusicTrack::Play);
        assert_eq!(
            recorder.calls(),
            vec![
                Call::Start(MusicTrack::Menu),
                Call::Volume(MusicTrack::Menu, 0.5),
                Call::Start(MusicTrack::Play),
                Call::Stop(MusicTrack::Menu),
                Call::Volume(MusicTrack::Play, 0.5),
            ]
        );
    }

    #[test]
    fn test_new_play_settles_running_fade() {
        let recorder = Arc::new(Recorder::default());
        let mut music = MusicPlayer::new(recorder.clone(), 1.0, Duration::from_secs(10));
        music.play(MusicTrack::Menu);
        music.play(MusicTrack::Play);
        music.play(MusicTrack::GameOver);
        assert!(music.is_fading());
        music.stop();
        assert!(!music.is_fading());

        let calls = recorder.calls();
        // Each cancelled fade stops its outgoing track and snaps the incoming one
        assert!(calls.contains(&Call::Volume(MusicTrack::Menu, 1.0)));
        assert!(calls.contains(&Call::Stop(MusicTrack::Menu)));
        assert!(calls.contains(&Call::Stop(MusicTrack::Play)));
        assert_eq!(calls.last(), Some(&Call::Stop(MusicTrack::GameOver)));
        assert_eq!(music.current(), None);
    }

    #[test]
    fn test_fade_completes() {
        let recorder = Arc::new(Recorder::default());
        let mut music = MusicPlayer::new(recorder.clone(), 1.0, Duration::from_millis(20));
        music.play(MusicTrack::Play);
        music.play(MusicTrack::GameOver);
        while music.is_fading() {
            thread::sleep(Duration::from_millis(2));
        }
        let calls = recorder.calls();
        assert!(calls.contains(&Call::Volume(MusicTrack::GameOver, 1.0)));
        assert!(calls.contains(&Call::Stop(MusicTrack::Play)));
    }
}
