//! Enum-keyed resource holders for textures and fonts
//!
//! Decoding is the platform's job; holders keep raw bytes plus the frame
//! table needed to validate sprite lookups.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::path::{Path, PathBuf};

use crate::error::{GameError, Result};

/// Texture identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Background,
    Player,
    Minnow,
    Angelfish,
    Snapper,
    Barracuda,
    Shark,
    Bomb,
    Jellyfish,
    PowerUp,
    Pearl,
}

impl TextureId {
    pub const ALL: [TextureId; 11] = [
        TextureId::Background,
        TextureId::Player,
        TextureId::Minnow,
        TextureId::Angelfish,
        TextureId::Snapper,
        TextureId::Barracuda,
        TextureId::Shark,
        TextureId::Bomb,
        TextureId::Jellyfish,
        TextureId::PowerUp,
        TextureId::Pearl,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            TextureId::Background => "background.png",
            TextureId::Player => "player.png",
            TextureId::Minnow => "minnow.png",
            TextureId::Angelfish => "angelfish.png",
            TextureId::Snapper => "snapper.png",
            TextureId::Barracuda => "barracuda.png",
            TextureId::Shark => "shark.png",
            TextureId::Bomb => "bomb.png",
            TextureId::Jellyfish => "jellyfish.png",
            TextureId::PowerUp => "powerup.png",
            TextureId::Pearl => "pearl.png",
        }
    }

    /// Animation frames laid out horizontally in the sheet
    pub fn frame_count(&self) -> usize {
        match self {
            TextureId::Background | TextureId::PowerUp | TextureId::Pearl => 1,
            TextureId::Bomb => 5,
            TextureId::Jellyfish => 4,
            _ => 6,
        }
    }
}

/// Font identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontId {
    Main,
}

impl FontId {
    pub fn file_name(&self) -> &'static str {
        match self {
            FontId::Main => "main.ttf",
        }
    }
}

/// Raw texture data with its animation frame count
#[derive(Debug, Clone)]
pub struct Texture {
    pub bytes: Vec<u8>,
    frames: usize,
}

impl Texture {
    pub fn new(bytes: Vec<u8>, frames: usize) -> Self {
        Self {
            bytes,
            frames: frames.max(1),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Normalized horizontal span `(u0, u1)` of an animation frame
    pub fn frame(&self, index: usize) -> Result<(f32, f32)> {
        if index >= self.frames {
            return Err(GameError::FrameOutOfRange {
                index,
                len: self.frames,
            });
        }
        let w = 1.0 / self.frames as f32;
        Ok((index as f32 * w, (index + 1) as f32 * w))
    }
}

/// Raw font data
#[derive(Debug, Clone)]
pub struct Font {
    pub bytes: Vec<u8>,
}

/// Generic holder keyed by an identifier enum
#[derive(Debug)]
pub struct ResourceHolder<Id, R> {
    resources: HashMap<Id, R>,
}

impl<Id, R> Default for ResourceHolder<Id, R> {
    fn default() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }
}

impl<Id: Copy + Eq + Hash + Debug, R> ResourceHolder<Id, R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `path` and register the decoded resource under `id`
    pub fn load(&mut self, id: Id, path: &Path, decode: impl FnOnce(Vec<u8>) -> R) -> Result<()> {
        let bytes = std::fs::read(path).map_err(|source| GameError::ResourceLoad {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded {:?} from {} ({} bytes)", id, path.display(), bytes.len());
        self.resources.insert(id, decode(bytes));
        Ok(())
    }

    pub fn get(&self, id: Id) -> Result<&R> {
        self.resources
            .get(&id)
            .ok_or_else(|| GameError::ResourceNotFound(format!("{:?}", id)))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// All textures and fonts used by the game
#[derive(Debug, Default)]
pub struct Assets {
    pub textures: ResourceHolder<TextureId, Texture>,
    pub fonts: ResourceHolder<FontId, Font>,
    pub root: Option<PathBuf>,
}

impl Assets {
    /// Load every texture and font from `dir`. Any missing file is fatal.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut assets = Self {
            root: Some(dir.to_path_buf()),
            ..Self::default()
        };
        for id in TextureId::ALL {
            let frames = id.frame_count();
            assets
                .textures
                .load(id, &dir.join(id.file_name()), |bytes| Texture::new(bytes, frames))?;
        }
        assets
            .fonts
            .load(FontId::Main, &dir.join(FontId::Main.file_name()), |bytes| Font { bytes })?;
        log::info!(
            "Loaded {} textures and {} fonts from {}",
            assets.textures.len(),
            assets.fonts.len(),
            dir.display()
        );
        Ok(assets)
    }

    /// True when loaded from disk (sprite references are validated)
    pub fn is_loaded(&self) -> bool {
        self.root.is_some()
    }
}
