//! Feeding Frenzy - an arcade fish-eat-fish game
//!
//! Core modules:
//! - `sim`: Entities, player subsystems, spawning and collision rules
//! - `states`: Screen stack (menu, play, pause, between-level, game over)
//! - `game`: Fixed-timestep loop tying platform, states and shared session together
//! - `platform`: Event/timing abstraction with a headless implementation
//! - `renderer`: Backend-agnostic draw command recording
//! - `audio`: Sound loading and music crossfades over a pluggable backend
//! - `levels`: Static level definitions

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod levels;
pub mod platform;
pub mod renderer;
pub mod resources;
pub mod settings;
pub mod sim;
pub mod states;

pub use error::{GameError, Result};
pub use game::Game;
pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Wall-clock frame delta is clamped to this before accumulating
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 1024.0;
    pub const ARENA_HEIGHT: f32 = 768.0;

    /// Player size and movement
    pub const PLAYER_BASE_RADIUS: f32 = 16.0;
    /// Radius multiplier per stage
    pub const GROWTH_FACTOR: f32 = 1.5;
    pub const MAX_STAGE: u8 = 3;
    pub const PLAYER_SPEED: f32 = 220.0;

    /// Level score needed to reach stage 2 / stage 3
    pub const STAGE_2_THRESHOLD: u64 = 150;
    pub const STAGE_3_THRESHOLD: u64 = 400;

    /// Growth meter deltas for score-value bands (<=3, <=6, <=9)
    pub const GROWTH_TINY: f32 = 1.0;
    pub const GROWTH_SMALL: f32 = 2.0;
    pub const GROWTH_MEDIUM: f32 = 3.0;
    /// Growth needed at the final stage to finish a level
    pub const LEVEL_GOAL_GROWTH: f32 = 20.0;

    /// Lives
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;

    /// Damage gating (seconds)
    pub const INVULNERABILITY_DURATION: f32 = 2.0;
    pub const DAMAGE_COOLDOWN: f32 = 0.5;
    /// Delay before a dead player respawns
    pub const RESPAWN_DELAY: f32 = 1.5;

    /// Power-up effects
    pub const SPEED_BOOST_MULTIPLIER: f32 = 1.6;
    pub const SPEED_BOOST_DURATION: f32 = 5.0;
    pub const POISON_DURATION: f32 = 4.0;
    pub const FREEZE_DURATION: f32 = 3.0;
    pub const PEARL_POINTS: u64 = 50;

    /// Tail biting (stage 2+)
    pub const TAIL_BITE_POINTS: u64 = 25;
    /// Max gap between player edge and the prey's tail
    pub const TAIL_BITE_REACH: f32 = 10.0;
    pub const TAIL_BITE_COOLDOWN: f32 = 1.5;
    /// Speed multiplier for a fish fleeing after a tail bite
    pub const FLEE_SPEED_MULTIPLIER: f32 = 1.8;

    /// Bomb hazard
    pub const BOMB_RADIUS: f32 = 14.0;
    pub const BOMB_FUSE: f32 = 3.0;
    pub const BOMB_EXPLODE_DURATION: f32 = 0.5;
    pub const BOMB_BLAST_RADIUS: f32 = 90.0;
    pub const BOMB_PUFFS_DURATION: f32 = 0.3;
    pub const BOMB_SMOKE_DURATION: f32 = 0.6;
    pub const BOMB_SINK_SPEED: f32 = 20.0;
    pub const BOMB_DAMAGE: u8 = 1;

    /// Jellyfish hazard
    pub const JELLYFISH_RADIUS: f32 = 18.0;
    pub const JELLYFISH_STUN: f32 = 1.5;
    pub const JELLYFISH_LIFETIME: f32 = 12.0;
    pub const JELLYFISH_DRIFT_SPEED: f32 = 40.0;
    pub const JELLYFISH_BOB_AMPLITUDE: f32 = 20.0;
    pub const JELLYFISH_BOB_FREQUENCY: f32 = 2.0;
    pub const JELLYFISH_DAMAGE: u8 = 0;

    /// Pickups
    pub const PICKUP_RADIUS: f32 = 12.0;
    pub const PICKUP_LIFETIME: f32 = 8.0;
    pub const PICKUP_FLOAT_SPEED: f32 = 25.0;

    /// Spawning
    pub const SPAWN_MARGIN: f32 = 48.0;
    pub const FISH_SPAWN_INTERVAL: f32 = 1.2;
    pub const HAZARD_SPAWN_INTERVAL: f32 = 7.0;
    pub const PICKUP_SPAWN_INTERVAL: f32 = 11.0;
}

/// Check whether two circles overlap (touching counts)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) <= reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.1, 0.0), 5.0));
    }
}
