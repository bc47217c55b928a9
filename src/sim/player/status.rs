//! Lives, damage gating and timed status effects

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub lives: u8,
    /// Seconds of invulnerability left
    pub invulnerable: f32,
    /// Seconds before damage can land again
    pub damage_cooldown: f32,
    pub speed_multiplier: f32,
    pub speed_timer: f32,
    /// Reversed controls
    pub poisoned: bool,
    pub poison_timer: f32,
    pub stun_timer: f32,
    pub dead: bool,
    pub respawn_timer: f32,
}

impl Status {
    pub fn new(lives: u8) -> Self {
        Self {
            lives,
            invulnerable: 0.0,
            damage_cooldown: 0.0,
            speed_multiplier: 1.0,
            speed_timer: 0.0,
            poisoned: false,
            poison_timer: 0.0,
            stun_timer: 0.0,
            dead: false,
            respawn_timer: 0.0,
        }
    }

    /// Count down every timer. Returns true when a pending respawn is due.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.invulnerable = (self.invulnerable - dt).max(0.0);
        self.damage_cooldown = (self.damage_cooldown - dt).max(0.0);
        self.stun_timer = (self.stun_timer - dt).max(0.0);

        if self.speed_timer > 0.0 {
            self.speed_timer = (self.speed_timer - dt).max(0.0);
            if self.speed_timer == 0.0 {
                self.speed_multiplier = 1.0;
            }
        }

        if self.poisoned {
            self.poison_timer = (self.poison_timer - dt).max(0.0);
            if self.poison_timer == 0.0 {
                self.poisoned = false;
            }
        }

        if self.dead && self.lives > 0 {
            self.respawn_timer = (self.respawn_timer - dt).max(0.0);
            return self.respawn_timer == 0.0;
        }
        false
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_timer > 0.0
    }

    pub fn can_take_damage(&self) -> bool {
        !self.dead && self.invulnerable <= 0.0 && self.damage_cooldown <= 0.0
    }

    /// Lose `amount` lives unless gated. Returns whether damage landed.
    pub fn take_damage(&mut self, amount: u8) -> bool {
        if !self.can_take_damage() {
            return false;
        }
        self.lives = self.lives.saturating_sub(amount.max(1));
        self.invulnerable = INVULNERABILITY_DURATION;
        self.damage_cooldown = DAMAGE_COOLDOWN;
        true
    }

    /// Returns false if already dead
    pub fn die(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        self.respawn_timer = RESPAWN_DELAY;
        self.stun_timer = 0.0;
        true
    }

    /// Returns false if not dead or out of lives
    pub fn respawn(&mut self) -> bool {
        if !self.dead || self.lives == 0 {
            return false;
        }
        self.dead = false;
        self.respawn_timer = 0.0;
        self.invulnerable = INVULNERABILITY_DURATION;
        self.clear_effects();
        true
    }

    pub fn is_game_over(&self) -> bool {
        self.dead && self.lives == 0
    }

    pub fn stun(&mut self, seconds: f32) -> bool {
        if self.dead || self.is_invulnerable() {
            return false;
        }
        self.stun_timer = self.stun_timer.max(seconds);
        true
    }

    pub fn boost_speed(&mut self) {
        self.speed_multiplier = SPEED_BOOST_MULTIPLIER;
        self.speed_timer = SPEED_BOOST_DURATION;
    }

    pub fn poison(&mut self) {
        self.poisoned = true;
        self.poison_timer = POISON_DURATION;
    }

    /// Returns false at the lives cap
    pub fn add_life(&mut self) -> bool {
        if self.lives >= MAX_LIVES {
            return false;
        }
        self.lives += 1;
        true
    }

    fn clear_effects(&mut self) {
        self.speed_multiplier = 1.0;
        self.speed_timer = 0.0;
        self.poisoned = false;
        self.poison_timer = 0.0;
        self.stun_timer = 0.0;
    }

    /// Fresh run with `lives`
    pub fn full_reset(&mut self, lives: u8) {
        *self = Self::new(lives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_once_per_window() {
        let mut status = Status::new(3);
        assert!(status.take_damage(1));
        assert!(!status.take_damage(1));
        assert_eq!(status.lives, 2);

        // Cooldown over but still invulnerable
        status.tick(DAMAGE_COOLDOWN + 0.01);
        assert!(!status.take_damage(1));
        assert_eq!(status.lives, 2);

        status.tick(INVULNERABILITY_DURATION);
        assert!(status.take_damage(1));
        assert_eq!(status.lives, 1);
    }

    #[test]
    fn test_die_and_respawn_are_idempotent() {
        let mut status = Status::new(2);
        assert!(status.die());
        assert!(!status.die());
        assert!(!status.take_damage(1));

        assert!(!status.tick(RESPAWN_DELAY / 2.0));
        assert!(status.tick(RESPAWN_DELAY));
        assert!(status.respawn());
        assert!(!status.respawn());
        assert!(status.is_invulnerable());
    }

    #[test]
    fn test_no_respawn_without_lives() {
        let mut status = Status::new(1);
        status.take_damage(1);
        status.die();
        assert!(status.is_game_over());
        assert!(!status.tick(RESPAWN_DELAY * 2.0));
        assert!(!status.respawn());
    }

    #[test]
    fn test_timed_effects_expire() {
        let mut status = Status::new(3);
        status.boost_speed();
        status.poison();
        assert!(status.stun(1.0));
        status.tick(1.0);
        assert!(!status.is_stunned());
        assert!(status.poisoned);
        status.tick(POISON_DURATION.max(SPEED_BOOST_DURATION));
        assert!(!status.poisoned);
        assert_eq!(status.speed_multiplier, 1.0);
    }

    #[test]
    fn test_extra_life_caps() {
        let mut status = Status::new(MAX_LIVES - 1);
        assert!(status.add_life());
        assert!(!status.add_life());
        assert_eq!(status.lives, MAX_LIVES);
    }
}
