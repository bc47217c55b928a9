//! Movement intent from keys or the autopilot

use glam::Vec2;

use crate::platform::Key;
use crate::sim::actor::Actor;
use crate::sim::entity::Entity;
use crate::sim::manager::EntityManager;

/// Threats closer than this (edge to edge) make the autopilot flee
const AUTOPILOT_DANGER_DISTANCE: f32 = 90.0;

#[derive(Debug, Clone, Default)]
pub struct PlayerInput {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    /// Steer toward `target` instead of reading keys
    pub autopilot: bool,
    target: Option<Vec2>,
}

impl PlayerInput {
    /// Track a key press/release; returns true if the key is a direction
    pub fn handle_key(&mut self, key: Key, pressed: bool) -> bool {
        match key {
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            _ => return false,
        }
        true
    }

    /// Drop all held keys (focus loss, pause)
    pub fn release_all(&mut self) {
        self.up = false;
        self.down = false;
        self.left = false;
        self.right = false;
    }

    pub fn set_target(&mut self, target: Option<Vec2>) {
        self.target = target;
    }

    /// Unit-length (or zero) movement direction
    pub fn intent(&self, from: Vec2, reversed: bool) -> Vec2 {
        let raw = if self.autopilot {
            match self.target {
                Some(target) if target.distance_squared(from) > 1.0 => target - from,
                _ => Vec2::ZERO,
            }
        } else {
            let x = self.right as i32 - self.left as i32;
            let y = self.down as i32 - self.up as i32;
            Vec2::new(x as f32, y as f32)
        };
        let dir = raw.normalize_or_zero();
        if reversed { -dir } else { dir }
    }
}

/// Pick where the autopilot should head: away from the nearest threat if one
/// is close, otherwise toward the nearest edible fish, otherwise the nearest
/// pickup.
pub fn autopilot_target(pos: Vec2, radius: f32, stage: u8, actors: &EntityManager<Actor>) -> Option<Vec2> {
    let mut threat: Option<(f32, Vec2)> = None;
    let mut prey: Option<(f32, Vec2)> = None;
    let mut pickup: Option<(f32, Vec2)> = None;

    for actor in actors.iter().filter(|a| a.is_alive()) {
        let other = actor.body();
        let gap = pos.distance(other.pos) - radius - actor.contact_radius();
        let slot = match actor {
            Actor::Fish(fish) if stage > fish.tier() => &mut prey,
            Actor::Fish(_) => &mut threat,
            Actor::Hazard(hazard) if hazard.is_active() => &mut threat,
            Actor::Hazard(_) => continue,
            Actor::Pickup(_) => &mut pickup,
        };
        if slot.is_none_or(|(best, _)| gap < best) {
            *slot = Some((gap, other.pos));
        }
    }

    if let Some((gap, danger)) = threat {
        if gap < AUTOPILOT_DANGER_DISTANCE {
            let away = (pos - danger).normalize_or_zero();
            return Some(pos + away * AUTOPILOT_DANGER_DISTANCE);
        }
    }
    prey.or(pickup).map(|(_, target)| target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fish::{Fish, FishSpecies};

    #[test]
    fn test_keys_give_normalized_intent() {
        let mut input = PlayerInput::default();
        input.handle_key(Key::Right, true);
        input.handle_key(Key::Down, true);
        let dir = input.intent(Vec2::ZERO, false);
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.x > 0.0 && dir.y > 0.0);
        assert!(!input.handle_key(Key::Enter, true));
    }

    #[test]
    fn test_poison_reverses() {
        let mut input = PlayerInput::default();
        input.handle_key(Key::Left, true);
        assert_eq!(input.intent(Vec2::ZERO, true), Vec2::X);
        input.release_all();
        assert_eq!(input.intent(Vec2::ZERO, false), Vec2::ZERO);
    }

    #[test]
    fn test_autopilot_chases_prey_and_flees_predators() {
        let mut actors = EntityManager::new();
        actors.add(Actor::from(Fish::new(FishSpecies::Minnow, Vec2::new(300.0, 100.0), 1.0)));
        let pos = Vec2::new(100.0, 100.0);
        assert_eq!(autopilot_target(pos, 16.0, 1, &actors), Some(Vec2::new(300.0, 100.0)));

        actors.add(Actor::from(Fish::new(FishSpecies::Shark, Vec2::new(100.0, 180.0), 1.0)));
        let target = autopilot_target(pos, 16.0, 1, &actors).unwrap();
        assert!(target.y < pos.y, "should swim away from the shark");

        let mut input = PlayerInput {
            autopilot: true,
            ..Default::default()
        };
        input.set_target(Some(target));
        assert!(input.intent(pos, false).y < 0.0);
    }
}
