//! Spawn timing and placement
//!
//! Timers subtract exactly one interval when they fire, so overrun carries
//! into the next period instead of being lost.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::entity::{Arena, Entity};
use super::fish::{Fish, FishSpecies};
use super::hazard::{Hazard, HazardKind};
use super::manager::EntityManager;
use super::pickup::{Pickup, PickupKind};
use crate::consts::*;
use crate::levels::LevelDef;

/// Fires once each time accumulated time reaches the interval
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: f32,
    elapsed: f32,
}

impl IntervalTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Accumulate `dt`; true if the timer fired this call
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            true
        } else {
            false
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Random choice and placement of new actors
#[derive(Debug, Clone)]
pub struct SpawnSystem {
    rng: Pcg32,
}

impl SpawnSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return (lo + hi) / 2.0;
        }
        self.rng.random_range(lo..hi)
    }

    /// Uniform point inset `SPAWN_MARGIN` from every edge
    pub fn random_position(&mut self, arena: &Arena) -> Vec2 {
        Vec2::new(
            self.range(SPAWN_MARGIN, arena.width - SPAWN_MARGIN),
            self.range(SPAWN_MARGIN, arena.height - SPAWN_MARGIN),
        )
    }

    fn pick<T: Copy>(&mut self, options: &[T]) -> Option<T> {
        if options.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..options.len());
        Some(options[index])
    }

    /// Uniform among hazards unlocked by `level`
    pub fn choose_hazard(&mut self, level: u32) -> Option<HazardKind> {
        let enabled: Vec<_> = HazardKind::ALL
            .into_iter()
            .filter(|k| k.min_level() <= level)
            .collect();
        self.pick(&enabled)
    }

    /// Uniform among the level's power-up pool
    pub fn choose_pickup(&mut self, level: &LevelDef) -> Option<PickupKind> {
        let pool: Vec<_> = level.pickups().collect();
        self.pick(&pool)
    }

    /// Returns (x just off a random side, direction toward the arena)
    fn random_side(&mut self, arena: &Arena, radius: f32) -> (f32, f32) {
        if self.rng.random_bool(0.5) {
            (-radius, 1.0)
        } else {
            (arena.width + radius, -1.0)
        }
    }

    pub fn spawn_hazard(&mut self, level: u32, arena: &Arena) -> Option<Actor> {
        let kind = self.choose_hazard(level)?;
        let hazard = match kind {
            HazardKind::Bomb => {
                let x = self.random_position(arena).x;
                Hazard::bomb(Vec2::new(x, SPAWN_MARGIN))
            }
            HazardKind::Jellyfish => {
                let (x, direction) = self.random_side(arena, JELLYFISH_RADIUS);
                let y = self.random_position(arena).y;
                Hazard::jellyfish(Vec2::new(x, y), direction)
            }
        };
        Some(hazard.into())
    }

    pub fn spawn_pickup(&mut self, level: &LevelDef, arena: &Arena) -> Option<Actor> {
        let kind = self.choose_pickup(level)?;
        let pos = self.random_position(arena);
        Some(Pickup::new(kind, pos).into())
    }

    /// Spawn a fish of a species still under its level cap, or nothing if
    /// every species is at its cap
    pub fn spawn_fish(
        &mut self,
        level: &LevelDef,
        alive: impl Fn(FishSpecies) -> usize,
        arena: &Arena,
    ) -> Option<Actor> {
        let candidates: Vec<FishSpecies> = level
            .composition()
            .filter(|(species, cap)| alive(*species) < *cap)
            .map(|(species, _)| species)
            .collect();
        let species = self.pick(&candidates)?;
        let (x, direction) = self.random_side(arena, species.radius());
        let y = self.random_position(arena).y;
        Some(Fish::new(species, Vec2::new(x, y), direction).into())
    }
}

/// Live fish of one species
pub fn count_species(actors: &EntityManager<Actor>, species: FishSpecies) -> usize {
    actors
        .iter()
        .filter(|a| a.is_alive() && a.as_fish().is_some_and(|f| f.species == species))
        .count()
}

/// Drives the spawn timers for one level
#[derive(Debug, Clone)]
pub struct SpawnController {
    system: SpawnSystem,
    fish_timer: IntervalTimer,
    hazard_timer: IntervalTimer,
    pickup_timer: IntervalTimer,
}

impl SpawnController {
    pub fn new(seed: u64) -> Self {
        Self {
            system: SpawnSystem::new(seed),
            fish_timer: IntervalTimer::new(FISH_SPAWN_INTERVAL),
            hazard_timer: IntervalTimer::new(HAZARD_SPAWN_INTERVAL),
            pickup_timer: IntervalTimer::new(PICKUP_SPAWN_INTERVAL),
        }
    }

    /// Seed the level with up to `count` fish right away
    pub fn populate(&mut self, count: usize, level: &LevelDef, arena: &Arena, actors: &mut EntityManager<Actor>) {
        for _ in 0..count {
            let Some(mut actor) = self
                .system
                .spawn_fish(level, |s| count_species(actors, s), arena)
            else {
                break;
            };
            // Start on screen rather than at the edge
            actor.body_mut().pos = self.system.random_position(arena);
            actors.add(actor);
        }
    }

    /// Poll every timer; returns how many actors were added
    pub fn update(&mut self, dt: f32, level: &LevelDef, arena: &Arena, actors: &mut EntityManager<Actor>) -> usize {
        let mut spawned = 0;

        if self.fish_timer.tick(dt) {
            let fish = self.system.spawn_fish(level, |s| count_species(actors, s), arena);
            if let Some(fish) = fish {
                actors.add(fish);
                spawned += 1;
            }
        }

        if self.hazard_timer.tick(dt) {
            if let Some(hazard) = self.system.spawn_hazard(level.number, arena) {
                log::debug!("Spawned hazard {:?}", hazard.as_hazard().map(|h| h.hazard_kind()));
                actors.add(hazard);
                spawned += 1;
            }
        }

        if self.pickup_timer.tick(dt) {
            if let Some(pickup) = self.system.spawn_pickup(level, arena) {
                log::debug!("Spawned pickup {:?}", pickup.as_pickup().map(|p| p.kind));
                actors.add(pickup);
                spawned += 1;
            }
        }

        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelTable;
    use crate::sim::entity::EntityKind;
    use proptest::prelude::*;

    #[test]
    fn test_timer_keeps_remainder() {
        let interval = 1.0;
        let mut timer = IntervalTimer::new(interval);
        let mut fired = 0;
        for _ in 0..5 {
            if timer.tick(0.5) {
                fired += 1;
            }
        }
        assert_eq!(fired, 2);
        assert!((timer.elapsed() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_hazards_respect_level() {
        let mut system = SpawnSystem::new(1);
        for _ in 0..50 {
            assert_eq!(system.choose_hazard(1), Some(HazardKind::Jellyfish));
        }
        let mut saw_bomb = false;
        for _ in 0..200 {
            saw_bomb |= system.choose_hazard(2) == Some(HazardKind::Bomb);
        }
        assert!(saw_bomb);
        assert_eq!(system.choose_hazard(0), None);
    }

    #[test]
    fn test_pickups_come_from_level_pool() {
        let mut system = SpawnSystem::new(2);
        let level = LevelTable::standard().get(1);
        for _ in 0..200 {
            let kind = system.choose_pickup(&level).unwrap();
            assert!(matches!(kind, PickupKind::SpeedBoost | PickupKind::Pearl));
        }
        let empty = LevelDef {
            power_ups: Vec::new(),
            ..level
        };
        assert_eq!(system.choose_pickup(&empty), None);
    }

    #[test]
    fn test_controller_only_spawns_listed_pickups() {
        let arena = Arena::new(640.0, 480.0);
        let level = LevelDef {
            number: 1,
            fish: Vec::new(),
            power_ups: vec!["Pearl"],
            goal: "",
        };
        let mut controller = SpawnController::new(6);
        let mut actors = EntityManager::new();
        let mut spawned = Vec::new();
        let step = 0.5;
        for _ in 0..(40.0 * PICKUP_SPAWN_INTERVAL / step) as usize {
            controller.update(step, &level, &arena, &mut actors);
            spawned.extend(actors.iter().filter_map(|a| a.as_pickup().map(|p| p.kind)));
            actors.clear();
        }
        assert!(spawned.len() >= 30);
        assert!(spawned.iter().all(|k| *k == PickupKind::Pearl), "{:?}", spawned);
    }

    #[test]
    fn test_positions_inside_margin() {
        let arena = Arena::new(640.0, 480.0);
        let mut system = SpawnSystem::new(3);
        for _ in 0..500 {
            let pos = system.random_position(&arena);
            assert!(pos.x >= SPAWN_MARGIN && pos.x <= arena.width - SPAWN_MARGIN);
            assert!(pos.y >= SPAWN_MARGIN && pos.y <= arena.height - SPAWN_MARGIN);
        }
    }

    #[test]
    fn test_fish_caps() {
        let arena = Arena::new(640.0, 480.0);
        let level = LevelDef {
            number: 1,
            fish: vec![("Minnow", 2)],
            power_ups: Vec::new(),
            goal: "",
        };
        let mut controller = SpawnController::new(4);
        let mut actors = EntityManager::new();
        controller.populate(10, &level, &arena, &mut actors);
        assert_eq!(actors.len(), 2);
        assert_eq!(count_species(&actors, FishSpecies::Minnow), 2);
    }

    #[test]
    fn test_controller_spawns_on_schedule() {
        let arena = Arena::new(640.0, 480.0);
        let level = LevelTable::standard().get(2);
        let mut controller = SpawnController::new(5);
        let mut actors = EntityManager::new();
        let step = 0.1;
        let mut total = 0;
        let mut t = 0.0;
        while t < PICKUP_SPAWN_INTERVAL + step {
            total += controller.update(step, &level, &arena, &mut actors);
            t += step;
        }
        assert!(actors.of_kind(EntityKind::Fish).count() > 0);
        assert_eq!(actors.of_kind(EntityKind::Hazard).count(), 1);
        assert_eq!(
            actors.of_kind(EntityKind::PowerUp).count() + actors.of_kind(EntityKind::BonusItem).count(),
            1
        );
        assert_eq!(total, actors.len());
    }

    proptest! {
        #[test]
        fn prop_two_fires_over_two_and_a_half_intervals(
            interval in 0.5f32..5.0,
            cuts in proptest::collection::vec(0.05f32..0.35, 1..64),
        ) {
            // Split 2.5 intervals into pieces, each well under one interval
            let total: f32 = cuts.iter().sum();
            let target = 2.5 * interval;
            let deltas: Vec<f32> = cuts.iter().map(|c| c / total * target).collect();
            prop_assume!(deltas.iter().all(|d| *d < interval));

            let mut timer = IntervalTimer::new(interval);
            let fired = deltas.iter().filter(|d| timer.tick(**d)).count();
            prop_assert_eq!(fired, 2);
            prop_assert!((timer.elapsed() - 0.5 * interval).abs() < 1e-3 * interval);
        }
    }
}
