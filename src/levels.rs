//! Static level definitions
//!
//! Built once at startup and shared read-only. Levels past the end of the
//! table repeat the last definition with the level number carried through.

use crate::sim::fish::FishSpecies;
use crate::sim::pickup::PickupKind;

#[derive(Debug, Clone, PartialEq)]
pub struct LevelDef {
    pub number: u32,
    /// (species name, max alive at once)
    pub fish: Vec<(&'static str, usize)>,
    /// Power-up names that can appear
    pub power_ups: Vec<&'static str>,
    pub goal: &'static str,
}

impl LevelDef {
    /// Typed fish composition; unknown names are skipped
    pub fn composition(&self) -> impl Iterator<Item = (FishSpecies, usize)> + '_ {
        self.fish
            .iter()
            .filter_map(|(name, count)| FishSpecies::from_name(name).map(|s| (s, *count)))
    }

    /// Typed power-up pool; unknown names are skipped
    pub fn pickups(&self) -> impl Iterator<Item = PickupKind> + '_ {
        self.power_ups.iter().filter_map(|name| PickupKind::from_name(name))
    }
}

#[derive(Debug, Clone)]
pub struct LevelTable {
    levels: Vec<LevelDef>,
}

impl LevelTable {
    pub fn new(levels: Vec<LevelDef>) -> Self {
        Self { levels }
    }

    /// The shipped campaign
    pub fn standard() -> Self {
        Self::new(vec![
            LevelDef {
                number: 1,
                fish: vec![("Minnow", 6), ("Angelfish", 3), ("Snapper", 2), ("Barracuda", 1)],
                power_ups: vec!["SpeedBoost", "Pearl"],
                goal: "Eat minnows and angelfish until you are big enough for snappers.",
            },
            LevelDef {
                number: 2,
                fish: vec![("Minnow", 5), ("Angelfish", 3), ("Snapper", 3), ("Barracuda", 2)],
                power_ups: vec!["SpeedBoost", "Pearl", "Poison", "ExtraLife"],
                goal: "Watch for bombs. Bite barracuda tails once you have grown.",
            },
            LevelDef {
                number: 3,
                fish: vec![("Minnow", 4), ("Angelfish", 3), ("Snapper", 3), ("Barracuda", 2), ("Shark", 1)],
                power_ups: vec!["SpeedBoost", "Pearl", "Poison", "ExtraLife", "Freeze"],
                goal: "A shark patrols these waters. Grow fast or stay out of its way.",
            },
            LevelDef {
                number: 4,
                fish: vec![("Minnow", 3), ("Angelfish", 3), ("Snapper", 4), ("Barracuda", 3), ("Shark", 2)],
                power_ups: vec!["SpeedBoost", "Pearl", "Poison", "ExtraLife", "Freeze"],
                goal: "Fewer small fish, more predators. Pick your meals carefully.",
            },
        ])
    }

    /// Definition for `level` (1-based)
    pub fn get(&self, level: u32) -> LevelDef {
        let level = level.max(1);
        let index = (level as usize - 1).min(self.levels.len().saturating_sub(1));
        match self.levels.get(index) {
            Some(def) if def.number == level => def.clone(),
            Some(def) => LevelDef {
                number: level,
                ..def.clone()
            },
            None => LevelDef {
                number: level,
                fish: vec![("Minnow", 6)],
                power_ups: Vec::new(),
                goal: "Eat!",
            },
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
