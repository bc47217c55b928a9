//! Score, growth meter and stage progression
//!
//! Two counters feed progression: `score` (this level, drives stages) and
//! `progress` (the growth meter, restarted at each stage). `total_points`
//! survives level changes and deaths.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Radius for a stage: `base * factor^(stage - 1)`
pub fn radius_for_stage(stage: u8) -> f32 {
    PLAYER_BASE_RADIUS * GROWTH_FACTOR.powi(stage as i32 - 1)
}

/// Growth meter delta for an eaten fish's score value
pub fn growth_for(score_value: u32) -> f32 {
    match score_value {
        0..=3 => GROWTH_TINY,
        4..=6 => GROWTH_SMALL,
        7..=9 => GROWTH_MEDIUM,
        v => v as f32,
    }
}

/// Score a stage is reached at
pub fn stage_threshold(stage: u8) -> Option<u64> {
    match stage {
        2 => Some(STAGE_2_THRESHOLD),
        3 => Some(STAGE_3_THRESHOLD),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Growth {
    stage: u8,
    progress: f32,
    score: u64,
    total_points: u64,
}

impl Default for Growth {
    fn default() -> Self {
        Self {
            stage: 1,
            progress: 0.0,
            score: 0,
            total_points: 0,
        }
    }
}

impl Growth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a level with points carried over from earlier levels
    pub fn with_total_points(total_points: u64) -> Self {
        Self {
            total_points,
            ..Self::default()
        }
    }

    pub fn stage(&self) -> u8 {
        self.stage
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    pub fn radius(&self) -> f32 {
        radius_for_stage(self.stage)
    }

    /// Growth meter fill (0-1)
    pub fn meter(&self) -> f32 {
        (self.progress / LEVEL_GOAL_GROWTH).clamp(0.0, 1.0)
    }

    /// Tail biting unlocks once the player has grown once
    pub fn can_tail_bite(&self) -> bool {
        self.stage >= 2
    }

    /// Full size with a full meter
    pub fn level_goal_reached(&self) -> bool {
        self.stage >= MAX_STAGE && self.progress >= LEVEL_GOAL_GROWTH
    }

    /// Feed the growth meter; returns the delta applied
    pub fn grow(&mut self, score_value: u32) -> f32 {
        let delta = growth_for(score_value);
        self.progress += delta;
        delta
    }

    pub fn add_points(&mut self, points: u64) {
        self.score += points;
        self.total_points += points;
    }

    /// Advance at most one stage. Returns the new stage when it changed.
    pub fn check_stage_advancement(&mut self) -> Option<u8> {
        let next = self.stage + 1;
        let threshold = stage_threshold(next)?;
        if self.score < threshold {
            return None;
        }
        self.stage = next;
        self.progress = 0.0;
        Some(next)
    }

    /// Back to stage 1 with an empty level score
    pub fn reset_size(&mut self) {
        self.stage = 1;
        self.progress = 0.0;
        self.score = 0;
    }

    /// Everything, including points carried between levels
    pub fn full_reset(&mut self) {
        self.reset_size();
        self.total_points = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_growth_bands() {
        assert_eq!(growth_for(2), GROWTH_TINY);
        assert_eq!(growth_for(3), GROWTH_TINY);
        assert_eq!(growth_for(4), GROWTH_SMALL);
        assert_eq!(growth_for(6), GROWTH_SMALL);
        assert_eq!(growth_for(9), GROWTH_MEDIUM);
        assert_eq!(growth_for(12), 12.0);
    }

    #[test]
    fn test_one_stage_per_call() {
        let mut growth = Growth::new();
        growth.add_points(STAGE_3_THRESHOLD + 10);
        assert_eq!(growth.check_stage_advancement(), Some(2));
        assert_eq!(growth.radius(), PLAYER_BASE_RADIUS * GROWTH_FACTOR.powi(1));
        assert_eq!(growth.check_stage_advancement(), Some(3));
        assert_eq!(growth.radius(), PLAYER_BASE_RADIUS * GROWTH_FACTOR.powi(2));
        assert_eq!(growth.check_stage_advancement(), None);
        assert_eq!(growth.stage(), MAX_STAGE);
    }

    #[test]
    fn test_stage_waits_for_threshold() {
        let mut growth = Growth::new();
        growth.add_points(STAGE_2_THRESHOLD - 1);
        assert_eq!(growth.check_stage_advancement(), None);
        growth.add_points(1);
        assert_eq!(growth.check_stage_advancement(), Some(2));
    }

    #[test]
    fn test_advancement_restarts_meter() {
        let mut growth = Growth::new();
        growth.grow(2);
        growth.add_points(STAGE_2_THRESHOLD);
        growth.check_stage_advancement();
        assert_eq!(growth.progress(), 0.0);
        assert!(growth.can_tail_bite());
    }

    #[test]
    fn test_resets() {
        let mut growth = Growth::with_total_points(500);
        growth.add_points(STAGE_2_THRESHOLD);
        growth.check_stage_advancement();
        growth.reset_size();
        assert_eq!(growth.stage(), 1);
        assert_eq!(growth.score(), 0);
        assert_eq!(growth.total_points(), 500 + STAGE_2_THRESHOLD);
        growth.full_reset();
        assert_eq!(growth.total_points(), 0);
    }

    #[test]
    fn test_level_goal() {
        let mut growth = Growth::new();
        growth.add_points(STAGE_3_THRESHOLD);
        growth.check_stage_advancement();
        growth.check_stage_advancement();
        assert!(!growth.level_goal_reached());
        while growth.progress() < LEVEL_GOAL_GROWTH {
            growth.grow(8);
        }
        assert!(growth.level_goal_reached());
        assert_eq!(growth.meter(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_stage_never_decreases(points in proptest::collection::vec(0u64..200, 0..30)) {
            let mut growth = Growth::new();
            let mut last = growth.stage();
            for p in points {
                growth.add_points(p);
                let before = growth.stage();
                growth.check_stage_advancement();
                prop_assert!(growth.stage() >= last);
                prop_assert!(growth.stage() - before <= 1);
                prop_assert_eq!(growth.radius(), radius_for_stage(growth.stage()));
                last = growth.stage();
            }
        }
    }
}
