//! Short-lived cosmetic effects layered on the player sprite

use crate::renderer::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Eat,
    Grow,
    Hurt,
    PowerUp,
}

impl EffectKind {
    fn duration(&self) -> f32 {
        match self {
            EffectKind::Eat => 0.2,
            EffectKind::Grow => 0.6,
            EffectKind::Hurt => 0.4,
            EffectKind::PowerUp => 0.5,
        }
    }

    /// Peak extra scale at the start of the effect
    fn pulse(&self) -> f32 {
        match self {
            EffectKind::Eat => 0.15,
            EffectKind::Grow => 0.4,
            EffectKind::Hurt => -0.1,
            EffectKind::PowerUp => 0.2,
        }
    }

    fn color(&self) -> Color {
        match self {
            EffectKind::Eat => Color::WHITE,
            EffectKind::Grow => Color::PICKUP,
            EffectKind::Hurt => Color::PREDATOR,
            EffectKind::PowerUp => Color::HAZARD,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VisualEffect {
    pub kind: EffectKind,
    pub scale: f32,
    pub rotation: f32,
    pub color: Color,
    pub remaining: f32,
}

#[derive(Debug, Clone)]
pub struct Effects {
    active: Vec<VisualEffect>,
    max: usize,
}

impl Effects {
    pub fn new(max: usize) -> Self {
        Self {
            active: Vec::with_capacity(max),
            max,
        }
    }

    /// Start an effect, dropping the oldest when at capacity
    pub fn push(&mut self, kind: EffectKind) {
        if self.max == 0 {
            return;
        }
        if self.active.len() >= self.max {
            self.active.remove(0);
        }
        self.active.push(VisualEffect {
            kind,
            scale: 1.0 + kind.pulse(),
            rotation: 0.0,
            color: kind.color(),
            remaining: kind.duration(),
        });
    }

    pub fn update(&mut self, dt: f32) {
        for effect in self.active.iter_mut() {
            effect.remaining -= dt;
            let t = (effect.remaining / effect.kind.duration()).clamp(0.0, 1.0);
            effect.scale = 1.0 + effect.kind.pulse() * t;
            if effect.kind == EffectKind::Hurt {
                effect.rotation = (t * 40.0).sin() * 0.2;
            }
            let alpha = (t * 255.0) as u8;
            effect.color = effect.kind.color().with_alpha(alpha);
        }
        self.active.retain(|e| e.remaining > 0.0);
    }

    /// Combined scale of every active effect
    pub fn scale(&self) -> f32 {
        self.active.iter().map(|e| e.scale).product()
    }

    pub fn rotation(&self) -> f32 {
        self.active.iter().map(|e| e.rotation).sum()
    }

    /// Tint from the newest effect
    pub fn tint(&self) -> Option<Color> {
        self.active.last().map(|e| e.color)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualEffect> + '_ {
        self.active.iter()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects_fade_out() {
        let mut effects = Effects::new(4);
        effects.push(EffectKind::Grow);
        assert!(effects.scale() > 1.0);
        effects.update(0.3);
        assert!(effects.scale() > 1.0 && effects.scale() < 1.4);
        effects.update(0.31);
        assert_eq!(effects.iter().count(), 0);
        assert_eq!(effects.scale(), 1.0);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut effects = Effects::new(2);
        effects.push(EffectKind::Eat);
        effects.push(EffectKind::Hurt);
        effects.push(EffectKind::PowerUp);
        let kinds: Vec<_> = effects.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EffectKind::Hurt, EffectKind::PowerUp]);
    }
}
