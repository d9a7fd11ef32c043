// particle.rs
// Particle record for the vacuum field, spawning and chirality coloring

use palette::{Hsl, IntoColor, Srgb};
use ultraviolet::Vec2;

use crate::config;
use crate::renderer::canvas::Rgba;
use crate::state::SimulationState;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Cached from the live chirality every tick
    pub color: Rgba,
    pub alpha: f32,
    pub life: i32,
    /// Chirality of the state the particle was born into
    pub chirality: f32,
}

impl Particle {
    /// A fresh particle somewhere in the `width` x `height` canvas.
    ///
    /// Velocity components are uniform in `[-e, e)` where `e = energy / 100`.
    pub fn spawn(rng: &mut fastrand::Rng, width: f32, height: f32, state: &SimulationState) -> Self {
        let chirality = state.chirality as f32;
        let energy = (state.energy / 100.0) as f32;
        Self {
            pos: Vec2::new(rng.f32() * width, rng.f32() * height),
            vel: Vec2::new(
                (rng.f32() - 0.5) * energy * 2.0,
                (rng.f32() - 0.5) * energy * 2.0,
            ),
            size: rng.f32() * config::PARTICLE_SIZE_SPAN + config::PARTICLE_SIZE_MIN,
            color: chiral_color(chirality),
            alpha: rng.f32() * config::INITIAL_ALPHA_SPAN + config::INITIAL_ALPHA_MIN,
            life: rng.i32(config::PARTICLE_LIFE_RANGE),
            chirality,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0
    }

    /// Reflect off the canvas walls, losing energy on each bounce, then clamp back inside.
    pub fn reflect(&mut self, width: f32, height: f32) {
        if self.pos.x < 0.0 || self.pos.x > width {
            self.vel.x *= config::WALL_RESTITUTION;
        }
        if self.pos.y < 0.0 || self.pos.y > height {
            self.vel.y *= config::WALL_RESTITUTION;
        }
        self.pos.x = self.pos.x.clamp(0.0, width.max(0.0));
        self.pos.y = self.pos.y.clamp(0.0, height.max(0.0));
    }
}

/// Hue band by handedness: warm for positive, cool for negative, purple when linear.
/// Lightness grows with |chirality|.
pub fn chiral_color(chirality: f32) -> Rgba {
    let intensity = chirality.abs();
    let (hue, saturation, lightness) = if chirality > 0.0 {
        (20.0 + intensity * 20.0, 0.8, 0.5 + intensity * 0.3)
    } else if chirality < 0.0 {
        (200.0 + intensity * 20.0, 0.8, 0.5 + intensity * 0.3)
    } else {
        (280.0, 0.6, 0.6)
    };

    let hsl: Hsl = Hsl::new(hue, saturation, lightness.min(1.0));
    let rgb: Srgb = hsl.into_color();
    [
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
        255,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_ranges() {
        let mut rng = fastrand::Rng::with_seed(3);
        let state = SimulationState { energy: 150.0, chirality: -0.4, ..Default::default() };
        for _ in 0..1000 {
            let p = Particle::spawn(&mut rng, 800.0, 400.0, &state);
            assert!((0.0..800.0).contains(&p.pos.x));
            assert!((0.0..400.0).contains(&p.pos.y));
            assert!((1.0..4.0).contains(&p.size));
            assert!((50..150).contains(&p.life));
            assert!(p.vel.x.abs() <= 1.5 && p.vel.y.abs() <= 1.5);
            assert!((0.2..=1.0).contains(&p.alpha));
            assert_eq!(p.chirality, -0.4);
        }
    }

    #[test]
    fn warm_cool_and_linear_hues() {
        let warm = chiral_color(0.5);
        let cool = chiral_color(-0.5);
        let linear = chiral_color(0.0);
        // warm: red dominates blue; cool: blue dominates red
        assert!(warm[0] > warm[2]);
        assert!(cool[2] > cool[0]);
        // hsl(280, 60%, 60%) is a violet with red and blue above green
        assert!(linear[0] > linear[1] && linear[2] > linear[1]);
        assert_eq!(linear, [173, 92, 214, 255]);
    }

    #[test]
    fn lightness_follows_magnitude() {
        let dim = chiral_color(0.1);
        let bright = chiral_color(0.9);
        let sum = |c: Rgba| c[0] as u32 + c[1] as u32 + c[2] as u32;
        assert!(sum(bright) > sum(dim));
    }
}
