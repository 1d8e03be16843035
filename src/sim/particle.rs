//! Decorative particles for explosions and exhaust

use glam::Vec2;
use rand::Rng;

use super::state::Effect;
use crate::consts::*;
use crate::random_between;

/// A short-lived particle. Never collides with anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Frames left before the particle removes itself
    pub time_to_live: u32,
    pub inertia: f32,
    deleted: bool,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, time_to_live: u32) -> Self {
        Self {
            position,
            velocity,
            radius: radius.max(PARTICLE_MIN_RADIUS),
            time_to_live,
            inertia: PARTICLE_INERTIA,
            deleted: false,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn delete(&mut self) {
        self.deleted = true;
    }

    /// Decay velocity and size, count down lifetime
    pub fn update(&mut self) {
        self.velocity *= self.inertia;
        self.position += self.velocity;
        self.radius = (self.radius - PARTICLE_SHRINK).max(PARTICLE_MIN_RADIUS);

        if self.time_to_live == 0 {
            self.delete();
        } else {
            self.time_to_live -= 1;
        }
    }
}

/// Spawn `count` particles scattered around `center`
///
/// Particles start within `spread / 4` of the center on each axis.
pub fn explosion<R: Rng + ?Sized>(
    center: Vec2,
    spread: f32,
    count: usize,
    rng: &mut R,
    effects: &mut Vec<Effect>,
) {
    let jitter = spread / 4.0;
    for _ in 0..count {
        let position = center
            + Vec2::new(
                random_between(rng, -jitter, jitter),
                random_between(rng, -jitter, jitter),
            );
        let velocity = Vec2::new(
            random_between(rng, -1.5, 1.5),
            random_between(rng, -1.5, 1.5),
        );
        let radius = random_between(rng, 1.0, 3.0);
        let time_to_live = rng.random_range(20..=60);
        effects.push(Effect::SpawnParticle(Particle::new(
            position,
            velocity,
            radius,
            time_to_live,
        )));
    }
}
