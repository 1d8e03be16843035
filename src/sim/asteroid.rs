//! Drifting asteroids that split when destroyed

use glam::Vec2;
use rand::Rng;

use super::particle::explosion;
use super::state::{Effect, Viewport};
use crate::consts::*;
use crate::{magnitude, normalize_degrees, random_between, vector_from_polar};

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Current rotation in degrees
    pub direction: f32,
    /// Degrees per frame
    pub rotation_speed: f32,
    /// Outline in asteroid-local coordinates, fixed for the asteroid's lifetime
    pub points: Vec<Vec2>,
    deleted: bool,
}

/// Irregular polygon: evenly spaced angles, random distance from the center
fn generate_outline<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vec<Vec2> {
    let count = rng.random_range(ASTEROID_MIN_POINTS..=ASTEROID_MAX_POINTS);
    (0..count)
        .map(|i| {
            let angle = crate::degrees_to_radians(i as f32 * 360.0 / count as f32);
            let distance = radius * random_between(rng, 0.5, 1.0);
            Vec2::new(angle.sin(), angle.cos()) * distance
        })
        .collect()
}

impl Asteroid {
    /// Create an asteroid; radius and velocity are randomized when omitted
    pub fn new<R: Rng + ?Sized>(
        position: Vec2,
        radius: Option<f32>,
        velocity: Option<Vec2>,
        rng: &mut R,
    ) -> Self {
        let radius = radius.unwrap_or(ASTEROID_DEFAULT_RADIUS);
        let velocity = velocity.unwrap_or_else(|| {
            Vec2::new(random_between(rng, -1.0, 1.0), random_between(rng, -1.0, 1.0))
        });
        let rotation_speed = random_between(rng, -1.0, 1.0);
        let points = generate_outline(radius, rng);
        Self {
            position,
            velocity,
            radius,
            direction: 0.0,
            rotation_speed,
            points,
            deleted: false,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Points awarded for destroying this asteroid (smaller is worth more)
    pub fn score_value(&self) -> u32 {
        (ASTEROID_SCORE_FACTOR / self.radius).round() as u32
    }

    /// Whether destroying this asteroid produces children
    pub fn splits(&self) -> bool {
        self.radius > ASTEROID_MIN_SPLIT_RADIUS
    }

    pub fn update(&mut self, viewport: &Viewport) {
        self.direction = normalize_degrees(self.direction + self.rotation_speed);
        self.position = viewport.wrap(self.position + self.velocity);
    }

    /// Destroy the asteroid: score, debris, and two half-size children
    ///
    /// Calling this on an already deleted asteroid does nothing.
    pub fn delete<R: Rng + ?Sized>(&mut self, rng: &mut R, effects: &mut Vec<Effect>) {
        if self.deleted {
            return;
        }
        self.deleted = true;

        effects.push(Effect::AwardScore(self.score_value()));
        explosion(
            self.position,
            self.radius,
            self.radius.floor() as usize,
            rng,
            effects,
        );

        if self.splits() {
            log::debug!("Asteroid r={:.1} split at {:?}", self.radius, self.position);
            for _ in 0..2 {
                effects.push(Effect::SpawnAsteroid(self.child(rng)));
            }
        }
    }

    fn child<R: Rng + ?Sized>(&self, rng: &mut R) -> Asteroid {
        let jitter = Vec2::new(
            random_between(rng, -ASTEROID_CHILD_JITTER, ASTEROID_CHILD_JITTER),
            random_between(rng, -ASTEROID_CHILD_JITTER, ASTEROID_CHILD_JITTER),
        );
        let speed = magnitude(self.velocity) + ASTEROID_CHILD_SPEED_BONUS;
        let direction = random_between(rng, 0.0, 360.0);
        Asteroid::new(
            self.position + jitter,
            Some(self.radius / 2.0),
            Some(vector_from_polar(speed, direction)),
            rng,
        )
    }
}
