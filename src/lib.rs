//! Canvas Asteroids - an Asteroids arcade game for the browser
//!
//! Core modules:
//! - `sim`: Frame simulation (entities, collisions, groups, game state)
//! - `renderer`: 2D drawing surface abstraction and shape drawing
//! - `platform`: Browser/native input mapping and wall clock
//! - `settings`: Data-driven game configuration
//! - `error`: Configuration errors

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{Palette, Settings};

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 26.0;
    pub const SHIP_INERTIA: f32 = 0.98;
    pub const SHIP_ACCELERATION: f32 = 0.5;
    /// Degrees per frame while a rotate key is held
    pub const SHIP_ROTATION_SPEED: f32 = 5.0;
    pub const SHIP_MAX_SPEED: f32 = 10.0;
    /// Ship starts pointing up the screen
    pub const SHIP_START_DIRECTION: f32 = 270.0;
    /// Nose and exhaust points in ship-local coordinates
    pub const SHIP_NOSE: f32 = 15.0;
    pub const SHIP_TAIL: f32 = -10.0;
    pub const SHIP_EXPLOSION_PARTICLES: usize = 40;

    /// Minimum wall-clock time between shots (ms)
    pub const FIRE_INTERVAL_MS: f64 = 250.0;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 3.0;
    /// Bullets leave the ship this much faster than the ship is moving
    pub const BULLET_SPEED_BONUS: f32 = 8.0;

    /// Asteroid defaults
    pub const ASTEROID_DEFAULT_RADIUS: f32 = 100.0;
    pub const ASTEROID_SEED_RADIUS_MIN: f32 = 80.0;
    pub const ASTEROID_SEED_RADIUS_MAX: f32 = 100.0;
    /// Asteroids at or below this radius do not split
    pub const ASTEROID_MIN_SPLIT_RADIUS: f32 = 10.0;
    pub const ASTEROID_SCORE_FACTOR: f32 = 1000.0;
    pub const ASTEROID_CHILD_SPEED_BONUS: f32 = 0.25;
    pub const ASTEROID_CHILD_JITTER: f32 = 5.0;
    pub const ASTEROID_MIN_POINTS: usize = 6;
    pub const ASTEROID_MAX_POINTS: usize = 10;

    /// Particle defaults
    pub const PARTICLE_INERTIA: f32 = 0.98;
    pub const PARTICLE_SHRINK: f32 = 0.1;
    pub const PARTICLE_MIN_RADIUS: f32 = 0.1;

    /// Session defaults
    pub const INITIAL_ASTEROIDS: usize = 4;
    /// Ship spawns this far above the bottom edge
    pub const SHIP_SPAWN_OFFSET: f32 = 200.0;
    /// Height reserved for the score bar above the canvas
    pub const HUD_HEIGHT: f32 = 43.0;
}

/// Length of a vector
#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Scale `v` down to `limit` if it is longer, otherwise return it untouched
#[inline]
pub fn limit_magnitude(v: Vec2, limit: f32) -> Vec2 {
    let length = magnitude(v);
    if length > limit {
        v * (limit / length)
    } else {
        v
    }
}

#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Normalized angle to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert polar (magnitude, direction in degrees) to cartesian (x, y)
#[inline]
pub fn vector_from_polar(magnitude: f32, direction: f32) -> Vec2 {
    let theta = degrees_to_radians(direction);
    Vec2::new(magnitude * theta.cos(), magnitude * theta.sin())
}

/// Rotate a point about the origin by `angle` degrees
#[inline]
pub fn rotate_point(point: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = degrees_to_radians(angle).sin_cos();
    Vec2::new(point.x * cos - point.y * sin, point.y * cos + point.x * sin)
}

/// Uniform sample from `[min, max]`
#[inline]
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.random_range(min..=max)
}
