//! Projectiles fired by the ship

use glam::Vec2;

use super::state::Viewport;
use crate::consts::*;
use crate::vector_from_polar;

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub position: Vec2,
    /// Heading in degrees, fixed at creation
    pub direction: f32,
    pub velocity: Vec2,
    pub radius: f32,
    deleted: bool,
}

impl Bullet {
    /// Bullets travel a fixed amount faster than the ship that fired them
    pub fn new(position: Vec2, direction: f32, ship_speed: f32) -> Self {
        let speed = ship_speed + BULLET_SPEED_BONUS;
        Self {
            position,
            direction,
            velocity: vector_from_polar(speed, direction),
            radius: BULLET_RADIUS,
            deleted: false,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn delete(&mut self) {
        self.deleted = true;
    }

    /// Move, deleting the bullet once it leaves the screen
    pub fn update(&mut self, viewport: &Viewport) {
        self.position += self.velocity;
        if !viewport.contains(self.position) {
            self.delete();
        }
    }
}
