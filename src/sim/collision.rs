//! Circle-circle collision detection
//!
//! Every object is treated as a circle of its own radius.

use glam::Vec2;

use super::state::GameObject;
use crate::magnitude;

/// True if two circles overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    magnitude(a_pos - b_pos) < a_radius + b_radius
}

/// Check collision between two game objects
pub fn collision(a: &GameObject, b: &GameObject) -> bool {
    circles_overlap(a.position(), a.radius(), b.position(), b.radius())
}
