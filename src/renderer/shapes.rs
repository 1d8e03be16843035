//! Drawing for each kind of game object
//!
//! Every object is drawn between `save`/`restore`, so transforms and styles
//! never leak from one object into the next.

use std::f32::consts::TAU;

use glam::Vec2;

use super::Surface;
use crate::degrees_to_radians;
use crate::settings::Palette;
use crate::sim::state::Viewport;
use crate::sim::{Asteroid, GameObject, Ship};

/// Ship outline in ship-local coordinates (nose along +x)
const SHIP_OUTLINE: [Vec2; 5] = [
    Vec2::new(15.0, 0.0),
    Vec2::new(-15.0, -12.0),
    Vec2::new(-10.0, -10.0),
    Vec2::new(-10.0, 10.0),
    Vec2::new(-15.0, 12.0),
];

pub fn background(surface: &mut dyn Surface, viewport: &Viewport, palette: &Palette) {
    surface.set_fill_style(&palette.background);
    surface.fill_rect(0.0, 0.0, viewport.width, viewport.height);
}

pub fn game_object(surface: &mut dyn Surface, object: &GameObject, palette: &Palette) {
    match object {
        GameObject::Ship(ship) => self::ship(surface, ship, palette),
        GameObject::Asteroid(asteroid) => self::asteroid(surface, asteroid, palette),
        GameObject::Bullet(bullet) => dot(surface, bullet.position, bullet.radius, palette),
        GameObject::Particle(particle) => {
            dot(surface, particle.position, particle.radius, palette)
        }
    }
}

/// Closed polygon through `points`
fn polygon(surface: &mut dyn Surface, points: &[Vec2]) {
    surface.begin_path();
    for (i, point) in points.iter().enumerate() {
        if i == 0 {
            surface.move_to(point.x, point.y);
        } else {
            surface.line_to(point.x, point.y);
        }
    }
    surface.close_path();
}

pub fn ship(surface: &mut dyn Surface, ship: &Ship, palette: &Palette) {
    surface.save();
    surface.translate(ship.position.x, ship.position.y);
    surface.rotate(degrees_to_radians(ship.direction));
    surface.set_stroke_style(&palette.foreground);
    surface.set_fill_style(&palette.foreground);
    surface.set_line_width(1.0);
    polygon(surface, &SHIP_OUTLINE);
    surface.fill();
    surface.stroke();
    surface.restore();
}

pub fn asteroid(surface: &mut dyn Surface, asteroid: &Asteroid, palette: &Palette) {
    surface.save();
    surface.translate(asteroid.position.x, asteroid.position.y);
    surface.rotate(degrees_to_radians(asteroid.direction));
    surface.set_stroke_style(&palette.foreground);
    surface.set_line_width(1.0);
    polygon(surface, &asteroid.points);
    surface.stroke();
    surface.restore();
}

/// Filled circle, used for bullets and particles
pub fn dot(surface: &mut dyn Surface, center: Vec2, radius: f32, palette: &Palette) {
    surface.save();
    surface.translate(center.x, center.y);
    surface.set_fill_style(&palette.foreground);
    surface.begin_path();
    surface.arc(0.0, 0.0, radius, 0.0, TAU);
    surface.close_path();
    surface.fill();
    surface.restore();
}
