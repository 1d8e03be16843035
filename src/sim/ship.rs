//! The player's ship

use glam::Vec2;
use rand::Rng;

use super::bullet::Bullet;
use super::particle::{Particle, explosion};
use super::state::{Effect, Keys, TickInput, Viewport};
use crate::consts::*;
use crate::{
    degrees_to_radians, limit_magnitude, magnitude, normalize_degrees, random_between,
    rotate_point, vector_from_polar,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Heading in degrees, [0, 360)
    pub direction: f32,
    pub acceleration: f32,
    /// Degrees per frame while turning
    pub rotation_speed: f32,
    pub radius: f32,
    pub inertia: f32,
    /// Minimum wall-clock time between shots (ms)
    pub fire_interval_ms: f64,
    /// Wall-clock time of the last shot (ms)
    pub last_bullet: Option<f64>,
    deleted: bool,
}

impl Ship {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            direction: SHIP_START_DIRECTION,
            acceleration: SHIP_ACCELERATION,
            rotation_speed: SHIP_ROTATION_SPEED,
            radius: SHIP_RADIUS,
            inertia: SHIP_INERTIA,
            fire_interval_ms: FIRE_INTERVAL_MS,
            last_bullet: None,
            deleted: false,
        }
    }

    pub fn with_fire_interval(mut self, fire_interval_ms: f64) -> Self {
        self.fire_interval_ms = fire_interval_ms;
        self
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn speed(&self) -> f32 {
        magnitude(self.velocity)
    }

    /// Advance one frame from the held keys
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        input: &TickInput,
        rng: &mut R,
        effects: &mut Vec<Effect>,
    ) {
        self.update_velocity(&input.keys);
        self.update_direction(&input.keys);
        self.update_position(&input.viewport);

        if input.keys.space {
            self.shoot(input.now_ms, effects);
        }
        if input.keys.up {
            self.rocket_thrust(rng, effects);
        }
    }

    /// Thrust, damping and the speed cap apply every frame
    pub fn update_velocity(&mut self, keys: &Keys) {
        if keys.up {
            let theta = degrees_to_radians(self.direction);
            self.velocity += Vec2::new(theta.cos(), theta.sin()) * self.acceleration;
        }
        self.velocity *= self.inertia;
        self.velocity = limit_magnitude(self.velocity, SHIP_MAX_SPEED);
    }

    pub fn update_direction(&mut self, keys: &Keys) {
        if keys.left {
            self.direction -= self.rotation_speed;
        }
        if keys.right {
            self.direction += self.rotation_speed;
        }
        self.direction = normalize_degrees(self.direction);
    }

    pub fn update_position(&mut self, viewport: &Viewport) {
        self.position = viewport.wrap(self.position + self.velocity);
    }

    /// Fire a bullet from the nose, at most once per fire interval
    ///
    /// Returns whether a bullet was fired.
    pub fn shoot(&mut self, now_ms: f64, effects: &mut Vec<Effect>) -> bool {
        let can_shoot = match self.last_bullet {
            None => true,
            Some(last) => now_ms - last > self.fire_interval_ms,
        };
        if !can_shoot {
            return false;
        }

        let nose = self.position + rotate_point(Vec2::new(SHIP_NOSE, 0.0), self.direction);
        effects.push(Effect::SpawnBullet(Bullet::new(
            nose,
            self.direction,
            self.speed(),
        )));
        self.last_bullet = Some(now_ms);
        true
    }

    /// Emit one exhaust particle behind the ship
    pub fn rocket_thrust<R: Rng + ?Sized>(&self, rng: &mut R, effects: &mut Vec<Effect>) {
        let tail = rotate_point(Vec2::new(SHIP_TAIL, 0.0), self.direction);
        let jitter = Vec2::new(random_between(rng, -3.0, 3.0), random_between(rng, -3.0, 3.0));
        let direction = normalize_degrees(self.direction + 180.0);
        let velocity = vector_from_polar(random_between(rng, 3.0, 5.0), direction);
        let radius = random_between(rng, 1.0, 3.0);
        let time_to_live = rng.random_range(20..=40);

        effects.push(Effect::SpawnParticle(Particle::new(
            self.position + tail + jitter,
            velocity,
            radius,
            time_to_live,
        )));
    }

    /// Blow up the ship and signal game over
    ///
    /// Calling this on an already deleted ship does nothing.
    pub fn delete<R: Rng + ?Sized>(&mut self, rng: &mut R, effects: &mut Vec<Effect>) {
        if self.deleted {
            return;
        }
        explosion(
            self.position,
            self.radius,
            SHIP_EXPLOSION_PARTICLES,
            rng,
            effects,
        );
        self.deleted = true;
        effects.push(Effect::ShipDestroyed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn input(keys: Keys, now_ms: f64) -> TickInput {
        TickInput {
            keys,
            viewport: Viewport::new(800.0, 600.0),
            now_ms,
        }
    }

    fn bullets(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::SpawnBullet(_)))
            .count()
    }

    #[test]
    fn test_thrust_accelerates_along_heading() {
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        ship.update_velocity(&Keys {
            up: true,
            ..Default::default()
        });
        // Heading 270 points up the screen
        assert!(ship.velocity.x.abs() < 1e-5);
        assert!((ship.velocity.y + 0.5 * SHIP_INERTIA).abs() < 1e-5);
    }

    #[test]
    fn test_damping_without_thrust() {
        let mut ship = Ship::new(Vec2::ZERO);
        ship.velocity = Vec2::new(2.0, 0.0);
        ship.update_velocity(&Keys::default());
        assert!((ship.velocity.x - 1.96).abs() < 1e-6);
    }

    #[test]
    fn test_speed_is_capped() {
        let mut ship = Ship::new(Vec2::ZERO);
        let keys = Keys {
            up: true,
            ..Default::default()
        };
        for _ in 0..500 {
            ship.update_velocity(&keys);
            assert!(ship.speed() <= SHIP_MAX_SPEED + 1e-4);
        }
    }

    #[test]
    fn test_rotation_wraps() {
        let mut ship = Ship::new(Vec2::ZERO);
        ship.direction = 357.0;
        ship.update_direction(&Keys {
            right: true,
            ..Default::default()
        });
        assert!((ship.direction - 2.0).abs() < 1e-4);

        ship.direction = 2.0;
        ship.update_direction(&Keys {
            left: true,
            ..Default::default()
        });
        assert!((ship.direction - 357.0).abs() < 1e-4);
    }

    #[test]
    fn test_screen_wrap() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut ship = Ship::new(Vec2::new(801.0, 300.0));
        ship.update_position(&viewport);
        assert_eq!(ship.position.x, 0.0);

        let mut ship = Ship::new(Vec2::new(-1.0, 300.0));
        ship.update_position(&viewport);
        assert_eq!(ship.position.x, 800.0);
    }

    #[test]
    fn test_fire_rate_limited() {
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        let mut effects = Vec::new();
        assert!(ship.shoot(1_000.0, &mut effects));
        assert!(!ship.shoot(1_100.0, &mut effects));
        assert!(!ship.shoot(1_250.0, &mut effects));
        assert!(ship.shoot(1_251.0, &mut effects));
        assert_eq!(bullets(&effects), 2);
    }

    #[test]
    fn test_bullet_spawns_at_nose() {
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        let mut effects = Vec::new();
        ship.shoot(0.0, &mut effects);
        let Effect::SpawnBullet(bullet) = &effects[0] else {
            panic!("expected a bullet");
        };
        assert!((bullet.position - Vec2::new(400.0, 285.0)).length() < 1e-3);
        assert_eq!(bullet.direction, SHIP_START_DIRECTION);
    }

    #[test]
    fn test_update_fires_and_thrusts() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        let mut effects = Vec::new();
        let keys = Keys {
            up: true,
            space: true,
            ..Default::default()
        };
        ship.update(&input(keys, 0.0), &mut rng, &mut effects);
        assert_eq!(bullets(&effects), 1);
        assert_eq!(
            effects
                .iter()
                .filter(|e| matches!(e, Effect::SpawnParticle(_)))
                .count(),
            1
        );
    }

    #[test]
    fn test_exhaust_points_backwards() {
        let mut rng = Pcg32::seed_from_u64(6);
        let ship = Ship::new(Vec2::new(400.0, 300.0));
        let mut effects = Vec::new();
        ship.rocket_thrust(&mut rng, &mut effects);
        let Effect::SpawnParticle(particle) = &effects[0] else {
            panic!("expected a particle");
        };
        // Ship faces up, exhaust travels down
        assert!(particle.velocity.y > 2.9);
        assert!(particle.position.y > 300.0);
        assert!((20..=40).contains(&particle.time_to_live));
    }

    #[test]
    fn test_delete_explodes_once() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        let mut effects = Vec::new();
        ship.delete(&mut rng, &mut effects);
        ship.delete(&mut rng, &mut effects);
        assert!(ship.is_deleted());
        assert_eq!(effects.len(), SHIP_EXPLOSION_PARTICLES + 1);
        assert!(matches!(effects.last(), Some(Effect::ShipDestroyed)));
    }
}
