//! Per-frame simulation tick
//!
//! Core game loop: advance every group once, resolve collisions, apply the
//! effects entities request, and purge deleted objects.

use glam::Vec2;

use super::asteroid::Asteroid;
use super::collision::{circles_overlap, collision};
use super::ship::Ship;
use super::state::{Effect, GameEvent, GameObject, GamePhase, GameState, Group, TickInput};
use crate::random_between;

/// Placement attempts per initial asteroid before giving up on avoiding the ship
const MAX_PLACEMENT_ATTEMPTS: usize = 100;

impl GameState {
    /// Begin a new game from `Idle` or `GameOver`
    ///
    /// Clears every group, resets the score, and spawns the ship plus the
    /// initial asteroids. Returns false (and changes nothing) while a game is
    /// already in progress.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }

        self.groups.clear();
        self.events.clear();
        self.score = 0;
        self.frame = 0;

        self.create_ship();
        self.create_initial_asteroids(self.settings.initial_asteroids);

        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        log::info!(
            "Game started: {}x{} viewport, {} asteroids",
            self.viewport.width,
            self.viewport.height,
            self.groups.len(Group::Asteroids)
        );
        true
    }

    fn create_ship(&mut self) {
        let position = Vec2::new(
            self.viewport.width / 2.0,
            self.viewport.height - self.settings.ship_spawn_offset,
        );
        let ship = Ship::new(position).with_fire_interval(self.settings.fire_interval_ms);
        self.groups.add(GameObject::Ship(ship));
    }

    fn random_asteroid(&mut self) -> Asteroid {
        let rng = &mut self.rng;
        let position = Vec2::new(
            random_between(rng, 0.0, self.viewport.width),
            random_between(rng, 0.0, self.viewport.height),
        );
        let radius = random_between(
            rng,
            self.settings.asteroid_radius_min,
            self.settings.asteroid_radius_max,
        );
        Asteroid::new(position, Some(radius), None, rng)
    }

    /// Spawn asteroids anywhere except on top of the ship
    fn create_initial_asteroids(&mut self, count: usize) {
        for _ in 0..count {
            let mut asteroid = self.random_asteroid();
            let mut attempts = 1;
            while self.overlaps_ship(&asteroid) {
                if attempts >= MAX_PLACEMENT_ATTEMPTS {
                    log::warn!(
                        "No clear spot for asteroid after {attempts} attempts; placing anyway"
                    );
                    break;
                }
                asteroid = self.random_asteroid();
                attempts += 1;
            }
            self.groups.add(GameObject::Asteroid(asteroid));
        }
    }

    fn overlaps_ship(&self, asteroid: &Asteroid) -> bool {
        self.groups.get(Group::Ship).iter().any(|ship| {
            circles_overlap(
                ship.position(),
                ship.radius(),
                asteroid.position,
                asteroid.radius,
            )
        })
    }

    /// Delete the object at `index` in `group`, collecting its effects
    fn delete_at(&mut self, group: Group, index: usize, effects: &mut Vec<Effect>) {
        // Matches `add_to_score`: nothing is awarded once the ship group is empty
        let scoring = !self.groups.is_empty(Group::Ship);
        let object = &mut self.groups.get_mut(group)[index];
        if let GameObject::Asteroid(asteroid) = &*object {
            if !asteroid.is_deleted() {
                self.events.push(GameEvent::AsteroidDestroyed {
                    radius: asteroid.radius,
                    points: if scoring { asteroid.score_value() } else { 0 },
                });
            }
        }
        object.delete(&mut self.rng, effects);
    }

    /// Delete every pair formed by this object and an overlapping live member
    /// of the groups it watches
    ///
    /// The subject keeps scanning after its own deletion, so a bullet or ship
    /// overlapping several asteroids takes all of them out.
    fn resolve_collisions(&mut self, group: Group, index: usize, effects: &mut Vec<Effect>) {
        if self.groups.get(group)[index].is_deleted() {
            return;
        }
        let targets = self.groups.get(group)[index].collides_with();
        for &target in targets {
            for other in 0..self.groups.len(target) {
                if target == group && other == index {
                    continue;
                }
                let subject = &self.groups.get(group)[index];
                let candidate = &self.groups.get(target)[other];
                if candidate.is_deleted() || !collision(subject, candidate) {
                    continue;
                }
                self.delete_at(group, index, effects);
                self.delete_at(target, other, effects);
            }
        }
    }

    /// Carry out effects requested by entities
    ///
    /// Game over is announced after the rest of the batch so the reported
    /// score includes the asteroid the ship collided with.
    fn apply_effects(&mut self, effects: &mut Vec<Effect>) {
        let mut ship_destroyed = false;
        for effect in effects.drain(..) {
            match effect {
                Effect::SpawnBullet(bullet) => {
                    log::debug!("Shot fired at {:?}", bullet.position);
                    self.events.push(GameEvent::ShotFired);
                    self.groups.add(GameObject::Bullet(bullet));
                }
                Effect::SpawnParticle(particle) => self.groups.add(GameObject::Particle(particle)),
                Effect::SpawnAsteroid(asteroid) => self.groups.add(GameObject::Asteroid(asteroid)),
                Effect::AwardScore(points) => self.add_to_score(points),
                Effect::ShipDestroyed => ship_destroyed = true,
            }
        }

        if ship_destroyed {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over: score {} after {} frames", self.score, self.frame);
        }
    }

    /// Run one group: collide, then update or schedule removal, member by member
    fn update_group(&mut self, group: Group, input: &TickInput, effects: &mut Vec<Effect>) {
        let mut purge = Vec::new();
        let mut index = 0;
        // Spawns may grow the group mid-pass; new members are visited this frame
        while index < self.groups.len(group) {
            self.resolve_collisions(group, index, effects);

            let object = &mut self.groups.get_mut(group)[index];
            if object.is_deleted() {
                purge.push(index);
            } else {
                object.update(input, &mut self.rng, effects);
            }

            // Score is gated on the ship group, so apply before compaction
            self.apply_effects(effects);
            index += 1;
        }

        if !purge.is_empty() {
            log::trace!("Purging {} from {}", purge.len(), group.name());
            let mut position = 0;
            self.groups.get_mut(group).retain(|_| {
                let keep = purge.binary_search(&position).is_err();
                position += 1;
                keep
            });
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::Idle {
        return;
    }

    state.viewport = input.viewport;
    state.frame += 1;

    let mut effects = Vec::new();
    for group in Group::ALL {
        state.update_group(group, input, &mut effects);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::state::{Keys, Viewport};
    use crate::sim::{Bullet, Particle};

    const VIEWPORT: Viewport = Viewport::new(1024.0, 768.0);

    fn new_game(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Settings::default(), VIEWPORT);
        assert!(state.start());
        state
    }

    fn input(keys: Keys, now_ms: f64) -> TickInput {
        TickInput {
            keys,
            viewport: VIEWPORT,
            now_ms,
        }
    }

    /// Destroy every asteroid (and its children) directly, as bullets would
    fn destroy_all_asteroids(state: &mut GameState) {
        let mut effects = Vec::new();
        while !state.groups.is_empty(Group::Asteroids) {
            for index in 0..state.groups.len(Group::Asteroids) {
                state.delete_at(Group::Asteroids, index, &mut effects);
                state.apply_effects(&mut effects);
            }
            state
                .groups
                .get_mut(Group::Asteroids)
                .retain(|a| !a.is_deleted());
        }
    }

    #[test]
    fn test_start_spawns_ship_and_asteroids() {
        for seed in 0..20 {
            let state = new_game(seed);
            assert_eq!(state.phase, GamePhase::Playing);
            assert_eq!(state.groups.len(Group::Ship), 1);
            assert_eq!(state.groups.len(Group::Asteroids), INITIAL_ASTEROIDS);

            let ship = &state.groups.get(Group::Ship)[0];
            for asteroid in state.groups.get(Group::Asteroids) {
                assert!(!collision(ship, asteroid));
                assert!(
                    (ASTEROID_SEED_RADIUS_MIN..=ASTEROID_SEED_RADIUS_MAX)
                        .contains(&asteroid.radius())
                );
            }
            assert_eq!(ship.position(), Vec2::new(512.0, 568.0));
        }
    }

    #[test]
    fn test_idle_does_not_tick() {
        let mut state = GameState::new(1, Settings::default(), VIEWPORT);
        tick(&mut state, &input(Keys::default(), 0.0));
        assert_eq!(state.frame, 0);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let mut state = new_game(3);
        state.score = 55;
        assert!(!state.start());
        assert_eq!(state.score, 55);
    }

    #[test]
    fn test_fire_twice_within_interval() {
        let mut state = new_game(4);
        state.groups.get_mut(Group::Asteroids).clear();
        let fire = Keys {
            space: true,
            ..Default::default()
        };

        tick(&mut state, &input(fire, 10_000.0));
        tick(&mut state, &input(fire, 10_100.0));
        assert_eq!(state.groups.len(Group::Bullets), 1);

        tick(&mut state, &input(fire, 10_300.0));
        assert_eq!(state.groups.len(Group::Bullets), 2);

        let shots = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ShotFired))
            .count();
        assert_eq!(shots, 2);
    }

    #[test]
    fn test_bullet_destroys_asteroid() {
        let mut state = new_game(5);
        state.groups.get_mut(Group::Asteroids).clear();

        let asteroid = Asteroid::new(
            Vec2::new(200.0, 200.0),
            Some(50.0),
            Some(Vec2::ZERO),
            &mut state.rng,
        );
        state.groups.add(GameObject::Asteroid(asteroid));
        state
            .groups
            .add(GameObject::Bullet(Bullet::new(Vec2::new(200.0, 200.0), 0.0, 0.0)));

        tick(&mut state, &input(Keys::default(), 0.0));

        assert_eq!(state.score, 20);
        assert!(state.groups.is_empty(Group::Bullets));
        let radii: Vec<f32> = state
            .groups
            .get(Group::Asteroids)
            .iter()
            .map(|a| a.radius())
            .collect();
        assert_eq!(radii, vec![25.0, 25.0]);
        assert!(state.groups.len(Group::Particles) >= 50);
        assert!(state.drain_events().contains(&GameEvent::AsteroidDestroyed {
            radius: 50.0,
            points: 20,
        }));
    }

    /// Two small asteroids stacked on one spot
    fn stack_small_asteroids(state: &mut GameState, position: Vec2) {
        state.groups.get_mut(Group::Asteroids).clear();
        for _ in 0..2 {
            let asteroid = Asteroid::new(position, Some(8.0), Some(Vec2::ZERO), &mut state.rng);
            state.groups.add(GameObject::Asteroid(asteroid));
        }
    }

    #[test]
    fn test_bullet_destroys_every_overlapping_asteroid() {
        let mut state = new_game(6);
        stack_small_asteroids(&mut state, Vec2::new(200.0, 200.0));
        state
            .groups
            .add(GameObject::Bullet(Bullet::new(Vec2::new(200.0, 200.0), 0.0, 0.0)));

        tick(&mut state, &input(Keys::default(), 0.0));

        assert!(state.groups.is_empty(Group::Asteroids));
        assert!(state.groups.is_empty(Group::Bullets));
        assert_eq!(state.score, 250);
        let destroyed = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::AsteroidDestroyed { points: 125, .. }))
            .count();
        assert_eq!(destroyed, 2);
    }

    #[test]
    fn test_ship_destroys_every_overlapping_asteroid() {
        let mut state = new_game(14);
        let ship_pos = state.groups.get(Group::Ship)[0].position();
        stack_small_asteroids(&mut state, ship_pos);

        tick(&mut state, &input(Keys::default(), 0.0));

        assert!(state.groups.is_empty(Group::Asteroids));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 250);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::GameOver { score: 250 })
        );
    }

    #[test]
    fn test_ship_collision_ends_game() {
        let mut state = new_game(7);
        state.groups.get_mut(Group::Asteroids).clear();
        let ship_pos = state.groups.get(Group::Ship)[0].position();
        let asteroid = Asteroid::new(ship_pos, Some(40.0), Some(Vec2::ZERO), &mut state.rng);
        state.groups.add(GameObject::Asteroid(asteroid));

        tick(&mut state, &input(Keys::default(), 0.0));

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.groups.is_empty(Group::Ship));
        // The ship is still in its group when the asteroid it rammed pays out
        assert_eq!(state.score, 25);
        assert_eq!(state.groups.len(Group::Asteroids), 2);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::GameOver { score: 25 })
        );
    }

    #[test]
    fn test_no_score_after_ship_is_gone() {
        let mut state = new_game(8);
        state.groups.get_mut(Group::Ship).clear();
        state.phase = GamePhase::GameOver;
        state.drain_events();
        destroy_all_asteroids(&mut state);
        assert_eq!(state.score, 0);

        let events = state.drain_events();
        assert!(!events.is_empty());
        assert!(events.iter().all(|e| matches!(
            e,
            GameEvent::AsteroidDestroyed { points: 0, .. }
        )));
    }

    #[test]
    fn test_game_over_keeps_debris_moving() {
        let mut state = new_game(9);
        state.groups.get_mut(Group::Ship).clear();
        state.phase = GamePhase::GameOver;
        let before: Vec<Vec2> = state
            .groups
            .get(Group::Asteroids)
            .iter()
            .map(|a| a.position())
            .collect();
        tick(&mut state, &input(Keys::default(), 0.0));
        let after: Vec<Vec2> = state
            .groups
            .get(Group::Asteroids)
            .iter()
            .map(|a| a.position())
            .collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = new_game(10);
        state.score = 300;
        state.phase = GamePhase::GameOver;
        assert!(state.start());
        assert_eq!(state.score, 0);
        assert_eq!(state.groups.len(Group::Ship), 1);
        assert_eq!(state.groups.len(Group::Asteroids), INITIAL_ASTEROIDS);
        assert!(state.groups.is_empty(Group::Bullets));
        assert!(state.groups.is_empty(Group::Particles));
    }

    #[test]
    fn test_deleted_objects_purged_next_frame() {
        let mut state = new_game(11);
        state.groups.get_mut(Group::Asteroids).clear();
        state.groups.add(GameObject::Particle(Particle::new(
            Vec2::new(10.0, 10.0),
            Vec2::ZERO,
            1.0,
            0,
        )));

        // Expires during its own update, removed on the following pass
        tick(&mut state, &input(Keys::default(), 0.0));
        assert_eq!(state.groups.len(Group::Particles), 1);
        assert!(state.groups.get(Group::Particles)[0].is_deleted());

        tick(&mut state, &input(Keys::default(), 0.0));
        assert!(state.groups.is_empty(Group::Particles));
    }

    #[test]
    fn test_cascade_score_independent_of_randomness() {
        // 80 -> 13, 40 -> 25, 20 -> 50, 10 -> 100 (no further split)
        let expected = 13 + 2 * 25 + 4 * 50 + 8 * 100;
        for seed in 0..10 {
            let mut state = new_game(seed);
            state.groups.get_mut(Group::Asteroids).clear();
            let asteroid = Asteroid::new(
                Vec2::new(100.0, 100.0),
                Some(80.0),
                None,
                &mut state.rng,
            );
            state.groups.add(GameObject::Asteroid(asteroid));
            destroy_all_asteroids(&mut state);
            assert_eq!(state.score, expected);
        }
    }

    #[test]
    fn test_cascade_score_through_bullets() {
        let expected = 13 + 2 * 25 + 4 * 50 + 8 * 100;
        for seed in 0..5 {
            let mut state = new_game(seed);
            state.groups.get_mut(Group::Asteroids).clear();
            if let GameObject::Ship(ship) = &mut state.groups.get_mut(Group::Ship)[0] {
                ship.position = Vec2::new(1000.0, 740.0);
            }
            let asteroid = Asteroid::new(
                Vec2::new(200.0, 200.0),
                Some(80.0),
                None,
                &mut state.rng,
            );
            state.groups.add(GameObject::Asteroid(asteroid));

            // Every frame, drop a bullet on each asteroid still in play
            for frame in 0..20 {
                if state.groups.is_empty(Group::Asteroids) {
                    break;
                }
                let targets: Vec<Vec2> = state
                    .groups
                    .get(Group::Asteroids)
                    .iter()
                    .map(|a| a.position())
                    .collect();
                for target in targets {
                    state
                        .groups
                        .add(GameObject::Bullet(Bullet::new(target, 0.0, 0.0)));
                }
                tick(&mut state, &input(Keys::default(), frame as f64));
            }

            assert!(state.groups.is_empty(Group::Asteroids));
            assert_eq!(state.phase, GamePhase::Playing);
            assert_eq!(state.score, expected);
        }
    }

    #[test]
    fn test_direction_normalized_over_many_frames() {
        let mut state = new_game(12);
        state.groups.get_mut(Group::Asteroids).clear();
        let turn = Keys {
            left: true,
            ..Default::default()
        };
        for frame in 0..500 {
            tick(&mut state, &input(turn, frame as f64));
            let ship = state.groups.ship().unwrap();
            assert!((0.0..360.0).contains(&ship.direction));
        }
    }

    #[test]
    fn test_viewport_follows_input() {
        let mut state = new_game(13);
        let resized = TickInput {
            viewport: Viewport::new(640.0, 480.0),
            ..Default::default()
        };
        tick(&mut state, &resized);
        assert_eq!(state.viewport, Viewport::new(640.0, 480.0));
    }
}
