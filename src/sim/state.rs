//! Game state and core simulation types
//!
//! The session object, its four object groups, and the per-frame input
//! snapshot all live here.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::asteroid::Asteroid;
use super::bullet::Bullet;
use super::particle::Particle;
use super::ship::Ship;
use crate::settings::Settings;

/// Current playfield bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Wrap a position that crossed an edge back to the opposite edge
    ///
    /// Leaving past the right/bottom edge lands exactly on 0, leaving past
    /// the left/top edge lands exactly on width/height.
    pub fn wrap(&self, mut pos: Vec2) -> Vec2 {
        if pos.x > self.width {
            pos.x = 0.0;
        } else if pos.x < 0.0 {
            pos.x = self.width;
        }
        if pos.y > self.height {
            pos.y = 0.0;
        } else if pos.y < 0.0 {
            pos.y = self.height;
        }
        pos
    }

    /// Inclusive bounds check
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Currently held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keys {
    pub up: bool,
    /// Tracked for completeness; nothing reads it
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub space: bool,
}

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub keys: Keys,
    pub viewport: Viewport,
    /// Wall-clock time in milliseconds (drives the fire-rate limiter)
    pub now_ms: f64,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Nothing started yet (title screen)
    Idle,
    /// Ship alive, frames advancing
    Playing,
    /// Ship destroyed; debris keeps drifting until the next start
    GameOver,
}

/// Named object collections, processed in declaration order every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Ship,
    Bullets,
    Asteroids,
    Particles,
}

impl Group {
    pub const ALL: [Group; 4] = [Group::Ship, Group::Bullets, Group::Asteroids, Group::Particles];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Group::Ship => "ship",
            Group::Bullets => "bullets",
            Group::Asteroids => "asteroids",
            Group::Particles => "particles",
        }
    }
}

/// Work an entity asks the manager to do on its behalf
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SpawnBullet(Bullet),
    SpawnParticle(Particle),
    SpawnAsteroid(Asteroid),
    /// Add to the session score (ignored once the ship is gone)
    AwardScore(u32),
    /// The ship was destroyed; the session is over
    ShipDestroyed,
}

/// Notifications for the host page, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    ShotFired,
    /// `points` is what was actually awarded: 0 once the ship is gone
    AsteroidDestroyed { radius: f32, points: u32 },
    GameOver { score: u64 },
}

/// Any entity living in a group
#[derive(Debug, Clone, PartialEq)]
pub enum GameObject {
    Ship(Ship),
    Bullet(Bullet),
    Asteroid(Asteroid),
    Particle(Particle),
}

impl GameObject {
    pub fn position(&self) -> Vec2 {
        match self {
            GameObject::Ship(s) => s.position,
            GameObject::Bullet(b) => b.position,
            GameObject::Asteroid(a) => a.position,
            GameObject::Particle(p) => p.position,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            GameObject::Ship(s) => s.radius,
            GameObject::Bullet(b) => b.radius,
            GameObject::Asteroid(a) => a.radius,
            GameObject::Particle(p) => p.radius,
        }
    }

    pub fn is_deleted(&self) -> bool {
        match self {
            GameObject::Ship(s) => s.is_deleted(),
            GameObject::Bullet(b) => b.is_deleted(),
            GameObject::Asteroid(a) => a.is_deleted(),
            GameObject::Particle(p) => p.is_deleted(),
        }
    }

    /// The group this object belongs in
    pub fn group(&self) -> Group {
        match self {
            GameObject::Ship(_) => Group::Ship,
            GameObject::Bullet(_) => Group::Bullets,
            GameObject::Asteroid(_) => Group::Asteroids,
            GameObject::Particle(_) => Group::Particles,
        }
    }

    /// Groups this object actively checks for collisions against
    ///
    /// Asteroids declare nothing: they are hit by ships and bullets, so each
    /// pair is only examined once.
    pub fn collides_with(&self) -> &'static [Group] {
        match self {
            GameObject::Ship(_) | GameObject::Bullet(_) => &[Group::Asteroids],
            GameObject::Asteroid(_) | GameObject::Particle(_) => &[],
        }
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        input: &TickInput,
        rng: &mut R,
        effects: &mut Vec<Effect>,
    ) {
        match self {
            GameObject::Ship(s) => s.update(input, rng, effects),
            GameObject::Bullet(b) => b.update(&input.viewport),
            GameObject::Asteroid(a) => a.update(&input.viewport),
            GameObject::Particle(p) => p.update(),
        }
    }

    /// Mark for deletion, emitting any destruction effects (idempotent)
    pub fn delete<R: Rng + ?Sized>(&mut self, rng: &mut R, effects: &mut Vec<Effect>) {
        match self {
            GameObject::Ship(s) => s.delete(rng, effects),
            GameObject::Bullet(b) => b.delete(),
            GameObject::Asteroid(a) => a.delete(rng, effects),
            GameObject::Particle(p) => p.delete(),
        }
    }
}

/// The four object groups
#[derive(Debug, Clone, Default)]
pub struct Groups {
    lists: [Vec<GameObject>; 4],
}

impl Groups {
    pub fn get(&self, group: Group) -> &[GameObject] {
        &self.lists[group.index()]
    }

    pub fn get_mut(&mut self, group: Group) -> &mut Vec<GameObject> {
        &mut self.lists[group.index()]
    }

    /// Add an object to the group matching its kind
    pub fn add(&mut self, object: GameObject) {
        self.lists[object.group().index()].push(object);
    }

    pub fn len(&self, group: Group) -> usize {
        self.lists[group.index()].len()
    }

    pub fn is_empty(&self, group: Group) -> bool {
        self.lists[group.index()].is_empty()
    }

    pub fn clear(&mut self) {
        for list in &mut self.lists {
            list.clear();
        }
    }

    /// Objects not marked for deletion, in group order
    pub fn live(&self) -> impl Iterator<Item = &GameObject> {
        self.lists.iter().flatten().filter(|o| !o.is_deleted())
    }

    /// The ship, if it is still in play
    pub fn ship(&self) -> Option<&Ship> {
        self.get(Group::Ship).iter().find_map(|o| match o {
            GameObject::Ship(s) => Some(s),
            _ => None,
        })
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session RNG was created from
    pub seed: u64,
    pub settings: Settings,
    pub phase: GamePhase,
    pub score: u64,
    pub viewport: Viewport,
    pub groups: Groups,
    /// Simulation frame counter (reset on start)
    pub frame: u64,
    /// Pending notifications for the host
    pub events: Vec<GameEvent>,
    pub(super) rng: Pcg32,
}

impl GameState {
    /// Create an idle session; call `start` to begin playing
    pub fn new(seed: u64, settings: Settings, viewport: Viewport) -> Self {
        let seed = settings.seed.unwrap_or(seed);
        Self {
            seed,
            settings,
            phase: GamePhase::Idle,
            score: 0,
            viewport,
            groups: Groups::default(),
            frame: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Score only counts while the ship is still in its group
    pub fn add_to_score(&mut self, value: u32) {
        if !self.groups.is_empty(Group::Ship) {
            self.score += u64::from(value);
        }
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
