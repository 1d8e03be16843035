//! Frame simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (group order, then insertion order)
//! - Wall-clock time only through `TickInput`
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod bullet;
pub mod collision;
pub mod particle;
pub mod ship;
pub mod state;
pub mod tick;

pub use asteroid::Asteroid;
pub use bullet::Bullet;
pub use collision::{circles_overlap, collision};
pub use particle::{Particle, explosion};
pub use ship::Ship;
pub use state::{
    Effect, GameEvent, GameObject, GamePhase, GameState, Group, Groups, Keys, TickInput, Viewport,
};
pub use tick::tick;
