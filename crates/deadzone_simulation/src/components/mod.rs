//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: damageable участники (Actor, Health, BodyHeight)
//! - collision: AABB коллайдеры для ray-cast (Collider, StaticGeometry)
//! - player: player control marker (Player)

pub mod actor;
pub mod collision;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use collision::*;
pub use player::*;
