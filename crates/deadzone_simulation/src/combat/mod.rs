//! Combat module
//!
//! - damage: Combat Resolver (falloff, headshot, apply_damage) + события урона
//! - line_of_sight: LOS поверх `RaycastService`
//! - weapon: Weapon State Machine, Loadout, hitscan трассировка
//! - systems: ECS обёртки (tick, heal, death)
//!
//! Все числа: из `GameConfig::combat` / `GameConfig::weapons`.

use bevy::prelude::*;

pub mod damage;
pub mod line_of_sight;
pub mod systems;
pub mod weapon;

#[cfg(test)]
mod damage_tests;

// Re-export основных типов
pub use damage::{
    apply_damage, calculate_falloff, calculate_headshot, is_headshot, publish_damage, DamageDealt, DamageReport,
    DamageTarget, Dead, EntityDied, HealRequest, Healed,
};
pub use line_of_sight::{is_line_of_sight, SightPoint};
pub use systems::{apply_heal_requests, handle_deaths, tick_loadouts};
pub use weapon::{
    perturb_direction, trace_shots, FirePattern, HitConfirmed, Loadout, MuzzleFlash, MuzzleFlashed, ReloadOutcome,
    ShotTrace, Weapon, WeaponKind, WeaponReloaded, WeaponState,
};

use crate::geometry::{refresh_collision_world, CollisionWorld};
use crate::scheduler::SimulationSet;

/// Combat Plugin
///
/// Регистрирует combat события, CollisionWorld и системы в FixedUpdate:
/// 1. refresh_collision_world (Prepare): snapshot коллайдеров для ray-cast
/// 2. tick_loadouts (Player): cooldown + timed reload
/// 3. apply_heal_requests → handle_deaths (Resolve)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CollisionWorld>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<HealRequest>()
            .add_event::<Healed>()
            .add_event::<HitConfirmed>()
            .add_event::<MuzzleFlashed>()
            .add_event::<WeaponReloaded>();

        app.add_systems(FixedUpdate, refresh_collision_world.in_set(SimulationSet::Prepare))
            .add_systems(FixedUpdate, tick_loadouts.in_set(SimulationSet::Player))
            .add_systems(
                FixedUpdate,
                (apply_heal_requests, handle_deaths)
                    .chain()
                    .in_set(SimulationSet::Resolve),
            );
    }
}
