//! Player controller (thin): input → Loadout → hitscan
//!
//! Movement/камера: presentation layer. Здесь только то, что влияет
//! на симуляцию: команды оружия, стрельба, окно неуязвимости.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;


pub use components::*;
pub use events::{PlayerCommand, PlayerDamaged};
pub use systems::{player_fire_weapon, process_player_commands, tick_damage_cooldowns};

use crate::combat::tick_loadouts;
use crate::scheduler::SimulationSet;

/// Player Plugin
///
/// Порядок в фазе `SimulationSet::Player`:
/// tick_loadouts → tick_damage_cooldowns → process_player_commands → player_fire_weapon
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<DamageCooldown>()
            .add_event::<PlayerCommand>()
            .add_event::<PlayerDamaged>()
            .add_systems(
                FixedUpdate,
                (tick_damage_cooldowns, process_player_commands, player_fire_weapon)
                    .chain()
                    .after(tick_loadouts)
                    .in_set(SimulationSet::Player),
            );
    }
}
