//! Enemy AI module
//!
//! FSM: Idle → Chase → Attack, терминальный Dead.
//! Варианты врагов: закрытый enum `EnemyKind` (профиль из GameConfig + AttackStyle).

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::{AIStateChanged, DeathEffect, EnemyKilled};
pub use systems::enemy_ai_update;

use crate::scheduler::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI события и `enemy_ai_update` в FixedUpdate (фаза `SimulationSet::Ai`).
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<AIState>()
            .add_event::<AIStateChanged>()
            .add_event::<EnemyKilled>()
            .add_event::<DeathEffect>()
            .add_systems(FixedUpdate, enemy_ai_update.in_set(SimulationSet::Ai));
    }
}
