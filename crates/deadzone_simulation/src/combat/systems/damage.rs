//! Heal requests + death handling.

use bevy::prelude::*;

use crate::ai::{AIState, AIStateChanged, DeathEffect, EnemyAgent, EnemyKilled};
use crate::combat::{Dead, EntityDied, HealRequest, Healed};
use crate::components::{Collider, Health};
use crate::config::GameConfig;
use crate::scheduler::{DelayedEffect, DelayedEffects, SimClock};

/// Система: применить HealRequest через `Health::heal`
///
/// Healed (heal hook) несёт реальную дельту. Мёртвая или несуществующая цель: no-op.
pub fn apply_heal_requests(
    mut requests: EventReader<HealRequest>,
    mut targets: Query<&mut Health>,
    mut healed: EventWriter<Healed>,
) {
    for request in requests.read() {
        let Ok(mut health) = targets.get_mut(request.target) else {
            continue;
        };

        if !health.is_alive() {
            continue;
        }

        let amount = health.heal(request.amount);
        healed.write(Healed {
            entity: request.target,
            amount,
        });
    }
}

type DyingQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Transform,
        Option<&'static EnemyAgent>,
        Option<&'static mut AIState>,
        Option<&'static mut Collider>,
    ),
>;

/// Система: обработка смерти (EntityDied)
///
/// Для любого актора:
/// - маркер `Dead`, коллайдер выключен, DeathEffect
///
/// Для врага дополнительно:
/// - AIState = Dead (+ AIStateChanged, если AI ещё не перевёл), EnemyKilled (score)
/// - деспавн через `corpse_removal_delay` (DelayedEffect::Despawn)
///
/// Игрок не удаляется: сессия переходит в GameOver (`track_player_death`).
pub fn handle_deaths(
    mut commands: Commands,
    mut died: EventReader<EntityDied>,
    config: Res<GameConfig>,
    clock: Res<SimClock>,
    mut effects: ResMut<DelayedEffects>,
    mut dying: DyingQuery,
    mut death_effects: EventWriter<DeathEffect>,
    mut killed: EventWriter<EnemyKilled>,
    mut state_changed: EventWriter<AIStateChanged>,
) {
    for event in died.read() {
        let Ok((transform, agent, state, collider)) = dying.get_mut(event.entity) else {
            continue;
        };

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Dead);
        }

        if let Some(mut collider) = collider {
            collider.enabled = false;
        }

        death_effects.write(DeathEffect {
            entity: event.entity,
            position: transform.translation,
        });

        let Some(agent) = agent else {
            crate::logger::log(&format!("💀 {:?} died (killer: {:?})", event.entity, event.killer));
            continue;
        };

        if let Some(mut state) = state {
            if !state.is_dead() {
                state_changed.write(AIStateChanged {
                    entity: event.entity,
                    kind: agent.kind,
                    from: *state,
                    to: AIState::Dead,
                });
                *state = AIState::Dead;
            }
        }

        killed.write(EnemyKilled {
            enemy: event.entity,
            kind: agent.kind,
            killer: event.killer,
        });

        effects.schedule(
            &clock,
            event.entity,
            config.session.corpse_removal_delay,
            DelayedEffect::Despawn,
        );

        crate::logger::log_info(&format!(
            "💀 {} {:?} killed by {:?}, despawn in {:.2}s",
            agent.kind.name(),
            event.entity,
            event.killer,
            config.session.corpse_removal_delay
        ));
    }
}
