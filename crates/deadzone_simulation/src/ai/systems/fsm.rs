//! Enemy AI system: переходы FSM + поведение состояний + атака.

use bevy::prelude::*;

use crate::ai::{chase_step, decide_state, AIState, AIStateChanged, AttackStyle, EnemyAgent};
use crate::combat::{apply_damage, is_line_of_sight, publish_damage, DamageDealt, DamageTarget, EntityDied, SightPoint};
use crate::components::{BodyHeight, DamageOutcome, Health, Player};
use crate::config::GameConfig;
use crate::geometry::CollisionWorld;
use crate::player::{DamageCooldown, PlayerDamaged};

/// Цели врагов (игрок). Враги не атакуют врагов.
type TargetQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Transform,
        &'static mut Health,
        Option<&'static BodyHeight>,
        Option<&'static mut DamageCooldown>,
        Has<Player>,
    ),
    Without<EnemyAgent>,
>;

/// Система: один тик AI для каждого врага
///
/// Порядок на entity: переход → enter hook (AIStateChanged) → поведение состояния.
/// Следующий враг обрабатывается только после полного завершения предыдущего
/// (включая применение урона), порядок: по Entity.
pub fn enemy_ai_update(
    time: Res<Time<Fixed>>,
    config: Res<GameConfig>,
    collision: Res<CollisionWorld>,
    mut enemies: Query<(Entity, &mut EnemyAgent, &mut AIState, &mut Transform, &Health)>,
    mut targets: TargetQuery,
    mut state_changed: EventWriter<AIStateChanged>,
    mut dealt: EventWriter<DamageDealt>,
    mut died: EventWriter<EntityDied>,
    mut player_damaged: EventWriter<PlayerDamaged>,
) {
    let delta = time.delta_secs();

    let mut order: Vec<Entity> = enemies.iter().map(|(entity, ..)| entity).collect();
    order.sort();

    for enemy in order {
        let Ok((entity, mut agent, mut state, mut transform, health)) = enemies.get_mut(enemy) else {
            continue;
        };

        if state.is_dead() {
            continue;
        }

        if !health.is_alive() {
            state_changed.write(AIStateChanged {
                entity,
                kind: agent.kind,
                from: *state,
                to: AIState::Dead,
            });
            *state = AIState::Dead;
            continue;
        }

        // Handle → позиция; удалённая или мёртвая цель = нет цели
        let target = agent.target.and_then(|target| {
            targets
                .get(target)
                .ok()
                .filter(|(_, target_health, ..)| target_health.is_alive())
                .map(|(target_transform, ..)| (target, target_transform.translation))
        });

        let distance = target.map(|(_, position)| transform.translation.distance(position));
        let next = decide_state(&agent.profile, distance);

        if next != *state {
            state_changed.write(AIStateChanged {
                entity,
                kind: agent.kind,
                from: *state,
                to: next,
            });
            *state = next;
        }

        let Some((target_entity, target_position)) = target else {
            continue;
        };

        match next {
            AIState::Chase => {
                let (position, facing) =
                    chase_step(transform.translation, target_position, agent.profile.speed, delta);
                transform.translation = position;
                if let Some(facing) = facing {
                    transform.rotation = facing;
                }
            }
            AIState::Attack => {
                if !agent.tick_attack(delta) {
                    continue;
                }

                let Ok((target_transform, mut target_health, height, mut cooldown, is_player)) =
                    targets.get_mut(target_entity)
                else {
                    continue;
                };
                let target_position = target_transform.translation;
                let source_position = transform.translation;

                // Re-check в момент исполнения
                if source_position.distance(target_position) > agent.profile.attack_range {
                    continue;
                }

                if agent.kind.attack_style() == AttackStyle::Ranged
                    && !is_line_of_sight(
                        &*collision,
                        config.combat.eye_height,
                        SightPoint::new(entity, source_position),
                        SightPoint::new(target_entity, target_position),
                        &[],
                    )
                {
                    continue;
                }

                if cooldown.as_ref().is_some_and(|cooldown| cooldown.is_active()) {
                    continue;
                }

                let report = apply_damage(
                    &config.combat,
                    Some(DamageTarget {
                        health: &mut target_health,
                        world_position: target_position,
                        height: height.map(|height| height.0),
                    }),
                    agent.profile.damage,
                    Some(source_position),
                    None,
                );

                let health_fraction = target_health.percentage();
                publish_damage(&report, Some(entity), target_entity, health_fraction, &mut dealt, &mut died);

                if report.outcome == DamageOutcome::Ignored {
                    continue;
                }

                if let Some(cooldown) = cooldown.as_mut() {
                    cooldown.trigger();
                }

                if is_player {
                    player_damaged.write(PlayerDamaged {
                        source: entity,
                        amount: report.damage,
                        health_fraction,
                    });
                }

                crate::logger::log(&format!(
                    "👊 {} {:?} hit {:?} for {} (hp {:.0}%)",
                    agent.kind.name(),
                    entity,
                    target_entity,
                    report.damage,
                    health_fraction * 100.0
                ));
            }
            AIState::Idle | AIState::Dead => {}
        }
    }
}
