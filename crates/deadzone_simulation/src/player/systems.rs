//! Player systems: damage cooldown, discrete commands, стрельба.

use bevy::prelude::*;

use crate::combat::{
    apply_damage, publish_damage, trace_shots, DamageDealt, DamageTarget, Dead, EntityDied, HitConfirmed, Loadout,
    MuzzleFlash, MuzzleFlashed, ReloadOutcome, WeaponReloaded,
};
use crate::components::{BodyHeight, DamageOutcome, Health, Player};
use crate::config::GameConfig;
use crate::geometry::CollisionWorld;
use crate::player::{resolve_aim, AimRay, DamageCooldown, PlayerCommand, PlayerInput};
use crate::scheduler::{DelayedEffect, DelayedEffects, SimClock};
use crate::DeterministicRng;

/// Система: тик окна неуязвимости
pub fn tick_damage_cooldowns(time: Res<Time<Fixed>>, mut cooldowns: Query<&mut DamageCooldown>) {
    let delta = time.delta_secs();

    for mut cooldown in cooldowns.iter_mut() {
        if cooldown.is_active() {
            cooldown.tick(delta);
        }
    }
}

/// Система: PlayerCommand → Loadout (reload, смена оружия)
///
/// Мёртвый игрок команды не принимает.
pub fn process_player_commands(
    mut commands: EventReader<PlayerCommand>,
    mut players: Query<(Entity, &mut Loadout), (With<Player>, Without<Dead>)>,
    mut reloaded: EventWriter<WeaponReloaded>,
) {
    for command in commands.read() {
        for (entity, mut loadout) in players.iter_mut() {
            match *command {
                PlayerCommand::Reload => {
                    let Some(weapon) = loadout.current_mut() else {
                        continue;
                    };

                    match weapon.reload() {
                        ReloadOutcome::Completed => {
                            reloaded.write(WeaponReloaded {
                                owner: entity,
                                weapon: weapon.kind(),
                                ammo: weapon.ammo(),
                            });
                        }
                        ReloadOutcome::Started => {
                            crate::logger::log(&format!("🔄 {} reload started", weapon.kind().name()));
                        }
                        ReloadOutcome::Rejected => {}
                    }
                }
                PlayerCommand::SwitchWeapon(index) => {
                    loadout.switch_to(index);
                }
                PlayerCommand::NextWeapon => {
                    loadout.next();
                }
                PlayerCommand::PreviousWeapon => {
                    loadout.previous();
                }
            }
        }
    }
}

type ShooterQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Transform,
        &'static PlayerInput,
        &'static mut Loadout,
        Option<&'static AimRay>,
        Option<&'static mut MuzzleFlash>,
    ),
    (With<Player>, Without<Dead>),
>;

type ShotTargetQuery<'w, 's> =
    Query<'w, 's, (&'static Transform, &'static mut Health, Option<&'static BodyHeight>), Without<Player>>;

/// Система: стрельба игрока (hitscan)
///
/// fire_held → `Weapon::try_fire` (gate) → лучи (pistol: 1, shotgun: pellets)
/// → `apply_damage` для каждого луча, попавшего в damageable цель.
/// Источник falloff = позиция игрока, hit point = точка попадания луча.
pub fn player_fire_weapon(
    config: Res<GameConfig>,
    clock: Res<SimClock>,
    collision: Res<CollisionWorld>,
    mut rng: ResMut<DeterministicRng>,
    mut effects: ResMut<DelayedEffects>,
    mut shooters: ShooterQuery,
    mut targets: ShotTargetQuery,
    mut hit_confirmed: EventWriter<HitConfirmed>,
    mut muzzle_flashed: EventWriter<MuzzleFlashed>,
    mut dealt: EventWriter<DamageDealt>,
    mut died: EventWriter<EntityDied>,
) {
    for (shooter, transform, input, mut loadout, aim_ray, muzzle_flash) in shooters.iter_mut() {
        if !input.fire_held {
            continue;
        }

        let Some(weapon) = loadout.current_mut() else {
            continue;
        };

        if !weapon.try_fire() {
            continue;
        }

        let aim = resolve_aim(transform, aim_ray, config.player.aim_height);
        let directions = weapon.shot_directions(aim.direction, config.combat.hitscan_spread, &mut rng.rng);
        let traces = trace_shots(&*collision, shooter, aim.origin, &directions, weapon.profile().range);
        let base_damage = weapon.profile().damage;

        if let Some(mut flash) = muzzle_flash {
            flash.visible = true;
            effects.schedule(
                &clock,
                shooter,
                config.session.muzzle_flash_duration,
                DelayedEffect::HideMuzzleFlash,
            );
        }
        muzzle_flashed.write(MuzzleFlashed {
            shooter,
            weapon: weapon.kind(),
        });

        for hit in traces.iter().filter_map(|trace| trace.hit) {
            let Ok((target_transform, mut health, height)) = targets.get_mut(hit.entity) else {
                continue;
            };

            let report = apply_damage(
                &config.combat,
                Some(DamageTarget {
                    health: &mut health,
                    world_position: target_transform.translation,
                    height: height.map(|height| height.0),
                }),
                base_damage,
                Some(transform.translation),
                Some(hit.point),
            );

            // Труп в этом же выстреле (коллайдер выключится к следующему тику)
            if report.outcome == DamageOutcome::Ignored {
                continue;
            }

            publish_damage(&report, Some(shooter), hit.entity, health.percentage(), &mut dealt, &mut died);

            hit_confirmed.write(HitConfirmed {
                shooter,
                target: hit.entity,
                damage: report.damage,
                headshot: report.headshot,
            });

            crate::logger::log(&format!(
                "🎯 {} hit {:?} for {}{} (hp {}/{})",
                weapon.kind().name(),
                hit.entity,
                report.damage,
                if report.headshot { " HEADSHOT" } else { "" },
                health.current(),
                health.max()
            ));
        }
    }
}
