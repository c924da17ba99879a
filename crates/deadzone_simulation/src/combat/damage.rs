//! Combat resolver: falloff, headshot, apply_damage
//!
//! Чистые функции (base damage + spatial context → final damage).
//! Единственная мутация: финальный `Health::take_damage` внутри `apply_damage`.
//!
//! Формулы:
//! - falloff: distance ≤ start → ×1.0, distance ≥ end → ×min_multiplier,
//!   между ними линейная интерполяция множителя
//! - headshot: (hit.y - target.y) > height × threshold → ×headshot_multiplier
//!
//! Все константы: из `CombatTuning` (GameConfig), не литералы.

use bevy::prelude::*;

use crate::components::{DamageOutcome, Health};
use crate::config::CombatTuning;

/// Событие: урон нанесён
///
/// Генерируется после применения damage к Health.
/// `health_fraction`: для health bar / damage flash (presentation).
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub damage: u32,
    pub headshot: bool,
    pub target_died: bool,
    pub health_fraction: f32,
}

/// Событие: entity умер (death hook)
///
/// Генерируется ровно один раз на entity: `DamageOutcome::Killed` бывает один раз.
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Событие: запрос лечения (аптечки, скрипты)
#[derive(Event, Debug, Clone)]
pub struct HealRequest {
    pub target: Entity,
    pub amount: u32,
}

/// Событие: лечение применено (heal hook), `amount` = реальная дельта
#[derive(Event, Debug, Clone)]
pub struct Healed {
    pub entity: Entity,
    pub amount: u32,
}

/// Компонент-маркер: entity мертв
///
/// Используется для визуальных эффектов (death animation, fade-out).
/// Деспавн: через `DelayedEffect::Despawn` после косметической задержки.
#[derive(Component, Debug)]
pub struct Dead;

/// Damageable цель для `apply_damage`
///
/// `world_position`: "ноги" цели; `height` нужен только для headshot.
pub struct DamageTarget<'a> {
    pub health: &'a mut Health,
    pub world_position: Vec3,
    pub height: Option<f32>,
}

/// Итог одного `apply_damage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageReport {
    /// Финальный целочисленный урон (после falloff/headshot, truncation)
    pub damage: u32,
    pub headshot: bool,
    pub outcome: DamageOutcome,
}

impl DamageReport {
    /// Цель не damageable: ничего не произошло
    pub const NONE: DamageReport = DamageReport {
        damage: 0,
        headshot: false,
        outcome: DamageOutcome::Ignored,
    };
}

/// Distance falloff
///
/// Монотонно не возрастает по distance, непрерывна на обеих границах.
pub fn calculate_falloff(tuning: &CombatTuning, base_damage: f32, source_pos: Vec3, target_pos: Vec3) -> f32 {
    let distance = source_pos.distance(target_pos);

    if distance <= tuning.falloff_start {
        return base_damage;
    }

    if distance >= tuning.falloff_end {
        return base_damage * tuning.min_multiplier;
    }

    let falloff_range = tuning.falloff_end - tuning.falloff_start;
    let progress = (distance - tuning.falloff_start) / falloff_range;
    let multiplier = 1.0 - progress * (1.0 - tuning.min_multiplier);

    base_damage * multiplier
}

/// Headshot bonus (верхние 30% высоты цели при threshold = 0.7)
///
/// Граница exclusive: hit_height == height × threshold не headshot.
pub fn calculate_headshot(
    tuning: &CombatTuning,
    damage: f32,
    hit_position: Vec3,
    target_world_position: Vec3,
    target_height: f32,
) -> f32 {
    if is_headshot(tuning, hit_position, target_world_position, target_height) {
        damage * tuning.headshot_multiplier
    } else {
        damage
    }
}

pub fn is_headshot(tuning: &CombatTuning, hit_position: Vec3, target_world_position: Vec3, target_height: f32) -> bool {
    let hit_height = hit_position.y - target_world_position.y;
    hit_height > target_height * tuning.headshot_threshold
}

/// Применить урон к цели
///
/// 1. falloff: только если известна позиция источника
/// 2. headshot: только если есть hit_position и высота цели
/// 3. truncation к целому (отрицательное → 0)
/// 4. `Health::take_damage`
///
/// `target == None` (не damageable) → `DamageReport::NONE`, без мутаций.
/// Precondition: `base_damage ≥ 0`.
pub fn apply_damage(
    tuning: &CombatTuning,
    target: Option<DamageTarget<'_>>,
    base_damage: f32,
    source_position: Option<Vec3>,
    hit_position: Option<Vec3>,
) -> DamageReport {
    let Some(target) = target else {
        return DamageReport::NONE;
    };

    let mut final_damage = base_damage;

    if let Some(source_pos) = source_position {
        final_damage = calculate_falloff(tuning, final_damage, source_pos, target.world_position);
    }

    let mut headshot = false;
    if let (Some(hit_pos), Some(height)) = (hit_position, target.height) {
        headshot = is_headshot(tuning, hit_pos, target.world_position, height);
        final_damage = calculate_headshot(tuning, final_damage, hit_pos, target.world_position, height);
    }

    // `as u32`: truncation + saturation (NaN/negative → 0)
    let damage = final_damage as u32;
    let outcome = target.health.take_damage(damage);

    DamageReport {
        damage,
        headshot,
        outcome,
    }
}

/// Разослать notification events по итогу `apply_damage`
///
/// Ignored (мёртвая цель): ничего не отправляем.
pub fn publish_damage(
    report: &DamageReport,
    attacker: Option<Entity>,
    target: Entity,
    health_fraction: f32,
    dealt: &mut EventWriter<DamageDealt>,
    died: &mut EventWriter<EntityDied>,
) {
    if report.outcome == DamageOutcome::Ignored {
        return;
    }

    dealt.write(DamageDealt {
        attacker,
        target,
        damage: report.damage,
        headshot: report.headshot,
        target_died: report.outcome.is_kill(),
        health_fraction,
    });

    if report.outcome.is_kill() {
        died.write(EntityDied {
            entity: target,
            killer: attacker,
        });
    }
}
