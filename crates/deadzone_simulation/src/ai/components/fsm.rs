//! Enemy AI FSM: Idle → Chase → Attack, терминальный Dead.
//!
//! Логика переходов и шаги поведения: чистые функции (distance, dt на входе),
//! система `enemy_ai_update` только собирает контекст из ECS.

use bevy::prelude::*;

use crate::components::Actor;
use crate::config::EnemyProfile;

/// Закрытый набор типов врагов (behavior table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum EnemyKind {
    Zombie,
    Demon,
    Imp,
}

/// Как враг атакует
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackStyle {
    /// Удар вблизи: при исполнении цель всё ещё в attack_range
    Melee,
    /// Выстрел: при исполнении цель в attack_range И в line of sight
    Ranged,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Zombie, EnemyKind::Demon, EnemyKind::Imp];

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Zombie => "zombie",
            EnemyKind::Demon => "demon",
            EnemyKind::Imp => "imp",
        }
    }

    pub fn attack_style(&self) -> AttackStyle {
        match self {
            EnemyKind::Zombie | EnemyKind::Demon => AttackStyle::Melee,
            EnemyKind::Imp => AttackStyle::Ranged,
        }
    }
}

/// AI FSM состояния
///
/// Инвариант: Dead ⇔ !Health::is_alive. Из Dead переходов нет.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum AIState {
    /// Нет цели или цель дальше detection_range
    #[default]
    Idle,
    /// Движение к цели
    Chase,
    /// Цель в attack_range, атака по cooldown
    Attack,
    /// Терминальное
    Dead,
}

impl AIState {
    pub fn is_dead(&self) -> bool {
        matches!(self, AIState::Dead)
    }
}

/// Враг: тип + профиль + runtime AI state
///
/// `target`: handle (не владеющая ссылка). Удалённая или мёртвая цель
/// = "нет цели" → Idle.
#[derive(Component, Debug, Clone)]
#[require(Actor, AIState)]
pub struct EnemyAgent {
    pub kind: EnemyKind,
    pub profile: EnemyProfile,
    pub target: Option<Entity>,
    pub time_since_last_attack: f32,
}

impl EnemyAgent {
    /// Первая атака доступна сразу после входа в Attack
    pub fn new(kind: EnemyKind, profile: EnemyProfile) -> Self {
        Self {
            kind,
            time_since_last_attack: profile.attack_cooldown,
            profile,
            target: None,
        }
    }

    pub fn with_target(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    /// Attack behavior: накопить dt, true если пора атаковать (счётчик сброшен)
    pub fn tick_attack(&mut self, delta: f32) -> bool {
        self.time_since_last_attack += delta;

        if self.time_since_last_attack < self.profile.attack_cooldown {
            return false;
        }

        self.time_since_last_attack = 0.0;
        true
    }
}

/// Правило переходов (для живого агента)
///
/// `target_distance == None`: нет валидной цели.
pub fn decide_state(profile: &EnemyProfile, target_distance: Option<f32>) -> AIState {
    let Some(distance) = target_distance else {
        return AIState::Idle;
    };

    if distance > profile.detection_range {
        AIState::Idle
    } else if distance <= profile.attack_range {
        AIState::Attack
    } else {
        AIState::Chase
    }
}

/// Chase step: сдвиг к горизонтальной проекции цели на `speed × dt`
///
/// Вертикаль исключена и из направления, и из поворота.
/// Возвращает новую позицию и facing (None если цель строго над/под агентом).
pub fn chase_step(position: Vec3, target: Vec3, speed: f32, delta: f32) -> (Vec3, Option<Quat>) {
    let offset = Vec3::new(target.x - position.x, 0.0, target.z - position.z);
    let distance = offset.length();

    if distance <= f32::EPSILON {
        return (position, None);
    }

    let direction = offset / distance;
    let step = (speed * delta).min(distance);

    (position + direction * step, Some(facing(direction)))
}

/// Yaw-only поворот, -Z смотрит вдоль `direction`
pub fn facing(direction: Vec3) -> Quat {
    Quat::from_rotation_y(f32::atan2(-direction.x, -direction.z))
}
