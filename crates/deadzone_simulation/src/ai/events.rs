//! AI Events: notification hooks врагов
//!
//! Fire-and-forget: отсутствие reader'а не влияет на симуляцию.
//! Presentation layer (анимации, звук, HUD) подписывается на них.

use bevy::prelude::*;

use super::components::{AIState, EnemyKind};

/// Enter hook: враг сменил состояние FSM
///
/// Отправляется ДО выполнения поведения нового состояния на этом тике.
/// Только для анимаций/звука, AI логики в подписчиках нет.
#[derive(Event, Debug, Clone)]
pub struct AIStateChanged {
    pub entity: Entity,
    pub kind: EnemyKind,
    pub from: AIState,
    pub to: AIState,
}

/// Враг убит (score / kill counter)
#[derive(Event, Debug, Clone)]
pub struct EnemyKilled {
    pub enemy: Entity,
    pub kind: EnemyKind,
    pub killer: Option<Entity>,
}

/// Death effect trigger (звук смерти, scale-down анимация)
#[derive(Event, Debug, Clone)]
pub struct DeathEffect {
    pub entity: Entity,
    pub position: Vec3,
}
