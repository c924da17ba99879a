//! Player control marker component
//!
//! Отмечает entity которым управляет игрок через input (в отличие от AI).

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// # Архитектурная заметка
/// - AI systems используют `Without<Player>` / `Without<EnemyAgent>` фильтры
/// - Player systems используют `With<Player>`
///
/// В single-player только один entity имеет этот компонент
/// (handle хранится в `GameSession::player`).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
