//! Player events: discrete commands + damage notification.

use bevy::prelude::*;

/// Дискретные команды игрока (клавиши, колесо мыши)
///
/// Применяются ко всем живым `Player` entity (в single-player: один).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Reload,
    /// Индекс в Loadout (0-based); невалидный индекс игнорируется
    SwitchWeapon(usize),
    NextWeapon,
    PreviousWeapon,
}

/// Игрок получил урон от врага (HUD damage indicator)
#[derive(Event, Debug, Clone)]
pub struct PlayerDamaged {
    pub source: Entity,
    pub amount: u32,
    pub health_fraction: f32,
}
