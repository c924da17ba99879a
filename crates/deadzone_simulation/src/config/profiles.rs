//! Статические профили: combat tuning, игрок, оружие, враги, сессия, уровень
//!
//! Все значения по умолчанию: "эталонные" числа геймдизайна.
//! Профили immutable на всю сессию (systems только читают `Res<GameConfig>`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Параметры combat resolver (falloff + headshot + LOS)
///
/// Named constants вынесены в конфиг, в коде литералов нет.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct CombatTuning {
    /// Дистанция, до которой урон не падает
    pub falloff_start: f32,
    /// Дистанция, после которой урон минимален
    pub falloff_end: f32,
    /// Множитель урона на `falloff_end` и дальше
    pub min_multiplier: f32,
    /// Множитель за попадание в голову
    pub headshot_multiplier: f32,
    /// Доля высоты цели, выше которой попадание считается headshot (строго больше)
    pub headshot_threshold: f32,
    /// Вертикальный offset "уровня глаз" для line-of-sight
    pub eye_height: f32,
    /// Применять ли `spread` к hitscan (pistol). По умолчанию нет: см. DESIGN.md
    pub hitscan_spread: bool,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            falloff_start: 15.0,
            falloff_end: 40.0,
            min_multiplier: 0.25,
            headshot_multiplier: 2.0,
            headshot_threshold: 0.7,
            eye_height: 1.0,
            hitscan_spread: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct PlayerProfile {
    pub max_health: u32,
    /// Вертикальный размер (для headshot геометрии)
    pub height: f32,
    /// Неуязвимость после попадания (секунды)
    pub damage_cooldown: f32,
    /// Высота камеры над позицией (fallback для AimRay)
    pub aim_height: f32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            max_health: 100,
            height: 2.0,
            damage_cooldown: 0.1,
            aim_height: 1.8,
        }
    }
}

/// Профиль оружия
///
/// `pellets > 1`: дробовик (каждая дробинка отдельный луч).
/// `reload_time == 0.0`: мгновенная перезарядка.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct WeaponProfile {
    /// Урон за луч (для дробовика: за дробинку)
    pub damage: f32,
    /// Секунды между выстрелами
    pub fire_rate: f32,
    pub range: f32,
    /// Полуугол конуса разброса (радианы)
    pub spread: f32,
    pub ammo_max: u32,
    #[serde(default = "default_pellets")]
    pub pellets: u32,
    #[serde(default)]
    pub reload_time: f32,
}

fn default_pellets() -> u32 {
    1
}

impl WeaponProfile {
    pub fn pistol() -> Self {
        Self {
            damage: 15.0,
            fire_rate: 0.3,
            range: 100.0,
            spread: 0.02,
            ammo_max: 50,
            pellets: 1,
            reload_time: 0.0,
        }
    }

    pub fn shotgun() -> Self {
        Self {
            damage: 8.0,
            fire_rate: 0.8,
            range: 30.0,
            spread: 0.15,
            ammo_max: 24,
            pellets: 8,
            reload_time: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTable {
    pub pistol: WeaponProfile,
    pub shotgun: WeaponProfile,
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            pistol: WeaponProfile::pistol(),
            shotgun: WeaponProfile::shotgun(),
        }
    }
}

/// Stat profile врага
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct EnemyProfile {
    pub health: u32,
    pub damage: f32,
    /// Метры в секунду
    pub speed: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub detection_range: f32,
    /// Вертикальный размер (headshot + collider)
    #[serde(default = "default_enemy_height")]
    pub height: f32,
}

fn default_enemy_height() -> f32 {
    2.0
}

impl EnemyProfile {
    pub fn zombie() -> Self {
        Self {
            health: 50,
            damage: 10.0,
            speed: 2.0,
            attack_range: 2.5,
            attack_cooldown: 1.0,
            detection_range: 40.0,
            height: 2.0,
        }
    }

    pub fn demon() -> Self {
        Self {
            health: 100,
            damage: 25.0,
            speed: 5.0,
            attack_range: 2.5,
            attack_cooldown: 0.8,
            detection_range: 50.0,
            height: 2.5,
        }
    }

    pub fn imp() -> Self {
        Self {
            health: 40,
            damage: 15.0,
            speed: 3.0,
            attack_range: 25.0,
            attack_cooldown: 1.5,
            detection_range: 60.0,
            height: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    pub zombie: EnemyProfile,
    pub demon: EnemyProfile,
    pub imp: EnemyProfile,
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            zombie: EnemyProfile::zombie(),
            demon: EnemyProfile::demon(),
            imp: EnemyProfile::imp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    pub score_per_kill: u32,
    /// Задержка удаления трупа (косметика, секунды)
    pub corpse_removal_delay: f32,
    pub muzzle_flash_duration: f32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            score_per_kill: 10,
            corpse_removal_delay: 0.3,
            muzzle_flash_duration: 0.05,
        }
    }
}

/// Размеры арены
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    pub size: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            size: 50.0,
            wall_height: 4.0,
            wall_thickness: 1.0,
        }
    }
}
