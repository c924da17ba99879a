//! Configuration surface симуляции
//!
//! Один `GameConfig` resource: таблицы врагов/оружия + combat tuning.
//! Загружается один раз на старте (TOML), дальше immutable.
//!
//! Частичный TOML допустим: отсутствующие секции/таблицы берутся из defaults.
//! Но если таблица врага или оружия указана, её основные поля обязательны
//! (опциональны только `height`, `pellets`, `reload_time`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub mod profiles;

pub use profiles::{
    CombatTuning, EnemyProfile, EnemyTable, LevelLayout, PlayerProfile, SessionTuning,
    WeaponProfile, WeaponTable,
};

use crate::ai::EnemyKind;
use crate::combat::WeaponKind;

/// Эталонный конфиг (совпадает с `GameConfig::default()`)
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub combat: CombatTuning,
    pub player: PlayerProfile,
    pub weapons: WeaponTable,
    pub enemies: EnemyTable,
    pub session: SessionTuning,
    pub level: LevelLayout,
}

impl GameConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;

        crate::logger::log_info(&format!("⚙️ GameConfig loaded from {}", path.display()));
        Ok(config)
    }

    /// Проверка инвариантов, которые системы считают гарантированными
    pub fn validate(&self) -> Result<()> {
        let combat = &self.combat;
        if combat.falloff_start < 0.0 {
            return Err(invalid("combat.falloff_start", "must be >= 0"));
        }
        if combat.falloff_end <= combat.falloff_start {
            return Err(invalid(
                "combat.falloff_end",
                format!("must be greater than falloff_start ({})", combat.falloff_start),
            ));
        }
        if !(0.0..=1.0).contains(&combat.min_multiplier) {
            return Err(invalid("combat.min_multiplier", "must be within [0, 1]"));
        }
        if combat.headshot_multiplier < 0.0 {
            return Err(invalid("combat.headshot_multiplier", "must be >= 0"));
        }

        if self.player.max_health == 0 {
            return Err(invalid("player.max_health", "must be > 0"));
        }
        if self.player.damage_cooldown < 0.0 {
            return Err(invalid("player.damage_cooldown", "must be >= 0"));
        }

        for kind in WeaponKind::ALL {
            let profile = self.weapons.get(kind);
            let name = kind.name();
            if profile.fire_rate < 0.0 {
                return Err(invalid(format!("weapons.{name}.fire_rate"), "must be >= 0"));
            }
            if profile.ammo_max == 0 {
                return Err(invalid(format!("weapons.{name}.ammo_max"), "must be > 0"));
            }
            if profile.pellets == 0 {
                return Err(invalid(format!("weapons.{name}.pellets"), "must be >= 1"));
            }
            if profile.range <= 0.0 {
                return Err(invalid(format!("weapons.{name}.range"), "must be > 0"));
            }
            if profile.reload_time < 0.0 {
                return Err(invalid(format!("weapons.{name}.reload_time"), "must be >= 0"));
            }
        }

        for kind in EnemyKind::ALL {
            let profile = self.enemies.get(kind);
            let name = kind.name();
            if profile.health == 0 {
                return Err(invalid(format!("enemies.{name}.health"), "must be > 0"));
            }
            if profile.attack_range > profile.detection_range {
                return Err(invalid(
                    format!("enemies.{name}.attack_range"),
                    "must not exceed detection_range",
                ));
            }
            if profile.speed < 0.0 || profile.attack_cooldown < 0.0 {
                return Err(invalid(
                    format!("enemies.{name}"),
                    "speed and attack_cooldown must be >= 0",
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: impl Into<String>, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.into(),
        reason: reason.into(),
    }
}

impl WeaponTable {
    pub fn get(&self, kind: WeaponKind) -> &WeaponProfile {
        match kind {
            WeaponKind::Pistol => &self.pistol,
            WeaponKind::Shotgun => &self.shotgun,
        }
    }
}

impl EnemyTable {
    pub fn get(&self, kind: EnemyKind) -> &EnemyProfile {
        match kind {
            EnemyKind::Zombie => &self.zombie,
            EnemyKind::Demon => &self.demon,
            EnemyKind::Imp => &self.imp,
        }
    }
}
