//! Weapon State Machine + Loadout
//!
//! Состояния (derived из runtime полей):
//! - Holstered: оружие убрано
//! - Ready: можно стрелять
//! - Cooldown: fire_rate ещё не прошёл
//! - Reloading: timed reload в процессе (только при reload_time > 0)
//!
//! Gate выстрела: equipped ∧ ¬reloading ∧ time_since_last_fire ≥ fire_rate ∧ ammo > 0.
//!
//! Сам ray-cast выстрела: `trace_shots` поверх `RaycastService`,
//! применение урона: в player системе (нужен mutable доступ к Health).

use bevy::prelude::*;
use rand::Rng;

use crate::config::{WeaponProfile, WeaponTable};
use crate::geometry::{RayHit, RaycastService};

/// Закрытый набор типов оружия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum WeaponKind {
    Pistol,
    Shotgun,
}

/// Как оружие выпускает лучи
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirePattern {
    /// Один луч вдоль прицела
    Hitscan,
    /// `pellets` лучей внутри конуса `spread`
    Pellets,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 2] = [WeaponKind::Pistol, WeaponKind::Shotgun];

    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Pistol => "pistol",
            WeaponKind::Shotgun => "shotgun",
        }
    }

    pub fn fire_pattern(&self) -> FirePattern {
        match self {
            WeaponKind::Pistol => FirePattern::Hitscan,
            WeaponKind::Shotgun => FirePattern::Pellets,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponState {
    Holstered,
    Ready,
    Cooldown,
    Reloading,
}

/// Результат `Weapon::reload`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// Полный магазин или reload уже идёт
    Rejected,
    /// Мгновенный reload, ammo == ammo_max
    Completed,
    /// Timed reload запущен, закончится в `tick`
    Started,
}

/// Оружие: статический профиль + runtime state
#[derive(Debug, Clone, PartialEq)]
pub struct Weapon {
    kind: WeaponKind,
    profile: WeaponProfile,
    ammo: u32,
    time_since_last_fire: f32,
    equipped: bool,
    reloading: bool,
    reload_remaining: f32,
}

impl Weapon {
    /// Новое оружие: полный магазин, убрано, готово к первому выстрелу
    pub fn new(kind: WeaponKind, profile: WeaponProfile) -> Self {
        Self {
            kind,
            ammo: profile.ammo_max,
            time_since_last_fire: profile.fire_rate,
            equipped: false,
            reloading: false,
            reload_remaining: 0.0,
            profile,
        }
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn profile(&self) -> &WeaponProfile {
        &self.profile
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn ammo_max(&self) -> u32 {
        self.profile.ammo_max
    }

    pub fn time_since_last_fire(&self) -> f32 {
        self.time_since_last_fire
    }

    pub fn is_equipped(&self) -> bool {
        self.equipped
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    pub fn state(&self) -> WeaponState {
        if self.reloading {
            WeaponState::Reloading
        } else if !self.equipped {
            WeaponState::Holstered
        } else if self.time_since_last_fire < self.profile.fire_rate {
            WeaponState::Cooldown
        } else {
            WeaponState::Ready
        }
    }

    pub fn equip(&mut self) {
        self.equipped = true;
    }

    /// Убрать оружие. Идущий reload НЕ отменяется.
    pub fn holster(&mut self) {
        self.equipped = false;
    }

    pub fn can_fire(&self) -> bool {
        self.equipped
            && !self.reloading
            && self.time_since_last_fire >= self.profile.fire_rate
            && self.ammo > 0
    }

    /// Попытка выстрела. false: gate закрыт, состояние не меняется.
    pub fn try_fire(&mut self) -> bool {
        if !self.can_fire() {
            return false;
        }

        self.time_since_last_fire = 0.0;
        self.ammo -= 1;
        true
    }

    pub fn reload(&mut self) -> ReloadOutcome {
        if self.reloading || self.ammo >= self.profile.ammo_max {
            return ReloadOutcome::Rejected;
        }

        if self.profile.reload_time <= 0.0 {
            self.ammo = self.profile.ammo_max;
            return ReloadOutcome::Completed;
        }

        self.reloading = true;
        self.reload_remaining = self.profile.reload_time;
        ReloadOutcome::Started
    }

    /// Per-frame tick (всегда, независимо от equip state)
    ///
    /// Возвращает true если timed reload закончился на этом тике.
    pub fn tick(&mut self, delta: f32) -> bool {
        self.time_since_last_fire += delta;

        if !self.reloading {
            return false;
        }

        self.reload_remaining -= delta;
        if self.reload_remaining > 0.0 {
            return false;
        }

        self.reloading = false;
        self.reload_remaining = 0.0;
        self.ammo = self.profile.ammo_max;
        true
    }

    /// Направления лучей для одного выстрела
    ///
    /// Pistol: один луч вдоль `aim` (spread только если `hitscan_spread`).
    /// Shotgun: `pellets` лучей, каждый отклонён внутри конуса `spread`.
    pub fn shot_directions(&self, aim: Vec3, hitscan_spread: bool, rng: &mut impl Rng) -> Vec<Vec3> {
        let aim = aim.normalize_or_zero();
        if aim == Vec3::ZERO {
            return Vec::new();
        }

        match self.kind.fire_pattern() {
            FirePattern::Hitscan if hitscan_spread => vec![perturb_direction(aim, self.profile.spread, rng)],
            FirePattern::Hitscan => vec![aim],
            FirePattern::Pellets => (0..self.profile.pellets.max(1))
                .map(|_| perturb_direction(aim, self.profile.spread, rng))
                .collect(),
        }
    }
}

/// Случайное направление внутри конуса half-angle `spread` (радианы) вокруг `aim`
///
/// `aim`: нормализован.
pub fn perturb_direction(aim: Vec3, spread: f32, rng: &mut impl Rng) -> Vec3 {
    if spread <= 0.0 {
        return aim;
    }

    // sqrt: равномерное распределение по площади диска
    let theta = spread * rng.gen_range(0.0f32..=1.0).sqrt();
    let phi = rng.gen_range(0.0f32..std::f32::consts::TAU);

    let (side, up) = aim.any_orthonormal_pair();
    let offset = side * phi.cos() + up * phi.sin();

    (aim * theta.cos() + offset * theta.sin()).normalize()
}

/// Один луч выстрела и то, во что он попал
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotTrace {
    pub direction: Vec3,
    pub hit: Option<RayHit>,
}

/// Трассировка всех лучей выстрела (стрелок исключён из пересечений)
pub fn trace_shots(
    raycast: &dyn RaycastService,
    shooter: Entity,
    origin: Vec3,
    directions: &[Vec3],
    range: f32,
) -> Vec<ShotTrace> {
    directions
        .iter()
        .map(|&direction| ShotTrace {
            direction,
            hit: raycast.cast(origin, direction, range, &[shooter]),
        })
        .collect()
}

/// Набор оружия игрока + индекс текущего
///
/// Текущее оружие всегда equipped, остальные holstered.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Loadout {
    weapons: Vec<Weapon>,
    current: usize,
}

impl Loadout {
    pub fn new(mut weapons: Vec<Weapon>) -> Self {
        for weapon in weapons.iter_mut() {
            weapon.holster();
        }
        if let Some(first) = weapons.first_mut() {
            first.equip();
        }

        Self { weapons, current: 0 }
    }

    /// Pistol (в руках) + Shotgun
    pub fn standard(table: &WeaponTable) -> Self {
        Self::new(
            WeaponKind::ALL
                .iter()
                .map(|&kind| Weapon::new(kind, table.get(kind).clone()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Weapon> {
        self.weapons.get(self.current)
    }

    pub fn current_mut(&mut self) -> Option<&mut Weapon> {
        self.weapons.get_mut(self.current)
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    /// Holster текущее, equip новое. false: тот же или невалидный индекс.
    pub fn switch_to(&mut self, index: usize) -> bool {
        if index == self.current || index >= self.weapons.len() {
            return false;
        }

        self.weapons[self.current].holster();
        self.weapons[index].equip();
        self.current = index;
        true
    }

    pub fn next(&mut self) -> bool {
        if self.weapons.is_empty() {
            return false;
        }
        self.switch_to((self.current + 1) % self.weapons.len())
    }

    pub fn previous(&mut self) -> bool {
        if self.weapons.is_empty() {
            return false;
        }
        let len = self.weapons.len();
        self.switch_to((self.current + len - 1) % len)
    }

    /// Tick всех оружий; `on_reloaded` вызывается для каждого законченного timed reload
    pub fn tick(&mut self, delta: f32, mut on_reloaded: impl FnMut(&Weapon)) {
        for weapon in self.weapons.iter_mut() {
            if weapon.tick(delta) {
                on_reloaded(weapon);
            }
        }
    }
}

/// Muzzle flash (визуальный side effect, не влияет на симуляцию)
///
/// `visible` гасится через `DelayedEffect::HideMuzzleFlash`.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MuzzleFlash {
    pub visible: bool,
}

/// Событие: выстрел произошёл (для muzzle flash / звука)
#[derive(Event, Debug, Clone)]
pub struct MuzzleFlashed {
    pub shooter: Entity,
    pub weapon: WeaponKind,
}

/// Событие: hitscan попал в damageable цель (hit marker)
#[derive(Event, Debug, Clone)]
pub struct HitConfirmed {
    pub shooter: Entity,
    pub target: Entity,
    pub damage: u32,
    pub headshot: bool,
}

/// Событие: магазин восполнен
#[derive(Event, Debug, Clone)]
pub struct WeaponReloaded {
    pub owner: Entity,
    pub weapon: WeaponKind,
    pub ammo: u32,
}
