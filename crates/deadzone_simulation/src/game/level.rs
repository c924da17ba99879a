//! Arena + spawn helpers
//!
//! Все entity сессии помечены `SessionEntity`: Restart удаляет их пачкой.

use bevy::prelude::*;

use crate::ai::{EnemyAgent, EnemyKind};
use crate::combat::{Loadout, MuzzleFlash};
use crate::components::{Actor, BodyHeight, Collider, Health, Player, StaticGeometry};
use crate::config::{GameConfig, LevelLayout};
use crate::player::{DamageCooldown, PlayerInput};

/// Marker: entity принадлежит текущей сессии (арена, игрок, враги)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SessionEntity;

/// Ширина коллайдера актора (X/Z)
const ACTOR_WIDTH: f32 = 1.0;

/// Колонны-укрытия (X, Z)
pub const PILLAR_POSITIONS: [(f32, f32); 8] = [
    (-10.0, 10.0),
    (10.0, 10.0),
    (-10.0, -10.0),
    (10.0, -10.0),
    (0.0, 15.0),
    (0.0, -15.0),
    (15.0, 0.0),
    (-15.0, 0.0),
];

/// Стартовая волна зомби (подальше от спавна игрока в 0,0,0)
pub const WAVE_POSITIONS: [Vec3; 5] = [
    Vec3::new(15.0, 0.0, 15.0),
    Vec3::new(-15.0, 0.0, 15.0),
    Vec3::new(15.0, 0.0, -15.0),
    Vec3::new(-15.0, 0.0, -15.0),
    Vec3::new(0.0, 0.0, 20.0),
];

fn spawn_block(commands: &mut Commands, center: Vec3, size: Vec3) -> Entity {
    commands
        .spawn((
            StaticGeometry,
            SessionEntity,
            Collider::cuboid(size),
            Transform::from_translation(center),
        ))
        .id()
}

/// Пол (верх на y = 0), 4 стены по периметру, 8 колонн
pub fn spawn_arena(commands: &mut Commands, layout: &LevelLayout) -> Vec<Entity> {
    let size = layout.size;
    let half = size / 2.0;
    let height = layout.wall_height;
    let thickness = layout.wall_thickness;

    let mut blocks = Vec::with_capacity(1 + 4 + PILLAR_POSITIONS.len());

    blocks.push(spawn_block(commands, Vec3::new(0.0, -0.5, 0.0), Vec3::new(size, 1.0, size)));

    let walls = [
        (Vec3::new(0.0, height / 2.0, half), Vec3::new(size, height, thickness)),
        (Vec3::new(0.0, height / 2.0, -half), Vec3::new(size, height, thickness)),
        (Vec3::new(half, height / 2.0, 0.0), Vec3::new(thickness, height, size)),
        (Vec3::new(-half, height / 2.0, 0.0), Vec3::new(thickness, height, size)),
    ];
    for (center, extent) in walls {
        blocks.push(spawn_block(commands, center, extent));
    }

    for (x, z) in PILLAR_POSITIONS {
        blocks.push(spawn_block(
            commands,
            Vec3::new(x, height / 2.0, z),
            Vec3::new(2.0, height, 2.0),
        ));
    }

    blocks
}

/// Игрок в точке спавна: Health, Loadout (pistol в руках), input, cooldown
pub fn spawn_player(commands: &mut Commands, config: &GameConfig, position: Vec3) -> Entity {
    let profile = &config.player;

    commands
        .spawn((
            Player,
            Actor,
            SessionEntity,
            Health::new(profile.max_health),
            BodyHeight(profile.height),
            Collider::actor(ACTOR_WIDTH, profile.height),
            Transform::from_translation(position),
            PlayerInput::default(),
            Loadout::standard(&config.weapons),
            MuzzleFlash::default(),
            DamageCooldown::new(profile.damage_cooldown),
        ))
        .id()
}

/// Враг заданного типа с целью `target`
pub fn spawn_enemy(
    commands: &mut Commands,
    config: &GameConfig,
    kind: EnemyKind,
    position: Vec3,
    target: Option<Entity>,
) -> Entity {
    let profile = config.enemies.get(kind).clone();
    let height = profile.height;
    let health = Health::new(profile.health);

    let mut agent = EnemyAgent::new(kind, profile);
    agent.target = target;

    commands
        .spawn((
            agent,
            SessionEntity,
            health,
            BodyHeight(height),
            Collider::actor(ACTOR_WIDTH, height),
            Transform::from_translation(position),
        ))
        .id()
}

/// Стартовая волна: 5 зомби с целью на игроке
pub fn spawn_wave(commands: &mut Commands, config: &GameConfig, player: Entity) -> Vec<Entity> {
    WAVE_POSITIONS
        .iter()
        .map(|&position| spawn_enemy(commands, config, EnemyKind::Zombie, position, Some(player)))
        .collect()
}
