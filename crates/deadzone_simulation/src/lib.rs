//! DEADZONE Simulation Core
//!
//! ECS-симуляция FPS на Bevy 0.16 (headless, без рендера)
//!
//! Подсистемы:
//! - components: Actor, Health (Health Model), Collider
//! - combat: Combat Resolver, Weapon State Machine, Loadout
//! - ai: Enemy AI FSM (Idle → Chase → Attack → Dead)
//! - player: тонкий player controller (input → оружие)
//! - game: сессия (Menu/Playing/Paused/GameOver), арена, счёт
//! - scheduler: SimClock + отложенные эффекты
//! - geometry: RaycastService + встроенный CollisionWorld
//!
//! Presentation layer (рендер, звук, HUD, камера): снаружи, читает события.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod game;
pub mod geometry;
pub mod logger;
pub mod player;
pub mod scheduler;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, AIState, EnemyAgent, EnemyKind};
pub use combat::{
    apply_damage, calculate_falloff, calculate_headshot, is_line_of_sight, CombatPlugin, DamageDealt, Dead,
    EntityDied, Loadout, Weapon, WeaponKind,
};
pub use components::*;
pub use config::{ConfigError, GameConfig};
pub use game::{GameCommand, GamePlugin, GameSession, GameState};
pub use geometry::{CollisionWorld, RayHit, RaycastService};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level};
pub use player::{PlayerCommand, PlayerInput, PlayerPlugin};
pub use scheduler::{SchedulerPlugin, SimulationSet};

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// GameConfig и DeterministicRng вставляются только если их ещё нет
/// (загруженный конфиг / seed из `create_headless_app` не перетираются).
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<GameConfig>()
            // Фазы тика: total order, только в Playing
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Prepare,
                    SimulationSet::Player,
                    SimulationSet::Ai,
                    SimulationSet::Resolve,
                    SimulationSet::Session,
                    SimulationSet::Effects,
                )
                    .chain()
                    .run_if(game::session_is_playing),
            )
            .add_plugins((SchedulerPlugin, CombatPlugin, PlayerPlugin, AIPlugin, GamePlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
