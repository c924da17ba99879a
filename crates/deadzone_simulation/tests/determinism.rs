//! Тесты детерминизма
//!
//! Полная сессия (арена, волна зомби, игрок стреляет из дробовика: RNG разброс)
//! с одинаковым seed даёт идентичный мир.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use deadzone_simulation::player::AimRay;
use deadzone_simulation::{
    create_headless_app, world_snapshot, EnemyAgent, GameCommand, GameSession, Health, PlayerCommand, PlayerInput,
    SimulationPlugin,
};

/// Прогоняет сессию и возвращает snapshot Health, позиции врагов и счёт
fn run_session(seed: u64, ticks: usize) -> (Vec<u8>, Vec<(u32, Vec3)>, u32) {
    let mut app = create_headless_app(seed);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .add_plugins(SimulationPlugin);

    app.update();
    app.world_mut().send_event(GameCommand::Start);
    app.update();

    let player = app.world().resource::<GameSession>().player.expect("session started");
    app.world_mut().send_event(PlayerCommand::NextWeapon);
    app.world_mut().get_mut::<PlayerInput>(player).unwrap().fire_held = true;
    // Прицел на зомби в (0, 0, 20)
    app.world_mut().entity_mut(player).insert(AimRay {
        origin: Vec3::new(0.0, 1.8, 0.0),
        direction: Vec3::new(0.0, -0.8, 20.0),
    });

    for _ in 0..ticks {
        app.update();
    }

    let score = app.world().resource::<GameSession>().score;
    let health = world_snapshot::<Health>(app.world_mut());

    let world = app.world_mut();
    let mut positions: Vec<(u32, Vec3)> = world
        .query_filtered::<(Entity, &Transform), With<EnemyAgent>>()
        .iter(world)
        .map(|(entity, transform)| (entity.index(), transform.translation))
        .collect();
    positions.sort_by_key(|(index, _)| *index);

    (health, positions, score)
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICKS: usize = 300;

    let first = run_session(SEED, TICKS);
    let second = run_session(SEED, TICKS);

    assert_eq!(first, second, "Симуляция с одинаковым seed ({}) дала разные результаты!", SEED);
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICKS: usize = 300;

    let runs: Vec<_> = (0..3).map(|_| run_session(SEED, TICKS)).collect();

    for (i, run) in runs.iter().enumerate().skip(1) {
        assert_eq!(runs[0], *run, "Прогон {} дал результат отличный от прогона 0", i);
    }
}
