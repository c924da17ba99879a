//! Headless симуляция DEADZONE
//!
//! Запускает Bevy App без рендера: стартует сессию, игрок-бот целится
//! в ближайшего врага и держит огонь. Печатает счёт и состояние.
//!
//! Usage: deadzone_simulation [config.toml]

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use deadzone_simulation::logger::LogLevel;
use deadzone_simulation::player::AimRay;
use deadzone_simulation::{
    create_headless_app, init_logger, log_error, log_info, set_log_level, Dead, EnemyAgent, GameCommand, GameConfig,
    GameSession, GameState, PlayerInput, SimulationPlugin,
};

const MAX_TICKS: u32 = 60 * 120;

fn main() {
    let seed = 42;
    init_logger();

    let config = match std::env::args().nth(1) {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(error) => {
                log_error(&format!("Failed to load config {}: {}", path, error));
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    // Debug лог (каждое попадание) слишком шумный для длинного прогона
    set_log_level(LogLevel::Info);
    log_info(&format!("Starting DEADZONE headless simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);
    app.insert_resource(config)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .add_plugins(SimulationPlugin)
        .add_systems(FixedPreUpdate, aim_bot);

    app.world_mut().send_event(GameCommand::Start);

    for tick in 0..MAX_TICKS {
        app.update();

        let session = app.world().resource::<GameSession>();
        if tick % 600 == 0 {
            log_info(&format!(
                "Tick {}: {:?}, score {}, kills {}",
                tick, session.state, session.score, session.kills
            ));
        }

        if session.state == GameState::GameOver {
            break;
        }
    }

    let session = app.world().resource::<GameSession>();
    log_info(&format!(
        "Simulation complete: {:?}, score {}, kills {}",
        session.state, session.score, session.kills
    ));
}

/// Бот: прицел в грудь ближайшего живого врага, огонь если враг есть
fn aim_bot(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut players: Query<(Entity, &Transform, &mut PlayerInput), Without<EnemyAgent>>,
    enemies: Query<&Transform, (With<EnemyAgent>, Without<Dead>)>,
) {
    for (player, transform, mut input) in players.iter_mut() {
        let eye = transform.translation + Vec3::Y * config.player.aim_height;

        let nearest = enemies
            .iter()
            .map(|enemy| enemy.translation + Vec3::Y)
            .min_by(|a, b| a.distance_squared(eye).total_cmp(&b.distance_squared(eye)));

        input.fire_held = nearest.is_some();

        if let Some(chest) = nearest {
            commands.entity(player).insert(AimRay {
                origin: eye,
                direction: chest - eye,
            });
        }
    }
}
