//! Game session: state machine сессии, счёт, арена
//!
//! `GameSession`: явный контекст (игрок, счёт, состояние) вместо глобального
//! синглтона. Gameplay системы работают только в `GameState::Playing`.

use bevy::prelude::*;

pub mod level;

pub use level::{spawn_arena, spawn_enemy, spawn_player, spawn_wave, SessionEntity, PILLAR_POSITIONS, WAVE_POSITIONS};

use crate::ai::EnemyKilled;
use crate::combat::EntityDied;
use crate::config::GameConfig;
use crate::scheduler::{DelayedEffects, SimulationSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Контекст сессии
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct GameSession {
    pub state: GameState,
    pub score: u32,
    pub kills: u32,
    pub player: Option<Entity>,
}

impl GameSession {
    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }
}

/// Команды сессии (меню, Esc)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    Start,
    Pause,
    Resume,
    Restart,
}

/// Run condition: сессия в Playing (без GameSession всегда true)
pub fn session_is_playing(session: Option<Res<GameSession>>) -> bool {
    session.is_none_or(|session| session.is_playing())
}

/// Game Plugin
///
/// - handle_game_commands: до всех фаз, не зависит от состояния
/// - score_kills → track_player_death (SimulationSet::Session)
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameSession>()
            .add_event::<GameCommand>()
            .add_systems(FixedUpdate, handle_game_commands.before(SimulationSet::Prepare))
            .add_systems(
                FixedUpdate,
                (score_kills, track_player_death)
                    .chain()
                    .in_set(SimulationSet::Session),
            );
    }
}

/// Система: GameCommand → переходы состояния сессии
///
/// Start/Restart: удалить прошлую сессию, заспавнить арену, игрока, волну.
/// Pause только из Playing, Resume только из Paused.
pub fn handle_game_commands(
    mut commands: Commands,
    mut requests: EventReader<GameCommand>,
    config: Res<GameConfig>,
    mut session: ResMut<GameSession>,
    mut effects: ResMut<DelayedEffects>,
    previous: Query<Entity, With<SessionEntity>>,
) {
    for request in requests.read() {
        match request {
            GameCommand::Start | GameCommand::Restart => {
                for entity in previous.iter() {
                    commands.entity(entity).despawn();
                }
                effects.clear();

                spawn_arena(&mut commands, &config.level);
                let player = spawn_player(&mut commands, &config, Vec3::ZERO);
                let wave = spawn_wave(&mut commands, &config, player);

                *session = GameSession {
                    state: GameState::Playing,
                    score: 0,
                    kills: 0,
                    player: Some(player),
                };

                crate::logger::log_info(&format!(
                    "🎮 Session started: player {:?}, {} enemies",
                    player,
                    wave.len()
                ));
            }
            GameCommand::Pause => {
                if session.state == GameState::Playing {
                    session.state = GameState::Paused;
                    crate::logger::log_info("⏸️ Paused");
                }
            }
            GameCommand::Resume => {
                if session.state == GameState::Paused {
                    session.state = GameState::Playing;
                    crate::logger::log_info("▶️ Resumed");
                }
            }
        }
    }
}

/// Система: EnemyKilled → score/kills
pub fn score_kills(
    mut killed: EventReader<EnemyKilled>,
    config: Res<GameConfig>,
    mut session: ResMut<GameSession>,
) {
    for event in killed.read() {
        session.score += config.session.score_per_kill;
        session.kills += 1;

        crate::logger::log(&format!(
            "🏆 {} killed, score {} ({} kills)",
            event.kind.name(),
            session.score,
            session.kills
        ));
    }
}

/// Система: смерть игрока → GameOver
pub fn track_player_death(mut died: EventReader<EntityDied>, mut session: ResMut<GameSession>) {
    for event in died.read() {
        if session.player != Some(event.entity) || session.state != GameState::Playing {
            continue;
        }

        session.state = GameState::GameOver;
        crate::logger::log_info(&format!("☠️ Game over, final score {}", session.score));
    }
}
