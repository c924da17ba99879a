//! Tests for heal and death systems.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::ai::{AIState, AIStateChanged, DeathEffect, EnemyAgent, EnemyKind, EnemyKilled};
    use crate::combat::{apply_heal_requests, handle_deaths, Dead, EntityDied, HealRequest, Healed};
    use crate::components::{Collider, Health};
    use crate::config::{EnemyProfile, GameConfig};
    use crate::scheduler::{DelayedEffect, DelayedEffects, SimClock};

    fn death_app() -> App {
        let mut app = App::new();
        app.init_resource::<GameConfig>()
            .init_resource::<SimClock>()
            .init_resource::<DelayedEffects>()
            .add_event::<EntityDied>()
            .add_event::<DeathEffect>()
            .add_event::<EnemyKilled>()
            .add_event::<AIStateChanged>()
            .add_event::<HealRequest>()
            .add_event::<Healed>()
            .add_systems(Update, (apply_heal_requests, handle_deaths).chain());
        app
    }

    #[test]
    fn test_heal_reports_actual_delta() {
        let mut app = death_app();
        let mut health = Health::new(100);
        health.take_damage(10);
        let entity = app.world_mut().spawn(health).id();

        app.world_mut().send_event(HealRequest { target: entity, amount: 50 });
        app.update();

        assert_eq!(app.world().get::<Health>(entity).unwrap().current(), 100);
        let healed: Vec<Healed> = app.world_mut().resource_mut::<Events<Healed>>().drain().collect();
        assert_eq!(healed.len(), 1);
        assert_eq!(healed[0].amount, 10);
    }

    #[test]
    fn test_heal_on_dead_entity_is_noop() {
        let mut app = death_app();
        let mut health = Health::new(10);
        health.take_damage(10);
        let entity = app.world_mut().spawn(health).id();

        app.world_mut().send_event(HealRequest { target: entity, amount: 50 });
        app.update();

        assert_eq!(app.world().get::<Health>(entity).unwrap().current(), 0);
        assert!(app.world().resource::<Events<Healed>>().is_empty());
    }

    #[test]
    fn test_heal_unknown_entity_is_noop() {
        let mut app = death_app();

        app.world_mut().send_event(HealRequest {
            target: Entity::from_raw(999),
            amount: 50,
        });
        app.update();

        assert!(app.world().resource::<Events<Healed>>().is_empty());
    }

    #[test]
    fn test_enemy_death_schedules_despawn_and_disables_collider() {
        let mut app = death_app();
        let killer = app.world_mut().spawn_empty().id();
        let enemy = app
            .world_mut()
            .spawn((
                EnemyAgent::new(EnemyKind::Zombie, EnemyProfile::zombie()),
                Health::new(50),
                Collider::actor(1.0, 2.0),
                Transform::from_xyz(5.0, 0.0, 5.0),
            ))
            .id();

        app.world_mut().send_event(EntityDied {
            entity: enemy,
            killer: Some(killer),
        });
        app.update();

        let world = app.world();
        assert!(world.get::<Dead>(enemy).is_some());
        assert_eq!(world.get::<AIState>(enemy), Some(&AIState::Dead));
        assert!(!world.get::<Collider>(enemy).unwrap().enabled);

        let effects = world.resource::<DelayedEffects>();
        let pending: Vec<_> = effects.pending_for(enemy).collect();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].effect, DelayedEffect::Despawn);
        assert!((pending[0].due - 0.3).abs() < 1e-6);

        let killed: Vec<EnemyKilled> = app.world_mut().resource_mut::<Events<EnemyKilled>>().drain().collect();
        assert_eq!(killed.len(), 1);
        assert_eq!(killed[0].kind, EnemyKind::Zombie);
        assert_eq!(killed[0].killer, Some(killer));
        assert_eq!(app.world().resource::<Events<DeathEffect>>().len(), 1);

        // Enter hook Dead (AI ещё не видел смерть)
        let changed: Vec<AIStateChanged> = app.world_mut().resource_mut::<Events<AIStateChanged>>().drain().collect();
        assert_eq!(changed.len(), 1);
        assert_eq!((changed[0].from, changed[0].to), (AIState::Idle, AIState::Dead));
    }

    #[test]
    fn test_death_of_enemy_already_dead_in_fsm_has_no_second_hook() {
        let mut app = death_app();
        let enemy = app
            .world_mut()
            .spawn((
                EnemyAgent::new(EnemyKind::Imp, EnemyProfile::imp()),
                AIState::Dead,
                Health::new(40),
                Transform::default(),
            ))
            .id();

        app.world_mut().send_event(EntityDied { entity: enemy, killer: None });
        app.update();

        assert_eq!(app.world().get::<AIState>(enemy), Some(&AIState::Dead));
        assert!(app.world().resource::<Events<AIStateChanged>>().is_empty());
        assert_eq!(app.world().resource::<Events<EnemyKilled>>().len(), 1);
    }

    #[test]
    fn test_player_death_is_not_scheduled_for_removal() {
        let mut app = death_app();
        let player = app
            .world_mut()
            .spawn((Health::new(100), Collider::actor(1.0, 2.0), Transform::default()))
            .id();

        app.world_mut().send_event(EntityDied {
            entity: player,
            killer: None,
        });
        app.update();

        assert!(app.world().get::<Dead>(player).is_some());
        assert!(app.world().resource::<DelayedEffects>().is_empty());
        assert!(app.world().resource::<Events<EnemyKilled>>().is_empty());
        assert_eq!(app.world().resource::<Events<DeathEffect>>().len(), 1);
    }
}
