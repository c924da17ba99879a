//! Tests for FSM AI components.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::fsm::*;
    use crate::config::EnemyProfile;

    fn profile(detection_range: f32, attack_range: f32) -> EnemyProfile {
        EnemyProfile {
            detection_range,
            attack_range,
            ..EnemyProfile::zombie()
        }
    }

    #[test]
    fn test_ai_state_default() {
        assert_eq!(AIState::default(), AIState::Idle);
    }

    #[test]
    fn test_distance_sequence_drives_states() {
        let profile = profile(40.0, 10.0);

        let states: Vec<AIState> = [5.0, 35.0, 100.0, 5.0]
            .into_iter()
            .map(|distance| decide_state(&profile, Some(distance)))
            .collect();

        assert_eq!(
            states,
            vec![AIState::Attack, AIState::Chase, AIState::Idle, AIState::Attack]
        );
    }

    #[test]
    fn test_range_boundaries() {
        let profile = profile(40.0, 10.0);

        // attack_range inclusive, detection_range inclusive для Chase
        assert_eq!(decide_state(&profile, Some(10.0)), AIState::Attack);
        assert_eq!(decide_state(&profile, Some(40.0)), AIState::Chase);
        assert_eq!(decide_state(&profile, Some(40.01)), AIState::Idle);
    }

    #[test]
    fn test_no_target_forces_idle() {
        assert_eq!(decide_state(&profile(40.0, 10.0), None), AIState::Idle);
    }

    #[test]
    fn test_first_attack_is_immediate() {
        let mut agent = EnemyAgent::new(EnemyKind::Zombie, EnemyProfile::zombie());
        assert!(agent.tick_attack(1.0 / 60.0));
        assert_eq!(agent.time_since_last_attack, 0.0);
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let mut agent = EnemyAgent::new(EnemyKind::Zombie, EnemyProfile::zombie());
        assert!(agent.tick_attack(0.0));

        // zombie attack_cooldown = 1.0
        assert!(!agent.tick_attack(0.5));
        assert!(!agent.tick_attack(0.4));
        assert!(agent.tick_attack(0.1));
    }

    #[test]
    fn test_chase_moves_horizontally_at_speed() {
        let (position, facing) = chase_step(Vec3::ZERO, Vec3::new(0.0, 5.0, -10.0), 2.0, 0.5);

        assert!((position - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        let forward = facing.expect("target is not directly above") * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_chase_faces_target() {
        let (_, facing) = chase_step(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0, 0.1);

        let forward = facing.unwrap() * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-5);
        assert!(forward.y.abs() < 1e-6);
    }

    #[test]
    fn test_chase_does_not_overshoot() {
        let (position, _) = chase_step(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), 5.0, 1.0);
        assert!((position - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_chase_target_directly_above_stays_put() {
        let (position, facing) = chase_step(Vec3::ONE, Vec3::new(1.0, 10.0, 1.0), 5.0, 1.0);
        assert_eq!(position, Vec3::ONE);
        assert!(facing.is_none());
    }

    #[test]
    fn test_roster_attack_styles() {
        assert_eq!(EnemyKind::Zombie.attack_style(), AttackStyle::Melee);
        assert_eq!(EnemyKind::Demon.attack_style(), AttackStyle::Melee);
        assert_eq!(EnemyKind::Imp.attack_style(), AttackStyle::Ranged);
    }
}
