//! Tests for the combat resolver (falloff, headshot, apply_damage).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::damage::*;
    use crate::components::{DamageOutcome, Health};
    use crate::config::CombatTuning;

    fn at_distance(distance: f32) -> (Vec3, Vec3) {
        (Vec3::ZERO, Vec3::new(0.0, 0.0, distance))
    }

    fn falloff(distance: f32, base: f32) -> f32 {
        let (source, target) = at_distance(distance);
        calculate_falloff(&CombatTuning::default(), base, source, target)
    }

    #[test]
    fn test_falloff_identity_within_start() {
        for distance in [0.0, 1.0, 7.5, 14.99, 15.0] {
            assert_eq!(falloff(distance, 20.0), 20.0, "distance = {}", distance);
        }
    }

    #[test]
    fn test_falloff_clamped_beyond_end() {
        for distance in [40.0, 40.5, 100.0, 1000.0] {
            assert_eq!(falloff(distance, 20.0), 5.0, "distance = {}", distance);
        }
    }

    #[test]
    fn test_falloff_linear_midpoint() {
        // 27.5: середина [15, 40] → множитель (1.0 + 0.25) / 2
        assert!((falloff(27.5, 20.0) - 12.5).abs() < 1e-4);
    }

    #[test]
    fn test_falloff_monotonic_non_increasing() {
        let mut previous = falloff(15.0, 100.0);
        let mut distance = 15.0;

        while distance <= 40.0 {
            let current = falloff(distance, 100.0);
            assert!(current <= previous + 1e-4, "{} > {} at {}", current, previous, distance);
            previous = current;
            distance += 0.25;
        }
    }

    #[test]
    fn test_falloff_continuous_at_boundaries() {
        assert!((falloff(15.001, 100.0) - 100.0).abs() < 0.01);
        assert!((falloff(39.999, 100.0) - 25.0).abs() < 0.01);
    }

    #[test]
    fn test_falloff_uses_tuning_values() {
        let tuning = CombatTuning {
            falloff_start: 5.0,
            falloff_end: 10.0,
            min_multiplier: 0.5,
            ..CombatTuning::default()
        };
        let (source, target) = at_distance(20.0);

        assert_eq!(calculate_falloff(&tuning, 10.0, source, target), 5.0);
    }

    #[test]
    fn test_headshot_just_above_threshold() {
        let tuning = CombatTuning::default();
        let feet = Vec3::new(3.0, 1.0, 3.0);
        let hit = feet + Vec3::new(0.0, 2.0 * 0.71, 0.0);

        assert_eq!(calculate_headshot(&tuning, 10.0, hit, feet, 2.0), 20.0);
    }

    #[test]
    fn test_headshot_just_below_threshold() {
        let tuning = CombatTuning::default();
        let feet = Vec3::new(3.0, 1.0, 3.0);
        let hit = feet + Vec3::new(0.0, 2.0 * 0.69, 0.0);

        assert_eq!(calculate_headshot(&tuning, 10.0, hit, feet, 2.0), 10.0);
    }

    #[test]
    fn test_headshot_threshold_is_exclusive() {
        let tuning = CombatTuning::default();
        let hit = Vec3::new(0.0, 2.0 * tuning.headshot_threshold, 0.0);

        assert!(!is_headshot(&tuning, hit, Vec3::ZERO, 2.0));
    }

    #[test]
    fn test_apply_damage_without_target_is_noop() {
        let report = apply_damage(&CombatTuning::default(), None, 50.0, Some(Vec3::ZERO), Some(Vec3::ONE));

        assert_eq!(report, DamageReport::NONE);
        assert_eq!(report.damage, 0);
    }

    #[test]
    fn test_apply_damage_truncates_after_falloff() {
        let mut health = Health::new(100);

        // distance 25 → множитель 0.7 → 15 × 0.7 = 10.5 → 10
        let report = apply_damage(
            &CombatTuning::default(),
            Some(DamageTarget {
                health: &mut health,
                world_position: Vec3::new(0.0, 0.0, 25.0),
                height: Some(2.0),
            }),
            15.0,
            Some(Vec3::ZERO),
            None,
        );

        assert_eq!(report.damage, 10);
        assert!(!report.headshot);
        assert_eq!(health.current(), 90);
    }

    #[test]
    fn test_apply_damage_headshot_after_falloff() {
        let mut health = Health::new(100);

        let report = apply_damage(
            &CombatTuning::default(),
            Some(DamageTarget {
                health: &mut health,
                world_position: Vec3::new(0.0, 0.0, 10.0),
                height: Some(2.0),
            }),
            15.0,
            Some(Vec3::ZERO),
            Some(Vec3::new(0.0, 1.9, 10.0)),
        );

        assert!(report.headshot);
        assert_eq!(report.damage, 30);
        assert_eq!(report.outcome, DamageOutcome::Wounded { applied: 30 });
        assert_eq!(health.current(), 70);
    }

    #[test]
    fn test_apply_damage_without_source_skips_falloff() {
        let mut health = Health::new(100);

        let report = apply_damage(
            &CombatTuning::default(),
            Some(DamageTarget {
                health: &mut health,
                world_position: Vec3::new(0.0, 0.0, 500.0),
                height: None,
            }),
            15.0,
            None,
            Some(Vec3::new(0.0, 10.0, 500.0)),
        );

        // Без высоты headshot не считается
        assert_eq!(report.damage, 15);
        assert!(!report.headshot);
    }

    #[test]
    fn test_apply_damage_never_drops_health_below_zero() {
        let mut health = Health::new(30);

        let report = apply_damage(
            &CombatTuning::default(),
            Some(DamageTarget {
                health: &mut health,
                world_position: Vec3::ZERO,
                height: Some(2.0),
            }),
            500.0,
            None,
            None,
        );

        assert_eq!(report.outcome, DamageOutcome::Killed { applied: 30 });
        assert_eq!(health.current(), 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_apply_damage_to_dead_target_is_ignored() {
        let mut health = Health::new(10);
        health.take_damage(10);

        let report = apply_damage(
            &CombatTuning::default(),
            Some(DamageTarget {
                health: &mut health,
                world_position: Vec3::ZERO,
                height: None,
            }),
            10.0,
            None,
            None,
        );

        assert_eq!(report.outcome, DamageOutcome::Ignored);
        assert_eq!(health.current(), 0);
    }
}
