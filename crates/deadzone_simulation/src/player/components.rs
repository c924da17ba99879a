//! Player components: input state, aim ray, damage cooldown.

use bevy::prelude::*;

/// Continuous input (пишет presentation layer каждый кадр)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// ЛКМ зажата: стреляем каждый тик, скорострельность режет сам Weapon gate
    pub fire_held: bool,
}

/// Луч прицеливания (позиция и forward камеры)
///
/// Direction нормализуется при использовании. Нулевой direction или отсутствие
/// компонента: fallback на уровень глаз игрока + Transform forward.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct AimRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Краткая неуязвимость после попадания врага
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DamageCooldown {
    duration: f32,
    remaining: f32,
}

impl DamageCooldown {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            remaining: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Запустить окно неуязвимости заново
    pub fn trigger(&mut self) {
        self.remaining = self.duration;
    }

    pub fn tick(&mut self, delta: f32) {
        self.remaining = (self.remaining - delta).max(0.0);
    }
}

/// Итоговый луч выстрела
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAim {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// AimRay или fallback (глаза + forward)
pub fn resolve_aim(transform: &Transform, aim: Option<&AimRay>, aim_height: f32) -> ResolvedAim {
    if let Some(aim) = aim {
        let direction = aim.direction.normalize_or_zero();
        if direction != Vec3::ZERO {
            return ResolvedAim {
                origin: aim.origin,
                direction,
            };
        }
    }

    ResolvedAim {
        origin: transform.translation + Vec3::Y * aim_height,
        direction: *transform.forward(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_cooldown_window() {
        let mut cooldown = DamageCooldown::new(0.1);
        assert!(!cooldown.is_active());

        cooldown.trigger();
        assert!(cooldown.is_active());

        cooldown.tick(0.05);
        assert!(cooldown.is_active());

        cooldown.tick(0.06);
        assert!(!cooldown.is_active());
        assert_eq!(cooldown.remaining(), 0.0);
    }

    #[test]
    fn test_resolve_aim_normalizes_direction() {
        let aim = AimRay {
            origin: Vec3::new(1.0, 2.0, 3.0),
            direction: Vec3::new(0.0, 0.0, 5.0),
        };

        let resolved = resolve_aim(&Transform::default(), Some(&aim), 1.8);

        assert_eq!(resolved.origin, aim.origin);
        assert_eq!(resolved.direction, Vec3::Z);
    }

    #[test]
    fn test_resolve_aim_falls_back_to_eyes_and_facing() {
        let transform = Transform::from_xyz(2.0, 0.0, 2.0);
        let zero = AimRay {
            origin: Vec3::ZERO,
            direction: Vec3::ZERO,
        };

        for aim in [None, Some(&zero)] {
            let resolved = resolve_aim(&transform, aim, 1.8);
            assert_eq!(resolved.origin, Vec3::new(2.0, 1.8, 2.0));
            assert_eq!(resolved.direction, Vec3::NEG_Z);
        }
    }
}
