//! Базовые компоненты акторов: Actor, Health, BodyHeight

use bevy::prelude::*;

/// Актор (игрок, враг): любой damageable участник симуляции
///
/// Автоматически добавляет Health и BodyHeight через Required Components.
/// Transform.translation = "ноги" актора (world position для headshot геометрии).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health, BodyHeight)]
pub struct Actor;

/// Здоровье (Health Model)
///
/// Инварианты:
/// - 0 ≤ current ≤ max, max > 0
/// - current == 0 ⇒ !alive
/// - переход alive → dead происходит ровно один раз и необратим (revive нет)
///
/// Мутация только через `take_damage` / `heal` (поля приватные).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    current: u32,
    max: u32,
    alive: bool,
}

/// Результат `Health::take_damage`
///
/// `Killed` возвращается ровно один раз за жизнь entity: это и есть death hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Цель уже мертва: no-op
    Ignored,
    /// Урон применён, цель жива
    Wounded { applied: u32 },
    /// Урон применён, health дошёл до 0 (death transition)
    Killed { applied: u32 },
}

impl DamageOutcome {
    /// Сколько health реально снято
    pub fn applied(&self) -> u32 {
        match self {
            DamageOutcome::Ignored => 0,
            DamageOutcome::Wounded { applied } | DamageOutcome::Killed { applied } => *applied,
        }
    }

    pub fn is_kill(&self) -> bool {
        matches!(self, DamageOutcome::Killed { .. })
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    /// `max == 0` поднимается до 1 (max > 0 гарантирован)
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            alive: true,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// current / max, всегда в [0, 1]
    pub fn percentage(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    /// Снять `amount` health (saturating). Мёртвая цель: no-op.
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::Ignored;
        }

        let applied = amount.min(self.current);
        self.current -= applied;

        if self.current == 0 {
            self.alive = false;
            DamageOutcome::Killed { applied }
        } else {
            DamageOutcome::Wounded { applied }
        }
    }

    /// Восстановить health (clamp к max). Возвращает реально добавленное значение.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.alive {
            return 0;
        }

        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }
}

/// Вертикальный размер актора (для headshot геометрии и collider'а)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BodyHeight(pub f32);

impl Default for BodyHeight {
    fn default() -> Self {
        Self(2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100);
        assert_eq!(health.current(), 100);

        assert_eq!(health.take_damage(30), DamageOutcome::Wounded { applied: 30 });
        assert_eq!(health.current(), 70);
        assert!(health.is_alive());

        // Saturating: снимаем только оставшиеся 70
        assert_eq!(health.take_damage(100), DamageOutcome::Killed { applied: 70 });
        assert_eq!(health.current(), 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_death_transition_happens_once() {
        let mut health = Health::new(20);

        assert!(health.take_damage(20).is_kill());
        assert!(!health.is_alive());

        // Повторные попадания: no-op, death hook не срабатывает снова
        for _ in 0..3 {
            assert_eq!(health.take_damage(5), DamageOutcome::Ignored);
        }
        assert_eq!(health.current(), 0);
    }

    #[test]
    fn test_zero_damage_keeps_alive() {
        let mut health = Health::new(10);
        assert_eq!(health.take_damage(0), DamageOutcome::Wounded { applied: 0 });
        assert!(health.is_alive());
    }

    #[test]
    fn test_health_heal_reports_actual_delta() {
        let mut health = Health::new(100);
        health.take_damage(50);

        assert_eq!(health.heal(30), 30);
        assert_eq!(health.current(), 80);

        // Clamped to max: запрошено 100, добавлено 20
        assert_eq!(health.heal(100), 20);
        assert_eq!(health.current(), 100);
    }

    #[test]
    fn test_heal_on_dead_is_noop() {
        let mut health = Health::new(10);
        health.take_damage(10);

        assert_eq!(health.heal(50), 0);
        assert_eq!(health.current(), 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_percentage_bounds() {
        let mut health = Health::new(40);
        assert_eq!(health.percentage(), 1.0);

        health.take_damage(10);
        assert_eq!(health.percentage(), 0.75);

        health.take_damage(1000);
        assert_eq!(health.percentage(), 0.0);
    }

    #[test]
    fn test_zero_max_is_raised() {
        let health = Health::new(0);
        assert_eq!(health.max(), 1);
        assert!(health.is_alive());
    }

    #[test]
    fn test_health_stays_in_range_for_mixed_sequence() {
        let mut health = Health::new(50);
        let ops: [(bool, u32); 8] = [
            (true, 12),
            (false, 5),
            (true, 60),
            (false, 100),
            (true, 1),
            (true, 49),
            (false, 10),
            (true, 7),
        ];

        for (is_damage, amount) in ops {
            if is_damage {
                health.take_damage(amount);
            } else {
                health.heal(amount);
            }
            assert!(health.current() <= health.max());
            assert_eq!(health.current() == 0, !health.is_alive());
        }
    }
}
