//! Simulation clock + delayed side effects
//!
//! "Suspension" в симуляции = отложенный side effect (спрятать muzzle flash,
//! удалить труп), привязанный к монотонному `SimClock`. Никаких блокирующих
//! ожиданий: эффект срабатывает на одном из следующих тиков.
//!
//! Эффект принадлежит entity (owner). Если owner удалён раньше: эффект
//! отменяется (`cancel_effects_for_removed`), stale handle не трогаем.

use bevy::prelude::*;

use crate::combat::MuzzleFlash;
use crate::components::Actor;

/// Фазы FixedUpdate тика (total order, `.chain()` в SimulationPlugin)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Clock + collision snapshot
    Prepare,
    /// Player commands, weapon ticking, стрельба
    Player,
    /// Enemy AI (по одному entity)
    Ai,
    /// Heal requests, death handling
    Resolve,
    /// Session bookkeeping (score, game over)
    Session,
    /// Delayed effects
    Effects,
}

/// Монотонное время симуляции (сумма fixed delta), секунды
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    elapsed: f64,
}

impl SimClock {
    pub fn now(&self) -> f64 {
        self.elapsed
    }

    pub fn advance(&mut self, delta: f32) {
        self.elapsed += f64::from(delta.max(0.0));
    }
}

/// Handle запланированного эффекта (для отмены)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u64);

/// Что сделать когда таймер истечёт
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayedEffect {
    HideMuzzleFlash,
    Despawn,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEffect {
    pub id: EffectId,
    pub owner: Entity,
    pub due: f64,
    pub effect: DelayedEffect,
}

/// Очередь отложенных эффектов
#[derive(Resource, Debug, Default)]
pub struct DelayedEffects {
    pending: Vec<ScheduledEffect>,
    next_id: u64,
}

impl DelayedEffects {
    /// Запланировать `effect` через `delay` секунд от текущего `clock`
    pub fn schedule(&mut self, clock: &SimClock, owner: Entity, delay: f32, effect: DelayedEffect) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;

        self.pending.push(ScheduledEffect {
            id,
            owner,
            due: clock.now() + f64::from(delay.max(0.0)),
            effect,
        });

        id
    }

    /// false: эффект уже сработал или отменён
    pub fn cancel(&mut self, id: EffectId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|scheduled| scheduled.id != id);
        self.pending.len() != before
    }

    /// Отменить все эффекты owner'а, возвращает сколько отменено
    pub fn cancel_for(&mut self, owner: Entity) -> usize {
        let before = self.pending.len();
        self.pending.retain(|scheduled| scheduled.owner != owner);
        before - self.pending.len()
    }

    /// Забрать эффекты с `due ≤ now`, в порядке (due, id)
    pub fn take_due(&mut self, now: f64) -> Vec<ScheduledEffect> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|scheduled| scheduled.due <= now);
        self.pending = pending;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)));
        due
    }

    pub fn pending_for(&self, owner: Entity) -> impl Iterator<Item = &ScheduledEffect> {
        self.pending.iter().filter(move |scheduled| scheduled.owner == owner)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Scheduler Plugin
///
/// Ресурсы: SimClock, DelayedEffects.
/// Системы: advance_sim_clock (Prepare), cancel_effects_for_removed → run_delayed_effects (Effects).
pub struct SchedulerPlugin;

impl Plugin for SchedulerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimClock>()
            .init_resource::<DelayedEffects>()
            .add_systems(FixedUpdate, advance_sim_clock.in_set(SimulationSet::Prepare))
            .add_systems(
                FixedUpdate,
                (cancel_effects_for_removed, run_delayed_effects)
                    .chain()
                    .in_set(SimulationSet::Effects),
            );
    }
}

/// System: SimClock += fixed delta
pub fn advance_sim_clock(time: Res<Time<Fixed>>, mut clock: ResMut<SimClock>) {
    clock.advance(time.delta_secs());
}

/// System: отменить эффекты акторов, удалённых не через scheduler
pub fn cancel_effects_for_removed(mut removed: RemovedComponents<Actor>, mut effects: ResMut<DelayedEffects>) {
    for entity in removed.read() {
        let cancelled = effects.cancel_for(entity);
        if cancelled > 0 {
            crate::logger::log(&format!(
                "🗑️ Cancelled {} delayed effect(s) for removed {:?}",
                cancelled, entity
            ));
        }
    }
}

/// System: выполнить эффекты, чей таймер истёк
///
/// Owner, которого уже нет в мире, пропускается.
pub fn run_delayed_effects(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut effects: ResMut<DelayedEffects>,
    mut flashes: Query<&mut MuzzleFlash>,
) {
    for scheduled in effects.take_due(clock.now()) {
        match scheduled.effect {
            DelayedEffect::HideMuzzleFlash => {
                if let Ok(mut flash) = flashes.get_mut(scheduled.owner) {
                    flash.visible = false;
                }
            }
            DelayedEffect::Despawn => {
                if let Ok(mut entity_commands) = commands.get_entity(scheduled.owner) {
                    entity_commands.despawn();
                    crate::logger::log(&format!("💀 Despawned {:?} (delayed)", scheduled.owner));
                }
            }
        }
    }
}
