//! Geometry / ray-cast service
//!
//! Combat resolver и hitscan оружие владеют только математикой,
//! сам ray-cast: внешний collaborator за трейтом `RaycastService`.
//!
//! Встроенная реализация `CollisionWorld`: snapshot всех enabled `Collider`
//! AABB, пересобирается из ECS каждый тик (`refresh_collision_world`).
//! Presentation layer может подставить свой backend (engine physics).

use bevy::prelude::*;

use crate::components::Collider;

/// Результат ray-cast (ближайшее пересечение)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
    /// Во что попали (актор или статическая геометрия)
    pub entity: Entity,
}

/// Ray-cast query к геометрии мира
pub trait RaycastService {
    /// Луч из `origin` вдоль `direction` (нормализуется внутри) длиной `max_distance`.
    /// Entities из `ignore` не участвуют в пересечении.
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32, ignore: &[Entity]) -> Option<RayHit>;
}

/// AABB конкретного entity в world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderBox {
    pub entity: Entity,
    pub min: Vec3,
    pub max: Vec3,
}

/// Snapshot коллайдеров на текущий тик
#[derive(Resource, Debug, Clone, Default)]
pub struct CollisionWorld {
    boxes: Vec<ColliderBox>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity, min: Vec3, max: Vec3) {
        self.boxes.push(ColliderBox { entity, min, max });
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }

}

impl RaycastService for CollisionWorld {
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32, ignore: &[Entity]) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || max_distance <= 0.0 {
            return None;
        }

        let mut nearest: Option<(Entity, f32)> = None;

        for collider in &self.boxes {
            if ignore.contains(&collider.entity) {
                continue;
            }

            let Some(distance) = ray_aabb(origin, direction, collider.min, collider.max) else {
                continue;
            };

            if distance > max_distance {
                continue;
            }

            match nearest {
                Some((_, best)) if best <= distance => {}
                _ => nearest = Some((collider.entity, distance)),
            }
        }

        nearest.map(|(entity, distance)| RayHit {
            point: origin + direction * distance,
            distance,
            entity,
        })
    }
}

/// Slab test: расстояние вдоль луча до входа в AABB
///
/// `direction` должен быть нормализован. Origin внутри коробки → Some(0.0).
pub fn ray_aabb(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = direction.recip();
    let t1 = (min - origin) * inv;
    let t2 = (max - origin) * inv;

    let t_enter = t1.min(t2).max_element();
    let t_exit = t1.max(t2).min_element();

    if t_exit < 0.0 || t_enter > t_exit {
        return None;
    }

    Some(t_enter.max(0.0))
}

/// System: пересобрать CollisionWorld из ECS коллайдеров
pub fn refresh_collision_world(
    mut world: ResMut<CollisionWorld>,
    colliders: Query<(Entity, &Transform, &Collider)>,
) {
    world.clear();

    for (entity, transform, collider) in colliders.iter() {
        if !collider.enabled {
            continue;
        }
        let (min, max) = collider.bounds(transform.translation);
        world.insert(entity, min, max);
    }
}
