//! Line-of-Sight (LOS): чистая математика поверх `RaycastService`
//!
//! Луч идёт с уровня глаз (position + eye_height) к уровню глаз цели,
//! длина = прямое расстояние. Оба entity и caller-supplied ignore
//! исключены из occlusion.

use bevy::prelude::*;

use crate::geometry::RaycastService;

/// Участник LOS проверки (handle + позиция "ног")
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SightPoint {
    pub entity: Entity,
    pub position: Vec3,
}

impl SightPoint {
    pub fn new(entity: Entity, position: Vec3) -> Self {
        Self { entity, position }
    }
}

/// true если между `from` и `to` нет препятствий
pub fn is_line_of_sight(
    raycast: &dyn RaycastService,
    eye_height: f32,
    from: SightPoint,
    to: SightPoint,
    ignore: &[Entity],
) -> bool {
    let eye_offset = Vec3::new(0.0, eye_height, 0.0);
    let from_eye = from.position + eye_offset;
    let to_eye = to.position + eye_offset;

    let delta = to_eye - from_eye;
    let distance = delta.length();
    if distance <= f32::EPSILON {
        return true;
    }

    let mut excluded = Vec::with_capacity(ignore.len() + 2);
    excluded.extend_from_slice(ignore);
    excluded.push(from.entity);
    excluded.push(to.entity);

    match raycast.cast(from_eye, delta / distance, distance, &excluded) {
        Some(hit) => hit.distance >= distance,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CollisionWorld;

    fn actors() -> (SightPoint, SightPoint) {
        (
            SightPoint::new(Entity::from_raw(1), Vec3::new(0.0, 0.0, 0.0)),
            SightPoint::new(Entity::from_raw(2), Vec3::new(0.0, 0.0, 20.0)),
        )
    }

    #[test]
    fn test_clear_path_has_los() {
        let world = CollisionWorld::new();
        let (a, b) = actors();

        assert!(is_line_of_sight(&world, 1.0, a, b, &[]));
    }

    #[test]
    fn test_occluder_blocks_los() {
        let mut world = CollisionWorld::new();
        let (a, b) = actors();
        // Колонна посередине, перекрывает уровень глаз
        world.insert(Entity::from_raw(10), Vec3::new(-1.0, 0.0, 9.0), Vec3::new(1.0, 4.0, 11.0));

        assert!(!is_line_of_sight(&world, 1.0, a, b, &[]));
    }

    #[test]
    fn test_own_colliders_do_not_block() {
        let mut world = CollisionWorld::new();
        let (a, b) = actors();
        world.insert(a.entity, Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 2.0, 0.5));
        world.insert(b.entity, Vec3::new(-0.5, 0.0, 19.5), Vec3::new(0.5, 2.0, 20.5));

        assert!(is_line_of_sight(&world, 1.0, a, b, &[]));
    }

    #[test]
    fn test_ignore_list_excludes_occluder() {
        let mut world = CollisionWorld::new();
        let (a, b) = actors();
        let crate_box = Entity::from_raw(10);
        world.insert(crate_box, Vec3::new(-1.0, 0.0, 9.0), Vec3::new(1.0, 4.0, 11.0));

        assert!(is_line_of_sight(&world, 1.0, a, b, &[crate_box]));
    }

    #[test]
    fn test_low_wall_below_eye_level_does_not_block() {
        let mut world = CollisionWorld::new();
        let (a, b) = actors();
        world.insert(Entity::from_raw(10), Vec3::new(-1.0, 0.0, 9.0), Vec3::new(1.0, 0.5, 11.0));

        assert!(is_line_of_sight(&world, 1.0, a, b, &[]));
    }

    #[test]
    fn test_occluder_behind_target_does_not_block() {
        let mut world = CollisionWorld::new();
        let (a, b) = actors();
        world.insert(Entity::from_raw(10), Vec3::new(-1.0, 0.0, 25.0), Vec3::new(1.0, 4.0, 27.0));

        assert!(is_line_of_sight(&world, 1.0, a, b, &[]));
    }
}
