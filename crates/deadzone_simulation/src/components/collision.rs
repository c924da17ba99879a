//! Collision компоненты: AABB collider для ray-cast запросов

use bevy::prelude::*;

/// Axis-aligned box collider
///
/// Центр коробки = Transform.translation + `offset`.
/// `enabled == false`: коллайдер не участвует в ray-cast (трупы).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Collider {
    pub half_extents: Vec3,
    pub offset: Vec3,
    pub enabled: bool,
}

impl Collider {
    /// Коробка с центром в Transform.translation
    pub fn cuboid(size: Vec3) -> Self {
        Self {
            half_extents: size * 0.5,
            offset: Vec3::ZERO,
            enabled: true,
        }
    }

    /// Коллайдер актора: origin в ногах, коробка вверх на `height`
    pub fn actor(width: f32, height: f32) -> Self {
        Self {
            half_extents: Vec3::new(width * 0.5, height * 0.5, width * 0.5),
            offset: Vec3::new(0.0, height * 0.5, 0.0),
            enabled: true,
        }
    }

    /// World-space AABB (min, max)
    pub fn bounds(&self, translation: Vec3) -> (Vec3, Vec3) {
        let center = translation + self.offset;
        (center - self.half_extents, center + self.half_extents)
    }
}

/// Marker: статическая геометрия уровня (пол, стены, колонны)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct StaticGeometry;
