//! Animation channel for backdrop bounds

use crate::animation::AnimationSystem;
use crate::ecs::{Entity, World};
use crate::foundation::math::Aabb;

use super::BackdropSystem;

/// Six-value channel holding `[min.x, min.y, min.z, max.x, max.y, max.z]`
/// of a backdrop's content bounds
pub struct BackdropAabbChannel;

impl BackdropAabbChannel {
    /// Channel name
    pub const CHANNEL_NAME: &'static str = "backdrop-aabb";

    /// Values per frame
    pub const DIMENSIONS: usize = 6;

    /// Register the channel with `animation`
    pub fn setup(animation: &mut dyn AnimationSystem, pool_size: usize) {
        animation.register_channel(Self::CHANNEL_NAME, Self::DIMENSIONS, pool_size);
    }

    /// Current value of the channel for `entity`, if it has stored bounds
    pub fn get(system: &BackdropSystem, entity: Entity) -> Option<[f32; 6]> {
        system.backdrop(entity)?.aabb.map(|aabb| aabb.to_array())
    }

    /// Apply one interpolated frame
    pub fn set(system: &mut BackdropSystem, world: &mut World, entity: Entity, values: &[f32]) {
        match Aabb::from_slice(values) {
            Some(aabb) => system.set_backdrop_aabb(world, entity, aabb),
            None => log::warn!(
                "Expected {} values for {}, got {}",
                Self::DIMENSIONS,
                Self::CHANNEL_NAME,
                values.len()
            ),
        }
    }
}
