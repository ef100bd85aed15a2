//! Layout box system seam

use std::collections::HashMap;

use crate::ecs::Entity;

/// Size requested for an entity by a layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesiredSize {
    /// Entity that made the request
    pub source: Entity,
    /// Desired width, `None` if unconstrained
    pub x: Option<f32>,
    /// Desired height, `None` if unconstrained
    pub y: Option<f32>,
    /// Desired depth, `None` if unconstrained
    pub z: Option<f32>,
}

/// Layout sizing requests
pub trait LayoutBoxSystem {
    /// Ask `entity` to take the given size on behalf of `source`
    fn set_desired_size(
        &mut self,
        entity: Entity,
        source: Entity,
        x: Option<f32>,
        y: Option<f32>,
        z: Option<f32>,
    );

    /// Latest desired size for `entity`
    fn desired_size(&self, entity: Entity) -> Option<DesiredSize>;
}

/// In-memory [`LayoutBoxSystem`]
#[derive(Debug, Default)]
pub struct LayoutRecorder {
    desired: HashMap<Entity, DesiredSize>,
}

impl LayoutRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutBoxSystem for LayoutRecorder {
    fn set_desired_size(
        &mut self,
        entity: Entity,
        source: Entity,
        x: Option<f32>,
        y: Option<f32>,
        z: Option<f32>,
    ) {
        self.desired.insert(entity, DesiredSize { source, x, y, z });
    }

    fn desired_size(&self, entity: Entity) -> Option<DesiredSize> {
        self.desired.get(&entity).copied()
    }
}
