//! Nine-patch system seam

use std::collections::HashMap;

use crate::ecs::Entity;
use crate::foundation::math::Vec2;

/// Stretchable bordered panels
pub trait NinePatchSystem {
    /// Resize the nine-patch on `entity`
    fn set_size(&mut self, entity: Entity, size: Vec2);

    /// Current size of the nine-patch on `entity`
    fn size(&self, entity: Entity) -> Option<Vec2>;
}

/// In-memory [`NinePatchSystem`]
#[derive(Debug, Default)]
pub struct NinePatchRecorder {
    sizes: HashMap<Entity, Vec2>,
}

impl NinePatchRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }
}

impl NinePatchSystem for NinePatchRecorder {
    fn set_size(&mut self, entity: Entity, size: Vec2) {
        self.sizes.insert(entity, size);
    }

    fn size(&self, entity: Entity) -> Option<Vec2> {
        self.sizes.get(&entity).copied()
    }
}
