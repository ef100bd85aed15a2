//! Render system seam for flat quads

use std::collections::HashMap;

use crate::ecs::Entity;
use crate::foundation::math::Vec2;

/// Flat, optionally rounded quad geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    /// Width and height
    pub size: Vec2,
    /// Vertex count along x and y
    pub verts: (i32, i32),
    /// Radius of rounded corners, 0 for square corners
    pub corner_radius: f32,
    /// Vertices per rounded corner
    pub corner_verts: i32,
    /// Whether to generate texture coordinates
    pub has_uv: bool,
}

impl Default for Quad {
    fn default() -> Self {
        Self {
            size: Vec2::zeros(),
            verts: (2, 2),
            corner_radius: 0.0,
            corner_verts: 0,
            has_uv: false,
        }
    }
}

/// Render state other systems may drive
pub trait RenderSystem {
    /// Replace the quad drawn for `entity`
    fn set_quad(&mut self, entity: Entity, quad: &Quad);

    /// Quad currently drawn for `entity`
    fn quad(&self, entity: Entity) -> Option<&Quad>;

    /// Draw-order offset of `entity` relative to its siblings
    fn sort_order_offset(&self, entity: Entity) -> i32;

    /// Set the draw-order offset of `entity`, recomputing its sort order
    fn set_sort_order_offset(&mut self, entity: Entity, offset: i32);
}

/// In-memory [`RenderSystem`] that keeps the latest state per entity
#[derive(Debug, Default)]
pub struct RenderRecorder {
    quads: HashMap<Entity, Quad>,
    sort_order_offsets: HashMap<Entity, i32>,
}

impl RenderRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSystem for RenderRecorder {
    fn set_quad(&mut self, entity: Entity, quad: &Quad) {
        self.quads.insert(entity, quad.clone());
    }

    fn quad(&self, entity: Entity) -> Option<&Quad> {
        self.quads.get(&entity)
    }

    fn sort_order_offset(&self, entity: Entity) -> i32 {
        self.sort_order_offsets.get(&entity).copied().unwrap_or(0)
    }

    fn set_sort_order_offset(&mut self, entity: Entity, offset: i32) {
        self.sort_order_offsets.insert(entity, offset);
    }
}
