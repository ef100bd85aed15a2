//! Backdrop component state

use std::time::Duration;

use crate::ecs::{Component, Entity};
use crate::foundation::math::{Aabb, Vec2, Vec3};
use crate::scene::Quad;

use super::def::{AabbBehavior, BackdropDef};

/// Kind of renderable drawn for a backdrop. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderableType {
    /// Quad driven through the render system
    Quad,
    /// Panel driven through the nine-patch system
    NinePatch,
}

/// Per-entity backdrop state
#[derive(Debug, Clone)]
pub struct Backdrop {
    pub(crate) owner: Entity,
    pub(crate) renderable: Entity,
    pub(crate) offset: Vec3,
    pub(crate) bottom_left_margin: Vec2,
    pub(crate) top_right_margin: Vec2,
    pub(crate) aabb_behavior: AabbBehavior,
    pub(crate) renderable_type: RenderableType,
    pub(crate) quad: Quad,
    /// Last resolved content bounds, or the grown footprint while empty
    pub(crate) aabb: Option<Aabb>,
    pub(crate) is_empty: bool,
    pub(crate) animate_aabb_duration: Duration,
}

impl Backdrop {
    /// Build the component for `owner` from its def
    pub fn from_def(owner: Entity, renderable: Entity, def: &BackdropDef) -> Self {
        let (renderable_type, quad) = match &def.quad {
            Some(q) => (
                RenderableType::Quad,
                Quad {
                    size: Vec2::zeros(),
                    verts: (q.verts_x, q.verts_y),
                    corner_radius: q.corner_radius,
                    corner_verts: q.corner_verts,
                    has_uv: q.has_uv,
                },
            ),
            None => (RenderableType::NinePatch, Quad::default()),
        };

        Self {
            owner,
            renderable,
            offset: def.offset,
            bottom_left_margin: def.margin,
            top_right_margin: def.top_right_margin.unwrap_or(def.margin),
            aabb_behavior: def.aabb_behavior,
            renderable_type,
            quad,
            aabb: None,
            is_empty: false,
            animate_aabb_duration: def.animate_aabb_duration(),
        }
    }

    /// Panel child entity
    pub fn renderable(&self) -> Entity {
        self.renderable
    }

    /// Owner bounds policy
    pub fn aabb_behavior(&self) -> AabbBehavior {
        self.aabb_behavior
    }

    /// Renderable kind
    pub fn renderable_type(&self) -> RenderableType {
        self.renderable_type
    }

    /// Current quad geometry
    pub fn quad(&self) -> &Quad {
        &self.quad
    }

    /// Whether the last aggregation found no content
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Grow `aabb` by the offset and margins into the flat panel box.
    ///
    /// The result lies in the plane of its min corner.
    pub fn renderable_aabb(&self, aabb: &Aabb) -> Aabb {
        let mut grown = *aabb;
        grown.min += self.offset
            - Vec3::new(self.bottom_left_margin.x, self.bottom_left_margin.y, 0.0);
        grown.max += Vec3::new(self.top_right_margin.x, self.top_right_margin.y, 0.0);
        grown.max.z = grown.min.z;
        grown
    }

    /// Whether the stored bounds are already the grown footprint
    pub(crate) fn uses_empty_footprint(&self) -> bool {
        self.is_empty && self.aabb_behavior == AabbBehavior::Backdrop
    }
}

impl Component for Backdrop {
    fn entity(&self) -> Entity {
        self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backdrop::def::QuadDef;
    use crate::ecs::World;
    use approx::assert_relative_eq;

    fn def() -> BackdropDef {
        BackdropDef {
            offset: Vec3::new(0.0, 0.0, -0.05),
            margin: Vec2::new(0.1, 0.1),
            ..BackdropDef::default()
        }
    }

    #[test]
    fn test_top_right_defaults_to_bottom_left() {
        let mut world = World::headless();
        let (owner, panel) = (world.create_entity(), world.create_entity());
        let backdrop = Backdrop::from_def(owner, panel, &def());

        assert_eq!(backdrop.top_right_margin, Vec2::new(0.1, 0.1));
        assert_eq!(backdrop.renderable_type(), RenderableType::NinePatch);
        assert_eq!(backdrop.entity(), owner);
        assert_eq!(backdrop.renderable(), panel);
        assert!(backdrop.aabb.is_none());
        assert!(!backdrop.is_empty());
    }

    #[test]
    fn test_quad_block_selects_quad() {
        let mut world = World::headless();
        let (owner, panel) = (world.create_entity(), world.create_entity());
        let def = BackdropDef {
            top_right_margin: Some(Vec2::new(0.3, 0.4)),
            quad: Some(QuadDef {
                corner_radius: 0.2,
                corner_verts: 3,
                ..QuadDef::default()
            }),
            ..def()
        };
        let backdrop = Backdrop::from_def(owner, panel, &def);

        assert_eq!(backdrop.renderable_type(), RenderableType::Quad);
        assert_eq!(backdrop.quad().size, Vec2::zeros());
        assert_eq!(backdrop.quad().verts, (2, 2));
        assert_eq!(backdrop.quad().corner_verts, 3);
        assert_eq!(backdrop.top_right_margin, Vec2::new(0.3, 0.4));
    }

    #[test]
    fn test_renderable_aabb_is_flat() {
        let mut world = World::headless();
        let (owner, panel) = (world.create_entity(), world.create_entity());
        let backdrop = Backdrop::from_def(owner, panel, &def());

        let content = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let grown = backdrop.renderable_aabb(&content);

        assert_relative_eq!(grown.min, Vec3::new(-1.1, -1.1, -1.05), epsilon = 1e-5);
        assert_relative_eq!(grown.max, Vec3::new(1.1, 1.1, -1.05), epsilon = 1e-5);
    }
}
