//! # Scene Backdrop
//!
//! Backdrop panels for an entity/transform scene hierarchy. A backdrop is a
//! flat quad or nine-patch child that resizes itself to enclose the bounds
//! of its siblings, grown by a margin and offset, and optionally animates
//! between sizes.
//!
//! ## Features
//!
//! - **Bounds aggregation**: union of the transformed boxes of enabled children
//! - **Owner bounds policies**: leave alone, content only, or content plus panel
//! - **Animated transitions**: through any [`AnimationSystem`](animation::AnimationSystem)
//! - **RON/TOML configuration**: through the [`Config`](config::Config) trait
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_backdrop::prelude::*;
//!
//! let mut world = World::new();
//! let mut backdrops = BackdropSystem::new(&world);
//! backdrops.initialize(&mut world);
//!
//! let panel_owner = world.create_entity();
//! world.transform_system_mut().create(panel_owner, Transform::identity());
//!
//! let def = BackdropDef::from_ron_str("(margin: (0.1, 0.1), aabb_behavior: Content)").unwrap();
//! backdrops.create(&mut world, panel_owner, BACKDROP_DEF_TYPE, &def).unwrap();
//! assert!(backdrops.has_backdrop(panel_owner));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod ecs;
pub mod events;
pub mod scene;
pub mod animation;
pub mod config;
pub mod backdrop;

/// Common imports
pub mod prelude {
    pub use crate::animation::{AnimationSystem, Tweener};
    pub use crate::backdrop::{
        AabbBehavior, BackdropDef, BackdropError, BackdropSystem, QuadDef, BACKDROP_DEF_TYPE,
    };
    pub use crate::config::{Config, ConfigError};
    pub use crate::ecs::{Entity, World};
    pub use crate::events::{Event, EventType};
    pub use crate::foundation::math::{Aabb, Transform, Vec2, Vec3};
    pub use crate::scene::{LayoutBoxSystem, NinePatchSystem, Quad, RenderSystem, TransformSystem};
}
