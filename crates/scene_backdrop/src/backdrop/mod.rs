//! Backdrop panels
//!
//! A backdrop is a flat quad or nine-patch child that follows the bounds of
//! its siblings, grown by a margin and offset. See [`BackdropSystem`] for the
//! update rules and [`BackdropDef`] for configuration.

pub mod def;
pub mod component;
pub mod channel;
pub mod error;
pub mod system;

#[cfg(test)]
mod tests;

pub use def::{AabbBehavior, BackdropDef, QuadDef};
pub use component::{Backdrop, RenderableType};
pub use channel::BackdropAabbChannel;
pub use error::BackdropError;
pub use system::{BackdropSystem, BACKDROP_DEF_TYPE};

/// Names under which script hosts expose the backdrop queries
pub mod bindings {
    /// [`BackdropSystem::has_backdrop`](super::BackdropSystem::has_backdrop)
    pub const HAS_BACKDROP: &str = "lull.Backdrop.HasBackdrop";
    /// [`BackdropSystem::backdrop_renderable_entity`](super::BackdropSystem::backdrop_renderable_entity)
    pub const GET_BACKDROP_RENDERABLE_ENTITY: &str = "lull.Backdrop.GetBackdropRenderableEntity";
    /// [`BackdropSystem::backdrop_aabb_animation_duration`](super::BackdropSystem::backdrop_aabb_animation_duration)
    pub const GET_BACKDROP_AABB_ANIMATION_DURATION: &str =
        "lull.Backdrop.GetBackdropAabbAnimationDuration";
    /// [`BackdropSystem::set_backdrop_aabb_animation_duration`](super::BackdropSystem::set_backdrop_aabb_animation_duration)
    pub const SET_BACKDROP_AABB_ANIMATION_DURATION: &str =
        "lull.Backdrop.SetBackdropAabbAnimationDuration";

    /// Every binding name
    pub const ALL: [&str; 4] = [
        HAS_BACKDROP,
        GET_BACKDROP_RENDERABLE_ENTITY,
        GET_BACKDROP_AABB_ANIMATION_DURATION,
        SET_BACKDROP_AABB_ANIMATION_DURATION,
    ];
}
