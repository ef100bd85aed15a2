//! Scene collaborators
//!
//! Each collaborator is a trait the backdrop system calls into, paired with
//! a small in-memory implementation used by the default [`World`](crate::ecs::World).

pub mod transform;
pub mod render;
pub mod nine_patch;
pub mod layout;

pub use transform::{TransformSystem, TransformTree};
pub use render::{Quad, RenderRecorder, RenderSystem};
pub use nine_patch::{NinePatchRecorder, NinePatchSystem};
pub use layout::{DesiredSize, LayoutBoxSystem, LayoutRecorder};
