//! ECS World implementation

use super::Entity;
use crate::animation::{AnimationSystem, Tweener};
use crate::events::Dispatcher;
use crate::scene::{
    LayoutBoxSystem, LayoutRecorder, NinePatchRecorder, NinePatchSystem, RenderRecorder,
    RenderSystem, TransformSystem, TransformTree,
};

/// ECS World: entity allocation, the event bus and the collaborator systems
/// a scene system may call into.
///
/// The transform and render systems are always present. Nine-patch,
/// animation and layout systems are optional, and callers must cope with
/// their absence.
pub struct World {
    next_entity_id: u32,
    dispatcher: Dispatcher,
    transform: Box<dyn TransformSystem>,
    render: Box<dyn RenderSystem>,
    nine_patch: Option<Box<dyn NinePatchSystem>>,
    animation: Option<Box<dyn AnimationSystem>>,
    layout: Option<Box<dyn LayoutBoxSystem>>,
}

impl World {
    /// Create a world with every reference collaborator installed
    pub fn new() -> Self {
        Self::headless()
            .with_nine_patch_system(Box::new(NinePatchRecorder::new()))
            .with_animation_system(Box::new(Tweener::new()))
            .with_layout_box_system(Box::new(LayoutRecorder::new()))
    }

    /// Create a world with only the transform and render systems
    pub fn headless() -> Self {
        let dispatcher = Dispatcher::new();
        Self {
            // Id 0 is never handed out
            next_entity_id: 1,
            transform: Box::new(TransformTree::new(dispatcher.clone())),
            render: Box::new(RenderRecorder::new()),
            dispatcher,
            nine_patch: None,
            animation: None,
            layout: None,
        }
    }

    /// Replace the render system
    #[must_use]
    pub fn with_render_system(mut self, render: Box<dyn RenderSystem>) -> Self {
        self.render = render;
        self
    }

    /// Install a nine-patch system
    #[must_use]
    pub fn with_nine_patch_system(mut self, nine_patch: Box<dyn NinePatchSystem>) -> Self {
        self.nine_patch = Some(nine_patch);
        self
    }

    /// Install an animation system
    #[must_use]
    pub fn with_animation_system(mut self, animation: Box<dyn AnimationSystem>) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Install a layout box system
    #[must_use]
    pub fn with_layout_box_system(mut self, layout: Box<dyn LayoutBoxSystem>) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        entity
    }

    /// Event bus shared by every system in this world
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Transform hierarchy
    pub fn transform_system(&self) -> &dyn TransformSystem {
        self.transform.as_ref()
    }

    /// Mutable transform hierarchy
    pub fn transform_system_mut(&mut self) -> &mut dyn TransformSystem {
        self.transform.as_mut()
    }

    /// Render system
    pub fn render_system(&self) -> &dyn RenderSystem {
        self.render.as_ref()
    }

    /// Mutable render system
    pub fn render_system_mut(&mut self) -> &mut dyn RenderSystem {
        self.render.as_mut()
    }

    /// Nine-patch system, if installed
    pub fn nine_patch_system(&self) -> Option<&dyn NinePatchSystem> {
        self.nine_patch.as_deref()
    }

    /// Mutable nine-patch system, if installed
    pub fn nine_patch_system_mut(&mut self) -> Option<&mut (dyn NinePatchSystem + 'static)> {
        self.nine_patch.as_deref_mut()
    }

    /// Animation system, if installed
    pub fn animation_system(&self) -> Option<&dyn AnimationSystem> {
        self.animation.as_deref()
    }

    /// Mutable animation system, if installed
    pub fn animation_system_mut(&mut self) -> Option<&mut (dyn AnimationSystem + 'static)> {
        self.animation.as_deref_mut()
    }

    /// Layout box system, if installed
    pub fn layout_box_system(&self) -> Option<&dyn LayoutBoxSystem> {
        self.layout.as_deref()
    }

    /// Mutable layout box system, if installed
    pub fn layout_box_system_mut(&mut self) -> Option<&mut (dyn LayoutBoxSystem + 'static)> {
        self.layout.as_deref_mut()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
