//! Backdrop system
//!
//! Keeps a flat panel child sized to the bounds of its siblings:
//! 1. Aggregate the transformed bounds of every enabled content child
//! 2. Grow them by the configured offset and margins
//! 3. Move and resize the panel, immediately or through the animation system
//! 4. Push the result into the owner's own bounds so enclosing layouts see it
//!
//! The system reacts to hierarchy, bounds and enable-state events raised by
//! the [`TransformSystem`](crate::scene::TransformSystem). Every public
//! mutating call drains those events before returning, so changes caused by
//! the call itself are handled before the caller sees the result.

use std::time::Duration;

use crate::ecs::{ComponentPool, Entity, World};
use crate::events::{drain_events, Event, EventHandler, EventType, SubscriberId};
use crate::foundation::math::{Aabb, Transform};
use crate::scene::Quad;

use super::channel::BackdropAabbChannel;
use super::component::{Backdrop, RenderableType};
use super::def::{AabbBehavior, BackdropDef};
use super::error::BackdropError;

/// Def type tag accepted by [`BackdropSystem::create`]
pub const BACKDROP_DEF_TYPE: &str = "BackdropDef";

const BACKDROP_POOL_PAGE_SIZE: usize = 4;
const ANIMATION_POOL_SIZE: usize = 8;

fn report(err: BackdropError) -> BackdropError {
    log::error!("{err}");
    err
}

/// Owns every [`Backdrop`] and keeps their panels in sync with the scene
#[derive(Debug)]
pub struct BackdropSystem {
    backdrops: ComponentPool<Backdrop>,
    subscriber: Option<SubscriberId>,
}

impl BackdropSystem {
    /// Create the system and subscribe it to `world`'s scene events
    pub fn new(world: &World) -> Self {
        let subscriber = world.dispatcher().connect(&[
            EventType::ParentChanged,
            EventType::AabbChanged,
            EventType::Disabled,
            EventType::Enabled,
            EventType::DesiredSizeChanged,
        ]);
        Self {
            backdrops: ComponentPool::with_capacity(BACKDROP_POOL_PAGE_SIZE),
            subscriber: Some(subscriber),
        }
    }

    /// Register the bounds animation channel if `world` can animate
    pub fn initialize(&mut self, world: &mut World) {
        match world.animation_system_mut() {
            Some(animation) => BackdropAabbChannel::setup(animation, ANIMATION_POOL_SIZE),
            None => log::debug!("No animation system, backdrop bounds will not animate"),
        }
    }

    /// Drop the event subscription. Pending events are discarded.
    pub fn shutdown(&mut self, world: &World) {
        if let Some(subscriber) = self.subscriber.take() {
            world.dispatcher().disconnect_all(subscriber);
        }
    }

    /// Give `entity` a backdrop described by `def`.
    ///
    /// `def_type` is the type tag the def was registered under and must be
    /// [`BACKDROP_DEF_TYPE`]. The panel child is created from
    /// `def.blueprint`, or as a bare child when there is none.
    pub fn create(
        &mut self,
        world: &mut World,
        entity: Entity,
        def_type: &str,
        def: &BackdropDef,
    ) -> Result<(), BackdropError> {
        if def_type != BACKDROP_DEF_TYPE {
            return Err(report(BackdropError::InvalidDefType(def_type.to_owned())));
        }
        if self.backdrops.contains(entity) {
            return Err(report(BackdropError::AlreadyExists(entity)));
        }
        if def.quad.is_none() && world.nine_patch_system().is_none() {
            return Err(report(BackdropError::MissingNinePatchSystem(entity)));
        }

        // Attaching the panel raises ParentChanged, which needs the backdrop
        // to be stored already
        let renderable = world.create_entity();
        self.backdrops.emplace(Backdrop::from_def(entity, renderable, def));

        let transforms = world.transform_system_mut();
        match def.blueprint.as_deref().filter(|b| !b.is_empty()) {
            Some(blueprint) => transforms.create_child_with_blueprint(entity, renderable, blueprint),
            None => {
                log::warn!("BackdropDef for {entity} has no blueprint, using a bare panel");
                transforms.create(renderable, Transform::identity());
                transforms.add_child(entity, renderable);
            }
        }

        if transforms.parent(renderable) != Some(entity) {
            transforms.destroy(renderable);
            self.backdrops.destroy(entity);
            return Err(report(BackdropError::PanelNotAttached(entity)));
        }

        log::debug!("Created backdrop for {entity} with panel {renderable}");
        self.process_events(world);
        Ok(())
    }

    /// Forget the backdrop of `entity`. The panel entity stays in the
    /// hierarchy.
    pub fn destroy(&mut self, entity: Entity) {
        self.backdrops.destroy(entity);
    }

    /// Whether `entity` has a backdrop
    pub fn has_backdrop(&self, entity: Entity) -> bool {
        self.backdrops.contains(entity)
    }

    /// Backdrop component of `entity`
    pub fn backdrop(&self, entity: Entity) -> Option<&Backdrop> {
        self.backdrops.get(entity)
    }

    fn backdrop_or_warn(&self, entity: Entity) -> Option<&Backdrop> {
        let backdrop = self.backdrops.get(entity);
        if backdrop.is_none() {
            log::warn!("{entity} is not registered with the BackdropSystem");
        }
        backdrop
    }

    fn backdrop_mut_or_warn(&mut self, entity: Entity) -> Option<&mut Backdrop> {
        let backdrop = self.backdrops.get_mut(entity);
        if backdrop.is_none() {
            log::warn!("{entity} is not registered with the BackdropSystem");
        }
        backdrop
    }

    /// Panel child of `entity`'s backdrop
    pub fn backdrop_renderable_entity(&self, entity: Entity) -> Option<Entity> {
        self.backdrop_or_warn(entity).map(Backdrop::renderable)
    }

    /// Replace the quad geometry and refit the panel. Nine-patch backdrops
    /// ignore this.
    pub fn set_backdrop_quad(&mut self, world: &mut World, entity: Entity, quad: Quad) {
        let Some(backdrop) = self.backdrop_mut_or_warn(entity) else {
            return;
        };
        if backdrop.renderable_type != RenderableType::Quad {
            log::warn!("Backdrop on {entity} is not a quad, setting its quad does nothing");
            return;
        }
        backdrop.quad = quad;
        self.update_backdrop(world, entity);
        self.process_events(world);
    }

    /// Last resolved content bounds of `entity`'s backdrop. `None` before
    /// the first resolution.
    pub fn backdrop_aabb(&self, entity: Entity) -> Option<&Aabb> {
        self.backdrop_or_warn(entity)?.aabb.as_ref()
    }

    /// Fit the panel around `aabb`, given in the owner's local space
    pub fn set_backdrop_aabb(&mut self, world: &mut World, entity: Entity, aabb: Aabb) {
        self.apply_backdrop_aabb(world, entity, aabb);
        self.process_events(world);
    }

    /// How long bounds changes take to animate
    pub fn backdrop_aabb_animation_duration(&self, entity: Entity) -> Duration {
        self.backdrop_or_warn(entity)
            .map_or(Duration::ZERO, |b| b.animate_aabb_duration)
    }

    /// Set how long bounds changes take to animate. Zero applies them
    /// immediately.
    pub fn set_backdrop_aabb_animation_duration(&mut self, entity: Entity, duration: Duration) {
        if let Some(backdrop) = self.backdrop_mut_or_warn(entity) {
            backdrop.animate_aabb_duration = duration;
        }
    }

    /// Handle every pending scene event
    pub fn process_events(&mut self, world: &mut World) -> usize {
        match self.subscriber {
            Some(subscriber) => drain_events(world, subscriber, self),
            None => 0,
        }
    }

    /// Step running bounds animations by `delta` and apply their frames
    pub fn advance_animations(&mut self, world: &mut World, delta: Duration) {
        let frames = {
            let Some(animation) = world.animation_system_mut() else {
                return;
            };
            let this = &*self;
            let current = move |entity: Entity, channel: &str| {
                if channel == BackdropAabbChannel::CHANNEL_NAME {
                    BackdropAabbChannel::get(this, entity).map(Vec::from)
                } else {
                    None
                }
            };
            animation.advance(delta, &current)
        };

        for frame in frames {
            if frame.channel == BackdropAabbChannel::CHANNEL_NAME {
                BackdropAabbChannel::set(self, world, frame.entity, &frame.values);
            }
        }
        self.process_events(world);
    }

    /// Re-aggregate the children of `owner` and refit its panel
    fn update_backdrop(&mut self, world: &mut World, owner: Entity) {
        let Some(renderable) = self.backdrops.get(owner).map(Backdrop::renderable) else {
            return;
        };

        let transforms = world.transform_system();
        let children = match transforms.children(owner) {
            Some(children) if !children.is_empty() => children,
            _ => {
                report(BackdropError::MissingChild(owner));
                return;
            }
        };

        // Rotated children grow to the bounds of their transformed corners
        let content = children
            .iter()
            .copied()
            .filter(|&child| child != renderable && transforms.is_enabled(child))
            .filter_map(|child| {
                let sqt = transforms.sqt(child)?;
                Some(transforms.aabb(child)?.transformed_bounds(sqt))
            })
            .reduce(|acc, bounds| acc.merge(&bounds));

        let Some(backdrop) = self.backdrops.get_mut(owner) else {
            return;
        };
        let resolved = match content {
            Some(bounds) => {
                // Grow from nothing rather than from the empty footprint
                if backdrop.is_empty && backdrop.aabb_behavior == AabbBehavior::Backdrop {
                    backdrop.aabb = Some(Aabb::default());
                }
                backdrop.is_empty = false;
                bounds
            }
            None if backdrop.aabb_behavior == AabbBehavior::Backdrop => {
                // Shrink towards the footprint the panel keeps with no content
                if !backdrop.is_empty {
                    if let Some(stored) = backdrop.aabb {
                        backdrop.aabb = Some(backdrop.renderable_aabb(&stored));
                    }
                }
                backdrop.is_empty = true;
                backdrop.renderable_aabb(&Aabb::default())
            }
            None => {
                backdrop.is_empty = true;
                Aabb::default()
            }
        };
        log::debug!("Backdrop on {owner} resolved to {:?}", resolved.to_array());

        let duration = backdrop.animate_aabb_duration;
        // The first resolution is never animated
        if duration.is_zero() || backdrop.aabb.is_none() {
            self.apply_backdrop_aabb(world, owner, resolved);
            return;
        }

        match world.animation_system_mut() {
            Some(animation) if animation.has_channel(BackdropAabbChannel::CHANNEL_NAME) => {
                log::debug!("Animating backdrop on {owner} over {duration:?}");
                animation.set_target(
                    owner,
                    BackdropAabbChannel::CHANNEL_NAME,
                    &resolved.to_array(),
                    duration,
                );
            }
            _ => {
                report(BackdropError::MissingAnimationSystem(owner));
                self.apply_backdrop_aabb(world, owner, resolved);
            }
        }
    }

    fn apply_backdrop_aabb(&mut self, world: &mut World, owner: Entity, aabb: Aabb) {
        let Some(backdrop) = self.backdrop_mut_or_warn(owner) else {
            return;
        };

        let panel = if backdrop.uses_empty_footprint() {
            aabb
        } else {
            backdrop.renderable_aabb(&aabb)
        };

        let mut translation = panel.center();
        translation.z = panel.min.z;
        backdrop.quad.size = panel.size().xy();
        world
            .transform_system_mut()
            .set_sqt(backdrop.renderable, Transform::from_position(translation));

        match backdrop.renderable_type {
            RenderableType::Quad => world
                .render_system_mut()
                .set_quad(backdrop.renderable, &backdrop.quad),
            RenderableType::NinePatch => match world.nine_patch_system_mut() {
                Some(nine_patch) => nine_patch.set_size(backdrop.renderable, backdrop.quad.size),
                None => {
                    report(BackdropError::MissingNinePatchSystem(owner));
                }
            },
        }

        // Owner bounds are set from here so AabbChanged on the owner never
        // needs a second aggregation
        match backdrop.aabb_behavior {
            AabbBehavior::None => {}
            AabbBehavior::Content => world.transform_system_mut().set_aabb(owner, aabb),
            AabbBehavior::Backdrop => world
                .transform_system_mut()
                .set_aabb(owner, aabb.merge(&panel)),
        }

        backdrop.aabb = Some(aabb);
    }

    fn on_entity_changed(&mut self, world: &mut World, entity: Entity) {
        if let Some(parent) = world.transform_system().parent(entity) {
            if self
                .backdrops
                .get(parent)
                .is_some_and(|b| b.renderable != entity)
            {
                self.update_backdrop(world, parent);
            }
        }

        // Sort order is only recomputed when the offset is set
        if let Some(renderable) = self.backdrops.get(entity).map(Backdrop::renderable) {
            let render = world.render_system_mut();
            let offset = render.sort_order_offset(renderable);
            render.set_sort_order_offset(renderable, offset);
        }
    }

    fn on_desired_size_changed(
        &mut self,
        world: &mut World,
        target: Entity,
        source: Entity,
        size: (Option<f32>, Option<f32>, Option<f32>),
    ) {
        if !self.backdrops.contains(target) {
            return;
        }
        let children = world
            .transform_system()
            .children(target)
            .map(<[Entity]>::to_vec)
            .unwrap_or_default();
        let Some(layout) = world.layout_box_system_mut() else {
            log::warn!("No layout box system to forward the desired size of {target}");
            return;
        };
        let (x, y, z) = size;
        for child in children {
            layout.set_desired_size(child, source, x, y, z);
        }
    }
}

impl EventHandler for BackdropSystem {
    fn on_event(&mut self, world: &mut World, event: &Event) {
        match *event {
            Event::ParentChanged { old_parent, new_parent, .. } => {
                for parent in [old_parent, new_parent].into_iter().flatten() {
                    if self.backdrops.contains(parent) {
                        self.update_backdrop(world, parent);
                    }
                }
            }
            Event::AabbChanged { target }
            | Event::Enabled { target }
            | Event::Disabled { target } => self.on_entity_changed(world, target),
            Event::DesiredSizeChanged { target, source, x, y, z } => {
                self.on_desired_size_changed(world, target, source, (x, y, z));
            }
        }
    }
}
