//! Transform hierarchy
//!
//! [`TransformSystem`] is the seam other systems use to walk and edit the
//! parent/child tree. [`TransformTree`] is the in-memory implementation: it
//! stores a local transform, an optional local AABB and an enable flag per
//! entity, and raises hierarchy events on the shared [`Dispatcher`].

use std::collections::HashMap;

use crate::ecs::Entity;
use crate::events::{Dispatcher, Event};
use crate::foundation::math::{Aabb, Transform};

/// Parent/child hierarchy with per-entity local transforms and bounds
pub trait TransformSystem {
    /// Register `entity` with a local transform and no parent
    fn create(&mut self, entity: Entity, sqt: Transform);

    /// Instantiate `child` from `blueprint` and attach it under `parent`
    fn create_child_with_blueprint(&mut self, parent: Entity, child: Entity, blueprint: &str);

    /// Attach `child` under `parent`, detaching it from any previous parent
    fn add_child(&mut self, parent: Entity, child: Entity);

    /// Detach `child` from its parent, if it has one
    fn remove_parent(&mut self, child: Entity);

    /// Remove `entity` and all of its descendants
    fn destroy(&mut self, entity: Entity);

    /// Children of `entity` in attachment order
    fn children(&self, entity: Entity) -> Option<&[Entity]>;

    /// Parent of `entity`
    fn parent(&self, entity: Entity) -> Option<Entity>;

    /// Local transform of `entity`
    fn sqt(&self, entity: Entity) -> Option<&Transform>;

    /// Replace the local transform of `entity`
    fn set_sqt(&mut self, entity: Entity, sqt: Transform);

    /// Local-space bounds of `entity`
    fn aabb(&self, entity: Entity) -> Option<&Aabb>;

    /// Replace the local-space bounds of `entity`
    fn set_aabb(&mut self, entity: Entity, aabb: Aabb);

    /// Whether `entity` and all of its ancestors are enabled
    fn is_enabled(&self, entity: Entity) -> bool;

    /// Enable `entity`
    fn enable(&mut self, entity: Entity);

    /// Disable `entity`, which also hides its descendants
    fn disable(&mut self, entity: Entity);

    /// Blueprint `entity` was instantiated from, if any
    fn blueprint(&self, entity: Entity) -> Option<&str>;
}

#[derive(Debug, Default)]
struct Node {
    sqt: Transform,
    aabb: Option<Aabb>,
    parent: Option<Entity>,
    children: Vec<Entity>,
    enabled: bool,
    blueprint: Option<String>,
}

/// In-memory [`TransformSystem`]
#[derive(Debug)]
pub struct TransformTree {
    nodes: HashMap<Entity, Node>,
    dispatcher: Dispatcher,
}

impl TransformTree {
    /// Create an empty tree that reports changes to `dispatcher`
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            nodes: HashMap::new(),
            dispatcher,
        }
    }

    /// Number of entities in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no entities
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn is_ancestor(&self, ancestor: Entity, entity: Entity) -> bool {
        let mut current = Some(entity);
        while let Some(e) = current {
            if e == ancestor {
                return true;
            }
            current = self.nodes.get(&e).and_then(|n| n.parent);
        }
        false
    }

    /// Unlink `child` from its parent's child list without raising events
    fn detach(&mut self, child: Entity) -> Option<Entity> {
        let parent = self.nodes.get_mut(&child)?.parent.take()?;
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|c| *c != child);
        }
        Some(parent)
    }

    fn set_enabled(&mut self, entity: Entity, enabled: bool) {
        let Some(node) = self.nodes.get_mut(&entity) else {
            log::warn!("Cannot change enable state of unknown entity {entity}");
            return;
        };
        if node.enabled == enabled {
            return;
        }
        node.enabled = enabled;
        self.dispatcher.send(if enabled {
            Event::Enabled { target: entity }
        } else {
            Event::Disabled { target: entity }
        });
    }
}

impl TransformSystem for TransformTree {
    fn create(&mut self, entity: Entity, sqt: Transform) {
        if self.nodes.contains_key(&entity) {
            log::warn!("Transform already created for entity {entity}");
            return;
        }
        self.nodes.insert(
            entity,
            Node {
                sqt,
                enabled: true,
                ..Node::default()
            },
        );
    }

    fn create_child_with_blueprint(&mut self, parent: Entity, child: Entity, blueprint: &str) {
        self.create(child, Transform::identity());
        if let Some(node) = self.nodes.get_mut(&child) {
            node.blueprint = Some(blueprint.to_owned());
        }
        self.add_child(parent, child);
    }

    fn add_child(&mut self, parent: Entity, child: Entity) {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            log::warn!("Cannot attach {child} to {parent}: both need a transform");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Cannot attach {child} to {parent}: it would create a cycle");
            return;
        }
        let old_parent = self.detach(child);
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        self.dispatcher.send(Event::ParentChanged {
            target: child,
            old_parent,
            new_parent: Some(parent),
        });
    }

    fn remove_parent(&mut self, child: Entity) {
        if let Some(old_parent) = self.detach(child) {
            self.dispatcher.send(Event::ParentChanged {
                target: child,
                old_parent: Some(old_parent),
                new_parent: None,
            });
        }
    }

    fn destroy(&mut self, entity: Entity) {
        let old_parent = self.detach(entity);
        let mut pending = vec![entity];
        while let Some(e) = pending.pop() {
            if let Some(node) = self.nodes.remove(&e) {
                pending.extend(node.children);
            }
        }
        if old_parent.is_some() {
            self.dispatcher.send(Event::ParentChanged {
                target: entity,
                old_parent,
                new_parent: None,
            });
        }
    }

    fn children(&self, entity: Entity) -> Option<&[Entity]> {
        self.nodes.get(&entity).map(|n| n.children.as_slice())
    }

    fn parent(&self, entity: Entity) -> Option<Entity> {
        self.nodes.get(&entity).and_then(|n| n.parent)
    }

    fn sqt(&self, entity: Entity) -> Option<&Transform> {
        self.nodes.get(&entity).map(|n| &n.sqt)
    }

    fn set_sqt(&mut self, entity: Entity, sqt: Transform) {
        match self.nodes.get_mut(&entity) {
            Some(node) => node.sqt = sqt,
            None => log::warn!("Cannot set transform of unknown entity {entity}"),
        }
    }

    fn aabb(&self, entity: Entity) -> Option<&Aabb> {
        self.nodes.get(&entity).and_then(|n| n.aabb.as_ref())
    }

    fn set_aabb(&mut self, entity: Entity, aabb: Aabb) {
        let Some(node) = self.nodes.get_mut(&entity) else {
            log::warn!("Cannot set bounds of unknown entity {entity}");
            return;
        };
        node.aabb = Some(aabb);
        self.dispatcher.send(Event::AabbChanged { target: entity });
    }

    fn is_enabled(&self, entity: Entity) -> bool {
        let mut current = Some(entity);
        let mut seen_any = false;
        while let Some(e) = current {
            let Some(node) = self.nodes.get(&e) else { break };
            if !node.enabled {
                return false;
            }
            seen_any = true;
            current = node.parent;
        }
        seen_any
    }

    fn enable(&mut self, entity: Entity) {
        self.set_enabled(entity, true);
    }

    fn disable(&mut self, entity: Entity) {
        self.set_enabled(entity, false);
    }

    fn blueprint(&self, entity: Entity) -> Option<&str> {
        self.nodes.get(&entity).and_then(|n| n.blueprint.as_deref())
    }
}
