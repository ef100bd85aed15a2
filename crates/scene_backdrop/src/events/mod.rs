//! Scene event dispatch
//!
//! Key principles:
//! - Events are a tagged enum, subscribers connect per [`EventType`]
//! - Delivery follows registration order
//! - Every subscriber owns an inbox, drained synchronously by the subscriber
//!   after each side-effecting call, so events raised by collaborators are
//!   handled before the triggering operation returns

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::ecs::{Entity, World};

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// An entity was attached to or detached from a parent
    ParentChanged,
    /// An entity's local bounding box was replaced
    AabbChanged,
    /// An entity became enabled
    Enabled,
    /// An entity became disabled
    Disabled,
    /// A layout pass requested a new size for an entity
    DesiredSizeChanged,
}

/// Scene event with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `target` moved from `old_parent` to `new_parent`
    ParentChanged {
        /// Entity whose parent changed
        target: Entity,
        /// Previous parent, if any
        old_parent: Option<Entity>,
        /// New parent, if any
        new_parent: Option<Entity>,
    },
    /// `target`'s local AABB changed
    AabbChanged {
        /// Entity whose bounds changed
        target: Entity,
    },
    /// `target` was enabled
    Enabled {
        /// Entity that was enabled
        target: Entity,
    },
    /// `target` was disabled
    Disabled {
        /// Entity that was disabled
        target: Entity,
    },
    /// `source` asked `target` to take the given size. `None` leaves an
    /// axis unconstrained.
    DesiredSizeChanged {
        /// Entity being resized
        target: Entity,
        /// Entity that issued the request
        source: Entity,
        /// Desired width
        x: Option<f32>,
        /// Desired height
        y: Option<f32>,
        /// Desired depth
        z: Option<f32>,
    },
}

impl Event {
    /// Type tag of this event
    pub fn event_type(&self) -> EventType {
        match self {
            Self::ParentChanged { .. } => EventType::ParentChanged,
            Self::AabbChanged { .. } => EventType::AabbChanged,
            Self::Enabled { .. } => EventType::Enabled,
            Self::Disabled { .. } => EventType::Disabled,
            Self::DesiredSizeChanged { .. } => EventType::DesiredSizeChanged,
        }
    }

    /// Entity the event is about
    pub fn target(&self) -> Entity {
        match *self {
            Self::ParentChanged { target, .. }
            | Self::AabbChanged { target }
            | Self::Enabled { target }
            | Self::Disabled { target }
            | Self::DesiredSizeChanged { target, .. } => target,
        }
    }
}

/// Handle identifying one subscriber's connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u32);

/// Receiver of dispatched events
pub trait EventHandler {
    /// Handle one event. May mutate the world, which can raise more events.
    fn on_event(&mut self, world: &mut World, event: &Event);
}

#[derive(Debug, Default)]
struct DispatcherState {
    next_id: u32,
    subscriptions: Vec<(SubscriberId, Vec<EventType>)>,
    inboxes: HashMap<SubscriberId, VecDeque<Event>>,
}

/// Shared, single-threaded event bus
///
/// Cloning yields another handle to the same bus, so collaborators can raise
/// events without borrowing the [`World`] that owns them.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    state: Rc<RefCell<DispatcherState>>,
}

impl Dispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `event_types` and return the subscriber handle
    pub fn connect(&self, event_types: &[EventType]) -> SubscriberId {
        let mut state = self.state.borrow_mut();
        let id = SubscriberId(state.next_id);
        state.next_id += 1;
        state.subscriptions.push((id, event_types.to_vec()));
        state.inboxes.insert(id, VecDeque::new());
        id
    }

    /// Drop every subscription of `subscriber` along with its pending events
    pub fn disconnect_all(&self, subscriber: SubscriberId) {
        let mut state = self.state.borrow_mut();
        state.subscriptions.retain(|(id, _)| *id != subscriber);
        state.inboxes.remove(&subscriber);
    }

    /// Queue `event` for every subscriber interested in its type, in
    /// registration order
    pub fn send(&self, event: Event) {
        let mut state = self.state.borrow_mut();
        let event_type = event.event_type();
        let DispatcherState { subscriptions, inboxes, .. } = &mut *state;
        for (id, types) in subscriptions.iter() {
            if types.contains(&event_type) {
                if let Some(inbox) = inboxes.get_mut(id) {
                    inbox.push_back(event.clone());
                }
            }
        }
    }

    /// Pop the oldest pending event for `subscriber`
    pub fn next_event(&self, subscriber: SubscriberId) -> Option<Event> {
        self.state
            .borrow_mut()
            .inboxes
            .get_mut(&subscriber)
            .and_then(VecDeque::pop_front)
    }

    /// Number of events waiting for `subscriber`
    pub fn pending(&self, subscriber: SubscriberId) -> usize {
        self.state
            .borrow()
            .inboxes
            .get(&subscriber)
            .map_or(0, VecDeque::len)
    }
}

/// Deliver every pending event of `subscriber` to `handler`, including events
/// raised while handling earlier ones. Returns the number delivered.
pub fn drain_events<H: EventHandler>(
    world: &mut World,
    subscriber: SubscriberId,
    handler: &mut H,
) -> usize {
    let dispatcher = world.dispatcher().clone();
    let mut delivered = 0;
    while let Some(event) = dispatcher.next_event(subscriber) {
        handler.on_event(world, &event);
        delivered += 1;
    }
    delivered
}
