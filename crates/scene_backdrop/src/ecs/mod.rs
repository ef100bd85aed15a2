//! Entity-Component-System primitives
//!
//! Entities are plain ids handed out by the [`World`]. Per-system state lives
//! in entity-keyed [`ComponentPool`]s owned by each system.

pub mod world;
pub mod entity;
pub mod component;
pub mod storage;

pub use world::World;
pub use entity::Entity;
pub use component::Component;
pub use storage::ComponentPool;
