//! Component trait

/// Marker trait for components stored in a [`ComponentPool`](super::ComponentPool)
pub trait Component: 'static {
    /// Entity that owns this component
    fn entity(&self) -> super::Entity;
}
