//! Backdrop errors

use thiserror::Error;

use crate::ecs::Entity;

/// Structural errors raised by the backdrop system
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackdropError {
    /// `create` was handed a def of another type
    #[error("Invalid def type {0}, expecting BackdropDef")]
    InvalidDefType(String),

    /// The entity already owns a backdrop
    #[error("Backdrop already created for {0}")]
    AlreadyExists(Entity),

    /// A nine-patch backdrop needs a nine-patch system
    #[error("Backdrop missing NinePatchSystem for {0}")]
    MissingNinePatchSystem(Entity),

    /// The panel child could not be attached, usually because the owner
    /// has no transform
    #[error("Backdrop panel could not be attached to {0}")]
    PanelNotAttached(Entity),

    /// Animation was requested but no animation system can run it
    #[error("Backdrop on {0} needs an animation system with the backdrop channel")]
    MissingAnimationSystem(Entity),

    /// A backdrop owner has no children, so its panel is gone
    #[error("{0} has a backdrop but no children")]
    MissingChild(Entity),
}
