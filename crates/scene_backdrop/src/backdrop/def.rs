//! Serialized backdrop configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::{Vec2, Vec3};

/// How a backdrop updates its owner's own bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AabbBehavior {
    /// Leave the owner's bounds alone
    #[default]
    None,
    /// Owner bounds become the children's bounds
    Content,
    /// Owner bounds become the children's bounds merged with the panel
    Backdrop,
}

/// Quad geometry block. Its presence selects a quad renderable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadDef {
    /// Vertex count along x
    pub verts_x: i32,
    /// Vertex count along y
    pub verts_y: i32,
    /// Corner rounding radius
    pub corner_radius: f32,
    /// Vertices per rounded corner
    pub corner_verts: i32,
    /// Whether to generate texture coordinates
    pub has_uv: bool,
}

impl Default for QuadDef {
    fn default() -> Self {
        Self {
            verts_x: 2,
            verts_y: 2,
            corner_radius: 0.0,
            corner_verts: 0,
            has_uv: false,
        }
    }
}

/// Configuration for one backdrop component
///
/// ```ron
/// (
///     offset: (0.0, 0.0, -0.01),
///     margin: (0.05, 0.05),
///     aabb_behavior: Backdrop,
///     animate_aabb_duration_ms: 250,
///     quad: Some((corner_radius: 0.02, corner_verts: 4)),
///     blueprint: Some("backdrop-panel"),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackdropDef {
    /// Added to the min corner of the panel
    #[serde(default)]
    pub offset: Vec3,
    /// Bottom-left margin, and top-right too unless overridden
    pub margin: Vec2,
    /// Top-right margin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_right_margin: Option<Vec2>,
    /// Owner bounds policy
    #[serde(default)]
    pub aabb_behavior: AabbBehavior,
    /// Transition time in milliseconds; zero or negative disables animation
    #[serde(default)]
    pub animate_aabb_duration_ms: i32,
    /// Quad geometry; a nine-patch is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quad: Option<QuadDef>,
    /// Blueprint the panel entity is created from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blueprint: Option<String>,
}

impl Default for BackdropDef {
    fn default() -> Self {
        Self {
            offset: Vec3::zeros(),
            margin: Vec2::zeros(),
            top_right_margin: None,
            aabb_behavior: AabbBehavior::None,
            animate_aabb_duration_ms: 0,
            quad: None,
            blueprint: None,
        }
    }
}

impl Config for BackdropDef {}

impl BackdropDef {
    /// Animation duration, with negative values treated as zero
    pub fn animate_aabb_duration(&self) -> Duration {
        Duration::from_millis(u64::try_from(self.animate_aabb_duration_ms).unwrap_or(0))
    }
}
