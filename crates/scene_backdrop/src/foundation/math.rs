//! Math utilities and types
//!
//! Provides the vector, transform and bounding box types used by the scene
//! hierarchy and the backdrop system.

pub use nalgebra::{Vector2, Vector3, Matrix4, Quaternion, Unit};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing scale, rotation and translation (SQT)
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position relative to the parent
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Builder pattern: Set scale (non-uniform)
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Axis-aligned bounding box, defined by its min and max corners
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the full size (max - min) of the AABB
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Smallest box enclosing both `self` and `other`
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Bounding box of a set of points. Returns `None` for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(*first, *first), |acc, p| Self {
            min: acc.min.inf(p),
            max: acc.max.sup(p),
        }))
    }

    /// The 8 corners of this box, each mapped through `transform`.
    pub fn transformed_corners(&self, transform: &Transform) -> [Vec3; 8] {
        let matrix = transform.to_matrix();
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
        .map(|corner| matrix.transform_point(&Point3::from(corner)).coords)
    }

    /// Bounds of this box after `transform`, computed from the transformed
    /// corners. Rotated boxes therefore grow rather than being fit exactly.
    pub fn transformed_bounds(&self, transform: &Transform) -> Self {
        Self::from_points(&self.transformed_corners(transform)).unwrap_or_default()
    }

    /// Flatten into `[min.x, min.y, min.z, max.x, max.y, max.z]`
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.min.x, self.min.y, self.min.z,
            self.max.x, self.max.y, self.max.z,
        ]
    }

    /// Inverse of [`Aabb::to_array`]. Returns `None` unless exactly 6 values
    /// are given.
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        match *values {
            [min_x, min_y, min_z, max_x, max_y, max_z] => Some(Self::new(
                Vec3::new(min_x, min_y, min_z),
                Vec3::new(max_x, max_y, max_z),
            )),
            _ => None,
        }
    }
}
