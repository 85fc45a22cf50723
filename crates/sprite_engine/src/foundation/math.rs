//! Math utilities and types
//!
//! Provides the fundamental math types for 2D rendering. Quads live in 3D
//! space (the z component carries layering information for callers that
//! want it), so the aliases cover both 2D and 3D vectors.

pub use nalgebra::{Matrix4, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// RGBA color with components in the 0.0..=1.0 range
pub type Color = Vector4<f32>;

/// Build a quad world transform from position, size, and a z-axis rotation.
///
/// The composition order is translate * rotate * scale, so the unit quad is
/// first scaled to `size`, then spun around its own center, then moved to
/// `position`.
pub fn quad_transform(position: Vec3, size: Vec2, rotation_degrees: f32) -> Mat4 {
    Mat4::new_translation(&position)
        * Mat4::from_axis_angle(&Vector3::z_axis(), rotation_degrees.to_radians())
        * Mat4::new_nonuniform_scaling(&Vec3::new(size.x, size.y, 1.0))
}

/// Build a circle world transform from position and size.
///
/// Circles have no meaningful rotation; the transform is translate * scale.
pub fn circle_transform(position: Vec3, size: Vec2) -> Mat4 {
    Mat4::new_translation(&position)
        * Mat4::new_nonuniform_scaling(&Vec3::new(size.x, size.y, 1.0))
}
