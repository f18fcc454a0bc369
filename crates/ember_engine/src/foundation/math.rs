//! Math utilities and types
//!
//! Thin aliases over `nalgebra` so components and systems share one vocabulary.

pub use nalgebra::{Matrix4, Rotation3, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Opaque white, the default tint for sprites and UI images
pub fn white() -> Vec4 {
    Vec4::new(1.0, 1.0, 1.0, 1.0)
}

/// Build a model matrix from translation, Euler rotation (radians) and scale
pub fn model_matrix(position: &Vec3, rotation: &Vec3, scale: &Vec3) -> Mat4 {
    let rotation = Rotation3::from_euler_angles(rotation.x, rotation.y, rotation.z);
    Mat4::new_translation(position) * rotation.to_homogeneous() * Mat4::new_nonuniform_scaling(scale)
}
