//! Math utilities and types
//!
//! Provides the 2D math types used by the scene graph. Transforms are
//! homogeneous 3x3 matrices composed in TRS order (translate * rotate * scale).

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix3, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3x3 homogeneous matrix for 2D affine transforms
pub type Mat3 = Matrix3<f32>;

/// Transform representing position, rotation, and scale in 2D
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Position in the parent's space
    pub position: Vec2,

    /// Rotation in radians (counter-clockwise)
    pub rotation: f32,

    /// Scale factors
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set rotation
    #[must_use]
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale
    #[must_use]
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat3 {
        let (sin, cos) = self.rotation.sin_cos();
        Mat3::new(
            cos * self.scale.x, -sin * self.scale.y, self.position.x,
            sin * self.scale.x, cos * self.scale.y, self.position.y,
            0.0, 0.0, 1.0,
        )
    }

    /// Decompose a TRS matrix back into position, rotation and scale
    ///
    /// Exact for matrices without shear. A chain of non-uniformly scaled,
    /// rotated parents can introduce shear; the result is then the closest
    /// rotation/scale pair along the first basis vector.
    pub fn from_matrix(matrix: &Mat3) -> Self {
        let position = Vec2::new(matrix.m13, matrix.m23);
        let x_axis = Vec2::new(matrix.m11, matrix.m21);
        let y_axis = Vec2::new(matrix.m12, matrix.m22);

        let rotation = x_axis.y.atan2(x_axis.x);
        let determinant = x_axis.x * y_axis.y - y_axis.x * x_axis.y;
        let scale_y = y_axis.magnitude() * determinant.signum();

        Self {
            position,
            rotation,
            scale: Vec2::new(x_axis.magnitude(), scale_y),
        }
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        transform_point(&self.to_matrix(), point)
    }
}

/// Apply a homogeneous 2D matrix to a point
pub fn transform_point(matrix: &Mat3, point: Vec2) -> Vec2 {
    let p = matrix * nalgebra::Vector3::new(point.x, point.y, 1.0);
    Vec2::new(p.x, p.y)
}

/// Apply a homogeneous 2D matrix to a direction (ignores translation)
pub fn transform_vector(matrix: &Mat3, vector: Vec2) -> Vec2 {
    let v = matrix * nalgebra::Vector3::new(vector.x, vector.y, 0.0);
    Vec2::new(v.x, v.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_identity_matrix() {
        assert_relative_eq!(Transform2D::identity().to_matrix(), Mat3::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_trs_order() {
        // Scale first, then rotate a quarter turn, then translate
        let transform = Transform2D::from_position(Vec2::new(10.0, 0.0))
            .with_rotation(FRAC_PI_2)
            .with_scale(Vec2::new(2.0, 1.0));

        let moved = transform.transform_point(Vec2::new(1.0, 0.0));
        assert_relative_eq!(moved, Vec2::new(10.0, 2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_decompose_matrix() {
        let original = Transform2D::from_position(Vec2::new(-3.0, 4.5))
            .with_rotation(0.7)
            .with_scale(Vec2::new(1.5, 0.5));

        let decomposed = Transform2D::from_matrix(&original.to_matrix());
        assert_relative_eq!(decomposed.position, original.position, epsilon = EPSILON);
        assert_relative_eq!(decomposed.rotation, original.rotation, epsilon = EPSILON);
        assert_relative_eq!(decomposed.scale, original.scale, epsilon = EPSILON);
    }

    #[test]
    fn test_decompose_mirrored_scale() {
        let original = Transform2D::identity().with_scale(Vec2::new(2.0, -3.0));
        let decomposed = Transform2D::from_matrix(&original.to_matrix());
        assert_relative_eq!(decomposed.scale, Vec2::new(2.0, -3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_vector_ignores_translation() {
        let matrix = Transform2D::from_position(Vec2::new(5.0, 5.0)).to_matrix();
        assert_relative_eq!(transform_vector(&matrix, Vec2::new(1.0, 0.0)), Vec2::new(1.0, 0.0), epsilon = EPSILON);
    }
}
