//! Local transform with a cached matrix

use std::cell::Cell;

use crate::foundation::math::{Mat3, Transform2D, Vec2};

/// Position, rotation and scale of an entity relative to its parent
///
/// The local matrix is built on first read and reused until one of the
/// setters runs. Global matrices are never cached here; the scene composes
/// them from the parent chain on every query.
#[derive(Debug, Clone)]
pub struct TransformCache {
    position: Vec2,
    rotation: f32,
    scale: Vec2,
    local: Cell<Option<Mat3>>,
}

impl Default for TransformCache {
    fn default() -> Self {
        Self::from_transform(Transform2D::identity())
    }
}

impl TransformCache {
    /// Identity transform
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from plain transform values
    pub fn from_transform(transform: Transform2D) -> Self {
        Self {
            position: transform.position,
            rotation: transform.rotation,
            scale: transform.scale,
            local: Cell::new(None),
        }
    }

    /// Local position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Local rotation in radians
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Local scale
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Snapshot of the local values
    pub fn to_transform(&self) -> Transform2D {
        Transform2D {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Set local position
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.invalidate();
    }

    /// Set local rotation in radians
    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
        self.invalidate();
    }

    /// Set local scale
    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
        self.invalidate();
    }

    /// Replace all local values at once
    pub fn set(&mut self, transform: Transform2D) {
        self.position = transform.position;
        self.rotation = transform.rotation;
        self.scale = transform.scale;
        self.invalidate();
    }

    /// Move by `offset` in parent space
    pub fn translate(&mut self, offset: Vec2) {
        self.set_position(self.position + offset);
    }

    /// Rotate by `angle` radians
    pub fn rotate(&mut self, angle: f32) {
        self.set_rotation(self.rotation + angle);
    }

    /// Local TRS matrix
    pub fn local_matrix(&self) -> Mat3 {
        if let Some(matrix) = self.local.get() {
            return matrix;
        }
        let matrix = self.to_transform().to_matrix();
        self.local.set(Some(matrix));
        matrix
    }

    /// Whether the local matrix is currently cached
    pub fn is_cached(&self) -> bool {
        self.local.get().is_some()
    }

    fn invalidate(&mut self) {
        self.local.set(None);
    }
}

impl From<Transform2D> for TransformCache {
    fn from(transform: Transform2D) -> Self {
        Self::from_transform(transform)
    }
}
