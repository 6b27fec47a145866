//! Game-specific components

use scene_engine::prelude::*;

/// Asteroid component
#[derive(Debug, Clone)]
pub struct Asteroid {
    /// Asteroid size category
    pub size: AsteroidSize,

    /// Collision radius in world units
    pub radius: f32,
}

impl Component for Asteroid {}

impl Asteroid {
    /// Asteroid of the given size with a radius scaled from `base_radius`
    pub fn new(size: AsteroidSize, base_radius: f32) -> Self {
        Self {
            size,
            radius: base_radius * size.scale_factor(),
        }
    }
}

/// Asteroid size categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidSize {
    /// Large asteroid (splits into medium)
    Large,

    /// Medium asteroid (splits into small)
    Medium,

    /// Small asteroid (destroyed completely)
    Small,
}

impl AsteroidSize {
    /// Get the scale factor for this size
    pub fn scale_factor(self) -> f32 {
        match self {
            Self::Large => 2.0,
            Self::Medium => 1.5,
            Self::Small => 1.0,
        }
    }

    /// Get the points awarded for destroying this size
    pub fn points(self) -> u32 {
        match self {
            Self::Large => 20,
            Self::Medium => 50,
            Self::Small => 100,
        }
    }

    /// Get the next smaller size when split
    pub fn split_into(self) -> Option<Self> {
        match self {
            Self::Large => Some(Self::Medium),
            Self::Medium => Some(Self::Small),
            Self::Small => None,
        }
    }
}

/// Bullet projectile component
#[derive(Debug, Clone)]
pub struct Bullet {
    /// Collision radius in world units
    pub radius: f32,
}

impl Component for Bullet {}

/// Linear and angular velocity, integrated into the local transform each frame
#[derive(Debug, Clone, Default)]
pub struct Velocity {
    /// Linear velocity in units per second
    pub linear: Vec2,

    /// Angular velocity in radians per second
    pub angular: f32,
}

impl Velocity {
    /// Velocity with no spin
    pub fn linear(linear: Vec2) -> Self {
        Self { linear, angular: 0.0 }
    }
}

impl Component for Velocity {
    fn update(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        let delta = ctx.delta_time();
        let transform = ctx.transform_mut()?;
        transform.translate(self.linear * delta);
        if self.angular != 0.0 {
            transform.rotate(self.angular * delta);
        }
        Ok(())
    }
}

/// Screen bounds for wrap-around
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBounds {
    /// Minimum X coordinate
    pub min_x: f32,

    /// Maximum X coordinate
    pub max_x: f32,

    /// Minimum Y coordinate
    pub min_y: f32,

    /// Maximum Y coordinate
    pub max_y: f32,
}

impl ScreenBounds {
    /// Bounds centred on the origin
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            min_x: -width * 0.5,
            max_x: width * 0.5,
            min_y: -height * 0.5,
            max_y: height * 0.5,
        }
    }

    /// Wrap a point that left the bounds back in from the opposite edge
    pub fn wrap(&self, point: Vec2) -> Vec2 {
        let width = self.max_x - self.min_x;
        let height = self.max_y - self.min_y;
        let mut wrapped = point;
        if wrapped.x < self.min_x {
            wrapped.x += width;
        } else if wrapped.x > self.max_x {
            wrapped.x -= width;
        }
        if wrapped.y < self.min_y {
            wrapped.y += height;
        } else if wrapped.y > self.max_y {
            wrapped.y -= height;
        }
        wrapped
    }
}

/// Wraps the entity's local position around the screen edges
///
/// Only meaningful on root entities, whose local space is world space.
#[derive(Debug, Clone)]
pub struct WrapAround {
    /// Screen bounds for wrapping
    pub bounds: ScreenBounds,
}

impl Component for WrapAround {
    fn update(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
        let transform = ctx.transform_mut()?;
        let position = transform.position();
        let wrapped = self.bounds.wrap(position);
        if wrapped != position {
            transform.set_position(wrapped);
        }
        Ok(())
    }
}

/// Shared play field settings, stored as a scene resource
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    /// Wrap-around bounds
    pub bounds: ScreenBounds,

    /// Radius of a small asteroid
    pub asteroid_radius: f32,
}

/// Running score, stored as a scene resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    /// Points so far
    pub points: u32,

    /// Asteroids destroyed so far
    pub asteroids_destroyed: u32,

    /// Bullets fired so far
    pub shots_fired: u32,
}

impl Score {
    /// Credit a destroyed asteroid
    pub fn record_hit(&mut self, size: AsteroidSize) {
        self.points += size.points();
        self.asteroids_destroyed += 1;
    }
}
