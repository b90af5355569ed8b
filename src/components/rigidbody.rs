//! Kinematic body shared by every moving entity.
//!
//! The [`RigidBody`] component stores velocity and acceleration in pixels per
//! tick. The integration law is applied once per tick by
//! [`crate::systems::movement`]:
//!
//! ```text
//! a.x -= v.x * friction
//! v'   = v + a
//! p'   = p + v' + 0.5 * a
//! ```
//!
//! followed by horizontal wrap-around at the screen edges (no vertical wrap)
//! and an optional clamp on the absolute horizontal speed.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic body storing per-tick velocity and acceleration.
///
/// # Fields
/// - `velocity` - pixels per tick
/// - `acceleration` - pixels per tick squared
/// - `friction` - horizontal drag coefficient, subtracted from `acceleration.x`
///   in proportion to `velocity.x` before integrating
/// - `max_speed_x` - optional clamp on `|velocity.x|`, applied after integration
/// - `wrap_x` - wrap the position horizontally at the screen edges
/// - `frozen` - when true the movement system leaves the body untouched
#[derive(Component, Clone, Debug, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub friction: f32,
    pub max_speed_x: Option<f32>,
    pub wrap_x: bool,
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Body at rest with no acceleration that wraps at the screen edges.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            friction: 0.0,
            max_speed_x: None,
            wrap_x: true,
            frozen: false,
        }
    }

    /// Body under constant downward acceleration.
    pub fn with_gravity(gravity: f32) -> Self {
        Self {
            acceleration: Vec2::new(0.0, gravity),
            ..Self::new()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_max_speed_x(mut self, max_speed_x: f32) -> Self {
        self.max_speed_x = Some(max_speed_x);
        self
    }

    /// Disable horizontal wrap-around (projectiles fly off screen).
    pub fn without_wrap(mut self) -> Self {
        self.wrap_x = false;
        self
    }

    /// Advance the body and `position` by one tick.
    ///
    /// `screen_width` bounds the horizontal wrap-around.
    pub fn integrate(&mut self, position: &mut Vec2, screen_width: f32) {
        self.acceleration.x -= self.velocity.x * self.friction;
        self.velocity += self.acceleration;
        *position += self.velocity + 0.5 * self.acceleration;

        if self.wrap_x {
            position.x = wrap_x(position.x, screen_width);
        }

        if let Some(max) = self.max_speed_x {
            if self.velocity.x.abs() > max {
                self.velocity.x = max * self.velocity.x.signum();
            }
        }
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}

/// Horizontal wrap-around: leaving on the left re-enters on the right edge
/// and vice versa. Positions inside `[0, width]` are returned unchanged.
pub fn wrap_x(x: f32, width: f32) -> f32 {
    if x < 0.0 {
        width
    } else if x > width {
        0.0
    } else {
        x
    }
}
