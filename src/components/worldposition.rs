//! World-space position for entities that live on the level plane.
//!
//! The level is 2D, but the camera looks at it from a negative depth, so the
//! position carries a `z` component. Pegs and the player keep `z = 0.0`; the
//! camera's `z` is its zoom depth.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Vector2, Vector3};

#[derive(Component, Clone, Copy, Debug)]
pub struct WorldPosition {
    pub pos: Vector3,
}

impl WorldPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vector3 { x, y, z },
        }
    }

    /// Position on the level plane, dropping depth.
    pub fn planar(&self) -> Vector2 {
        Vector2 {
            x: self.pos.x,
            y: self.pos.y,
        }
    }
}
