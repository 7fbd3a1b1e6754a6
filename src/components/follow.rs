//! Component for making an entity follow another entity on the level plane.
//!
//! The camera carries a [`Follow`] pointing at the player so it tracks the
//! player on X and Y. The depth axis is never followed; it belongs to the zoom
//! ramps. Camera locks override the followed axes afterwards.

use bevy_ecs::prelude::{Component, Entity};
use raylib::prelude::Vector2;

/// Component that makes an entity follow another entity's position.
///
/// The target is optional because the player is rebound on every level load
/// and may be missing between levels.
#[derive(Debug, Clone, Component)]
pub struct Follow {
    /// The entity to follow.
    pub target: Option<Entity>,
    /// Offset from the target's position.
    pub offset: Vector2,
    /// If true, follow the X axis.
    pub follow_x: bool,
    /// If true, follow the Y axis.
    pub follow_y: bool,
}

impl Follow {
    /// Follow both planar axes of `target`.
    pub fn new(target: Option<Entity>) -> Self {
        Self {
            target,
            offset: Vector2::zero(),
            follow_x: true,
            follow_y: true,
        }
    }

    /// Set the offset from the target's position.
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }
}
