//! Player marker and its scripted run speed.

use bevy_ecs::prelude::Component;

/// Marks the entity the controller binds to as "the player".
///
/// The demo player runs along +X at `speed` units per second; there is no
/// input handling.
#[derive(Component, Clone, Copy, Debug)]
pub struct Player {
    pub speed: f32,
}

impl Player {
    pub fn new(speed: f32) -> Self {
        Player { speed }
    }
}
